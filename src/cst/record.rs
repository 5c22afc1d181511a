use std::path::Path;

use serde::Serialize;

use super::table::check_file;
use crate::error::{ExtractError, Result};

/// Extension of the result directory file inside a project.
pub const DIRECTORY_EXTENSION: &str = "res";
/// Extension of 1D signal curve files.
pub const SIGNAL_EXTENSION: &str = "sig";
/// Extension of far-field table files.
pub const FIELD_EXTENSION: &str = "ffs";

const VALUE_SEPARATOR: &str = "=s:";
const COUNT_SEPARATOR: &str = "=i:";
const TREE_SEPARATOR: char = '\\';

// ---------------------------------------------------------------------------
// Record – one entry of the result directory
// ---------------------------------------------------------------------------

/// One result entry: metadata plus the data file holding its samples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Record {
    pub kind: String,
    pub subtype: String,
    pub problem_class: String,
    pub visibility: String,
    pub creation: String,
    pub lifetime: String,
    pub result_kind: String,
    pub parametric: String,
    /// Backslash-separated position in the result tree.
    pub tree_path: String,
    /// Data file name, relative to the result directory.
    pub data_file: String,
}

/// Directory key → record field. Keys not listed here are ignored.
fn field_slot<'a>(record: &'a mut Record, key: &str) -> Option<&'a mut String> {
    let slot = match key {
        "type" => &mut record.kind,
        "subtype" => &mut record.subtype,
        "problemclass" => &mut record.problem_class,
        "visibility" => &mut record.visibility,
        "creation" => &mut record.creation,
        "lifetime" => &mut record.lifetime,
        "result" => &mut record.result_kind,
        "parametric" => &mut record.parametric,
        "treepath" => &mut record.tree_path,
        "files" => &mut record.data_file,
        _ => return None,
    };
    Some(slot)
}

const DATA_FILE_KEY: &str = "files";

impl Record {
    /// Last segment of the tree path.
    pub fn display_name(&self) -> &str {
        self.tree_path
            .rsplit(TREE_SEPARATOR)
            .next()
            .unwrap_or(&self.tree_path)
    }

    pub fn is_signal(&self) -> bool {
        has_extension(&self.data_file, SIGNAL_EXTENSION)
    }

    pub fn is_field(&self) -> bool {
        has_extension(&self.data_file, FIELD_EXTENSION)
    }

    /// Build a record from one group of `key=s:value` lines.
    fn from_lines(lines: &[&str]) -> std::result::Result<Self, String> {
        let mut record = Record::default();
        let mut has_data_file = false;
        for line in lines {
            let (key, value) = line
                .split_once(VALUE_SEPARATOR)
                .ok_or_else(|| format!("line '{line}' is not a key{VALUE_SEPARATOR}value pair"))?;
            if let Some(slot) = field_slot(&mut record, key) {
                *slot = value.to_string();
                has_data_file |= key == DATA_FILE_KEY;
            }
        }
        if !has_data_file {
            return Err(format!("missing '{DATA_FILE_KEY}' key"));
        }
        Ok(record)
    }
}

fn has_extension(file: &str, extension: &str) -> bool {
    Path::new(file)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == extension)
}

// ---------------------------------------------------------------------------
// Directory parsing
// ---------------------------------------------------------------------------

/// Parse a result directory file into its records, in file order.
pub fn parse_directory(path: &Path) -> Result<Vec<Record>> {
    check_file(path, DIRECTORY_EXTENSION)?;
    let text = std::fs::read_to_string(path)?;
    let records = parse_directory_text(path, &text)?;
    log::info!("Parsed {} records from {}", records.len(), path.display());
    Ok(records)
}

pub(crate) fn parse_directory_text(path: &Path, text: &str) -> Result<Vec<Record>> {
    let lines: Vec<&str> = text.lines().collect();

    let header_end = lines
        .iter()
        .position(|l| l.trim().is_empty())
        .ok_or_else(|| ExtractError::invalid(path, "no blank line after the header"))?;
    let declared = declared_count(&lines[..header_end])
        .ok_or_else(|| ExtractError::invalid(path, "second header line is not a key=i:<count> entry"))?;

    let mut records = Vec::with_capacity(declared);
    let mut group: Vec<&str> = Vec::new();
    // A trailing group without a final blank line still counts.
    for line in lines[header_end..].iter().map(|l| l.trim()).chain(std::iter::once("")) {
        if !line.is_empty() {
            group.push(line);
            continue;
        }
        if group.is_empty() {
            continue;
        }
        let record = Record::from_lines(&group).map_err(|reason| ExtractError::MalformedRecord {
            path: path.to_path_buf(),
            index: records.len(),
            reason,
        })?;
        log::debug!("record #{}: {}", records.len(), record.tree_path);
        records.push(record);
        group.clear();
    }

    if records.len() != declared {
        return Err(ExtractError::CountMismatch {
            path: path.to_path_buf(),
            declared,
            found: records.len(),
        });
    }
    Ok(records)
}

fn declared_count(header: &[&str]) -> Option<usize> {
    let (_, count) = header.get(1)?.split_once(COUNT_SEPARATOR)?;
    count.trim().parse().ok()
}

/// Keep records whose tree path contains `substring`. An empty substring
/// keeps everything.
pub fn filter_records(records: Vec<Record>, substring: &str) -> Vec<Record> {
    if substring.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| r.tree_path.contains(substring))
        .collect()
}

/// Parse the directory and keep the records under `substring`.
pub fn extract(path: &Path, substring: &str) -> Result<Vec<Record>> {
    let records = filter_records(parse_directory(path)?, substring);
    log::debug!("{} records match '{substring}'", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(tree: &str, file: &str) -> String {
        format!(
            "type=s:XYSIGNAL2\nsubtype=s:linear\nproblemclass=s:High Frequency\n\
             visibility=s:visible\ncreation=s:internal\nlifetime=s:rebuild\n\
             result=s:complex\nparametric=s:P\ntreepath=s:{tree}\nfiles=s:{file}\n"
        )
    }

    fn directory(declared: usize, groups: &[String]) -> String {
        let mut text = format!("[Version]=s:2024\nNumberOfResults=i:{declared}\n\n");
        for g in groups {
            text.push_str(g);
            text.push('\n');
        }
        text
    }

    fn path() -> &'static Path {
        Path::new("Model.res")
    }

    #[test]
    fn parses_all_fields_in_order() {
        let text = directory(
            2,
            &[
                group(r"1D Results\Efficiencies\System Tot. Efficiency [AC1]", "eff1.sig"),
                group(r"Farfields\farfield (f=2.4) [1]", "ff1.ffs"),
            ],
        );
        let records = parse_directory_text(path(), &text).unwrap();
        assert_eq!(records.len(), 2);
        let r = &records[0];
        assert_eq!(r.kind, "XYSIGNAL2");
        assert_eq!(r.problem_class, "High Frequency");
        assert_eq!(r.result_kind, "complex");
        assert_eq!(r.parametric, "P");
        assert_eq!(r.display_name(), "System Tot. Efficiency [AC1]");
        assert!(r.is_signal());
        assert!(!records[1].is_signal());
        assert!(records[1].is_field());
    }

    #[test]
    fn count_mismatch_is_an_error() {
        let text = directory(3, &[group("a", "a.sig"), group("b", "b.sig")]);
        match parse_directory_text(path(), &text).unwrap_err() {
            ExtractError::CountMismatch { declared, found, .. } => {
                assert_eq!((declared, found), (3, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn trailing_group_without_blank_line_counts() {
        let mut text = directory(1, &[]);
        text.push_str(group("a", "a.sig").trim_end());
        let records = parse_directory_text(path(), &text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data_file, "a.sig");
    }

    #[test]
    fn multiple_blank_lines_do_not_create_groups() {
        let text = format!(
            "h\nN=i:2\n\n\n\n{}\n\n\n{}",
            group("a", "a.sig"),
            group("b", "b.sig")
        );
        assert_eq!(parse_directory_text(path(), &text).unwrap().len(), 2);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let text = "h\nN=i:1\n\nfuture=s:thing\ntreepath=s:x\\y\nfiles=s:y.sig\n";
        let records = parse_directory_text(path(), text).unwrap();
        assert_eq!(records[0].display_name(), "y");
        assert_eq!(records[0].kind, "");
    }

    #[test]
    fn values_may_contain_the_separator() {
        let text = "h\nN=i:1\n\ntreepath=s:a=s:b\nfiles=s:x.sig\n";
        let records = parse_directory_text(path(), text).unwrap();
        assert_eq!(records[0].tree_path, "a=s:b");
    }

    #[test]
    fn missing_data_file_is_malformed() {
        let text = "h\nN=i:1\n\ntreepath=s:a\n";
        assert!(matches!(
            parse_directory_text(path(), text).unwrap_err(),
            ExtractError::MalformedRecord { index: 0, .. }
        ));
    }

    #[test]
    fn line_without_separator_is_malformed() {
        let text = "h\nN=i:1\n\ntreepath a\nfiles=s:x.sig\n";
        assert!(matches!(
            parse_directory_text(path(), text).unwrap_err(),
            ExtractError::MalformedRecord { .. }
        ));
    }

    #[test]
    fn bad_header_is_invalid_format() {
        for text in ["h\nN=i:1\nfiles=s:x.sig\n", "h\n\nfiles=s:x.sig\n", "h\nN=i:many\n\n"] {
            assert!(
                matches!(
                    parse_directory_text(path(), text).unwrap_err(),
                    ExtractError::InvalidFormat { .. }
                ),
                "{text:?}"
            );
        }
    }

    #[test]
    fn filter_is_plain_substring_match() {
        let records = vec![
            Record { tree_path: r"1D\Eff [AC1]".into(), ..Default::default() },
            Record { tree_path: r"1D\S-Params\S1,1".into(), ..Default::default() },
            Record { tree_path: r"1D\Eff [AC2]".into(), ..Default::default() },
        ];
        let kept = filter_records(records.clone(), "Eff [");
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].display_name(), "Eff [AC2]");
        assert_eq!(filter_records(records.clone(), ""), records);
        assert!(filter_records(records, ".*").is_empty());
    }

    #[test]
    fn display_name_without_hierarchy() {
        let r = Record { tree_path: "flat".into(), ..Default::default() };
        assert_eq!(r.display_name(), "flat");
    }
}
