use std::path::Path;

use super::record::{Record, FIELD_EXTENSION};
use super::table::{check_file, read_rows, Row};
use crate::error::{ExtractError, Result};

/// A far-field export: an arbitrary-width numeric table, stored column-major.
#[derive(Debug, Clone)]
pub struct FieldTable {
    record: Record,
    columns: Vec<Vec<f64>>,
}

impl FieldTable {
    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }
}

/// Load the `.ffs` table `record` points at, relative to `dir`.
pub fn load_field(dir: &Path, record: &Record) -> Result<FieldTable> {
    let path = dir.join(&record.data_file);
    check_file(&path, FIELD_EXTENSION)?;
    let rows = read_rows(&path)?;
    let table = table_from_rows(&path, record, &rows)?;
    log::debug!(
        "Loaded {}x{} field table for '{}'",
        table.row_count(),
        table.column_count(),
        record.display_name()
    );
    Ok(table)
}

fn table_from_rows(path: &Path, record: &Record, rows: &[Row]) -> Result<FieldTable> {
    let width = rows.first().map_or(0, |r| r.values.len());
    let mut columns = vec![Vec::with_capacity(rows.len()); width];
    for row in rows {
        if row.values.len() != width {
            return Err(ExtractError::invalid(
                path,
                format!("line {}: {} columns, expected {width}", row.line, row.values.len()),
            ));
        }
        for (column, value) in columns.iter_mut().zip(&row.values) {
            column.push(*value);
        }
    }
    Ok(FieldTable {
        record: record.clone(),
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::table::parse_rows;

    fn table(body: &str) -> Result<FieldTable> {
        let path = Path::new("ff.ffs");
        let rows = parse_rows(path, &format!("a\nb\nc\nd\n{body}"))?;
        table_from_rows(path, &Record::default(), &rows)
    }

    #[test]
    fn transposes_rows_into_columns() {
        let t = table("0 0 1 2 3\n0 5 4 3 2\n").unwrap();
        assert_eq!(t.column_count(), 5);
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.columns()[1], vec![0.0, 5.0]);
        assert_eq!(t.columns()[4], vec![3.0, 2.0]);
    }

    #[test]
    fn empty_body_gives_empty_table() {
        let t = table("").unwrap();
        assert_eq!(t.column_count(), 0);
        assert_eq!(t.row_count(), 0);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(matches!(
            table("1 2 3\n1 2\n").unwrap_err(),
            ExtractError::InvalidFormat { .. }
        ));
    }
}
