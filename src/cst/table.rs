use std::path::Path;

use crate::error::{ExtractError, Result};

/// Lines discarded at the top of every exported data file.
pub const DATA_HEADER_LINES: usize = 4;

/// One parsed numeric row with its 1-based line number in the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub line: usize,
    pub values: Vec<f64>,
}

/// Fail unless `path` carries `extension` and exists.
///
/// The extension is checked first, so a wrong file type is reported as such
/// even when the file is also missing.
pub fn check_file(path: &Path, extension: &str) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if ext != extension {
        return Err(ExtractError::invalid(
            path,
            format!("expected a .{extension} file, got .{ext}"),
        ));
    }
    if !path.is_file() {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Read a numeric export: skip the fixed header, then parse every non-blank
/// line as whitespace-separated decimals. `NaN` and infinities are rejected.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let text = std::fs::read_to_string(path)?;
    parse_rows(path, &text)
}

pub(crate) fn parse_rows(path: &Path, text: &str) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for (idx, raw) in text.lines().enumerate().skip(DATA_HEADER_LINES) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let values = line
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ExtractError::NumericParse {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        token: tok.to_string(),
                    })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(Row {
            line: idx + 1,
            values,
        });
    }
    Ok(rows)
}
