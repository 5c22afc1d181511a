use std::path::Path;

use rayon::prelude::*;

use super::record::{Record, SIGNAL_EXTENSION};
use super::table::{check_file, read_rows, Row};
use crate::error::{ExtractError, Result};
use crate::frequency::Unit;

/// Axis unit of exported signal curves unless told otherwise.
pub const DEFAULT_AXIS_UNIT: Unit = Unit::GHz;

// ---------------------------------------------------------------------------
// Value – one curve sample
// ---------------------------------------------------------------------------

/// A sample value: 2-column files hold reals, 3-column files complex pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Real(f64),
    Complex { re: f64, im: f64 },
}

impl Value {
    /// Real component; the only part efficiency statistics look at.
    pub fn re(&self) -> f64 {
        match *self {
            Value::Real(v) => v,
            Value::Complex { re, .. } => re,
        }
    }

    pub fn im(&self) -> f64 {
        match *self {
            Value::Real(_) => 0.0,
            Value::Complex { im, .. } => im,
        }
    }
}

// ---------------------------------------------------------------------------
// Curve – the samples behind one record
// ---------------------------------------------------------------------------

/// Frequency-sorted samples loaded from one signal file.
#[derive(Debug, Clone)]
pub struct Curve {
    record: Record,
    unit: Unit,
    x: Vec<f64>,
    y: Vec<Value>,
}

impl Curve {
    /// Build a curve, checking it is non-empty, `x` and `y` have equal
    /// length, every sample is finite, and `x` never decreases.
    pub fn new(record: Record, unit: Unit, x: Vec<f64>, y: Vec<Value>) -> Result<Self> {
        if x.is_empty() || y.is_empty() {
            return Err(ExtractError::EmptyCurve(record.display_name().to_string()));
        }
        if x.len() != y.len() {
            return Err(ExtractError::invalid(
                &record.data_file,
                format!("{} frequencies but {} values", x.len(), y.len()),
            ));
        }
        let finite = |v: &Value| v.re().is_finite() && v.im().is_finite();
        if let Some(i) = (0..x.len()).find(|&i| !x[i].is_finite() || !finite(&y[i])) {
            return Err(ExtractError::invalid(
                &record.data_file,
                format!("non-finite value at sample {}", i + 1),
            ));
        }
        if let Some(i) = x.windows(2).position(|w| w[0] > w[1]) {
            return Err(ExtractError::invalid(
                &record.data_file,
                format!("frequency axis decreases at sample {}", i + 1),
            ));
        }
        Ok(Curve { record, unit, x, y })
    }

    /// Reinterpret the x axis as being in `unit`.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn name(&self) -> &str {
        self.record.display_name()
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[Value] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Lowest frequency; `x` is sorted so this is the first sample.
    pub fn x_min(&self) -> f64 {
        self.x.first().copied().unwrap_or(f64::NAN)
    }

    pub fn x_max(&self) -> f64 {
        self.x.last().copied().unwrap_or(f64::NAN)
    }

    pub fn real_values(&self) -> Vec<f64> {
        self.y.iter().map(Value::re).collect()
    }

    pub fn is_complex(&self) -> bool {
        self.y.iter().any(|v| matches!(v, Value::Complex { .. }))
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the signal file `record` points at, relative to `dir`.
///
/// Rows must already be sorted by frequency, as the exporter writes them;
/// a row below its predecessor is rejected rather than re-sorted.
pub fn load_signal(dir: &Path, record: &Record) -> Result<Curve> {
    let path = dir.join(&record.data_file);
    check_file(&path, SIGNAL_EXTENSION)?;
    let rows = read_rows(&path)?;
    let curve = curve_from_rows(&path, record, &rows)?;
    log::debug!("Loaded {} samples for '{}'", curve.len(), curve.name());
    Ok(curve)
}

/// Load every record's signal file in parallel. Output order follows
/// `records`; the first failure aborts the batch.
pub fn load_signals(dir: &Path, records: &[Record], unit: Unit) -> Result<Vec<Curve>> {
    let curves = records
        .par_iter()
        .map(|record| load_signal(dir, record).map(|c| c.with_unit(unit)))
        .collect::<Result<Vec<Curve>>>()?;
    log::info!("Loaded {} curves from {}", curves.len(), dir.display());
    Ok(curves)
}

pub(crate) fn curve_from_rows(path: &Path, record: &Record, rows: &[Row]) -> Result<Curve> {
    let Some(first) = rows.first() else {
        return Err(ExtractError::EmptyCurve(record.display_name().to_string()));
    };
    let columns = first.values.len();

    let mut x = Vec::with_capacity(rows.len());
    let mut y = Vec::with_capacity(rows.len());
    for row in rows {
        let value = match row.values.as_slice() {
            [_, v] if columns == 2 => Value::Real(*v),
            [_, re, im] if columns == 3 => Value::Complex { re: *re, im: *im },
            other if !matches!(other.len(), 2 | 3) => {
                return Err(ExtractError::UnsupportedColumnLayout {
                    path: path.to_path_buf(),
                    line: row.line,
                    columns: other.len(),
                });
            }
            other => {
                return Err(ExtractError::invalid(
                    path,
                    format!("line {}: {} columns, expected {columns}", row.line, other.len()),
                ));
            }
        };
        let freq = row.values[0];
        if x.last().is_some_and(|&prev| freq < prev) {
            return Err(ExtractError::invalid(
                path,
                format!("line {}: frequency {freq} is below the previous sample", row.line),
            ));
        }
        x.push(freq);
        y.push(value);
    }

    Curve::new(record.clone(), DEFAULT_AXIS_UNIT, x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::table::parse_rows;

    fn record() -> Record {
        Record {
            tree_path: r"1D Results\Efficiencies\System Tot. Efficiency [AC1]".into(),
            data_file: "eff.sig".into(),
            ..Default::default()
        }
    }

    fn curve(body: &str) -> Result<Curve> {
        let path = Path::new("eff.sig");
        let text = format!("#h1\n#h2\n#h3\n#h4\n{body}");
        let rows = parse_rows(path, &text)?;
        curve_from_rows(path, &record(), &rows)
    }

    #[test]
    fn two_columns_are_real() {
        let c = curve("1.0 0.5\n1.5 0.6\n").unwrap();
        assert_eq!(c.x(), &[1.0, 1.5]);
        assert_eq!(c.y(), &[Value::Real(0.5), Value::Real(0.6)]);
        assert!(!c.is_complex());
        assert_eq!(c.unit(), Unit::GHz);
        assert_eq!(c.name(), "System Tot. Efficiency [AC1]");
    }

    #[test]
    fn three_columns_are_complex() {
        let c = curve("1.0 0.2 0.1\n2.0 0.4 -0.3\n").unwrap();
        assert!(c.is_complex());
        assert_eq!(c.y()[1], Value::Complex { re: 0.4, im: -0.3 });
        assert_eq!(c.real_values(), vec![0.2, 0.4]);
        assert_eq!(c.y()[1].im(), -0.3);
    }

    #[test]
    fn four_columns_are_unsupported() {
        match curve("1.0 0.2 0.1 9\n").unwrap_err() {
            ExtractError::UnsupportedColumnLayout { columns, line, .. } => {
                assert_eq!(columns, 4);
                assert_eq!(line, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            curve("1.0\n").unwrap_err(),
            ExtractError::UnsupportedColumnLayout { columns: 1, .. }
        ));
    }

    #[test]
    fn wide_row_after_narrow_rows_is_unsupported() {
        match curve("1.0 0.1\n2.0 0.2 0.3 0.4\n").unwrap_err() {
            ExtractError::UnsupportedColumnLayout { columns, line, .. } => {
                assert_eq!((columns, line), (4, 6));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn mixed_layouts_are_rejected() {
        assert!(matches!(
            curve("1.0 0.2\n2.0 0.4 0.1\n").unwrap_err(),
            ExtractError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn duplicate_frequencies_are_kept() {
        let c = curve("1.0 0.1\n1.0 0.2\n2.0 0.3\n").unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(c.x_min(), 1.0);
        assert_eq!(c.x_max(), 2.0);
    }

    #[test]
    fn unsorted_rows_are_rejected_not_resorted() {
        let err = curve("1.0 0.1\n2.0 0.2\n1.5 0.3\n").unwrap_err();
        match err {
            ExtractError::InvalidFormat { reason, .. } => assert!(reason.contains("line 7")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_file_is_empty() {
        assert!(matches!(curve("").unwrap_err(), ExtractError::EmptyCurve(_)));
    }

    #[test]
    fn constructor_checks_lengths() {
        let err = Curve::new(record(), Unit::GHz, vec![1.0, 2.0], vec![Value::Real(0.1)]);
        assert!(matches!(err.unwrap_err(), ExtractError::InvalidFormat { .. }));
        let err = Curve::new(record(), Unit::GHz, vec![], vec![]);
        assert!(matches!(err.unwrap_err(), ExtractError::EmptyCurve(_)));
    }

    #[test]
    fn constructor_rejects_nan_samples() {
        let y = vec![Value::Real(0.1), Value::Real(f64::NAN)];
        let err = Curve::new(record(), Unit::GHz, vec![1.0, 2.0], y);
        assert!(matches!(err.unwrap_err(), ExtractError::InvalidFormat { .. }));
        let y = vec![Value::Real(0.1), Value::Complex { re: 0.2, im: f64::INFINITY }];
        assert!(Curve::new(record(), Unit::GHz, vec![1.0, 2.0], y).is_err());
    }
}
