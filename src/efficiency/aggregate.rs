use lazy_static::lazy_static;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::cst::{Curve, Record};
use crate::error::{ExtractError, Result};
use crate::frequency::{resolve_segment, Resolved, Unit};

lazy_static! {
    static ref ANTENNA_RE: Regex = Regex::new(r"\[AC(\d+)\]").unwrap();
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Which curve measures an antenna, and the frequencies to report for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub antenna: String,
    /// Display name of the bound curve.
    pub curve: String,
    /// Comma-separated frequency spec; empty means "skip this antenna".
    pub spec: String,
}

impl Binding {
    pub fn new(antenna: impl Into<String>, curve: impl Into<String>, spec: impl Into<String>) -> Self {
        Binding {
            antenna: antenna.into(),
            curve: curve.into(),
            spec: spec.into(),
        }
    }
}

/// `Ant<n>` for a curve named like `System Tot. Efficiency [AC<n>]`.
pub fn antenna_label(display_name: &str) -> Option<String> {
    ANTENNA_RE
        .captures(display_name)
        .map(|caps| format!("Ant{}", &caps[1]))
}

/// One binding with an empty spec per antenna curve, in record order.
pub fn discover_bindings(records: &[Record]) -> Vec<Binding> {
    records
        .iter()
        .filter_map(|r| {
            let name = r.display_name();
            antenna_label(name).map(|antenna| Binding::new(antenna, name, ""))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Window and row
// ---------------------------------------------------------------------------

/// Closed frequency interval in curve-axis units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub inf: f64,
    pub sup: f64,
}

impl Window {
    pub fn new(inf: f64, sup: f64) -> Self {
        Window { inf, sup }
    }

    /// Window covered by a resolved spec entity on an axis in `axis_unit`.
    /// Bands contribute their downlink (duplex) or single link.
    pub fn for_entity(entity: &Resolved, axis_unit: Unit) -> Self {
        let (inf, sup) = entity.span().bounds_in(axis_unit);
        Window { inf, sup }
    }

    /// `inf` in `[min, max)` and `sup` in `(min, max]`.
    fn fits(&self, x_min: f64, x_max: f64) -> bool {
        let inf_ok = x_min <= self.inf && self.inf < x_max;
        let sup_ok = x_min < self.sup && self.sup <= x_max;
        inf_ok && sup_ok
    }
}

/// First, peak, last and mean efficiency over one window.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct EfficiencyRow {
    pub first: f64,
    pub peak: f64,
    pub last: f64,
    pub mean: f64,
}

impl EfficiencyRow {
    /// Reported when the window falls outside the simulated span.
    pub const OUT_OF_RANGE: EfficiencyRow = EfficiencyRow {
        first: -1.0,
        peak: -1.0,
        last: -1.0,
        mean: -1.0,
    };

    pub fn is_out_of_range(&self) -> bool {
        *self == Self::OUT_OF_RANGE
    }

    fn from_values(values: &[f64]) -> Option<Self> {
        let (&first, &last) = (values.first()?, values.last()?);
        let peak = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(EfficiencyRow {
            first,
            peak,
            last,
            mean,
        })
    }
}

// ---------------------------------------------------------------------------
// Ordered map
// ---------------------------------------------------------------------------

/// String-keyed map that iterates in insertion order. Re-inserting a key
/// replaces its value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Ordered<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for Ordered<V> {
    fn default() -> Self {
        Ordered {
            entries: Vec::new(),
        }
    }
}

impl<V> Ordered<V> {
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Serialize> Serialize for Ordered<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Frequency label → row, in spec order.
pub type FrequencyEfficiencies = Ordered<EfficiencyRow>;
/// Antenna → its per-frequency rows, in binding order.
pub type EfficiencyMap = Ordered<FrequencyEfficiencies>;

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Inclusive index range of `x` covering `window`, or `None` when the
/// window is outside the sampled span.
///
/// The lower index is stepped back one sample unless it lands exactly on
/// `window.inf`, so the sample just below the requested edge is included.
/// The upper index is never adjusted.
pub fn locate(x: &[f64], window: Window) -> Option<(usize, usize)> {
    let (&x_min, &x_max) = (x.first()?, x.last()?);
    if !window.fits(x_min, x_max) {
        return None;
    }
    let mut inf_index = x.partition_point(|&v| v < window.inf);
    let sup_index = x.partition_point(|&v| v < window.sup);
    if x[inf_index] != window.inf {
        inf_index = inf_index.saturating_sub(1);
    }
    Some((inf_index, sup_index))
}

/// Statistics of the real part of `curve` over `window`.
pub fn summarize(curve: &Curve, window: Window) -> EfficiencyRow {
    let Some((inf_index, sup_index)) = locate(curve.x(), window) else {
        return EfficiencyRow::OUT_OF_RANGE;
    };
    let values: Vec<f64> = curve.y()[inf_index..=sup_index]
        .iter()
        .map(|v| v.re())
        .collect();
    EfficiencyRow::from_values(&values).unwrap_or(EfficiencyRow::OUT_OF_RANGE)
}

/// Per-antenna, per-frequency efficiency figures.
///
/// Bindings with an empty spec are skipped. Every other binding must name a
/// curve present in `curves`. Spec segments that do not resolve are dropped;
/// windows outside a curve's span yield [`EfficiencyRow::OUT_OF_RANGE`].
pub fn compute_efficiency_map(curves: &[Curve], bindings: &[Binding]) -> Result<EfficiencyMap> {
    let mut map = EfficiencyMap::default();
    for binding in bindings.iter().filter(|b| !b.spec.trim().is_empty()) {
        let curve = curves
            .iter()
            .find(|c| c.name() == binding.curve)
            .ok_or_else(|| ExtractError::UnknownCurve(binding.curve.clone()))?;
        if curve.is_empty() {
            return Err(ExtractError::EmptyCurve(binding.curve.clone()));
        }

        let mut rows = FrequencyEfficiencies::default();
        for segment in binding.spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let Some(entity) = resolve_segment(segment) else {
                log::warn!("{}: ignoring unresolved frequency '{segment}'", binding.antenna);
                continue;
            };
            let window = Window::for_entity(&entity, curve.unit());
            let row = summarize(curve, window);
            if row.is_out_of_range() {
                log::warn!(
                    "{}: {} [{}, {}] {} is outside the simulated span [{}, {}]",
                    binding.antenna,
                    entity.label(),
                    window.inf,
                    window.sup,
                    curve.unit(),
                    curve.x_min(),
                    curve.x_max()
                );
            } else {
                log::debug!("{}: {} -> {row:?}", binding.antenna, entity.label());
            }
            rows.insert(entity.label(), row);
        }
        map.insert(binding.antenna.clone(), rows);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::Value;

    const EPS: f64 = 1e-12;

    fn real_curve(name: &str, unit: Unit, x: &[f64], y: &[f64]) -> Curve {
        let record = Record {
            tree_path: format!(r"1D Results\Efficiencies\{name}"),
            data_file: "c.sig".into(),
            ..Default::default()
        };
        let y = y.iter().map(|&v| Value::Real(v)).collect();
        Curve::new(record, unit, x.to_vec(), y).unwrap()
    }

    fn assert_row(row: EfficiencyRow, expected: [f64; 4]) {
        let got = [row.first, row.peak, row.last, row.mean];
        for (g, e) in got.iter().zip(expected) {
            assert!((g - e).abs() < EPS, "got {got:?}, expected {expected:?}");
        }
    }

    #[test]
    fn window_validity_boundaries() {
        let x = [1000.0, 1100.0, 1200.0];
        assert_eq!(locate(&x, Window::new(1000.0, 1200.0)), Some((0, 2)));
        assert_eq!(locate(&x, Window::new(900.0, 1200.0)), None);
        assert_eq!(locate(&x, Window::new(1000.0, 1300.0)), None);
        // inf may not sit on the top sample, sup may not sit on the bottom one.
        assert_eq!(locate(&x, Window::new(1200.0, 1200.0)), None);
        assert_eq!(locate(&x, Window::new(1000.0, 1000.0)), None);

        let c = real_curve("c", Unit::GHz, &x, &[0.1, 0.2, 0.3]);
        assert!(summarize(&c, Window::new(900.0, 1200.0)).is_out_of_range());
        assert!(summarize(&c, Window::new(1000.0, 1300.0)).is_out_of_range());
        assert!(!summarize(&c, Window::new(1000.0, 1200.0)).is_out_of_range());
    }

    #[test]
    fn lower_index_steps_back_unless_exact() {
        let x = [1.0, 1.5, 2.0, 2.5];
        assert_eq!(locate(&x, Window::new(1.2, 2.0)), Some((0, 2)));
        assert_eq!(locate(&x, Window::new(1.5, 2.0)), Some((1, 2)));
        // Upper index is the first sample at or above sup, never stepped.
        assert_eq!(locate(&x, Window::new(1.5, 2.2)), Some((1, 3)));
    }

    #[test]
    fn point_window_between_samples_spans_both_neighbours() {
        let x = [1.0, 1.5, 2.0];
        assert_eq!(locate(&x, Window::new(1.2, 1.2)), Some((0, 1)));
        assert_eq!(locate(&x, Window::new(1.5, 1.5)), Some((1, 1)));
    }

    #[test]
    fn duplicate_samples_use_leftmost_match() {
        let x = [1.0, 1.5, 1.5, 2.0];
        assert_eq!(locate(&x, Window::new(1.5, 2.0)), Some((1, 3)));
        assert_eq!(locate(&x, Window::new(1.2, 1.5)), Some((0, 1)));
    }

    #[test]
    fn aggregate_values() {
        let c = real_curve("c", Unit::GHz, &[1.0, 1.5, 2.0, 2.5], &[0.1, 0.5, 0.3, 0.2]);
        let row = summarize(&c, Window::new(1.0, 2.5));
        assert_row(row, [0.1, 0.5, 0.2, 0.275]);
    }

    #[test]
    fn complex_values_reduce_to_real_part() {
        let record = Record {
            tree_path: "c".into(),
            data_file: "c.sig".into(),
            ..Default::default()
        };
        let y = vec![
            Value::Complex { re: 0.2, im: 0.1 },
            Value::Complex { re: 0.4, im: -0.3 },
        ];
        let c = Curve::new(record, Unit::GHz, vec![1.0, 2.0], y).unwrap();
        let row = summarize(&c, Window::new(1.0, 2.0));
        assert_row(row, [0.2, 0.4, 0.4, 0.3]);
    }

    #[test]
    fn band_window_uses_downlink_in_axis_units() {
        let b1 = resolve_segment("B1").unwrap();
        let w = Window::for_entity(&b1, Unit::GHz);
        assert_eq!((w.inf, w.sup), (2110.0 / 1000.0, 2170.0 / 1000.0));
        let wifi = resolve_segment("Wi-Fi 2.4G").unwrap();
        let w = Window::for_entity(&wifi, Unit::MHz);
        assert_eq!((w.inf, w.sup), (2400.0, 2483.5));
        let lit = resolve_segment("1.5~2 GHz").unwrap();
        let w = Window::for_entity(&lit, Unit::GHz);
        assert_eq!((w.inf, w.sup), (1.5, 2.0));
    }

    #[test]
    fn map_is_keyed_by_antenna_and_label_in_order() {
        let x: Vec<f64> = (5..=65).map(|i| i as f64 / 10.0).collect();
        let y: Vec<f64> = x.iter().map(|f| f / 10.0).collect();
        let curves = vec![
            real_curve("System Tot. Efficiency [AC1]", Unit::GHz, &x, &y),
            real_curve("System Tot. Efficiency [AC2]", Unit::GHz, &x, &y),
        ];
        let bindings = vec![
            Binding::new("Ant2", "System Tot. Efficiency [AC2]", "n78, 2400~2500 MHz, nonsense, 9000 MHz"),
            Binding::new("Ant1", "System Tot. Efficiency [AC1]", ""),
            Binding::new("Ant3", "missing curve", "   "),
        ];
        let map = compute_efficiency_map(&curves, &bindings).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["Ant2"]);

        let rows = map.get("Ant2").unwrap();
        assert_eq!(rows.keys().collect::<Vec<_>>(), ["n78", "2400~2500 MHz", "9000 MHz"]);
        assert!(rows.get("9000 MHz").unwrap().is_out_of_range());

        let n78 = rows.get("n78").unwrap();
        assert!(!n78.is_out_of_range());
        // n78 downlink is 3.3..3.8 GHz on a 0.1 GHz grid.
        assert!((n78.first - 0.33).abs() < 1e-9);
        assert!((n78.last - 0.38).abs() < 1e-9);
        assert!(n78.peak >= n78.mean);
    }

    #[test]
    fn repeated_label_keeps_first_position() {
        let c = real_curve("E", Unit::GHz, &[1.0, 2.0, 3.0], &[0.1, 0.2, 0.3]);
        let bindings = [Binding::new("A", "E", "1.5 GHz, 2.5 GHz, 1.5 GHz")];
        let map = compute_efficiency_map(&[c], &bindings).unwrap();
        let rows = map.get("A").unwrap();
        assert_eq!(rows.keys().collect::<Vec<_>>(), ["1.5 GHz", "2.5 GHz"]);
    }

    #[test]
    fn unknown_curve_is_fatal() {
        let c = real_curve("E", Unit::GHz, &[1.0, 2.0], &[0.1, 0.2]);
        let bindings = [Binding::new("A", "F", "1.5 GHz")];
        assert!(matches!(
            compute_efficiency_map(&[c], &bindings).unwrap_err(),
            ExtractError::UnknownCurve(name) if name == "F"
        ));
    }

    #[test]
    fn antenna_labels_from_curve_names() {
        assert_eq!(antenna_label("System Tot. Efficiency [AC12]").as_deref(), Some("Ant12"));
        assert_eq!(antenna_label("Rad. Efficiency [1]"), None);

        let records = vec![
            Record { tree_path: r"a\Eff [AC1]".into(), ..Default::default() },
            Record { tree_path: r"a\S1,1".into(), ..Default::default() },
            Record { tree_path: r"a\Eff [AC3]".into(), ..Default::default() },
        ];
        let bindings = discover_bindings(&records);
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[1], Binding::new("Ant3", "Eff [AC3]", ""));
    }

    #[test]
    fn map_serializes_in_order() {
        let mut rows = FrequencyEfficiencies::default();
        rows.insert("z", EfficiencyRow::OUT_OF_RANGE);
        rows.insert("a", EfficiencyRow { first: 1.0, peak: 2.0, last: 3.0, mean: 2.0 });
        let json = serde_json::to_string(&rows).unwrap();
        assert!(json.find("\"z\"").unwrap() < json.find("\"a\"").unwrap());
    }
}
