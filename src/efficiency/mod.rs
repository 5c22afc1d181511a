/// Efficiency aggregation over loaded curves, and CSV export of the result.
///
/// ```text
///  Vec<Curve> + Vec<Binding>
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  resolve spec → Window → locate → first/peak/last/mean
///   └───────────┘
///        │
///        ▼
///   EfficiencyMap ──▶ export (CSV)
/// ```

pub mod aggregate;
pub mod export;

pub use aggregate::{
    antenna_label, compute_efficiency_map, discover_bindings, locate, summarize, Binding,
    EfficiencyMap, EfficiencyRow, FrequencyEfficiencies, Ordered, Window,
};
pub use export::{export_csv, write_csv};
