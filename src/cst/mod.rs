/// Readers for CST result exports.
///
/// Architecture:
/// ```text
///  foo.cst ──▶ project ──▶ Result/Model.res
///                               │
///                               ▼
///                         ┌──────────┐
///                         │  record   │  directory → Vec<Record>, filter by tree path
///                         └──────────┘
///                               │ data_file
///                 ┌─────────────┴─────────────┐
///                 ▼                           ▼
///           ┌──────────┐                ┌──────────┐
///           │  curve    │  .sig → Curve  │  field    │  .ffs → FieldTable
///           └──────────┘                └──────────┘
///                 └──────── table (shared row parser) ───────┘
/// ```

pub mod curve;
pub mod field;
pub mod project;
pub mod record;
pub mod table;

pub use curve::{load_signal, load_signals, Curve, Value, DEFAULT_AXIS_UNIT};
pub use field::{load_field, FieldTable};
pub use project::Project;
pub use record::{extract, filter_records, parse_directory, Record};
