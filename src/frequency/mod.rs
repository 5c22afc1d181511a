/// Frequency domain: values, the built-in band table, and spec parsing.
///
/// ```text
///  "n78, 2400~2483.5 MHz"
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  parse    │ ───▶ │ registry  │  name → &'static FrequencyBand
///   └──────────┘      └──────────┘
///        │
///        ▼
///   Vec<Resolved>   (Literal(Frequency) | Band(&FrequencyBand))
/// ```

pub mod model;
pub mod parse;
pub mod registry;

pub use model::{Allocation, Duplex, Frequency, FrequencyBand, Resolved, Unit};
pub use parse::{custom_to_spec, resolve, resolve_segment, validate_custom};
pub use registry::{all_bands, band_groups, band_map, get_band};
