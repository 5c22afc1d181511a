//! Antenna efficiency extraction from CST result exports.
//!
//! A project's result directory (`Model.res`) indexes every exported curve.
//! Efficiency curves are loaded from their `.sig` files and summarised per
//! requested frequency or standard band as first / peak / last / mean.
//!
//! ```no_run
//! use antenna_eff::cst::{self, Project};
//! use antenna_eff::efficiency::{compute_efficiency_map, Binding};
//!
//! # fn main() -> antenna_eff::error::Result<()> {
//! let project = Project::open("phone.cst")?;
//! let records = cst::extract(&project.model_res(), "System Tot. Efficiency")?;
//! let curves = cst::load_signals(&project.result_dir(), &records, cst::DEFAULT_AXIS_UNIT)?;
//! let bindings = [Binding::new("Ant1", "System Tot. Efficiency [AC1]", "n78, B1")];
//! let map = compute_efficiency_map(&curves, &bindings)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod cst;
pub mod efficiency;
pub mod error;
pub mod frequency;
