use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cst::DEFAULT_AXIS_UNIT;
use crate::error::Result;
use crate::frequency::Unit;

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "ANTENNA_EFF_CONFIG";
const CONFIG_FILE: &str = ".antenna-eff.json";
/// Tree-path fragment selecting total-efficiency curves.
pub const DEFAULT_RECORD_FILTER: &str = "System Tot. Efficiency";

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub last_project: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    /// Records whose tree path contains this are treated as efficiency curves.
    pub record_filter: String,
    /// Unit of the x axis in exported signal files.
    pub axis_unit: Unit,
    /// Project file → curve display name → frequency spec.
    pub specs: BTreeMap<PathBuf, BTreeMap<String, String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_project: None,
            export_dir: None,
            record_filter: DEFAULT_RECORD_FILTER.to_string(),
            axis_unit: DEFAULT_AXIS_UNIT,
            specs: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// `$ANTENNA_EFF_CONFIG`, else `.antenna-eff.json` in the home directory.
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_default();
        home.join(CONFIG_FILE)
    }

    /// Load settings; a missing file gives defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        log::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Remembered spec for a curve of `project`, if any.
    pub fn spec_for(&self, project: &Path, curve: &str) -> Option<&str> {
        self.specs.get(project)?.get(curve).map(String::as_str)
    }

    /// Remember a spec; an empty spec forgets the entry.
    pub fn set_spec(&mut self, project: &Path, curve: &str, spec: &str) {
        let specs = self.specs.entry(project.to_path_buf()).or_default();
        if spec.trim().is_empty() {
            specs.remove(curve);
        } else {
            specs.insert(curve.to_string(), spec.to_string());
        }
        if specs.is_empty() {
            self.specs.remove(project);
        }
    }
}
