use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use antenna_eff::config::Settings;
use antenna_eff::cst::{self, Curve, Project};
use antenna_eff::efficiency::{self, Binding, EfficiencyMap};
use antenna_eff::frequency::{self, Resolved, Unit};

use crate::color::CurvePalette;

// ---------------------------------------------------------------------------
// Band picker state
// ---------------------------------------------------------------------------

/// Editing state of the band picker window for one antenna row.
pub struct BandPicker {
    pub row: usize,
    /// Registered band names ticked in the picker.
    pub checked: BTreeSet<&'static str>,
    /// Free-typed MHz values, e.g. `1800, 2400~2500`.
    pub custom: String,
    /// Spec segments the picker cannot represent (other units), kept as-is.
    pub extra: Vec<String>,
}

impl BandPicker {
    pub fn from_spec(row: usize, spec: &str) -> Self {
        let mut checked = BTreeSet::new();
        let mut custom = Vec::new();
        let mut extra = Vec::new();
        for segment in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match frequency::resolve_segment(segment) {
                Some(Resolved::Band(band)) => {
                    checked.insert(band.name);
                }
                Some(Resolved::Literal(freq)) if freq.unit() == Unit::MHz => {
                    custom.push(segment.trim_end_matches("MHz").trim().to_string());
                }
                _ => extra.push(segment.to_string()),
            }
        }
        BandPicker {
            row,
            checked,
            custom: custom.join(", "),
            extra,
        }
    }

    pub fn custom_is_valid(&self) -> bool {
        frequency::validate_custom(&self.custom)
    }

    /// Compose the frequency spec: ticked bands in registry order, then custom values,
    /// then untouched extras. `None` while the custom text is invalid.
    pub fn to_spec(&self) -> Option<String> {
        let custom = frequency::custom_to_spec(&self.custom)?;
        let bands = frequency::all_bands()
            .iter()
            .filter(|b| self.checked.contains(b.name))
            .map(|b| b.name.to_string());
        let parts: Vec<String> = bands.chain(custom).chain(self.extra.iter().cloned()).collect();
        Some(parts.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Where settings are written back. `None` when the file on disk could
    /// not be read, so it is left untouched for the session.
    pub settings_path: Option<PathBuf>,

    /// Open project (None until the user opens one).
    pub project: Option<Project>,

    /// Efficiency curves of the open project, in directory order.
    pub curves: Vec<Curve>,

    /// One row per discovered antenna.
    pub bindings: Vec<Binding>,

    /// Last computed figures.
    pub results: Option<EfficiencyMap>,

    /// Per-curve plot colours.
    pub palette: CurvePalette,

    /// Row whose windows are highlighted in the plot.
    pub selected_row: Option<usize>,

    pub picker: Option<BandPicker>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings, settings_path: PathBuf) -> Self {
        Self {
            settings,
            settings_path: Some(settings_path),
            project: None,
            curves: Vec::new(),
            bindings: Vec::new(),
            results: None,
            palette: CurvePalette::default(),
            selected_row: None,
            picker: None,
            status_message: None,
        }
    }

    /// Start from the settings stored at `settings_path`. An unreadable file
    /// is reported and never overwritten; the session runs on defaults.
    pub fn load(settings_path: PathBuf) -> Self {
        let loaded = Settings::load(&settings_path)
            .with_context(|| format!("reading settings {}", settings_path.display()));
        match loaded {
            Ok(settings) => Self::new(settings, settings_path),
            Err(e) => {
                let mut state = Self::new(Settings::default(), settings_path);
                state.settings_path = None;
                state.report(e);
                state
            }
        }
    }

    /// Open a project, load its efficiency curves and discover antennas.
    pub fn open_project(&mut self, path: &Path) -> Result<()> {
        let project = Project::open(path).context("opening project")?;
        let records = cst::extract(&project.model_res(), &self.settings.record_filter)
            .context("reading result directory")?;
        let signal_records: Vec<_> = records.into_iter().filter(|r| r.is_signal()).collect();
        let curves = cst::load_signals(&project.result_dir(), &signal_records, self.settings.axis_unit)
            .context("loading efficiency curves")?;

        let mut bindings = efficiency::discover_bindings(&signal_records);
        for binding in &mut bindings {
            if let Some(spec) = self.settings.spec_for(project.file(), &binding.curve) {
                binding.spec = spec.to_string();
            }
        }
        log::info!(
            "Opened {} with {} curves, {} antennas",
            project.name(),
            curves.len(),
            bindings.len()
        );

        self.palette = CurvePalette::new(curves.iter().map(Curve::name));
        self.settings.last_project = Some(project.file().to_path_buf());
        if self.settings.export_dir.is_none() {
            self.settings.export_dir = Some(project.project_dir());
        }
        self.curves = curves;
        self.bindings = bindings;
        self.project = Some(project);
        self.results = None;
        self.selected_row = None;
        self.picker = None;
        self.status_message = None;
        self.persist();
        Ok(())
    }

    /// Update one row's spec and remember it for this project.
    pub fn set_spec(&mut self, row: usize, spec: String) {
        let Some(binding) = self.bindings.get_mut(row) else {
            return;
        };
        binding.spec = spec;
        if let Some(project) = &self.project {
            self.settings
                .set_spec(project.file(), &binding.curve, &binding.spec);
        }
        self.persist();
    }

    pub fn compute(&mut self) -> Result<()> {
        if self.bindings.iter().all(|b| b.spec.trim().is_empty()) {
            bail!("No frequencies selected");
        }
        let map = efficiency::compute_efficiency_map(&self.curves, &self.bindings)
            .context("computing efficiency")?;
        self.results = Some(map);
        Ok(())
    }

    pub fn export(&mut self, dir: &Path) -> Result<PathBuf> {
        let Some(map) = &self.results else {
            bail!("Nothing to export, compute first");
        };
        let path = efficiency::export_csv(map, dir).context("exporting CSV")?;
        self.settings.export_dir = Some(dir.to_path_buf());
        self.persist();
        Ok(path)
    }

    /// Windows of the selected row, in the curve's axis unit.
    pub fn selected_windows(&self) -> Vec<(String, efficiency::Window)> {
        let Some(binding) = self.selected_row.and_then(|r| self.bindings.get(r)) else {
            return Vec::new();
        };
        let Some(curve) = self.curves.iter().find(|c| c.name() == binding.curve) else {
            return Vec::new();
        };
        frequency::resolve(&binding.spec)
            .iter()
            .map(|e| (e.label(), efficiency::Window::for_entity(e, curve.unit())))
            .collect()
    }

    /// Show `err` in the status line and log it.
    pub fn report(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        self.status_message = Some(format!("Error: {err:#}"));
    }

    fn persist(&self) {
        let Some(path) = &self.settings_path else {
            log::debug!("Settings file unreadable at startup, not saving");
            return;
        };
        if let Err(e) = self.settings.save(path) {
            log::warn!("Could not save settings: {e}");
        }
    }
}
