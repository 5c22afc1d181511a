use std::io::Write;
use std::path::{Path, PathBuf};

use super::aggregate::EfficiencyMap;
use crate::error::{ExtractError, Result};

const HEADER: [&str; 6] = ["antenna", "frequency", "first", "peak", "last", "mean"];

/// Write one CSV row per (antenna, frequency) pair, in map order.
pub fn write_csv<W: Write>(map: &EfficiencyMap, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for (antenna, rows) in map.iter() {
        for (label, row) in rows.iter() {
            wtr.write_record([
                antenna.to_string(),
                label.to_string(),
                format!("{:.2}", row.first),
                format!("{:.2}", row.peak),
                format!("{:.2}", row.last),
                format!("{:.2}", row.mean),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Export `map` to a timestamped `eff_<YYYYmmdd_HHMMSS>.csv` inside `dir`.
pub fn export_csv(map: &EfficiencyMap, dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(ExtractError::NotFound(dir.to_path_buf()));
    }
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("eff_{stamp}.csv"));
    let file = std::fs::File::create(&path)?;
    write_csv(map, file)?;
    log::info!("Exported {} antennas to {}", map.len(), path.display());
    Ok(path)
}
