//! On-disk cache of reference data
//!
//! One JSON file per patch version plus a `latest.json` copy so an offline
//! start can fall back to whatever was fetched last.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::data::ReferenceData;

const LATEST_FILE: &str = "latest.json";

fn version_file(dir: &Path, version: &str) -> PathBuf {
    let safe: String = version
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect();
    dir.join(format!("reference-{}.json", safe))
}

/// Save reference data for its version and as the latest copy
pub fn save(dir: &Path, data: &ReferenceData) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let content = serde_json::to_string(data)?;
    std::fs::write(version_file(dir, &data.version), &content)
        .context("Failed to write versioned reference cache")?;
    std::fs::write(dir.join(LATEST_FILE), &content).context("Failed to write latest reference cache")?;
    Ok(())
}

/// Load cached reference data; `None` version reads the latest copy.
///
/// Returns `Ok(None)` when nothing is cached.
pub fn load(dir: &Path, version: Option<&str>) -> Result<Option<ReferenceData>> {
    let path = match version {
        Some(v) => version_file(dir, v),
        None => dir.join(LATEST_FILE),
    };
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    let data: ReferenceData =
        serde_json::from_str(&content).with_context(|| format!("Corrupt reference cache {:?}", path))?;
    Ok(Some(data))
}
