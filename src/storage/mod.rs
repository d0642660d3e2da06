//! Storage Layer
//!
//! Platform directories for settings and the reference data cache.

pub mod reference_cache;

use anyhow::Result;
use std::path::PathBuf;

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "pykedominator", "PykeDominator")
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))
}

/// Get the application data directory
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = project_dirs()?.data_dir().to_path_buf();
    std::fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = project_dirs()?.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

/// Get the reference data cache directory
pub fn get_cache_dir() -> Result<PathBuf> {
    let cache_dir = get_data_dir()?.join("cache");
    std::fs::create_dir_all(&cache_dir)?;

    Ok(cache_dir)
}
