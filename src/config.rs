//! # Configuration Module
//!
//! This module handles data directory setup and persisted game settings for
//! Maestro. It provides platform-appropriate storage locations and ensures
//! necessary directories exist.
//!
//! ## Data Storage
//!
//! Maestro stores its playlist database and settings in the platform-standard
//! data directory:
//! - Linux: `~/.local/share/maestro/`
//! - macOS: `~/Library/Application Support/maestro/`
//! - Windows: `%APPDATA%\maestro\`
//!
//! Settings live in `settings.json` next to the database and hold everything
//! the session controller treats as caller-supplied: song snippet length,
//! whether repeating is allowed, difficulty compensation, and the generated
//! opponent's skill profile. Command-line flags override them per run without
//! being written back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

use crate::session::GameSettings;

const SETTINGS_FILE: &str = "settings.json";

/// Returns the platform-appropriate data directory for Maestro.
///
/// Locates the standard data directory for the current platform and creates
/// the `maestro` subdirectory if it doesn't exist.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The maestro subdirectory cannot be created due to permissions
/// - The filesystem is read-only
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Please ensure your platform supports standard data directories."
        )
    })?;

    let maestro_dir = data_dir.join("maestro");
    fs::create_dir_all(&maestro_dir).with_context(|| {
        format!(
            "Failed to create Maestro data directory at {}. Please check file permissions.",
            maestro_dir.display()
        )
    })?;

    Ok(maestro_dir)
}

/// Load persisted game settings from `data_dir`, falling back to defaults
/// when no settings file exists yet.
pub fn load_settings(data_dir: &Path) -> Result<GameSettings> {
    let path = data_dir.join(SETTINGS_FILE);
    if !path.exists() {
        debug!("no settings file at {}, using defaults", path.display());
        return Ok(GameSettings::default());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings = serde_json::from_str(&raw)
        .with_context(|| format!("Settings file {} is not valid JSON", path.display()))?;
    Ok(settings)
}

/// Write game settings to `data_dir`, replacing any previous file.
pub fn save_settings(data_dir: &Path, settings: &GameSettings) -> Result<()> {
    let path = data_dir.join(SETTINGS_FILE);
    let raw = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;
    fs::write(&path, raw)
        .with_context(|| format!("Failed to write settings file {}", path.display()))?;
    debug!("settings saved to {}", path.display());
    Ok(())
}
