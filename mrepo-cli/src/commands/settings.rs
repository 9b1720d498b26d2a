//! Settings Commands
//!
//! Shows and edits persisted user settings.

use std::path::PathBuf;

use anyhow::Result;
use mrepo_core::{about_label, WorkingMode};

use crate::config::CliConfig;
use crate::display;

/// Prints the current settings.
pub fn show(config: &CliConfig) -> Result<()> {
    let store = config.settings_store()?;
    let data = store.load()?;

    let access = if data.working_mode.is_root() {
        "privileged"
    } else if data.working_mode.is_non_root() {
        "browse and download only"
    } else {
        "not set up"
    };

    println!("  Working mode:  {} ({})", data.working_mode, access);
    println!("  Download dir:  {}", data.download_path.display());
    println!("  Modules dir:   {}", data.modules_path.display());
    println!("  Settings file: {}", store.path().display());
    println!(
        "  About:         {}",
        about_label(env!("CARGO_PKG_VERSION"), version_code())
    );

    Ok(())
}

/// Sets the working mode.
pub fn set_mode(mode: WorkingMode, config: &CliConfig) -> Result<()> {
    config
        .settings_store()?
        .update(|d| d.working_mode = mode)?;
    display::success(&format!("Working mode set to {}", mode));
    Ok(())
}

/// Sets the download directory.
pub fn set_download_dir(path: PathBuf, config: &CliConfig) -> Result<()> {
    let shown = path.display().to_string();
    config
        .settings_store()?
        .update(|d| d.download_path = path)?;
    display::success(&format!("Downloads will be saved to {}", shown));
    Ok(())
}

/// Numeric build version: major * 10000 + minor * 100 + patch.
fn version_code() -> u32 {
    let part = |s: &str| s.parse::<u32>().unwrap_or(0);
    part(env!("CARGO_PKG_VERSION_MAJOR")) * 10000
        + part(env!("CARGO_PKG_VERSION_MINOR")) * 100
        + part(env!("CARGO_PKG_VERSION_PATCH"))
}
