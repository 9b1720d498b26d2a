//! Local Command
//!
//! Lists modules installed on this device.

use std::path::PathBuf;

use anyhow::{Context, Result};
use mrepo_core::{LocalRepository, MemoryRepository};

use crate::config::CliConfig;
use crate::display;

/// Scans the modules directory and lists what it finds.
pub fn run(modules_dir: Option<PathBuf>, config: &CliConfig) -> Result<()> {
    let modules_dir = match modules_dir {
        Some(dir) => dir,
        None => config.user_data()?.modules_path,
    };

    let repository = MemoryRepository::new();
    let count = repository
        .scan_modules_dir(&modules_dir)
        .with_context(|| format!("Failed to read {}", modules_dir.display()))?;

    if count == 0 {
        display::info(&format!("No modules installed in {}", modules_dir.display()));
        return Ok(());
    }

    display::success(&format!("{} module(s) installed", count));
    println!();
    for module in repository.local_modules() {
        display::display_local_module(&module);
    }

    Ok(())
}
