//! Display Helpers
//!
//! Terminal output formatting and styling.

use std::time::{SystemTime, UNIX_EPOCH};

use console::{style, Style};
use mrepo_core::{LocalModule, ModuleState, ModuleUpdateItem};

/// Prints a success message.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Prints a warning message.
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Prints an info message.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Displays a list of available versions, newest first.
pub fn display_versions(versions: &[ModuleUpdateItem]) {
    let dim = Style::new().dim();
    for item in versions {
        println!(
            "  {:>8}  {:16} {}",
            style(item.version_code).cyan(),
            item.version,
            dim.apply_to(&item.repo_url)
        );
    }
}

/// Displays an installed module in a compact format.
pub fn display_local_module(module: &LocalModule) {
    let state = match module.state {
        ModuleState::Enabled => style(module.state.to_string()).green(),
        ModuleState::Disabled => style(module.state.to_string()).dim(),
        ModuleState::Remove => style(module.state.to_string()).red(),
        ModuleState::Update => style(module.state.to_string()).yellow(),
    };
    println!(
        "  {:24} {:12} {:>8}  {}",
        style(&module.id).bold(),
        module.version,
        module.version_code,
        state
    );
}

/// Formats a timestamp as seconds since the Unix epoch.
pub fn format_time(time: SystemTime) -> String {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => format!("{} (unix time)", d.as_secs()),
        Err(_) => "before 1970".to_string(),
    }
}
