//! Info Command
//!
//! Shows the detail view of a module: its records, available versions and
//! where the newest version would be downloaded.

use std::sync::Arc;

use anyhow::{bail, Result};
use console::style;
use mrepo_core::{DetailStatus, HttpUpdateFetcher, MemoryRepository, ModuleDetail};
use tracing::debug;

use crate::config::CliConfig;
use crate::display;

/// Loads repository indexes and prints the module detail.
pub async fn run(module_id: &str, repos: &[String], config: &CliConfig) -> Result<()> {
    let user_data = config.user_data()?;
    let fetcher = Arc::new(HttpUpdateFetcher::new(&config.fetch_config())?);
    let repository = Arc::new(MemoryRepository::new());

    for url in repos {
        match fetcher.fetch_index(url).await {
            Ok(index) => {
                debug!(repo_url = %url, modules = index.modules.len(), "loaded repository index");
                repository.add_index(url, index);
            }
            Err(e) => {
                debug!(repo_url = %url, error = ?e, "index load failed");
                display::warning(&format!("Could not load index from {}: {}", url, e));
            }
        }
    }

    if user_data.modules_path.is_dir() {
        if let Err(e) = repository.scan_modules_dir(&user_data.modules_path) {
            display::warning(&format!("Could not read installed modules: {}", e));
        }
    }

    let detail = ModuleDetail::open(module_id, repository, fetcher, user_data);
    let Some(state) = detail.wait_loaded().await else {
        bail!("Loading {} was interrupted", module_id);
    };

    let online = match (state.status, state.online.as_ref()) {
        (DetailStatus::Ready, Some(online)) => online,
        _ => bail!("{} is not offered by any of the given repositories", module_id),
    };

    println!("{}", "─".repeat(48));
    println!("  {}", style(&online.name).bold().cyan());
    println!("  by {}", online.author);
    println!("{}", "─".repeat(48));
    println!("  Latest:     {} ({})", online.version, online.version_code);

    match &state.local {
        Some(local) => {
            println!("  Installed:  {} ({}) [{}]", local.version, local.version_code, local.state);
            if let Some(modified) = detail.last_modified() {
                println!("  Modified:   {}", display::format_time(modified));
            }
        }
        None => println!("  Installed:  {}", style("no").dim()),
    }

    for url in &online.repo_urls {
        let name = detail
            .repo_by_url(url)
            .map(|r| r.name)
            .unwrap_or_else(|| url.clone());
        println!("  Repository: {}", name);
    }
    println!();

    if state.versions.is_empty() {
        display::info("No versions available");
        return Ok(());
    }

    display::display_versions(&state.versions);
    println!();

    if let Some(request) = detail.download_request(&state.versions[0], false) {
        display::info(&format!(
            "Newest version downloads to {}",
            request.path.display()
        ));
    }

    Ok(())
}
