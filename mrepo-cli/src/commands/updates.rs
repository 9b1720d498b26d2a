//! Updates Command
//!
//! Resolves the available versions of a module across repositories.

use std::sync::Arc;

use anyhow::{bail, Result};
use mrepo_core::{HttpUpdateFetcher, UpdateReport, UpdateResolver};
use tracing::debug;

use crate::config::CliConfig;
use crate::display;

/// Resolves and prints the merged update list.
pub async fn run(module_id: &str, repos: &[String], json: bool, config: &CliConfig) -> Result<()> {
    let fetcher = Arc::new(HttpUpdateFetcher::new(&config.fetch_config())?);
    let resolver = UpdateResolver::new(fetcher);

    let report = resolver.resolve_report(module_id, repos).await;
    debug!(
        module_id,
        attempted = report.attempted,
        failed = report.failures.len(),
        versions = report.items.len(),
        "update check finished"
    );

    ensure_reachable(&report, module_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.items)?);
        return Ok(());
    }

    for (url, _) in &report.failures {
        display::warning(&format!("Skipped {}", url));
    }

    if report.items.is_empty() {
        display::info(&format!("No versions of {} available", module_id));
    } else {
        display::success(&format!(
            "{} version(s) of {} available",
            report.items.len(),
            module_id
        ));
        println!();
        display::display_versions(&report.items);
    }

    Ok(())
}

/// Fails when every repository was queried and none answered.
fn ensure_reachable(report: &UpdateReport, module_id: &str) -> Result<()> {
    if report.all_failed() {
        bail!(
            "None of the {} repositories could provide updates for {}",
            report.attempted,
            module_id
        );
    }
    Ok(())
}
