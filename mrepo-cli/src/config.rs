//! CLI Configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use mrepo_core::{FetchConfig, SettingsStore, UserData};

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Data directory for settings.
    pub data_dir: PathBuf,
    /// HTTP timeout for repository requests.
    pub timeout: Duration,
    /// Optional proxy for repository requests.
    pub proxy: Option<String>,
}

impl CliConfig {
    /// Returns the settings store in the data directory.
    pub fn settings_store(&self) -> Result<SettingsStore> {
        Ok(SettingsStore::new(&self.data_dir)?)
    }

    /// Loads user settings, falling back to defaults.
    pub fn user_data(&self) -> Result<UserData> {
        Ok(self.settings_store()?.load()?)
    }

    /// Returns the fetcher configuration.
    pub fn fetch_config(&self) -> FetchConfig {
        let config = FetchConfig::default().with_timeout(self.timeout);
        match &self.proxy {
            Some(proxy) => config.with_proxy(proxy.clone()),
            None => config,
        }
    }
}
