// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! User settings
//!
//! Persists the chosen working mode and the directories used for
//! downloads and installed modules. Settings are stored as JSON and
//! written atomically so a crash never leaves a partial file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Directory holding installed modules on a rooted device
pub const DEFAULT_MODULES_PATH: &str = "/data/adb/modules";

/// How the app talks to the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkingMode {
    /// Not chosen yet
    #[default]
    Setup,
    /// Direct root access
    Root,
    /// Privileged access through Shizuku
    Shizuku,
    /// No privileged access; modules can be browsed and downloaded only
    NonRoot,
}

impl WorkingMode {
    /// Modes with privileged access (Root and Shizuku)
    pub fn is_root(&self) -> bool {
        matches!(self, WorkingMode::Root | WorkingMode::Shizuku)
    }

    pub fn is_non_root(&self) -> bool {
        matches!(self, WorkingMode::NonRoot)
    }

    fn as_str(&self) -> &'static str {
        match self {
            WorkingMode::Setup => "setup",
            WorkingMode::Root => "root",
            WorkingMode::Shizuku => "shizuku",
            WorkingMode::NonRoot => "non-root",
        }
    }
}

impl std::fmt::Display for WorkingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkingMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "setup" => Ok(WorkingMode::Setup),
            "root" => Ok(WorkingMode::Root),
            "shizuku" => Ok(WorkingMode::Shizuku),
            "non-root" | "nonroot" | "non_root" => Ok(WorkingMode::NonRoot),
            other => Err(SettingsError::InvalidMode(other.to_string())),
        }
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserData {
    pub working_mode: WorkingMode,
    /// Where downloaded module zips are written
    pub download_path: PathBuf,
    /// Where installed modules live
    pub modules_path: PathBuf,
}

impl Default for UserData {
    fn default() -> Self {
        Self {
            working_mode: WorkingMode::Setup,
            download_path: PathBuf::from("downloads"),
            modules_path: PathBuf::from(DEFAULT_MODULES_PATH),
        }
    }
}

/// File-backed settings store
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Open the store in `dir`, creating the directory if needed
    pub fn new(dir: &Path) -> Result<Self, SettingsError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join("settings.json"),
        })
    }

    /// Load settings; a missing file yields the defaults
    pub fn load(&self) -> Result<UserData, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(UserData::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Save settings
    pub fn save(&self, data: &UserData) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(data)?;
        atomic_write(&self.path, json.as_bytes())
    }

    /// Load, modify and save settings, returning the saved value
    pub fn update(&self, f: impl FnOnce(&mut UserData)) -> Result<UserData, SettingsError> {
        let mut data = self.load()?;
        f(&mut data);
        self.save(&data)?;
        Ok(data)
    }

    /// Path of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Version line shown on the settings screen, e.g. `1.2.0 (120)`
pub fn about_label(version_name: &str, version_code: u32) -> String {
    format!("{} ({})", version_name, version_code)
}

/// Atomic file write (write to temp, then rename)
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), SettingsError> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, data)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Errors that can occur with the settings store
#[derive(Debug, Error)]
pub enum SettingsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown working mode name
    #[error("Unknown working mode: {0}")]
    InvalidMode(String),
}
