// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module records
//!
//! A module is identified by a stable string id and versioned by an integer
//! version code. Installed modules are described by their `module.prop`;
//! online modules come from repository indexes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Install state of a module on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleState {
    /// Active on next boot
    #[default]
    Enabled,
    /// Installed but disabled (`disable` marker present)
    Disabled,
    /// Scheduled for removal (`remove` marker present)
    Remove,
    /// Update staged, applied on next boot (`update` marker present)
    Update,
}

impl std::fmt::Display for ModuleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ModuleState::Enabled => "enabled",
            ModuleState::Disabled => "disabled",
            ModuleState::Remove => "remove",
            ModuleState::Update => "update",
        };
        write!(f, "{}", label)
    }
}

/// A module installed on the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalModule {
    pub id: String,
    pub name: String,
    pub version: String,
    pub version_code: i32,
    pub author: String,
    pub description: String,
    #[serde(default)]
    pub state: ModuleState,
    /// Milliseconds since the Unix epoch, 0 when unknown
    #[serde(default)]
    pub last_updated: i64,
}

/// A module offered by one or more online repositories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineModule {
    pub id: String,
    pub name: String,
    pub version: String,
    pub version_code: i32,
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub license: String,
    /// Every repository whose index lists this module
    #[serde(default)]
    pub repo_urls: Vec<String>,
}

/// Parse the contents of a `module.prop` file
///
/// Lines are `key=value`; blank lines and `#` comments are ignored and
/// values are trimmed. An `id` is required. A missing or malformed
/// `versionCode` is read as 0.
///
/// # Example
/// ```
/// use mrepo_core::parse_module_prop;
///
/// let module = parse_module_prop("id=zygisk\nname=Zygisk\nversionCode=12").unwrap();
/// assert_eq!(module.id, "zygisk");
/// assert_eq!(module.version_code, 12);
/// ```
pub fn parse_module_prop(text: &str) -> Result<LocalModule, PropError> {
    let props: HashMap<&str, &str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect();

    let id = props
        .get("id")
        .filter(|id| !id.is_empty())
        .ok_or(PropError::MissingId)?;

    let field = |key: &str| props.get(key).map(|v| v.to_string()).unwrap_or_default();

    Ok(LocalModule {
        id: id.to_string(),
        name: field("name"),
        version: field("version"),
        version_code: props
            .get("versionCode")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0),
        author: field("author"),
        description: field("description"),
        state: ModuleState::Enabled,
        last_updated: 0,
    })
}

/// Errors reading a module descriptor
#[derive(Debug, Error)]
pub enum PropError {
    /// The `id` key is absent or empty
    #[error("module.prop has no id")]
    MissingId,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
