// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Update manifest definitions
//!
//! These types mirror the `update.json` document a repository publishes
//! for each module it hosts.

use serde::{Deserialize, Serialize};

/// Update manifest fetched from one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleUpdate {
    /// Seconds since the Unix epoch when the repository generated this manifest
    pub timestamp: f64,
    /// Available versions, in repository order
    #[serde(default)]
    pub versions: Vec<ModuleUpdateItem>,
    /// Repository the manifest was fetched from
    ///
    /// Set by the resolver after a successful fetch; any value in the
    /// document itself is overwritten.
    #[serde(default)]
    pub repo_url: String,
}

/// A single downloadable version of a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleUpdateItem {
    /// Seconds since the Unix epoch when this version was published
    #[serde(default)]
    pub timestamp: f64,
    /// Human readable version label
    pub version: String,
    /// Monotonic release number, unique per module
    pub version_code: i32,
    /// Location of the module zip
    pub zip_url: String,
    /// Location of the changelog, empty if none
    #[serde(default)]
    pub changelog: String,
    /// Repository this entry was taken from (set during merge)
    #[serde(default)]
    pub repo_url: String,
}

impl ModuleUpdate {
    /// Return this manifest tagged with the repository it came from
    pub fn with_repo_url(mut self, repo_url: impl Into<String>) -> Self {
        self.repo_url = repo_url.into();
        self
    }
}
