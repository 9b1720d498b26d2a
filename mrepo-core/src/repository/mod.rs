// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module repositories
//!
//! The local repository knows which modules are installed on the device
//! and which are offered online, together with the repository URLs that
//! host each online module.

mod memory;

pub use memory::MemoryRepository;

use serde::{Deserialize, Serialize};

use crate::module::{LocalModule, OnlineModule};

/// A configured online repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repo {
    pub url: String,
    pub name: String,
    pub enabled: bool,
    /// Timestamp of the last index loaded from this repository
    pub timestamp: f64,
}

/// A repository's `modules.json` index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoIndex {
    pub name: String,
    pub timestamp: f64,
    #[serde(default)]
    pub modules: Vec<OnlineModule>,
}

/// Known local and online module records
pub trait LocalRepository: Send + Sync {
    /// Modules installed on the device
    fn local_modules(&self) -> Vec<LocalModule>;

    /// Modules offered by enabled repositories
    fn online_modules(&self) -> Vec<OnlineModule>;

    /// Look up a configured repository
    fn repo_by_url(&self, url: &str) -> Option<Repo>;

    /// Installed module with the given id
    fn local_module(&self, id: &str) -> Option<LocalModule> {
        self.local_modules().into_iter().find(|m| m.id == id)
    }

    /// Online module with the given id
    fn online_module(&self, id: &str) -> Option<OnlineModule> {
        self.online_modules().into_iter().find(|m| m.id == id)
    }
}
