// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module update resolution
//!
//! Provides functionality for fetching update manifests from every
//! repository that hosts a module and merging them into one list of
//! available versions:
//! - Fetches are issued concurrently, one per repository URL
//! - A failing repository is logged and skipped, never fatal
//! - Entries are de-duplicated by version code, newest manifest first
//! - The merged list is ordered by version code, highest first

mod config;
mod fetcher;
mod mock;
mod resolver;
mod types;

pub use config::FetchConfig;
pub use fetcher::{index_url, manifest_url, FetchError, HttpUpdateFetcher, UpdateFetcher};
pub use mock::MockUpdateFetcher;
pub use resolver::{merge_updates, UpdateReport, UpdateResolver};
pub use types::{ModuleUpdate, ModuleUpdateItem};
