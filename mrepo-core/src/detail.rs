// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module detail state
//!
//! Backs the module detail view. Opening a detail spawns one task that
//! looks the module up, then resolves its updates from every repository
//! that hosts it. Progress is published on a watch channel so observers
//! are notified instead of polling.
//!
//! The task belongs to the [`ModuleDetail`] handle: dropping the handle (or
//! calling [`ModuleDetail::cancel`]) aborts it, abandoning any fetch still
//! in flight. Versions are published once, after the merge, so a cancelled
//! detail never exposes a partial list.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::module::{LocalModule, OnlineModule};
use crate::repository::{LocalRepository, Repo};
use crate::settings::UserData;
use crate::update::{ModuleUpdateItem, UpdateFetcher, UpdateResolver};

/// Loading progress of a module detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailStatus {
    /// Lookup or update resolution still running
    #[default]
    Loading,
    /// Records and versions are available
    Ready,
    /// No online record exists for the module
    NotFound,
}

/// Observable state of a module detail
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    pub status: DetailStatus,
    /// Installed record, if the module is installed
    pub local: Option<LocalModule>,
    pub online: Option<OnlineModule>,
    /// Available versions, newest first
    pub versions: Vec<ModuleUpdateItem>,
}

/// Everything a download service needs to fetch one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Display name of the module
    pub name: String,
    /// Destination file
    pub path: PathBuf,
    /// Zip location
    pub url: String,
    /// Install once downloaded
    pub install: bool,
}

/// Handle to an open module detail
pub struct ModuleDetail {
    module_id: String,
    user_data: UserData,
    local_repo: Arc<dyn LocalRepository>,
    state: watch::Receiver<DetailState>,
    task: JoinHandle<()>,
}

impl ModuleDetail {
    /// Open the detail for `module_id` and start loading it
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(
        module_id: impl Into<String>,
        local_repo: Arc<dyn LocalRepository>,
        fetcher: Arc<dyn UpdateFetcher>,
        user_data: UserData,
    ) -> Self {
        let module_id = module_id.into();
        let (tx, state) = watch::channel(DetailState::default());

        let task = tokio::spawn(load(
            module_id.clone(),
            Arc::clone(&local_repo),
            UpdateResolver::new(fetcher),
            tx,
        ));

        Self {
            module_id,
            user_data,
            local_repo,
            state,
            task,
        }
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    /// New observer of the detail state
    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.clone()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> DetailState {
        self.state.borrow().clone()
    }

    /// Snapshot of the available versions
    pub fn versions(&self) -> Vec<ModuleUpdateItem> {
        self.state.borrow().versions.clone()
    }

    /// Wait until loading has finished
    ///
    /// Returns `None` if the detail was cancelled first.
    pub async fn wait_loaded(&self) -> Option<DetailState> {
        let mut rx = self.state.clone();
        let loaded = rx
            .wait_for(|s| s.status != DetailStatus::Loading)
            .await
            .map(|s| s.clone());
        loaded.ok()
    }

    /// Abort loading; in-flight fetches are abandoned
    pub fn cancel(&self) {
        if !self.task.is_finished() {
            debug!(module_id = %self.module_id, "cancelling module detail");
        }
        self.task.abort();
    }

    /// True once the loading task has completed or been aborted
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// True when an installed record was found
    pub fn installed(&self) -> bool {
        self.state.borrow().local.is_some()
    }

    /// Directory of this module on the device
    pub fn module_path(&self) -> PathBuf {
        self.user_data.modules_path.join(&self.module_id)
    }

    /// Modification time of the installed `module.prop`
    pub fn last_modified(&self) -> Option<SystemTime> {
        std::fs::metadata(self.module_path().join("module.prop"))
            .and_then(|m| m.modified())
            .ok()
    }

    /// Look up a repository by URL
    pub fn repo_by_url(&self, url: &str) -> Option<Repo> {
        self.local_repo.repo_by_url(url)
    }

    /// Describe the download of `item` into the download directory
    ///
    /// Returns `None` until the online record has been loaded.
    pub fn download_request(&self, item: &ModuleUpdateItem, install: bool) -> Option<DownloadRequest> {
        let state = self.state.borrow();
        let online = state.online.as_ref()?;

        let file_name = download_file_name(&online.name, &item.version, item.version_code);

        Some(DownloadRequest {
            name: online.name.clone(),
            path: self.user_data.download_path.join(file_name),
            url: item.zip_url.clone(),
            install,
        })
    }
}

impl Drop for ModuleDetail {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// File name for a downloaded version: `<name>_<version>_<code>.zip`
///
/// Whitespace, `+`, `|` and `/` are replaced with `_`.
pub fn download_file_name(name: &str, version: &str, version_code: i32) -> String {
    format!("{}_{}_{}.zip", name, version, version_code)
        .chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, '+' | '|' | '/') {
                '_'
            } else {
                c
            }
        })
        .collect()
}

async fn load(
    module_id: String,
    local_repo: Arc<dyn LocalRepository>,
    resolver: UpdateResolver<dyn UpdateFetcher>,
    tx: watch::Sender<DetailState>,
) {
    debug!(module_id = %module_id, "loading module detail");

    let local = local_repo.local_module(&module_id);
    let Some(online) = local_repo.online_module(&module_id) else {
        error!(module_id = %module_id, "module not offered by any repository");
        tx.send_modify(|s| {
            s.local = local;
            s.status = DetailStatus::NotFound;
        });
        return;
    };

    let repo_urls = online.repo_urls.clone();
    tx.send_modify(|s| {
        s.local = local;
        s.online = Some(online);
    });

    let versions = resolver.resolve(&module_id, &repo_urls).await;
    debug!(module_id = %module_id, versions = versions.len(), "module detail loaded");

    tx.send_modify(|s| {
        s.versions = versions;
        s.status = DetailStatus::Ready;
    });
}
