//! In-memory local repository
//!
//! Online records are built from repository indexes; local records from a
//! scan of the device's modules directory.

use std::fs;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::UNIX_EPOCH;

use tracing::{debug, warn};

use super::{LocalRepository, Repo, RepoIndex};
use crate::module::{parse_module_prop, LocalModule, ModuleState, OnlineModule, PropError};

#[derive(Debug, Default)]
struct Inner {
    repos: Vec<Repo>,
    online: Vec<OnlineModule>,
    local: Vec<LocalModule>,
}

/// Thread-safe in-memory [`LocalRepository`]
#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: RwLock<Inner>,
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load a repository index
    ///
    /// Every listed module is tagged with `repo_url`. A module already
    /// known from another repository gains the URL; its metadata is
    /// replaced when this index offers a higher version code.
    pub fn add_index(&self, repo_url: &str, index: RepoIndex) {
        let mut inner = self.write();

        match inner.repos.iter_mut().find(|r| r.url == repo_url) {
            Some(repo) => {
                repo.name = index.name.clone();
                repo.timestamp = index.timestamp;
            }
            None => inner.repos.push(Repo {
                url: repo_url.to_string(),
                name: index.name.clone(),
                enabled: true,
                timestamp: index.timestamp,
            }),
        }

        for module in index.modules {
            match inner.online.iter_mut().find(|m| m.id == module.id) {
                Some(known) => {
                    if module.version_code > known.version_code {
                        let repo_urls = std::mem::take(&mut known.repo_urls);
                        *known = OnlineModule { repo_urls, ..module };
                    }
                    if !known.repo_urls.iter().any(|u| u == repo_url) {
                        known.repo_urls.push(repo_url.to_string());
                    }
                }
                None => inner.online.push(OnlineModule {
                    repo_urls: vec![repo_url.to_string()],
                    ..module
                }),
            }
        }

        debug!(repo_url, modules = inner.online.len(), "repository index loaded");
    }

    /// Enable or disable a repository; returns false if it is unknown
    ///
    /// Disabled repositories are hidden from online records.
    pub fn set_repo_enabled(&self, repo_url: &str, enabled: bool) -> bool {
        let mut inner = self.write();
        match inner.repos.iter_mut().find(|r| r.url == repo_url) {
            Some(repo) => {
                repo.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Replace the installed module records
    pub fn set_local_modules(&self, modules: Vec<LocalModule>) {
        self.write().local = modules;
    }

    /// Replace the installed module records with a scan of `modules_dir`
    ///
    /// Each sub-directory holding a readable `module.prop` with an id
    /// becomes one record; others are skipped. Returns the number of
    /// modules found.
    pub fn scan_modules_dir(&self, modules_dir: &Path) -> Result<usize, PropError> {
        let mut modules = Vec::new();

        for entry in fs::read_dir(modules_dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }

            match read_module_dir(&path) {
                Ok(module) => modules.push(module),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping module directory"),
            }
        }

        modules.sort_by(|a, b| a.id.cmp(&b.id));
        let count = modules.len();
        self.set_local_modules(modules);
        Ok(count)
    }
}

/// Build a local record from one module directory
fn read_module_dir(dir: &Path) -> Result<LocalModule, PropError> {
    let prop_path = dir.join("module.prop");
    let text = fs::read_to_string(&prop_path)?;
    let mut module = parse_module_prop(&text)?;

    module.state = if dir.join("remove").exists() {
        ModuleState::Remove
    } else if dir.join("update").exists() {
        ModuleState::Update
    } else if dir.join("disable").exists() {
        ModuleState::Disabled
    } else {
        ModuleState::Enabled
    };

    module.last_updated = fs::metadata(&prop_path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);

    Ok(module)
}

impl LocalRepository for MemoryRepository {
    fn local_modules(&self) -> Vec<LocalModule> {
        self.read().local.clone()
    }

    fn online_modules(&self) -> Vec<OnlineModule> {
        let inner = self.read();
        let enabled = |url: &String| {
            inner
                .repos
                .iter()
                .any(|r| &r.url == url && r.enabled)
        };

        inner
            .online
            .iter()
            .filter_map(|module| {
                let repo_urls: Vec<String> =
                    module.repo_urls.iter().filter(|u| enabled(*u)).cloned().collect();
                if repo_urls.is_empty() {
                    None
                } else {
                    Some(OnlineModule {
                        repo_urls,
                        ..module.clone()
                    })
                }
            })
            .collect()
    }

    fn repo_by_url(&self, url: &str) -> Option<Repo> {
        self.read().repos.iter().find(|r| r.url == url).cloned()
    }
}
