//! Update resolution across repositories
//!
//! A module may be hosted by several repositories, each publishing its own
//! manifest. The resolver fetches all of them concurrently, then merges the
//! successful ones on a single task:
//!
//! 1. Manifests are ordered by timestamp, most recent first.
//! 2. Entries are taken in that order; a version code already taken is
//!    skipped, so the most recently published repository wins.
//! 3. The merged entries are ordered by version code, highest first.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error};

use super::fetcher::{FetchError, UpdateFetcher};
use super::types::{ModuleUpdate, ModuleUpdateItem};

/// Merge manifests into a version-code-unique list, newest version first
///
/// Each kept entry is tagged with the `repo_url` of the manifest it came
/// from. Manifests with equal timestamps are processed in input order.
pub fn merge_updates(mut manifests: Vec<ModuleUpdate>) -> Vec<ModuleUpdateItem> {
    // Stable sort keeps input order for equal timestamps
    manifests.sort_by(|a, b| b.timestamp.total_cmp(&a.timestamp));

    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for ModuleUpdate {
        versions, repo_url, ..
    } in manifests
    {
        for item in versions {
            if seen.insert(item.version_code) {
                items.push(ModuleUpdateItem {
                    repo_url: repo_url.clone(),
                    ..item
                });
            }
        }
    }

    if !items.is_empty() {
        items.sort_by(|a, b| b.version_code.cmp(&a.version_code));
    }

    items
}

/// Outcome of a resolution, including the repositories that failed
#[derive(Debug, Default)]
pub struct UpdateReport {
    /// Merged entries, newest version first
    pub items: Vec<ModuleUpdateItem>,
    /// Repositories whose fetch failed, with the error
    pub failures: Vec<(String, FetchError)>,
    /// Number of repositories queried
    pub attempted: usize,
}

impl UpdateReport {
    /// True when at least one repository was queried and none answered
    ///
    /// Distinguishes "every repository failed" from "no updates exist",
    /// which look identical in `items` alone.
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.failures.len() == self.attempted
    }
}

/// Resolves available updates for a module from its repositories
pub struct UpdateResolver<F: UpdateFetcher + ?Sized> {
    fetcher: Arc<F>,
}

impl<F: UpdateFetcher + ?Sized> Clone for UpdateResolver<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl<F: UpdateFetcher + ?Sized> UpdateResolver<F> {
    /// Create a resolver around a fetch collaborator
    pub fn new(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }

    /// Resolve the merged update list for `module_id`
    ///
    /// Never fails: a repository that cannot be fetched is logged and left
    /// out. If no repository answers the result is empty.
    pub async fn resolve(&self, module_id: &str, repo_urls: &[String]) -> Vec<ModuleUpdateItem> {
        self.resolve_report(module_id, repo_urls).await.items
    }

    /// Resolve like [`resolve`](Self::resolve), also reporting failures
    pub async fn resolve_report(&self, module_id: &str, repo_urls: &[String]) -> UpdateReport {
        if repo_urls.is_empty() {
            debug!(module_id, "no repositories configured, skipping update check");
            return UpdateReport::default();
        }

        let fetches = repo_urls.iter().map(|url| async move {
            let result = self.fetcher.fetch_update(url, module_id).await;
            (url, result)
        });

        // Fan in before merging; the merge itself runs on this task only
        let results = join_all(fetches).await;

        let mut manifests = Vec::with_capacity(results.len());
        let mut failures = Vec::new();

        for (url, result) in results {
            match result {
                Ok(update) => manifests.push(update.with_repo_url(url.as_str())),
                Err(e) => {
                    error!(repo_url = %url, module_id, error = %e, "failed to fetch update manifest");
                    failures.push((url.clone(), e));
                }
            }
        }

        debug!(
            module_id,
            succeeded = manifests.len(),
            failed = failures.len(),
            "update manifests fetched"
        );

        UpdateReport {
            items: merge_updates(manifests),
            failures,
            attempted: repo_urls.len(),
        }
    }
}
