//! Scripted fetcher for tests and offline use

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::fetcher::{FetchError, UpdateFetcher};
use super::types::ModuleUpdate;

#[derive(Debug, Clone)]
enum MockResponse {
    Update(ModuleUpdate),
    Status(u16),
    Pending,
}

/// Fetcher that answers from a fixed table keyed by repository URL
///
/// URLs with no scripted response fail with [`FetchError::NotFound`].
/// The same answer is returned regardless of the module id.
#[derive(Debug, Default)]
pub struct MockUpdateFetcher {
    responses: HashMap<String, MockResponse>,
    calls: AtomicUsize,
}

impl MockUpdateFetcher {
    /// Create a fetcher with no scripted responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `repo_url` with `update`
    pub fn with_update(mut self, repo_url: &str, update: ModuleUpdate) -> Self {
        self.responses
            .insert(repo_url.to_string(), MockResponse::Update(update));
        self
    }

    /// Fail `repo_url` with an HTTP status
    pub fn with_status(mut self, repo_url: &str, status: u16) -> Self {
        self.responses
            .insert(repo_url.to_string(), MockResponse::Status(status));
        self
    }

    /// Never answer `repo_url`
    pub fn with_pending(mut self, repo_url: &str) -> Self {
        self.responses
            .insert(repo_url.to_string(), MockResponse::Pending);
        self
    }

    /// Number of fetches issued so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpdateFetcher for MockUpdateFetcher {
    async fn fetch_update(
        &self,
        repo_url: &str,
        _module_id: &str,
    ) -> Result<ModuleUpdate, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.responses.get(repo_url).cloned() {
            Some(MockResponse::Update(update)) => Ok(update),
            Some(MockResponse::Status(404)) | None => Err(FetchError::NotFound),
            Some(MockResponse::Status(status)) => Err(FetchError::HttpError(status)),
            Some(MockResponse::Pending) => futures::future::pending().await,
        }
    }
}
