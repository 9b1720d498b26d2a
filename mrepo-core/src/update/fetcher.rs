//! Update manifest fetcher
//!
//! This module defines the fetch collaborator used by the resolver and an
//! HTTP implementation with:
//! - Size limits
//! - Proxy support
//! - Timeout configuration

use async_trait::async_trait;
use thiserror::Error;

use super::config::FetchConfig;
use super::types::ModuleUpdate;
use crate::repository::RepoIndex;

#[cfg(feature = "network")]
use reqwest::{Client, StatusCode};
#[cfg(feature = "network")]
use serde::de::DeserializeOwned;

/// Source of update manifests
///
/// Implementations must be safe to call concurrently for distinct
/// repository URLs.
#[async_trait]
pub trait UpdateFetcher: Send + Sync {
    /// Fetch the update manifest for `module_id` from `repo_url`
    async fn fetch_update(&self, repo_url: &str, module_id: &str)
        -> Result<ModuleUpdate, FetchError>;
}

/// Build the manifest location for a module within a repository
///
/// Repositories lay manifests out as `modules/<id>/update.json`.
pub fn manifest_url(repo_url: &str, module_id: &str) -> Result<String, FetchError> {
    let base = repo_url.strip_suffix('/').unwrap_or(repo_url);
    if base.is_empty() {
        return Err(FetchError::InvalidUrl(repo_url.to_string()));
    }
    if module_id.is_empty() || module_id.contains('/') {
        return Err(FetchError::InvalidUrl(format!("{}/{}", base, module_id)));
    }
    Ok(format!("{}/modules/{}/update.json", base, module_id))
}

/// Build the location of a repository's module index (`json/modules.json`)
pub fn index_url(repo_url: &str) -> Result<String, FetchError> {
    let base = repo_url.strip_suffix('/').unwrap_or(repo_url);
    if base.is_empty() {
        return Err(FetchError::InvalidUrl(repo_url.to_string()));
    }
    Ok(format!("{}/json/modules.json", base))
}

/// Fetches update manifests and repository indexes over HTTP
#[cfg(feature = "network")]
pub struct HttpUpdateFetcher {
    client: Client,
    max_manifest_size: u64,
}

#[cfg(feature = "network")]
impl HttpUpdateFetcher {
    /// Create a new fetcher from config
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());

        if let Some(proxy_url) = &config.proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
            max_manifest_size: config.max_manifest_size,
        })
    }

    /// Fetch a repository's module index
    pub async fn fetch_index(&self, repo_url: &str) -> Result<RepoIndex, FetchError> {
        self.get_json(&index_url(repo_url)?).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound),
            status if !status.is_success() => {
                return Err(FetchError::HttpError(status.as_u16()));
            }
            _ => {}
        }

        if let Some(len) = response.content_length() {
            if len > self.max_manifest_size {
                return Err(FetchError::TooLarge {
                    size: len,
                    max: self.max_manifest_size,
                });
            }
        }

        let data = response.bytes().await?;

        // Content-Length may be absent
        if data.len() as u64 > self.max_manifest_size {
            return Err(FetchError::TooLarge {
                size: data.len() as u64,
                max: self.max_manifest_size,
            });
        }

        Ok(serde_json::from_slice(&data)?)
    }
}

#[cfg(feature = "network")]
#[async_trait]
impl UpdateFetcher for HttpUpdateFetcher {
    async fn fetch_update(
        &self,
        repo_url: &str,
        module_id: &str,
    ) -> Result<ModuleUpdate, FetchError> {
        self.get_json(&manifest_url(repo_url, module_id)?).await
    }
}

/// Stub fetcher when the network feature is not enabled
#[cfg(not(feature = "network"))]
pub struct HttpUpdateFetcher {
    _private: (),
}

#[cfg(not(feature = "network"))]
impl HttpUpdateFetcher {
    /// Create a new fetcher (stub - always fails)
    pub fn new(_config: &FetchConfig) -> Result<Self, FetchError> {
        Err(FetchError::FeatureDisabled)
    }

    /// Fetch a repository's module index (stub - always fails)
    pub async fn fetch_index(&self, _repo_url: &str) -> Result<RepoIndex, FetchError> {
        Err(FetchError::FeatureDisabled)
    }
}

#[cfg(not(feature = "network"))]
#[async_trait]
impl UpdateFetcher for HttpUpdateFetcher {
    async fn fetch_update(
        &self,
        _repo_url: &str,
        _module_id: &str,
    ) -> Result<ModuleUpdate, FetchError> {
        Err(FetchError::FeatureDisabled)
    }
}

/// Errors that can occur while fetching a manifest
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP error with status code
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// The repository does not host this module
    #[error("Module not found in repository")]
    NotFound,

    /// Network/request error
    #[cfg(feature = "network")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Manifest too large
    #[error("Manifest too large: {size} bytes (max {max})")]
    TooLarge {
        /// Actual size in bytes
        size: u64,
        /// Maximum allowed size in bytes
        max: u64,
    },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Repository URL or module id cannot form a manifest URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network feature is not enabled
    #[error("Network feature is not enabled")]
    FeatureDisabled,
}
