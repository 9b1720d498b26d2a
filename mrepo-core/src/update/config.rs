//! Configuration for update manifest fetching

use std::time::Duration;

/// Configuration for the HTTP update fetcher
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// HTTP timeout for a single manifest request
    pub timeout: Duration,

    /// Maximum size of a manifest or repository index (bytes)
    pub max_manifest_size: u64,

    /// Proxy URL (http, https or socks5)
    pub proxy_url: Option<String>,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_manifest_size: 5 * 1024 * 1024, // 5 MiB
            proxy_url: None,
            user_agent: format!(
                "MRepo/{}",
                option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0")
            ),
        }
    }
}

impl FetchConfig {
    /// Configure with a proxy
    pub fn with_proxy(mut self, proxy_url: String) -> Self {
        self.proxy_url = Some(proxy_url);
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
