//! Page fetchers
//!
//! Fetchers return raw markup; parsing happens in [`crate::document`] so a
//! parsed tree never has to cross an await point.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::error::{FetchError, FetchResult};

/// Source of page markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> FetchResult<String>;
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for Arc<F> {
    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        (**self).fetch(url).await
    }
}

/// Fetches pages over HTTP(S) with reqwest
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> FetchResult<Self> {
        Self::new(&config.user_agent, Duration::from_secs(config.timeout_secs))
    }

    /// Use a preconfigured client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        debug!(url = %url, "HTTP fetch starting");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| {
                warn!(url = %url, error = %source, "HTTP request failed");
                FetchError::Http {
                    url: url.to_string(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })
    }
}

/// Serves canned pages by URL; used for offline replay and tests.
///
/// ```rust
/// use bowling_scrape::fetch::MemoryFetcher;
///
/// let fetcher = MemoryFetcher::new()
///     .with_page("https://example.com/match/1", "<html>...</html>");
/// ```
#[derive(Default, Clone)]
pub struct MemoryFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&self, url: impl Into<String>, markup: impl Into<String>) {
        if let Ok(mut pages) = self.pages.write() {
            pages.insert(url.into(), markup.into());
        }
    }

    /// Builder form of [`MemoryFetcher::add_page`]
    pub fn with_page(self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.add_page(url, markup);
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageFetcher for MemoryFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        if let Ok(mut requests) = self.requests.write() {
            requests.push(url.to_string());
        }

        self.pages
            .read()
            .ok()
            .and_then(|pages| pages.get(url.as_str()).cloned())
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_fetcher_serves_pages() {
        let fetcher = MemoryFetcher::new().with_page("https://example.com/a", "<p>a</p>");

        let a = Url::parse("https://example.com/a").unwrap();
        let b = Url::parse("https://example.com/b").unwrap();

        assert_eq!(fetcher.fetch(&a).await.unwrap(), "<p>a</p>");
        assert!(matches!(fetcher.fetch(&b).await, Err(FetchError::NotFound { .. })));
        assert_eq!(
            fetcher.requests(),
            vec!["https://example.com/a".to_string(), "https://example.com/b".to_string()]
        );
    }

    #[test]
    fn test_http_fetcher_builds_from_config() {
        assert!(HttpFetcher::from_config(&Config::default()).is_ok());
    }
}
