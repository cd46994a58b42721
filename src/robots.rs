//! robots.txt gate in front of a page fetcher

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use texting_robots::Robot;
use tracing::{debug, info};
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::fetch::PageFetcher;

/// Wraps a fetcher and refuses URLs that the host's robots.txt disallows.
///
/// robots.txt is fetched once per host through the inner fetcher. A host
/// without a readable robots.txt allows everything.
pub struct RobotsGate<F> {
    inner: F,
    user_agent: String,
    /// Raw robots.txt per host (Robot doesn't impl Clone, so we store raw)
    cache: RwLock<HashMap<String, String>>,
}

impl<F: PageFetcher> RobotsGate<F> {
    pub fn new(inner: F, user_agent: impl Into<String>) -> Self {
        Self {
            inner,
            user_agent: user_agent.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Whether `url` may be fetched
    pub async fn allowed(&self, url: &Url) -> bool {
        let Some(host) = url.host_str().map(str::to_lowercase) else {
            return true;
        };

        let cached = self
            .cache
            .read()
            .ok()
            .and_then(|cache| cache.get(&host).cloned());

        let robots_txt = match cached {
            Some(txt) => txt,
            None => {
                let txt = self.fetch_robots(url, &host).await;
                if let Ok(mut cache) = self.cache.write() {
                    cache.insert(host, txt.clone());
                }
                txt
            }
        };

        Robot::new(&self.user_agent, robots_txt.as_bytes())
            .map(|robot| robot.allowed(url.as_str()))
            .unwrap_or(true)
    }

    async fn fetch_robots(&self, url: &Url, host: &str) -> String {
        let robots_url = match Url::parse(&format!("{}://{}/robots.txt", url.scheme(), host)) {
            Ok(u) => u,
            Err(_) => return String::new(),
        };

        match self.inner.fetch(&robots_url).await {
            Ok(txt) => {
                debug!(host = %host, "robots.txt loaded");
                txt
            }
            // No robots.txt = allow all
            Err(_) => String::new(),
        }
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for RobotsGate<F> {
    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        if !self.allowed(url).await {
            info!(url = %url, "Disallowed by robots.txt");
            return Err(FetchError::Disallowed {
                url: url.to_string(),
            });
        }
        self.inner.fetch(url).await
    }
}
