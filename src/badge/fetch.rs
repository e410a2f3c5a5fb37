use std::time::Duration;

use async_trait::async_trait;

use super::coverage::CoverageExtractor;
use super::models::{BadgeValue, CoverageValue, StatusValue};
use super::options::ParserOptions;
use super::status::StatusClassifier;
use super::urls::{BadgeTarget, cache_busted_now};
use crate::errors::FetchError;

const USER_AGENT: &str = concat!("badgeboard/", env!("CARGO_PKG_VERSION"));

/// Abstraction over badge downloads for testability.
/// Real implementation: `HttpBadgeFetcher`.
#[async_trait]
pub trait BadgeFetcher: Send + Sync {
    /// Fetch the raw body of a badge. Implementations add cache busting.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches badges over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpBadgeFetcher {
    client: reqwest::Client,
}

impl HttpBadgeFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BadgeFetcher for HttpBadgeFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let busted = cache_busted_now(url)?;
        tracing::debug!(url = %busted, "fetching badge");

        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let resp = self
            .client
            .get(&busted)
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(transport)
    }
}

/// Fetches badges and runs them through the parser.
///
/// Every fetch failure degrades to `unknown` here so callers only ever see
/// renderable values.
pub struct BadgeReader<F> {
    fetcher: F,
    classifier: StatusClassifier,
    extractor: CoverageExtractor,
}

impl<F: BadgeFetcher> BadgeReader<F> {
    pub fn new(fetcher: F, options: ParserOptions) -> Self {
        Self {
            fetcher,
            classifier: StatusClassifier::new(options),
            extractor: CoverageExtractor::new(options),
        }
    }

    pub async fn read_status(&self, url: &str) -> StatusValue {
        match self.fetcher.fetch_text(url).await {
            Ok(body) => self.classifier.classify(&body),
            Err(e) => {
                tracing::warn!(error = %e, "status badge unavailable, reporting unknown");
                StatusValue::Unknown
            }
        }
    }

    pub async fn read_coverage(&self, url: &str) -> CoverageValue {
        match self.fetcher.fetch_text(url).await {
            Ok(body) => self.extractor.extract(&body),
            Err(e) => {
                tracing::warn!(error = %e, "coverage badge unavailable, reporting unknown");
                CoverageValue::Unknown
            }
        }
    }

    /// Read a target as a status or coverage value depending on its kind.
    pub async fn read(&self, target: &BadgeTarget) -> BadgeValue {
        if target.kind.is_status() {
            BadgeValue::Status(self.read_status(&target.badge_url).await)
        } else {
            BadgeValue::Coverage(self.read_coverage(&target.badge_url).await)
        }
    }
}

#[async_trait]
impl<T: BadgeFetcher + ?Sized> BadgeFetcher for std::sync::Arc<T> {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch_text(url).await
    }
}
