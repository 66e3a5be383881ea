//! reqwest-backed implementation of the upstream provider seam.

use std::time::Instant;

use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::Client;
use tracing::{debug, warn};

use crate::application::fetcher::{FeedSource, SourceError};
use crate::config::UpstreamSettings;
use crate::domain::feed::FeedDocument;

use super::error::InfraError;

const METRIC_UPSTREAM_FETCH_MS: &str = "oddsgate_upstream_fetch_ms";
const METRIC_UPSTREAM_FAILURE_TOTAL: &str = "oddsgate_upstream_failure_total";

/// HTTP client for the odds provider's per-language in-play feed.
pub struct UpstreamFeedClient {
    client: Client,
    base_url: String,
}

impl UpstreamFeedClient {
    pub fn new(settings: &UpstreamSettings) -> Result<Self, InfraError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| {
                InfraError::configuration(format!("failed to build upstream client: {err}"))
            })?;

        Ok(Self {
            client,
            base_url: settings.base_url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    fn events_url(&self, language: &str) -> String {
        format!("{}/{}/in-play/1/events", self.base_url, language)
    }

    fn failed(&self, language: &str, err: reqwest::Error) -> SourceError {
        counter!(METRIC_UPSTREAM_FAILURE_TOTAL).increment(1);
        let source = SourceError::new(err.to_string());
        warn!(
            target = "oddsgate::upstream",
            language,
            error = %source,
            "upstream fetch failed"
        );
        source
    }
}

#[async_trait]
impl FeedSource for UpstreamFeedClient {
    /// GET the language's feed and decode it as opaque JSON. HTTP error
    /// statuses are not special-cased: a body that fails to decode is a
    /// transport failure like any other.
    async fn fetch(&self, language: &str) -> Result<FeedDocument, SourceError> {
        let url = self.events_url(language);
        let started = Instant::now();

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => return Err(self.failed(language, err)),
        };
        match response.json::<FeedDocument>().await {
            Ok(document) => {
                let elapsed = started.elapsed();
                histogram!(METRIC_UPSTREAM_FETCH_MS).record(elapsed.as_secs_f64() * 1000.0);
                debug!(
                    target = "oddsgate::upstream",
                    language,
                    elapsed_ms = elapsed.as_millis(),
                    "fetched feed"
                );
                Ok(document)
            }
            Err(err) => Err(self.failed(language, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use url::Url;

    use super::*;

    fn settings(base: &str) -> UpstreamSettings {
        UpstreamSettings {
            base_url: Url::parse(base).expect("valid url"),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn events_url_is_parameterized_by_language() {
        let client = UpstreamFeedClient::new(&settings("https://partners.betvictor.mobi"))
            .expect("client builds");
        assert_eq!(
            client.events_url("en-gb"),
            "https://partners.betvictor.mobi/en-gb/in-play/1/events"
        );
    }

    #[test]
    fn trailing_slashes_in_the_base_url_are_tolerated() {
        let client =
            UpstreamFeedClient::new(&settings("https://feeds.example.com/")).expect("client builds");
        assert_eq!(
            client.events_url("zh-cn"),
            "https://feeds.example.com/zh-cn/in-play/1/events"
        );
    }
}
