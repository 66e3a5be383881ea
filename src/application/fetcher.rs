//! Cache-or-upstream resolution of per-language feeds.

use std::sync::Arc;

use async_trait::async_trait;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::cache::FeedCache;
use crate::domain::error::FeedError;
use crate::domain::feed::FeedDocument;
use crate::domain::language::LanguageRegistry;

/// Upstream provider seam. The production implementation lives in
/// `infra::upstream`; tests substitute scripted sources.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, language: &str) -> Result<FeedDocument, SourceError>;
}

/// Transport-level failure raised by a [`FeedSource`].
///
/// The message is surfaced verbatim as the public error body, so sources
/// must not put anything secret in it.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Per-language feed documents in resolution order.
///
/// Serializes as a JSON object keyed by language. Either every requested
/// language is present or the aggregation failed as a whole; partial maps
/// are never produced.
#[derive(Debug, Clone, Default)]
pub struct AggregatedFeeds {
    entries: Vec<(String, FeedDocument)>,
}

impl AggregatedFeeds {
    pub fn get(&self, language: &str) -> Option<&FeedDocument> {
        self.entries
            .iter()
            .find(|(key, _)| key == language)
            .map(|(_, document)| document)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeedDocument)> {
        self.entries
            .iter()
            .map(|(language, document)| (language.as_str(), document))
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(language, _)| language.as_str())
    }

    fn push(&mut self, language: &str, document: FeedDocument) {
        self.entries.push((language.to_string(), document));
    }
}

impl Serialize for AggregatedFeeds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (language, document) in &self.entries {
            map.serialize_entry(language, document)?;
        }
        map.end()
    }
}

/// Resolves requested languages from cache or upstream, one at a time.
pub struct FeedFetcher {
    registry: LanguageRegistry,
    cache: Arc<FeedCache>,
    source: Arc<dyn FeedSource>,
}

impl FeedFetcher {
    pub fn new(registry: LanguageRegistry, cache: Arc<FeedCache>, source: Arc<dyn FeedSource>) -> Self {
        Self {
            registry,
            cache,
            source,
        }
    }

    /// Resolve every requested language, or every supported language when the
    /// request names none. The first failure aborts the whole aggregation;
    /// languages after it are not attempted and no partial map is returned.
    pub async fn resolve(&self, requested: &[&str]) -> Result<AggregatedFeeds, FeedError> {
        let languages: Vec<&str> = if requested.is_empty() {
            self.registry.all().collect()
        } else {
            requested.to_vec()
        };

        let mut feeds = AggregatedFeeds::default();
        for language in languages {
            feeds.push(language, self.resolve_language(language).await?);
        }
        Ok(feeds)
    }

    async fn resolve_language(&self, language: &str) -> Result<FeedDocument, FeedError> {
        if !self.registry.is_supported(language) {
            return Err(FeedError::unsupported_language(language));
        }

        if let Some(document) = self.cache.get(language) {
            debug!(
                target = "oddsgate::fetch",
                language,
                origin = "cache",
                "feed resolved"
            );
            return Ok(document);
        }

        let document = self
            .source
            .fetch(language)
            .await
            .map_err(|err| FeedError::upstream(language, err.message))?;
        if document.is_null() {
            return Err(FeedError::no_data(language));
        }

        self.cache.put(language, document.clone());
        debug!(
            target = "oddsgate::fetch",
            language,
            origin = "upstream",
            "feed resolved"
        );
        Ok(document)
    }
}
