//! Handlers for the feed surface.
//!
//! Each handler resolves feeds through the shared fetcher, projects the
//! requested view, and serializes it; every error path goes through
//! [`ApiError`](super::error::ApiError) so bodies stay uniform.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::application::fetcher::AggregatedFeeds;
use crate::application::views;
use crate::domain::feed::FeedDocument;

use super::AppState;
use super::error::ApiError;

#[derive(Debug, Serialize)]
pub(super) struct FeedsResponse {
    result: AggregatedFeeds,
}

#[derive(Debug, Serialize)]
pub(super) struct SportsCatalogResponse {
    result: SportsCatalogBody,
}

#[derive(Debug, Serialize)]
pub(super) struct SportsCatalogBody {
    sports: LanguageSports,
}

/// Language → sport descriptions, serialized as an object in aggregation
/// order.
#[derive(Debug)]
pub(super) struct LanguageSports(Vec<(String, Vec<String>)>);

impl Serialize for LanguageSports {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (language, sports) in &self.0 {
            map.serialize_entry(language, sports)?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
pub(super) struct LanguageSportsResponse {
    result: LanguageSportsBody,
}

#[derive(Debug, Serialize)]
pub(super) struct LanguageSportsBody {
    sports: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct EventsResponse {
    result: EventsBody,
}

#[derive(Debug, Serialize)]
pub(super) struct EventsBody {
    events: Vec<FeedDocument>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EventQuery {
    event: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SportsQuery {
    sports: Option<String>,
}

pub(super) async fn all_feeds(
    State(state): State<AppState>,
) -> Result<Json<FeedsResponse>, ApiError> {
    let result = state.fetcher.resolve(&[]).await?;
    Ok(Json(FeedsResponse { result }))
}

pub(super) async fn sports_catalog(
    State(state): State<AppState>,
) -> Result<Json<SportsCatalogResponse>, ApiError> {
    let feeds = state.fetcher.resolve(&[]).await?;
    let sports = LanguageSports(views::sports_by_language(&feeds));
    Ok(Json(SportsCatalogResponse {
        result: SportsCatalogBody { sports },
    }))
}

pub(super) async fn language_feed(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> Result<Json<FeedsResponse>, ApiError> {
    let result = state.fetcher.resolve(&[lang.as_str()]).await?;
    Ok(Json(FeedsResponse { result }))
}

pub(super) async fn language_sports(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> Result<Json<LanguageSportsResponse>, ApiError> {
    let feeds = state.fetcher.resolve(&[lang.as_str()]).await?;
    let document = resolved_document(&feeds, &lang)?;
    Ok(Json(LanguageSportsResponse {
        result: LanguageSportsBody {
            sports: views::sport_descriptions(document),
        },
    }))
}

pub(super) async fn event_lookup(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    Query(query): Query<EventQuery>,
) -> Result<Json<EventsResponse>, ApiError> {
    let feeds = state.fetcher.resolve(&[lang.as_str()]).await?;
    let document = resolved_document(&feeds, &lang)?;
    let events = views::lookup_events(document, query.event.as_deref())?;
    Ok(Json(EventsResponse {
        result: EventsBody { events },
    }))
}

pub(super) async fn events_by_sport(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    Query(query): Query<SportsQuery>,
) -> Result<Json<EventsResponse>, ApiError> {
    let feeds = state.fetcher.resolve(&[lang.as_str()]).await?;
    let document = resolved_document(&feeds, &lang)?;
    let events = views::events_for_sports(document, query.sports.as_deref())?;
    Ok(Json(EventsResponse {
        result: EventsBody { events },
    }))
}

pub(super) async fn unmatched_route() -> ApiError {
    ApiError::unmatched_route()
}

/// A successful aggregation contains every requested language; a missing
/// entry is an internal fault, not a client error.
fn resolved_document<'a>(
    feeds: &'a AggregatedFeeds,
    language: &str,
) -> Result<&'a FeedDocument, ApiError> {
    feeds.get(language).ok_or_else(|| {
        ApiError::internal(format!("resolved aggregate is missing `{language}`"))
    })
}
