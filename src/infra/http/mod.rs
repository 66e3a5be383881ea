pub mod error;
mod handlers;
mod middleware;

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware, routing::get};

use crate::application::fetcher::FeedFetcher;

/// Shared state for the feed routes.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<FeedFetcher>,
}

/// The public feed router.
///
/// Static segments win over the `{lang}` capture, so `/data` and
/// `/{lang}/data` coexist.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/data", get(handlers::all_feeds))
        .route("/sports", get(handlers::sports_catalog))
        .route("/{lang}/data", get(handlers::language_feed))
        .route("/{lang}/sports", get(handlers::language_sports))
        .route("/{lang}/event", get(handlers::event_lookup))
        .route("/{lang}/events", get(handlers::events_by_sport))
        .fallback(handlers::unmatched_route)
        .layer(axum_middleware::from_fn(middleware::log_responses))
        .layer(axum_middleware::from_fn(middleware::set_request_context))
        .with_state(state)
}
