use std::process;
use std::sync::Arc;

use oddsgate::{
    application::fetcher::FeedFetcher,
    cache::FeedCache,
    config,
    domain::language::LanguageRegistry,
    infra::{
        error::InfraError,
        http::{self, AppState},
        telemetry,
        upstream::UpstreamFeedClient,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &InfraError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), InfraError> {
    let (_cli, settings) = config::load_with_cli()
        .map_err(|err| InfraError::configuration(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging)?;

    let cache = Arc::new(FeedCache::new(settings.cache.ttl));
    let source = Arc::new(UpstreamFeedClient::new(&settings.upstream)?);
    let fetcher = Arc::new(FeedFetcher::new(LanguageRegistry, cache, source));
    let router = http::build_router(AppState { fetcher });

    let listener = tokio::net::TcpListener::bind(settings.server.public_addr).await?;
    info!(
        target = "oddsgate::server",
        addr = %settings.server.public_addr,
        upstream = %settings.upstream.base_url,
        cache_ttl_secs = settings.cache.ttl.as_secs(),
        "listening"
    );

    axum::serve(listener, router.into_make_service())
        .await
        .map_err(InfraError::from)?;

    Ok(())
}
