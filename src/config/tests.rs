use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.public_port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        public_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.public_addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn cache_ttl_defaults_to_one_hour() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
    assert_eq!(settings.cache.ttl, Duration::from_secs(3600));
}

#[test]
fn upstream_defaults_point_at_the_provider() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
    assert_eq!(
        settings.upstream.base_url.as_str(),
        "https://partners.betvictor.mobi/"
    );
    assert_eq!(settings.upstream.timeout, Duration::from_secs(30));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn invalid_upstream_url_is_rejected() {
    let mut raw = RawSettings::default();
    raw.upstream.base_url = Some("not a url".to_string());

    let error = Settings::from_raw(raw).unwrap_err();
    assert!(matches!(
        error,
        LoadError::Invalid {
            key: "upstream.base_url",
            ..
        }
    ));
}

#[test]
fn invalid_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("chatty".to_string());

    let error = Settings::from_raw(raw).unwrap_err();
    assert!(matches!(
        error,
        LoadError::Invalid {
            key: "logging.level",
            ..
        }
    ));
}

#[test]
fn parse_serve_arguments() {
    let args = CliArgs::parse_from([
        "oddsgate",
        "--server-public-port",
        "8080",
        "--cache-ttl-seconds",
        "120",
        "--upstream-base-url",
        "https://feeds.example.com",
    ]);

    assert_eq!(args.overrides.public_port, Some(8080));
    assert_eq!(args.overrides.cache_ttl_seconds, Some(120));
    assert_eq!(
        args.overrides.upstream_base_url.as_deref(),
        Some("https://feeds.example.com")
    );
}
