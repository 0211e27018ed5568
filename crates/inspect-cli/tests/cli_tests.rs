use httpmock::prelude::*;
use inspect_cli::{App, InspectConfig};
use inspect_classifier::VerdictSource;
use inspect_domain::{
    AccessGrant, Classification, DomainRecord, ErrorKind, MatchKind, MatchStore, SubscriptionType,
};
use inspect_store::SqliteStore;
use std::net::IpAddr;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> InspectConfig {
    InspectConfig {
        database_path: dir.path().join("inspect.db").to_string_lossy().into_owned(),
        ..Default::default()
    }
}

fn ip() -> IpAddr {
    "192.0.2.10".parse().unwrap()
}

#[tokio::test]
async fn test_classify_against_seeded_database() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let seed = SqliteStore::open(&config.database_path).unwrap();
    MatchStore::create(
        &seed,
        DomainRecord::new("gmail.com", Classification::Whitelist, MatchKind::Equals),
    )
    .await
    .unwrap();
    MatchStore::create(
        &seed,
        DomainRecord::new("mail", Classification::Blacklist, MatchKind::Contains),
    )
    .await
    .unwrap();
    drop(seed);

    let app = App::build(&config).unwrap();

    let verdict = app.classifier.classify("Someone@GMAIL.com", ip()).await.unwrap();
    assert_eq!(verdict.classification, Classification::Whitelist);
    assert_eq!(verdict.source, VerdictSource::Store(MatchKind::Equals));

    let verdict = app.classifier.classify("hotmail.com", ip()).await.unwrap();
    assert_eq!(verdict.classification, Classification::Blacklist);

    // no fallback configured
    let verdict = app.classifier.classify("example.org", ip()).await.unwrap();
    assert_eq!(verdict.source, VerdictSource::Unresolved);

    app.shutdown().await;
}

#[tokio::test]
async fn test_remote_fallback_result_survives_restart() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/classify");
        then.status(200)
            .json_body(serde_json::json!({"classification": "blacklist"}));
    });

    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir);
    config.classifier.fallback_address = Some(server.base_url());
    config.classifier.fallback_timeout_ms = 5_000;

    let app = App::build(&config).unwrap();
    let verdict = app.classifier.classify("spam.example", ip()).await.unwrap();
    assert_eq!(verdict.source, VerdictSource::Remote);
    app.shutdown().await;

    let app = App::build(&config).unwrap();
    let verdict = app.classifier.classify("spam.example", ip()).await.unwrap();
    assert_eq!(verdict.classification, Classification::Blacklist);
    assert_eq!(verdict.source, VerdictSource::Store(MatchKind::Equals));
    app.shutdown().await;

    mock.assert_hits(1);
}

#[tokio::test]
async fn test_unreachable_fallback_is_fail_open() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir);
    config.classifier.fallback_address = Some("http://127.0.0.1:9".to_string());

    let app = App::build(&config).unwrap();
    let verdict = app.classifier.classify("unknown.example", ip()).await.unwrap();
    assert_eq!(verdict.classification, Classification::Undefined);
    app.shutdown().await;
}

#[tokio::test]
async fn test_grant_then_authorize() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir);
    config.access.sweep_interval_secs = Some(1);

    let app = App::build(&config).unwrap();
    app.access
        .provision(AccessGrant {
            token: "tok_cli_1".to_string(),
            subscription_type: SubscriptionType::Startup,
            access_count: 10,
            access_expiry: inspect_domain::unix_now() + 600,
        })
        .await
        .unwrap();

    let grant = app.access.authorize("tok_cli_1").await.unwrap();
    assert_eq!(grant.subscription_type, SubscriptionType::Startup);

    let err = app.access.authorize("tok_unknown").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthenticated);

    app.shutdown().await;
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir);
    config.classifier.fallback_timeout_ms = 0;

    let err = App::build(&config).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}
