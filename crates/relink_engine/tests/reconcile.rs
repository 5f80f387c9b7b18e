use std::fs;

use pretty_assertions::assert_eq;
use relink_core::{Mapping, MatchPolicy, MissingUrlPolicy, PublishResult, ReportMode};
use relink_engine::{
    Credentials, PublishError, ReconcileConfig, ReconcileError, Reconciler, ReqwestTransport,
    TransportSettings,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{basic_auth, bearer_token, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_source(server: &MockServer, articles: Value) {
    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(query_param("page", "0"))
        .and(bearer_token("tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": articles,
            "pages": { "total_pages": 1 }
        })))
        .mount(server)
        .await;
}

async fn mount_destination(server: &MockServer, articles: Value) {
    Mock::given(method("GET"))
        .and(path("/collections"))
        .and(basic_auth("key", "X"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collections": { "items": [{ "id": "c1", "publicUrl": "https://d/c1" }], "pages": 1 }
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/c1/articles"))
        .and(basic_auth("key", "X"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": { "items": articles, "pages": 1 }
        })))
        .mount(server)
        .await;
}

fn config_for(server: &MockServer, output: &TempDir) -> ReconcileConfig {
    ReconcileConfig {
        credentials: Credentials {
            source_token: "tok".into(),
            destination_api_key: "key".into(),
            site_id: "site-1".into(),
        },
        source_base_url: server.uri(),
        destination_base_url: server.uri(),
        match_policy: MatchPolicy::NormalizedPrefix,
        report_mode: ReportMode::Audit,
        missing_urls: MissingUrlPolicy::Drop,
        audit_output: output.path().join("unmatched.csv"),
    }
}

async fn redirect_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == "/redirects")
        .map(|request| request.body_json::<Value>().expect("json body"))
        .collect()
}

#[tokio::test]
async fn fully_matched_run_publishes_and_writes_empty_audit() {
    relink_logging::initialize_for_tests();
    let server = MockServer::start().await;
    mount_source(&server, json!([{ "title": "FAQ", "url": "https://s/a" }])).await;
    mount_destination(&server, json!([{ "name": "faq", "publicUrl": "https://d/b" }])).await;
    Mock::given(method("POST"))
        .and(path("/redirects"))
        .and(basic_auth("key", "X"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let config = config_for(&server, &output);
    let transport = ReqwestTransport::new(TransportSettings::default()).unwrap();

    let report = Reconciler::new(&config, &transport).run().await.expect("run ok");

    let expected = Mapping {
        from: "https://s/a".into(),
        to: Some("https://d/b".into()),
    };
    assert_eq!(
        report.results,
        vec![PublishResult::Published {
            mapping: expected.clone(),
            url_mapping: "/a".into(),
            status: 201,
        }]
    );
    assert_eq!(report.attempted(), vec![&expected]);
    assert_eq!(
        redirect_bodies(&server).await,
        vec![json!({ "siteId": "site-1", "urlMapping": "/a", "redirect": "https://d/b" })]
    );

    let audit = report.audit_path.expect("audit written");
    assert_eq!(fs::read_to_string(audit).unwrap(), "url\n");
}

#[tokio::test]
async fn orphans_are_skipped_and_reported() {
    let server = MockServer::start().await;
    mount_source(
        &server,
        json!([
            { "title": "Getting Started", "url": "https://s/start" },
            { "title": "Legacy Billing", "url": "https://s/legacy" },
            { "title": "No Link" }
        ]),
    )
    .await;
    mount_destination(
        &server,
        json!([{ "name": "Getting-Started Guide", "publicUrl": "https://d/guide" }]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/redirects"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let config = config_for(&server, &output);
    let transport = ReqwestTransport::new(TransportSettings::default()).unwrap();

    let report = Reconciler::new(&config, &transport).run().await.expect("run ok");

    assert_eq!(report.counts.sources, 2);
    assert_eq!(report.counts.published, 1);
    assert_eq!(report.orphans, vec!["https://s/legacy".to_string()]);
    assert_eq!(
        report.results[1],
        PublishResult::Skipped(Mapping {
            from: "https://s/legacy".into(),
            to: None,
        })
    );
    assert_eq!(redirect_bodies(&server).await.len(), 1);
    assert_eq!(
        fs::read_to_string(output.path().join("unmatched.csv")).unwrap(),
        "url\nhttps://s/legacy\n"
    );
}

#[tokio::test]
async fn apply_mode_writes_no_report() {
    let server = MockServer::start().await;
    mount_source(&server, json!([{ "title": "Lost", "url": "https://s/lost" }])).await;
    mount_destination(&server, json!([])).await;

    let output = TempDir::new().unwrap();
    let config = ReconcileConfig {
        report_mode: ReportMode::Apply,
        ..config_for(&server, &output)
    };
    let transport = ReqwestTransport::new(TransportSettings::default()).unwrap();

    let report = Reconciler::new(&config, &transport).run().await.expect("run ok");

    assert!(report.audit_path.is_none());
    assert!(report.attempted().is_empty());
    assert!(!output.path().join("unmatched.csv").exists());
}

#[tokio::test]
async fn failed_publish_stops_the_remaining_redirects() {
    let server = MockServer::start().await;
    mount_source(
        &server,
        json!([
            { "title": "One", "url": "https://s/one" },
            { "title": "Two", "url": "https://s/two" },
            { "title": "Three", "url": "https://s/three" }
        ]),
    )
    .await;
    mount_destination(
        &server,
        json!([
            { "name": "One", "publicUrl": "https://d/one" },
            { "name": "Two", "publicUrl": "https://d/two" },
            { "name": "Three", "publicUrl": "https://d/three" }
        ]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/redirects"))
        .and(body_partial_json(json!({ "urlMapping": "/two" })))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/redirects"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let config = config_for(&server, &output);
    let transport = ReqwestTransport::new(TransportSettings::default()).unwrap();

    let err = Reconciler::new(&config, &transport).run().await.unwrap_err();

    match err {
        ReconcileError::Publish(PublishError::Status {
            url_mapping,
            status,
        }) => {
            assert_eq!(url_mapping, "/two");
            assert_eq!(status, 500);
        }
        other => panic!("expected publish error, got {other:?}"),
    }
    let attempted: Vec<Value> = redirect_bodies(&server)
        .await
        .into_iter()
        .map(|body| body["urlMapping"].clone())
        .collect();
    assert_eq!(attempted, vec![json!("/one"), json!("/two")]);
    assert!(!output.path().join("unmatched.csv").exists());
}

#[tokio::test]
async fn exact_policy_leaves_case_mismatch_unmatched() {
    let server = MockServer::start().await;
    mount_source(&server, json!([{ "title": "FAQ", "url": "https://s/a" }])).await;
    mount_destination(&server, json!([{ "name": "faq", "publicUrl": "https://d/b" }])).await;

    let output = TempDir::new().unwrap();
    let config = ReconcileConfig {
        match_policy: MatchPolicy::Exact,
        ..config_for(&server, &output)
    };
    let transport = ReqwestTransport::new(TransportSettings::default()).unwrap();

    let report = Reconciler::new(&config, &transport).run().await.expect("run ok");

    assert_eq!(report.orphans, vec!["https://s/a".to_string()]);
    assert!(redirect_bodies(&server).await.is_empty());
}

#[tokio::test]
async fn ingestion_failure_aborts_before_publishing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    mount_destination(&server, json!([{ "name": "FAQ", "publicUrl": "https://d/b" }])).await;

    let output = TempDir::new().unwrap();
    let config = config_for(&server, &output);
    let transport = ReqwestTransport::new(TransportSettings::default()).unwrap();

    let err = Reconciler::new(&config, &transport).run().await.unwrap_err();

    assert!(matches!(err, ReconcileError::Transport(_)));
    assert!(redirect_bodies(&server).await.is_empty());
}
