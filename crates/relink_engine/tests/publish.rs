use std::sync::Mutex;

use relink_core::{orphan_urls, Mapping, PublishResult};
use relink_engine::{
    Auth, FailureKind, PublishError, RedirectPublisher, Transport, TransportError,
};
use serde_json::Value;

/// Records POST bodies and answers with scripted results in order.
struct ScriptedTransport {
    responses: Mutex<Vec<Result<u16, TransportError>>>,
    posted: Mutex<Vec<Value>>,
}

impl ScriptedTransport {
    fn new(mut responses: Vec<Result<u16, TransportError>>) -> Self {
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            posted: Mutex::new(Vec::new()),
        }
    }

    fn posted_paths(&self) -> Vec<String> {
        self.posted
            .lock()
            .unwrap()
            .iter()
            .map(|body| body["urlMapping"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn get_json(
        &self,
        _url: &str,
        _auth: &Auth,
        _query: &[(&str, String)],
    ) -> Result<Value, TransportError> {
        unreachable!("publisher never reads")
    }

    async fn post_json(&self, url: &str, auth: &Auth, body: &Value) -> Result<u16, TransportError> {
        assert_eq!(url, "https://docs.example/v1/redirects");
        assert_eq!(
            auth,
            &Auth::Basic {
                user: "key".into(),
                password: "X".into()
            }
        );
        self.posted.lock().unwrap().push(body.clone());
        self.responses.lock().unwrap().pop().expect("scripted response")
    }
}

fn matched(from: &str, to: &str) -> Mapping {
    Mapping {
        from: from.into(),
        to: Some(to.into()),
    }
}

fn publisher(transport: &ScriptedTransport) -> RedirectPublisher<'_> {
    RedirectPublisher::new(transport, "https://docs.example/v1/", "key", "site-1")
}

#[tokio::test]
async fn unmatched_mappings_pass_through_without_a_call() {
    let transport = ScriptedTransport::new(vec![Ok(201)]);
    let orphan = Mapping {
        from: "https://s/orphan".into(),
        to: None,
    };

    let results = publisher(&transport)
        .publish_all(vec![orphan.clone(), matched("https://s/a", "https://d/b")])
        .await
        .unwrap();

    assert_eq!(results[0], PublishResult::Skipped(orphan));
    assert!(results[1].was_published());
    assert_eq!(transport.posted_paths(), vec!["/a"]);
}

#[tokio::test]
async fn matched_mapping_without_source_url_is_not_posted() {
    let transport = ScriptedTransport::new(vec![Ok(201)]);
    let untitled = Mapping {
        from: String::new(),
        to: Some("https://d/draft".into()),
    };

    let results = publisher(&transport)
        .publish_all(vec![untitled.clone(), matched("https://s/a", "https://d/b")])
        .await
        .unwrap();

    assert_eq!(results[0], PublishResult::Skipped(untitled));
    assert_eq!(orphan_urls(&results), vec![String::new()]);
    assert_eq!(transport.posted_paths(), vec!["/a"]);
}

#[tokio::test]
async fn second_failure_prevents_third_call() {
    let transport = ScriptedTransport::new(vec![Ok(201), Ok(500), Ok(201)]);
    let mappings = vec![
        matched("https://s/1", "https://d/1"),
        matched("https://s/2", "https://d/2"),
        matched("https://s/3", "https://d/3"),
    ];

    let err = publisher(&transport).publish_all(mappings).await.unwrap_err();

    assert_eq!(
        err,
        PublishError::Status {
            url_mapping: "/2".into(),
            status: 500
        }
    );
    assert_eq!(transport.posted_paths(), vec!["/1", "/2"]);
}

#[tokio::test]
async fn transport_failure_is_a_publish_error() {
    let network = TransportError {
        kind: FailureKind::Network,
        message: "connection reset".into(),
    };
    let transport = ScriptedTransport::new(vec![Err(network.clone())]);

    let err = publisher(&transport)
        .publish(matched("https://s/docs/x?y=1", "https://d/x"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        PublishError::Transport {
            url_mapping: "/docs/x?y=1".into(),
            source: network
        }
    );
}
