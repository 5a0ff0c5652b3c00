use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::routing::get;
use axum::{Json, Router};
use lol_prophet::policy::{
    FilePolicySource, HttpPolicySource, PolicyHandle, PolicyRefresher, PolicySource,
    PolicySourceError, RefreshOutcome,
};
use lol_prophet::scoring::{PolicyDocument, PolicyViolation};
use tokio::net::TcpListener;
use tokio::sync::watch;

fn document() -> PolicyDocument {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/policy.json");
    FilePolicySource::new(path)
        .load()
        .expect("fixture readable")
        .expect("fixture present")
}

type Scripted = Result<Option<PolicyDocument>, PolicySourceError>;

/// Replays queued fetch results, then reports an empty source.
struct ScriptedSource {
    responses: Mutex<VecDeque<Scripted>>,
}

impl ScriptedSource {
    fn new(responses: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
        })
    }
}

#[async_trait]
impl PolicySource for ScriptedSource {
    async fn fetch(&self) -> Result<Option<PolicyDocument>, PolicySourceError> {
        self.responses
            .lock()
            .expect("script mutex")
            .pop_front()
            .unwrap_or(Ok(None))
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

fn refresher(source: Arc<ScriptedSource>, handle: &PolicyHandle) -> PolicyRefresher {
    PolicyRefresher::new(source, handle.clone(), Duration::from_millis(10))
}

#[tokio::test]
async fn installs_enabled_valid_document() {
    let handle = PolicyHandle::default();
    let refresher = refresher(ScriptedSource::new(vec![Ok(Some(document()))]), &handle);

    let outcome = refresher.refresh_once().await;

    assert!(matches!(outcome, RefreshOutcome::Installed { version: 2 }));
    let active = handle.snapshot();
    assert_eq!(active.source_version, Some(7));
    assert_eq!(active.policy.first_blood.kill, 12.0);
}

#[tokio::test]
async fn same_version_is_not_reinstalled() {
    let handle = PolicyHandle::default();
    let refresher = refresher(
        ScriptedSource::new(vec![Ok(Some(document())), Ok(Some(document()))]),
        &handle,
    );

    assert!(refresher.refresh_once().await.installed());
    assert!(matches!(
        refresher.refresh_once().await,
        RefreshOutcome::Unchanged
    ));
    assert_eq!(handle.version(), 2);
}

#[tokio::test]
async fn disabled_document_keeps_current_policy() {
    let handle = PolicyHandle::default();
    let mut disabled = document();
    disabled.enabled = false;
    let refresher = refresher(ScriptedSource::new(vec![Ok(Some(disabled))]), &handle);

    assert!(matches!(
        refresher.refresh_once().await,
        RefreshOutcome::Disabled
    ));
    assert_eq!(handle.version(), 1);
}

#[tokio::test]
async fn invalid_document_is_rejected() {
    let handle = PolicyHandle::default();
    let mut broken = document();
    broken.minions_killed = vec![[5.0, 1.0], [9.0, 10.0]];
    let refresher = refresher(ScriptedSource::new(vec![Ok(Some(broken))]), &handle);

    match refresher.refresh_once().await {
        RefreshOutcome::Rejected(PolicyViolation::NotDescending { .. }) => {}
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(handle.version(), 1);
}

#[tokio::test]
async fn fetch_failure_and_empty_source_keep_current_policy() {
    let handle = PolicyHandle::default();
    let refresher = refresher(
        ScriptedSource::new(vec![Err(PolicySourceError::Status(503)), Ok(None)]),
        &handle,
    );

    assert!(matches!(
        refresher.refresh_once().await,
        RefreshOutcome::FetchFailed(PolicySourceError::Status(503))
    ));
    assert!(matches!(
        refresher.refresh_once().await,
        RefreshOutcome::Empty
    ));
    assert_eq!(handle.version(), 1);
}

#[tokio::test]
async fn refresh_loop_installs_then_stops_on_shutdown() {
    let handle = PolicyHandle::default();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = refresher(ScriptedSource::new(vec![Ok(Some(document()))]), &handle)
        .spawn(shutdown_rx);

    for _ in 0..50 {
        if handle.version() == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(handle.version(), 2);

    shutdown_tx.send(true).expect("loop still listening");
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("loop stops promptly")
        .expect("loop did not panic");
}

#[tokio::test]
async fn http_source_reads_served_document() {
    let served = document();
    let app = Router::new()
        .route(
            "/horse",
            get(move || {
                let served = served.clone();
                async move { Json(served) }
            }),
        )
        .route("/empty", get(|| async { axum::http::StatusCode::NO_CONTENT }));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    let source = HttpPolicySource::new(&format!("http://{addr}/horse"), Duration::from_secs(2))
        .expect("client builds");
    let fetched = source.fetch().await.expect("fetch succeeds");
    assert_eq!(fetched, Some(document()));

    let empty = HttpPolicySource::new(&format!("http://{addr}/empty"), Duration::from_secs(2))
        .expect("client builds");
    assert_eq!(empty.fetch().await.expect("fetch succeeds"), None);

    let missing = HttpPolicySource::new(&format!("http://{addr}/nothing"), Duration::from_secs(2))
        .expect("client builds");
    assert_eq!(missing.fetch().await.expect("404 is empty"), None);
}
