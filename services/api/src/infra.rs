use chrono::Utc;
use lol_prophet::config::{PolicyConfig, ScoringConfig};
use lol_prophet::error::AppError;
use lol_prophet::policy::{
    FilePolicySource, HttpPolicySource, PolicyHandle, PolicySource, StaticPolicySource,
};
use lol_prophet::scoring::{MatchSession, ScoreEngine, TeamSide};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: ScoreEngine,
    pub(crate) session: Arc<Mutex<MatchSession>>,
}

impl AppState {
    pub(crate) fn new(metrics: PrometheusHandle, engine: ScoreEngine) -> Self {
        let session = engine.session();
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            engine,
            session: Arc::new(Mutex::new(session)),
        }
    }
}

/// Startup policy: the persisted document when one is readable, else the
/// embedded default.
pub(crate) fn load_policy_handle(path: Option<&Path>) -> PolicyHandle {
    let Some(path) = path else {
        return PolicyHandle::default();
    };

    match FilePolicySource::new(path).load() {
        Ok(document) => PolicyHandle::from_document_or_default(document),
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "policy file unreadable, using embedded default"
            );
            PolicyHandle::default()
        }
    }
}

/// Remote endpoint first, then the persisted file, then nothing to refresh from.
pub(crate) fn policy_source(config: &PolicyConfig) -> Result<Arc<dyn PolicySource>, AppError> {
    if let Some(url) = config.url.as_deref() {
        return Ok(Arc::new(HttpPolicySource::new(url, config.timeout)?));
    }
    if let Some(path) = config.path.as_deref() {
        return Ok(Arc::new(FilePolicySource::new(path)));
    }
    Ok(Arc::new(StaticPolicySource::default()))
}

/// Abandons the live session once it has been collecting for longer than
/// the configured match timeout.
pub(crate) fn spawn_session_sweeper(
    session: Arc<Mutex<MatchSession>>,
    config: &ScoringConfig,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let timeout = config.match_timeout;
    let period = (timeout / 4).max(Duration::from_secs(1));

    tokio::spawn(async move {
        let Ok(timeout) = chrono::Duration::from_std(timeout) else {
            warn!(?timeout, "match timeout out of range, session sweeper disabled");
            return;
        };
        let mut ticker = tokio::time::interval(period);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if session.lock().await.expire_stale(Utc::now(), timeout) {
                        info!("stale match session abandoned");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
    })
}

pub(crate) fn parse_team(raw: &str) -> Result<TeamSide, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "blue" | "100" => Ok(TeamSide::Blue),
        "red" | "200" => Ok(TeamSide::Red),
        other => Err(format!("unknown team '{other}', expected blue or red")),
    }
}
