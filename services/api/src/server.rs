use crate::cli::ServeArgs;
use crate::infra::{load_policy_handle, policy_source, spawn_session_sweeper, AppState};
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lol_prophet::config::AppConfig;
use lol_prophet::error::AppError;
use lol_prophet::policy::PolicyRefresher;
use lol_prophet::scoring::ScoreEngine;
use lol_prophet::telemetry;
use std::sync::atomic::Ordering;
use tokio::sync::watch;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.policy.take() {
        config.policy.path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let policy = load_policy_handle(config.policy.path.as_deref());
    let engine = ScoreEngine::new(policy.clone());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let source = policy_source(&config.policy)?;
    let refresher = PolicyRefresher::new(source, policy, config.policy.refresh_interval)
        .spawn(shutdown_rx.clone());

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(prometheus_handle, engine);
    let sweeper =
        spawn_session_sweeper(app_state.session.clone(), &config.scoring, shutdown_rx);

    let app = router()
        .layer(Extension(app_state.clone()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    app_state.readiness.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        policy_version = app_state.engine.policy().version(),
        "horse scoring service ready"
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    app_state.readiness.store(false, Ordering::Release);
    // receivers may already be gone if both tasks exited on their own
    let _ = shutdown_tx.send(true);
    for (name, task) in [("policy refresher", refresher), ("session sweeper", sweeper)] {
        if let Err(err) = task.await {
            warn!(task = name, error = %err, "background task ended abnormally");
        }
    }

    served?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "unable to listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
