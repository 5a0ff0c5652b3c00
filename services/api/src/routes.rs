use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use lol_prophet::error::AppError;
use lol_prophet::policy::ActivePolicy;
use lol_prophet::report::{HorseMessages, MatchScoreView, MessageOptions};
use lol_prophet::scoring::{MatchPhase, MatchScore, MatchStats, PlayerStats, TeamSide};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct AnnounceOptions {
    #[serde(default)]
    pub(crate) team: Option<TeamSide>,
    #[serde(default)]
    pub(crate) self_summoner: Option<String>,
    #[serde(default)]
    pub(crate) include_self: bool,
    #[serde(default)]
    pub(crate) announce_tiers: Vec<bool>,
}

impl From<AnnounceOptions> for MessageOptions {
    fn from(value: AnnounceOptions) -> Self {
        MessageOptions {
            team: value.team,
            self_summoner: value.self_summoner,
            include_self: value.include_self,
            announce_tiers: value.announce_tiers,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreMatchRequest {
    #[serde(flatten)]
    pub(crate) stats: MatchStats,
    #[serde(default)]
    pub(crate) announce: AnnounceOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreMatchResponse {
    pub(crate) score: MatchScoreView,
    pub(crate) messages: Vec<String>,
}

impl ScoreMatchResponse {
    fn build(score: &MatchScore, options: &MessageOptions) -> Self {
        Self {
            score: score.to_view(),
            messages: HorseMessages::render(score, options).lines,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BeginMatchRequest {
    pub(crate) game_id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompleteMatchRequest {
    #[serde(default)]
    pub(crate) duration_secs: u32,
    #[serde(default)]
    pub(crate) announce: AnnounceOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionStatus {
    pub(crate) phase: MatchPhase,
    pub(crate) collected: usize,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/policy", get(policy_endpoint))
        .route("/api/v1/matches/score", post(score_match_endpoint))
        .route(
            "/api/v1/session",
            get(session_status_endpoint).delete(abandon_session_endpoint),
        )
        .route("/api/v1/session/begin", post(begin_session_endpoint))
        .route("/api/v1/session/players", post(submit_player_endpoint))
        .route("/api/v1/session/complete", post(complete_session_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready", "policy_version": state.engine.policy().version() })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn policy_endpoint(Extension(state): Extension<AppState>) -> Json<ActivePolicy> {
    Json(state.engine.policy().snapshot().as_ref().clone())
}

pub(crate) async fn score_match_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScoreMatchRequest>,
) -> Result<Json<ScoreMatchResponse>, AppError> {
    let score = state.engine.score_match(&payload.stats)?;
    let options = MessageOptions::from(payload.announce);
    Ok(Json(ScoreMatchResponse::build(&score, &options)))
}

pub(crate) async fn session_status_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<SessionStatus> {
    let session = state.session.lock().await;
    Json(SessionStatus {
        phase: session.phase(),
        collected: session.collected(),
    })
}

pub(crate) async fn begin_session_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<BeginMatchRequest>,
) -> Result<Json<SessionStatus>, AppError> {
    let mut session = state.session.lock().await;
    session.begin_match(payload.game_id, Utc::now())?;
    Ok(Json(SessionStatus {
        phase: session.phase(),
        collected: session.collected(),
    }))
}

pub(crate) async fn submit_player_endpoint(
    Extension(state): Extension<AppState>,
    Json(player): Json<PlayerStats>,
) -> Result<Json<SessionStatus>, AppError> {
    let mut session = state.session.lock().await;
    let collected = session.submit(player)?;
    Ok(Json(SessionStatus {
        phase: session.phase(),
        collected,
    }))
}

pub(crate) async fn complete_session_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CompleteMatchRequest>,
) -> Result<Json<ScoreMatchResponse>, AppError> {
    let score = state.session.lock().await.complete(payload.duration_secs)?;
    let options = MessageOptions::from(payload.announce);
    Ok(Json(ScoreMatchResponse::build(&score, &options)))
}

pub(crate) async fn abandon_session_endpoint(
    Extension(state): Extension<AppState>,
) -> StatusCode {
    state.session.lock().await.abandon("abandoned by client");
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use lol_prophet::policy::PolicyHandle;
    use lol_prophet::scoring::ScoreEngine;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::Ordering;
    use tower::ServiceExt;

    fn state() -> AppState {
        let metrics = PrometheusBuilder::new().build_recorder().handle();
        let state = AppState::new(metrics, ScoreEngine::new(PolicyHandle::default()));
        state.readiness.store(true, Ordering::Release);
        state
    }

    fn app(state: &AppState) -> Router {
        router().layer(Extension(state.clone()))
    }

    fn roster() -> Vec<Value> {
        (0..10u32)
            .map(|slot| {
                json!({
                    "summoner": format!("player-{slot}"),
                    "team": if slot < 5 { "blue" } else { "red" },
                    "kills": slot % 4,
                    "deaths": 2,
                    "assists": slot % 3,
                    "first_blood_kill": slot == 0,
                    "gold_earned": 9_000 + slot * 250,
                    "damage_to_champions": 8_000 + slot * 900,
                    "vision_score": 12 + slot,
                    "minions_killed": 140
                })
            })
            .collect()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let state = state();
        let request = Request::get("/health").body(Body::empty()).expect("request");
        let (status, body) = send(app(&state), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn ready_reflects_flag() {
        let state = state();
        state.readiness.store(false, Ordering::Release);
        let request = Request::get("/ready").body(Body::empty()).expect("request");
        let (status, _) = send(app(&state), request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn scores_full_match_with_messages() {
        let state = state();
        let request = post_json(
            "/api/v1/matches/score",
            json!({
                "game_id": 88,
                "duration_secs": 1_500,
                "players": roster(),
                "announce": { "team": "blue" }
            }),
        );

        let (status, body) = send(app(&state), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"]["game_id"], 88);
        assert_eq!(body["score"]["players"].as_array().map(Vec::len), Some(10));
        assert_eq!(body["messages"].as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn short_roster_is_unprocessable() {
        let state = state();
        let mut players = roster();
        players.truncate(6);
        let request = post_json(
            "/api/v1/matches/score",
            json!({ "game_id": 89, "duration_secs": 1_500, "players": players }),
        );

        let (status, body) = send(app(&state), request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("exactly 10")));
    }

    #[tokio::test]
    async fn policy_endpoint_returns_active_version() {
        let state = state();
        let request = Request::get("/api/v1/policy")
            .body(Body::empty())
            .expect("request");
        let (status, body) = send(app(&state), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["version"], 1);
        assert_eq!(body["policy"]["enabled"], true);
    }

    #[tokio::test]
    async fn session_collects_and_scores_roster() {
        let state = state();

        let begin = post_json("/api/v1/session/begin", json!({ "game_id": 90 }));
        let (status, _) = send(app(&state), begin).await;
        assert_eq!(status, StatusCode::OK);

        for player in roster() {
            let submit = post_json("/api/v1/session/players", player);
            let (status, _) = send(app(&state), submit).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send(
            app(&state),
            post_json("/api/v1/session/complete", json!({ "duration_secs": 1_500 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"]["game_id"], 90);

        let request = Request::get("/api/v1/session")
            .body(Body::empty())
            .expect("request");
        let (_, body) = send(app(&state), request).await;
        assert_eq!(body["phase"], "idle");
    }

    #[tokio::test]
    async fn submitting_without_a_match_conflicts() {
        let state = state();
        let submit = post_json("/api/v1/session/players", roster().remove(0));
        let (status, _) = send(app(&state), submit).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
