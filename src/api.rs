//! HTTP entry point for the mention webhook.
//!
//! Exposes the translate webhook and a health check. Spawned from `start`
//! and runs until the process exits.

use crate::gateway::Gateway;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use parrot_core::config::ApiConfig;
use parrot_core::message::{HandleResponse, WebhookPayload};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    gateway: Arc<Gateway>,
    api_key: Option<String>,
    uptime: Instant,
}

/// Constant-time string comparison to prevent timing attacks on API token validation.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Check bearer token auth. Returns `None` if authorized, `Some(response)` if rejected.
fn check_auth(headers: &HeaderMap, api_key: &Option<String>) -> Option<(StatusCode, Json<Value>)> {
    let key = api_key.as_ref()?;

    let Some(header) = headers.get("authorization") else {
        return Some((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "missing Authorization header"})),
        ));
    };

    let Ok(value) = header.to_str() else {
        return Some((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid Authorization header"})),
        ));
    };

    match value.strip_prefix("Bearer ") {
        Some(token) if constant_time_eq(token, key) => None,
        _ => Some((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid token"})),
        )),
    }
}

/// Turn a gateway response into an HTTP response with a JSON string body.
fn into_http(resp: HandleResponse) -> (StatusCode, Json<Value>) {
    let status = StatusCode::from_u16(resp.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(Value::String(resp.body)))
}

/// `GET /api/health` — uptime and the active translator.
async fn health(
    headers: HeaderMap,
    State(state): State<ApiState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if let Some(err) = check_auth(&headers, &state.api_key) {
        return Err(err);
    }

    Ok(Json(json!({
        "status": "ok",
        "uptime_secs": state.uptime.elapsed().as_secs(),
        "translator": state.gateway.translator_name(),
        "bot_handle": state.gateway.bot_handle(),
    })))
}

/// `POST /translate` — one mention of the bot.
///
/// Malformed JSON is answered exactly like a payload with missing fields.
async fn translate(
    headers: HeaderMap,
    State(state): State<ApiState>,
    body: Result<Json<WebhookPayload>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    if let Some(err) = check_auth(&headers, &state.api_key) {
        return err;
    }

    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(e) => {
            warn!("api: unreadable webhook body: {e}");
            return into_http(HandleResponse::bad_request());
        }
    };

    into_http(state.gateway.handle(&payload).await)
}

/// Build the axum router with shared state.
fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/translate", post(translate))
        .route("/api/webhook", post(translate))
        .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024)) // 1 MB max request body
        .with_state(state)
}

/// Start the API server and serve until the listener fails.
pub async fn serve(config: ApiConfig, gateway: Arc<Gateway>) {
    let api_key = if config.api_key.is_empty() {
        None
    } else {
        Some(config.api_key.clone())
    };

    let state = ApiState {
        gateway,
        api_key,
        uptime: Instant::now(),
    };

    let app = build_router(state);
    let addr = format!("{}:{}", config.host, config.port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("API server failed to bind to {addr}: {e}");
            return;
        }
    };

    info!("API server listening on {addr}");

    if let Err(e) = axum::serve(listener, app).await {
        error!("API server error: {e}");
    }
}
