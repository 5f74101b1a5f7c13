//! HTTP surface: JSON-over-HTTP endpoints for detection, translation,
//! accounts, and history.
//!
//! Error taxonomy per endpoint: validation errors return 400 before any
//! provider call; provider errors never surface here (the strategy degrades
//! them to fallbacks); anything unexpected is caught at this boundary and
//! reported as a 500 with a generic message plus a diagnostic detail string.

use crate::auth::{self, AuthError};
use crate::config::Config;
use crate::detect::{Detection, DetectionMode};
use crate::session::{self, SessionContext};
use crate::store::{LocalStore, TranslationRecord, User};
use crate::strategy::Strategy;
use crate::translate::TranslationMode;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub client: reqwest::Client,
    pub store: LocalStore,
}

pub fn router(state: AppState) -> Router {
    // Browser clients call from another origin, so allow everything
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/detect-language", post(detect_language))
        .route("/api/translate", post(translate))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/signin", post(signin))
        .route("/api/auth/signout", post(signout))
        .route("/api/auth/account", delete(delete_account))
        .route("/api/history", get(history))
        .route("/api/history/:id", delete(delete_history_entry))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

async fn health_check() -> &'static str {
    "OK"
}

// ==================== Detection ====================

#[derive(Debug, Deserialize)]
struct DetectRequest {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectResponse {
    detected_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_mock_detection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_ai_detection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_fallback: Option<bool>,
}

impl From<Detection> for DetectResponse {
    fn from(detection: Detection) -> Self {
        let (is_mock, is_ai, is_fallback) = match detection.mode {
            DetectionMode::Heuristic => (Some(true), None, None),
            DetectionMode::Ai => (None, Some(true), None),
            DetectionMode::AiFallback => (None, None, Some(true)),
        };
        Self {
            detected_language: detection.code,
            is_mock_detection: is_mock,
            is_ai_detection: is_ai,
            is_fallback,
        }
    }
}

async fn detect_language(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DetectRequest>,
) -> Response {
    match handle_detect(&state, request).await {
        Ok(response) => response,
        Err(e) => {
            error!("Language detection API error: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Language detection failed",
                    "detectedLanguage": "en",
                    "details": format!("{:#}", e),
                })),
            )
                .into_response()
        }
    }
}

async fn handle_detect(state: &AppState, request: DetectRequest) -> anyhow::Result<Response> {
    let text = request.text.unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Text is required"})),
        )
            .into_response());
    }

    let strategy = Strategy::from_config(&state.client, &state.config);
    let detection = strategy.detect(text).await;

    Ok(Json(DetectResponse::from(detection)).into_response())
}

// ==================== Translation ====================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    source_lang: Option<String>,
    #[serde(default)]
    target_lang: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_mock_translation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_ai_translation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn translate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranslateRequest>,
) -> Response {
    match handle_translate(&state, request).await {
        Ok(response) => response,
        Err(e) => {
            error!("Translation API error: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Translation service error",
                    "translatedText": "Translation failed. Please try again.",
                    "details": format!("{:#}", e),
                })),
            )
                .into_response()
        }
    }
}

async fn handle_translate(state: &AppState, request: TranslateRequest) -> anyhow::Result<Response> {
    let text = request.text.unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Text is required"})),
        )
            .into_response());
    }

    let (source_lang, target_lang) = match (
        request.source_lang.filter(|lang| !lang.is_empty()),
        request.target_lang.filter(|lang| !lang.is_empty()),
    ) {
        (Some(source), Some(target)) => (source, target),
        _ => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Source and target languages are required"})),
            )
                .into_response());
        }
    };

    let strategy = Strategy::from_config(&state.client, &state.config);
    let ctx = SessionContext::for_user(state.store.current_user());

    let outcome =
        session::run_translation(&strategy, &state.store, &ctx, text, &source_lang, &target_lang)
            .await;

    let (is_mock, is_ai, is_fallback, wire_error) = match outcome.translation.mode {
        TranslationMode::Mock => (Some(true), None, None, None),
        TranslationMode::Ai => (None, Some(true), None, None),
        TranslationMode::AiFallback => (
            None,
            None,
            Some(true),
            Some("AI translation failed, using fallback".to_string()),
        ),
    };

    Ok(Json(TranslateResponse {
        translated_text: outcome.translation.text,
        is_mock_translation: is_mock,
        is_ai_translation: is_ai,
        is_fallback,
        error: wire_error,
    })
    .into_response())
}

// ==================== Accounts ====================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct SigninRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
struct UserResponse {
    user: User,
}

fn auth_error_response(e: AuthError) -> Response {
    let status = match e {
        AuthError::EmailExists => StatusCode::CONFLICT,
        AuthError::UserNotFound | AuthError::InvalidPassword => StatusCode::UNAUTHORIZED,
        AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({"error": e.to_string()}))).into_response()
}

async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Response {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Email and password are required"})),
        )
            .into_response();
    }

    match auth::sign_up(
        &state.store,
        &request.email,
        &request.password,
        &request.full_name,
    ) {
        Ok(user) => (StatusCode::CREATED, Json(UserResponse { user })).into_response(),
        Err(e) => auth_error_response(e),
    }
}

async fn signin(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SigninRequest>,
) -> Response {
    match auth::sign_in(&state.store, &request.email, &request.password) {
        Ok(user) => Json(UserResponse { user }).into_response(),
        Err(e) => auth_error_response(e),
    }
}

async fn signout(State(state): State<Arc<AppState>>) -> Response {
    match auth::sign_out(&state.store) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => auth_error_response(e),
    }
}

async fn delete_account(State(state): State<Arc<AppState>>) -> Response {
    match auth::delete_account(&state.store) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => auth_error_response(e),
    }
}

// ==================== History ====================

fn require_session(state: &AppState) -> Result<User, Response> {
    state.store.current_user().ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Not signed in"})),
        )
            .into_response()
    })
}

async fn history(State(state): State<Arc<AppState>>) -> Response {
    match require_session(&state) {
        Ok(user) => {
            let records: Vec<TranslationRecord> = state.store.translations_for(&user.id);
            Json(records).into_response()
        }
        Err(response) => response,
    }
}

async fn delete_history_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let user = match require_session(&state) {
        Ok(user) => user,
        Err(response) => return response,
    };

    // Idempotent: deleting an absent id is a no-op
    match state.store.delete_translation(&id, &user.id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete history entry: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to delete translation"})),
            )
                .into_response()
        }
    }
}
