//! HTTP request handlers

use super::types::{ErrorResponse, MessageRequest, MessageResponse, VersionResponse};
use super::AppState;
use crate::runtime::RegistryError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chats/:chat_id/messages", post(post_message))
        .route("/version", get(get_version))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================
// Messages
// ============================================================

async fn post_message(
    State(state): State<AppState>,
    Path(chat_id): Path<i64>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.config.is_allowed(req.user_id) {
        tracing::warn!(chat_id, user_id = req.user_id, "Rejected message from unauthorized user");
        return Err(AppError::Forbidden(format!(
            "User {} is not allowed to use this bot",
            req.user_id
        )));
    }

    let reply = state
        .registry
        .deliver(chat_id, req.user_id, &req.display_name, &req.text)
        .await?;

    Ok(Json(MessageResponse::new(reply)))
}

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    Forbidden(String),
    Internal(String),
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        tracing::error!(error = %e, "Message delivery failed");
        AppError::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
