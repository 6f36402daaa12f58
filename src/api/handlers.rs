//! HTTP request handlers

use super::types::{
    CreateConversationResponse, EndConversationResponse, ErrorResponse, GreetingResponse,
    SendMessageRequest, SendMessageResponse,
};
use super::AppState;
use crate::analysis::FeedbackSections;
use crate::session::{SessionError, SessionView};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/conversations", post(create_conversation))
        .route("/api/conversations/:id", get(get_conversation))
        .route("/api/conversations/:id/greeting", get(get_greeting))
        .route("/api/conversations/:id/messages", post(send_message))
        .route("/api/conversations/:id/end", post(end_conversation))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Conversation Lifecycle
// ============================================================

async fn create_conversation(State(state): State<AppState>) -> Json<CreateConversationResponse> {
    let created = state.sessions.create().await;

    Json(CreateConversationResponse {
        conversation_id: created.id,
        greeting: created.greeting,
    })
}

async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let turn = state.sessions.advance(&id, req.message).await?;

    Ok(Json(SendMessageResponse {
        response: turn.reply,
        turn_count: turn.turn_count,
    }))
}

async fn end_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EndConversationResponse>, AppError> {
    let closed = state.sessions.close(&id).await?;
    let sections = FeedbackSections::parse(&closed.feedback);

    Ok(Json(EndConversationResponse {
        well_formed: sections.is_complete(),
        sections,
        analysis: closed.feedback,
        turn_count: closed.turn_count,
    }))
}

// ============================================================
// Retrieval
// ============================================================

async fn get_greeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GreetingResponse>, AppError> {
    let greeting = state.sessions.greeting(&id).await?;

    Ok(Json(GreetingResponse {
        greeting,
        conversation_id: id,
    }))
}

async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.view(&id).await?))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("talkback ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    NotFound(String),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(_) => AppError::NotFound(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
