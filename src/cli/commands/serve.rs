//! HTTP API server for browser front ends.
//!
//! Each analyzed video gets its own in-memory session. Requests against one
//! session are serialized; separate sessions run independently.

use super::prepare_orchestrator;
use crate::assistant::{display_label, ChatTurn, SessionPhase};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::TubetalkError;
use crate::orchestrator::Orchestrator;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use uuid::Uuid;

/// Shared application state.
struct AppState {
    /// Template holding the shared clients; never analyzes anything itself.
    template: Orchestrator,
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Orchestrator>>>>,
}

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    api_key: Option<&str>,
    settings: Settings,
) -> anyhow::Result<()> {
    let template = prepare_orchestrator(&settings, api_key, None)?;
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let app = router(template);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Tubetalk API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET    /health");
    Output::kv("Analyze video", "POST   /sessions");
    Output::kv("Session", "GET    /sessions/{id}");
    Output::kv("Ask", "POST   /sessions/{id}/messages");
    Output::kv("End session", "DELETE /sessions/{id}");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(template: Orchestrator) -> Router {
    let state = Arc::new(AppState {
        template,
        sessions: RwLock::new(HashMap::new()),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/messages", post(post_message))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct AnalyzeRequest {
    /// YouTube URL or video ID
    url: String,
}

#[derive(Serialize)]
struct SessionResponse {
    session_id: Uuid,
    video_id: String,
    title: Option<String>,
    channel: Option<String>,
    language: String,
    video_type: String,
    video_type_label: String,
    turns: usize,
}

#[derive(Serialize)]
struct SessionDetailResponse {
    #[serde(flatten)]
    session: SessionResponse,
    history: Vec<ChatTurn>,
}

#[derive(Deserialize)]
struct MessageRequest {
    question: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(e: &TubetalkError) -> Response {
    let status = match e {
        TubetalkError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        TubetalkError::NoVideo => StatusCode::CONFLICT,
        TubetalkError::FetchFailed(_)
        | TubetalkError::ClassificationUnavailable(_)
        | TubetalkError::CompletionFailed(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse { error: e.to_string() })).into_response()
}

fn not_found(id: Uuid) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Session not found: {}", id),
        }),
    )
        .into_response()
}

fn summarize(id: Uuid, orchestrator: &Orchestrator) -> Option<SessionResponse> {
    let session = orchestrator.session();
    let analysis = session.analysis()?;
    let video_type = analysis.video_type.clone().unwrap_or_default();
    let turns = match session.phase() {
        SessionPhase::Chatting(n) => n,
        _ => 0,
    };

    Some(SessionResponse {
        session_id: id,
        video_id: analysis.video_id.clone(),
        title: analysis.metadata.as_ref().map(|m| m.title.clone()),
        channel: analysis.metadata.as_ref().map(|m| m.channel.clone()),
        language: analysis.transcript.language_label.clone(),
        video_type_label: display_label(&video_type),
        video_type,
        turns,
    })
}

async fn lookup(state: &AppState, id: Uuid) -> Option<Arc<Mutex<Orchestrator>>> {
    state.sessions.read().await.get(&id).cloned()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    let mut orchestrator = state.template.new_session();
    if let Err(e) = orchestrator.analyze(&req.url).await {
        return error_response(&e);
    }

    let id = Uuid::new_v4();
    let Some(summary) = summarize(id, &orchestrator) else {
        return error_response(&TubetalkError::NoVideo);
    };

    info!("Created session {} for video {}", id, summary.video_id);
    state
        .sessions
        .write()
        .await
        .insert(id, Arc::new(Mutex::new(orchestrator)));

    (StatusCode::CREATED, Json(summary)).into_response()
}

async fn get_session(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> Response {
    let Some(entry) = lookup(&state, id).await else {
        return not_found(id);
    };
    let orchestrator = entry.lock().await;

    match summarize(id, &orchestrator) {
        Some(session) => Json(SessionDetailResponse {
            session,
            history: orchestrator.session().history().to_vec(),
        })
        .into_response(),
        None => error_response(&TubetalkError::NoVideo),
    }
}

async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<MessageRequest>,
) -> Response {
    let Some(entry) = lookup(&state, id).await else {
        return not_found(id);
    };
    let mut orchestrator = entry.lock().await;

    match orchestrator.ask(&req.question).await {
        Ok(turn) => Json(turn.clone()).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn delete_session(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> Response {
    match state.sessions.write().await.remove(&id) {
        Some(_) => {
            info!("Ended session {}", id);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(id),
    }
}
