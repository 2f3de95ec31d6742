//! API Handlers Module
//!
//! This module contains the request handlers for the gateway's HTTP
//! surface. Every failure path answers with a complete JSON body; no raw
//! error ever crosses this boundary.

use std::sync::Arc;

use axum::{debug_handler, extract::State, http::StatusCode, response::Json};

use codemind_core::gateway::{AnalysisGateway, AnalysisOutcome, ChatOutcome};
use codemind_core::history::AnalysisRecord;

use crate::models::{AnalyzeRequest, AnalyzeResponse, AskRequest, AskResponse, HistoryError};

/// Most records ever returned by the history endpoint.
pub const HISTORY_LIMIT: usize = 20;

/// Represents the state of the API server.
pub struct ApiState {
    /// Gateway orchestrator
    pub gateway: Arc<AnalysisGateway>,
}

/// Liveness endpoint
#[debug_handler]
pub async fn health_check() -> &'static str {
    "CodeMind analysis gateway is running"
}

/// Analyze a code submission
#[debug_handler]
pub async fn analyze(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<AnalyzeRequest>,
) -> (StatusCode, Json<AnalyzeResponse>) {
    tracing::debug!(
        "Analyzing {} submission ({} bytes)",
        request.language,
        request.code.len()
    );

    match state.gateway.analyze(&request.code, &request.language).await {
        AnalysisOutcome::Completed { report, id } => {
            (StatusCode::OK, Json(AnalyzeResponse::from_report(report, id)))
        }
        // Mismatch is informational, not an error
        AnalysisOutcome::Mismatch { report, .. } => {
            (StatusCode::OK, Json(AnalyzeResponse::from_report(report, None)))
        }
        AnalysisOutcome::EngineFailed { report } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(AnalyzeResponse::from_report(report, None)),
        ),
    }
}

/// Recent analysis history, newest first
#[debug_handler]
pub async fn history(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<AnalysisRecord>>, (StatusCode, Json<HistoryError>)> {
    match state.gateway.history(HISTORY_LIMIT).await {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            tracing::error!("Failed to fetch history: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HistoryError {
                    error: "Could not fetch history".to_string(),
                }),
            ))
        }
    }
}

/// Relay a question about a snippet to the chat engine
#[debug_handler]
pub async fn ask_ai(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<AskRequest>,
) -> (StatusCode, Json<AskResponse>) {
    tracing::debug!("Relaying question to chat engine");

    match state.gateway.ask(&request.code, &request.question).await {
        ChatOutcome::Answered(answer) => (
            StatusCode::OK,
            Json(AskResponse {
                answer: answer.answer,
            }),
        ),
        ChatOutcome::EngineDown(answer) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(AskResponse {
                answer: answer.answer,
            }),
        ),
    }
}
