//! API request and response models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use codemind_core::AnalysisReport;

/// Server configuration for the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub code: String,
    pub language: String,
}

/// Body of `POST /ask-ai`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub code: String,
    pub question: String,
}

/// Payload returned by `POST /analyze` on every path: the report fields
/// plus the persisted record id when one was assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub time: String,
    pub space: String,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl AnalyzeResponse {
    /// Merge a report and the optional persisted id into one payload.
    pub fn from_report(report: AnalysisReport, id: Option<Uuid>) -> Self {
        Self {
            time: report.time,
            space: report.space,
            warnings: report.warnings,
            suggestions: report.suggestions,
            id,
        }
    }
}

/// Body of `POST /ask-ai` responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Error payload for `GET /history` failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryError {
    pub error: String,
}
