//! Analysis engine client
//!
//! The gateway's only outbound surface: a client abstraction over the
//! external analysis/chat engine, an HTTP production implementation, and a
//! fake for tests. Every call is a single attempt; a failure is surfaced
//! to the caller immediately, with no retry or backoff.

mod fake;
mod http;

pub use fake::FakeEngine;
pub use http::HttpEngineClient;

use crate::{AnalysisReport, ChatAnswer};

/// Engine call failures.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The upstream could not be reached (connect error, timeout)
    #[error("analysis engine unreachable: {0}")]
    Unavailable(String),

    /// The upstream answered with a non-success status
    #[error("analysis engine returned HTTP {status}: {message}")]
    Failed { status: u16, message: String },

    /// The upstream body did not decode to the expected shape
    #[error("invalid engine response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EngineError::InvalidResponse(err.to_string())
        } else {
            EngineError::Unavailable(err.to_string())
        }
    }
}

/// Client abstraction over the upstream analysis/chat engine.
///
/// Implementations carry no per-call state and are safely reusable across
/// concurrent requests.
#[async_trait::async_trait]
pub trait AnalysisEngine: Send + Sync {
    /// Submit code for complexity analysis.
    async fn request_analysis(
        &self,
        code: &str,
        language: &str,
    ) -> Result<AnalysisReport, EngineError>;

    /// Forward a free-form question about a snippet.
    async fn request_chat_answer(
        &self,
        code: &str,
        question: &str,
    ) -> Result<ChatAnswer, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::Failed {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert!(err.to_string().contains("502"));

        let err = EngineError::Unavailable("connection refused".to_string());
        assert!(err.to_string().contains("unreachable"));
    }
}
