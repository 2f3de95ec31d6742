//! Fake engine for testing
//!
//! Returns canned results instead of real HTTP calls, and counts
//! invocations so tests can assert whether the engine was consulted.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::{AnalysisEngine, EngineError};
use crate::{AnalysisReport, ChatAnswer};

/// Fake engine backed by canned responses.
pub struct FakeEngine {
    report: AnalysisReport,
    answer: String,
    error_message: Option<String>,
    analysis_calls: AtomicUsize,
    chat_calls: AtomicUsize,
}

impl FakeEngine {
    /// Fake engine answering every analysis request with `report`.
    pub fn with_report(report: AnalysisReport) -> Self {
        Self {
            report,
            answer: String::new(),
            error_message: None,
            analysis_calls: AtomicUsize::new(0),
            chat_calls: AtomicUsize::new(0),
        }
    }

    /// Fake engine answering every chat question with `answer`.
    pub fn with_answer(answer: &str) -> Self {
        Self {
            report: constant_report(),
            answer: answer.to_string(),
            error_message: None,
            analysis_calls: AtomicUsize::new(0),
            chat_calls: AtomicUsize::new(0),
        }
    }

    /// Fake engine failing every call with an unavailable error.
    pub fn with_error(message: &str) -> Self {
        Self {
            report: constant_report(),
            answer: String::new(),
            error_message: Some(message.to_string()),
            analysis_calls: AtomicUsize::new(0),
            chat_calls: AtomicUsize::new(0),
        }
    }

    /// Number of analysis requests received.
    pub fn analysis_calls(&self) -> usize {
        self.analysis_calls.load(Ordering::SeqCst)
    }

    /// Number of chat requests received.
    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }
}

fn constant_report() -> AnalysisReport {
    AnalysisReport {
        time: "O(1)".to_string(),
        space: "O(1)".to_string(),
        warnings: Vec::new(),
        suggestions: Vec::new(),
    }
}

#[async_trait::async_trait]
impl AnalysisEngine for FakeEngine {
    async fn request_analysis(
        &self,
        _code: &str,
        _language: &str,
    ) -> Result<AnalysisReport, EngineError> {
        self.analysis_calls.fetch_add(1, Ordering::SeqCst);
        match self.error_message {
            Some(ref message) => Err(EngineError::Unavailable(message.clone())),
            None => Ok(self.report.clone()),
        }
    }

    async fn request_chat_answer(
        &self,
        _code: &str,
        _question: &str,
    ) -> Result<ChatAnswer, EngineError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        match self.error_message {
            Some(ref message) => Err(EngineError::Unavailable(message.clone())),
            None => Ok(ChatAnswer {
                answer: self.answer.clone(),
            }),
        }
    }
}
