//! CodeMind Core Module
//!
//! The core module provides the decision logic of the CodeMind analysis
//! gateway: language conformance validation, the client for the external
//! analysis engine, the history store contract, and the orchestrator that
//! composes them. Everything above this crate is presentation or transport.

use serde::{Deserialize, Serialize};

pub mod config;
pub mod engine;
pub mod gateway;
pub mod history;
pub mod language_checks;

// Re-export commonly used types for easier access
pub use config::GatewayConfig;
pub use engine::{AnalysisEngine, EngineError, FakeEngine, HttpEngineClient};
pub use gateway::{AnalysisGateway, AnalysisOutcome, ChatOutcome};
pub use history::{AnalysisRecord, NewAnalysis, RecordStore, StoreError};
pub use language_checks::{Language, LanguageValidator, Verdict};

/// Structured outcome of one code analysis.
///
/// The same shape travels across the engine boundary, the HTTP surface and
/// the storage boundary; field names are stable across all three. `time`
/// and `space` carry either a complexity label from the engine or a
/// sentinel (`"N/A"`, `"Error"`) synthesized by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Time complexity label or sentinel
    pub time: String,
    /// Space complexity label or sentinel
    pub space: String,
    /// Human-readable warnings, in engine order
    pub warnings: Vec<String>,
    /// Human-readable improvement suggestions, in engine order
    pub suggestions: Vec<String>,
}

/// Answer returned by the engine's chat endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_report_wire_shape() {
        let report = AnalysisReport {
            time: "O(n)".to_string(),
            space: "O(1)".to_string(),
            warnings: vec!["High complexity detected".to_string()],
            suggestions: vec![],
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["time"], "O(n)");
        assert_eq!(json["space"], "O(1)");
        assert_eq!(json["warnings"][0], "High complexity detected");
        assert!(json["suggestions"].as_array().unwrap().is_empty());

        let roundtrip: AnalysisReport = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, report);
    }

    #[test]
    fn test_chat_answer_wire_shape() {
        let answer: ChatAnswer = serde_json::from_str(r#"{"answer": "O(n log n)"}"#).unwrap();
        assert_eq!(answer.answer, "O(n log n)");
    }
}
