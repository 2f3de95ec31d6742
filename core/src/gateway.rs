//! Analysis request orchestrator
//!
//! Composes the validator, the engine client, and the history store.
//! Validation runs strictly before any network call; persistence runs
//! strictly after a successful upstream response; and every path hands the
//! caller a fully-formed, user-presentable payload — no case produces a
//! bare protocol error.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::engine::AnalysisEngine;
use crate::history::{AnalysisRecord, NewAnalysis, RecordStore, StoreError};
use crate::language_checks::{Language, LanguageValidator};
use crate::{AnalysisReport, ChatAnswer};

/// Fixed fallback answer when the chat engine cannot be reached.
pub const CHAT_UNAVAILABLE_MESSAGE: &str =
    "AI service unavailable. Is the analysis engine running?";

/// Result of one analyze request.
///
/// Every variant carries a complete report; the variant tells the
/// transport layer which status to attach and whether anything was
/// persisted.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    /// Engine analysis succeeded. `id` is absent only when persistence
    /// failed after the engine call; the report is returned regardless.
    Completed {
        report: AnalysisReport,
        id: Option<Uuid>,
    },
    /// The snippet looked like another language. Informational; nothing
    /// was forwarded or persisted.
    Mismatch {
        report: AnalysisReport,
        detected: Language,
    },
    /// The engine could not produce a result; nothing was persisted.
    EngineFailed { report: AnalysisReport },
}

impl AnalysisOutcome {
    /// The report carried by any variant.
    pub fn report(&self) -> &AnalysisReport {
        match self {
            AnalysisOutcome::Completed { report, .. } => report,
            AnalysisOutcome::Mismatch { report, .. } => report,
            AnalysisOutcome::EngineFailed { report } => report,
        }
    }
}

/// Result of one chat relay request.
#[derive(Debug, Clone)]
pub enum ChatOutcome {
    Answered(ChatAnswer),
    /// Engine failure, already converted to the fixed fallback answer
    EngineDown(ChatAnswer),
}

/// Central gateway control component.
///
/// Stateless across requests apart from the history store behind the
/// `RecordStore` contract; one instance serves unlimited concurrent
/// requests.
pub struct AnalysisGateway {
    validator: LanguageValidator,
    engine: Arc<dyn AnalysisEngine>,
    store: Arc<dyn RecordStore>,
}

impl AnalysisGateway {
    /// Create a gateway over the given engine client and record store.
    pub fn new(
        engine: Arc<dyn AnalysisEngine>,
        store: Arc<dyn RecordStore>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            validator: LanguageValidator::new()?,
            engine,
            store,
        })
    }

    /// Validate, forward, persist.
    ///
    /// See [`AnalysisOutcome`] for the three terminal shapes; none of them
    /// is a transport error from the caller's perspective.
    pub async fn analyze(&self, code: &str, language: &str) -> AnalysisOutcome {
        let verdict = self.validator.validate(code, language);
        if let Some(detected) = verdict.detected {
            info!(
                "Rejected {} submission: code looks like {}",
                language,
                detected.tag()
            );
            return AnalysisOutcome::Mismatch {
                report: mismatch_report(language, detected),
                detected,
            };
        }

        let report = match self.engine.request_analysis(code, language).await {
            Ok(report) => report,
            Err(e) => {
                error!("Analysis engine call failed: {}", e);
                return AnalysisOutcome::EngineFailed {
                    report: engine_failure_report(),
                };
            }
        };

        let analysis = NewAnalysis {
            code: code.to_string(),
            language: language.to_string(),
            report: report.clone(),
        };

        match self.store.append(analysis).await {
            Ok(record) => {
                info!("Persisted analysis record: {}", record.id);
                AnalysisOutcome::Completed {
                    report,
                    id: Some(record.id),
                }
            }
            Err(e) => {
                // The engine result is still valid; return it without an id
                // rather than discarding it.
                error!("Failed to persist analysis record: {}", e);
                AnalysisOutcome::Completed { report, id: None }
            }
        }
    }

    /// Chat relay: no validation, no persistence, one engine attempt.
    pub async fn ask(&self, code: &str, question: &str) -> ChatOutcome {
        match self.engine.request_chat_answer(code, question).await {
            Ok(answer) => ChatOutcome::Answered(answer),
            Err(e) => {
                error!("Chat engine call failed: {}", e);
                ChatOutcome::EngineDown(ChatAnswer {
                    answer: CHAT_UNAVAILABLE_MESSAGE.to_string(),
                })
            }
        }
    }

    /// Most recent records, newest first.
    pub async fn history(&self, limit: usize) -> Result<Vec<AnalysisRecord>, StoreError> {
        self.store.recent(limit).await
    }
}

/// Informational payload for a claimed/detected language mismatch.
fn mismatch_report(claimed: &str, detected: Language) -> AnalysisReport {
    let claimed_name = display_tag(claimed);
    let detected_name = detected.display_name();

    AnalysisReport {
        time: "N/A".to_string(),
        space: "N/A".to_string(),
        warnings: vec!["⚠️ Language Mismatch Detected".to_string()],
        suggestions: vec![
            format!("You selected {claimed_name}, but your code looks like {detected_name}."),
            format!(
                "Please change the language selector to \"{detected_name}\" or paste valid {claimed_name} code."
            ),
        ],
    }
}

/// Degraded payload when the engine cannot produce a result.
fn engine_failure_report() -> AnalysisReport {
    AnalysisReport {
        time: "Error".to_string(),
        space: "Error".to_string(),
        warnings: vec!["Could not connect to the analysis engine".to_string()],
        suggestions: vec!["Ensure the analysis engine is running and reachable".to_string()],
    }
}

/// Capitalize a raw language tag for user-facing text.
fn display_tag(tag: &str) -> String {
    if let Some(language) = Language::from_tag(tag) {
        return language.display_name().to_string();
    }

    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
