//! CodeMind: analysis request gateway
//!
//! Validates that submitted code plausibly matches its claimed language,
//! forwards valid submissions to the external analysis engine, persists
//! successful results, and serves bounded history back to the client.

// Re-export the gateway core
pub use codemind_core::config::GatewayConfig;
pub use codemind_core::engine::{AnalysisEngine, EngineError, FakeEngine, HttpEngineClient};
pub use codemind_core::gateway::{
    AnalysisGateway, AnalysisOutcome, ChatOutcome, CHAT_UNAVAILABLE_MESSAGE,
};
pub use codemind_core::history::{AnalysisRecord, NewAnalysis, RecordStore, StoreError};
pub use codemind_core::language_checks::{Language, LanguageValidator, Verdict};
pub use codemind_core::{AnalysisReport, ChatAnswer};

// Re-export the store adapters
pub use codemind_databases::{MemoryHistoryStore, SqliteHistoryStore};

// Re-export the HTTP surface
pub use codemind_api::{ApiConfig, ApiServer};
