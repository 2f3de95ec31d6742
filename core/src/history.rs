//! History store contract
//!
//! An append-only, ordered collection of analysis records with
//! bounded-recency retrieval. The gateway persists a record only after a
//! successful engine response; nothing in this contract updates or deletes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AnalysisReport;

/// One persisted submitted-code analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Store-assigned identifier; unique across all records, never reused
    pub id: Uuid,
    /// Raw source text as submitted
    pub code: String,
    /// Claimed language tag
    pub language: String,
    /// Engine result at analysis time
    pub result: AnalysisReport,
    /// Persistence instant; non-decreasing in insertion order
    pub timestamp: DateTime<Utc>,
}

/// An analysis about to be persisted; `id` and `timestamp` are assigned by
/// the store.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub code: String,
    pub language: String,
    pub report: AnalysisReport,
}

/// Store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be read or written
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only record store with query-by-recency.
///
/// The store is the gateway's only shared mutable state. Concurrent
/// appends must neither lose records nor corrupt recency ordering;
/// `recent` reads need not be linearized with in-flight appends.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Assign `id` and `timestamp`, persist, and return the full record.
    async fn append(&self, analysis: NewAnalysis) -> Result<AnalysisRecord, StoreError>;

    /// Up to `limit` records ordered newest first; fewer when the store
    /// holds fewer, empty when it holds none.
    async fn recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, StoreError>;
}
