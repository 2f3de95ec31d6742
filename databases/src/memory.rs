//! In-memory history store
//!
//! Keeps records in insertion order behind an async RwLock. Used by tests
//! and by gateway runs without a database file; contents are lost on
//! shutdown.

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use codemind_core::history::{AnalysisRecord, NewAnalysis, RecordStore, StoreError};

/// Volatile history store.
#[derive(Default)]
pub struct MemoryHistoryStore {
    records: RwLock<Vec<AnalysisRecord>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryHistoryStore {
    async fn append(&self, analysis: NewAnalysis) -> Result<AnalysisRecord, StoreError> {
        let mut records = self.records.write().await;

        // Insertion order defines recency; clamp the clock so timestamps
        // never run backwards within the store.
        let mut timestamp = Utc::now();
        if let Some(last) = records.last() {
            if timestamp < last.timestamp {
                timestamp = last.timestamp;
            }
        }

        let record = AnalysisRecord {
            id: Uuid::new_v4(),
            code: analysis.code,
            language: analysis.language,
            result: analysis.report,
            timestamp,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codemind_core::AnalysisReport;
    use std::sync::Arc;

    fn sample_analysis(code: &str) -> NewAnalysis {
        NewAnalysis {
            code: code.to_string(),
            language: "python".to_string(),
            report: AnalysisReport {
                time: "O(1)".to_string(),
                space: "O(1)".to_string(),
                warnings: vec![],
                suggestions: vec![],
            },
        }
    }

    #[tokio::test]
    async fn test_append_then_recent_roundtrip() {
        let store = MemoryHistoryStore::new();
        let record = store.append(sample_analysis("print(1)")).await.unwrap();

        let recent = store.recent(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0], record);
        assert_eq!(recent[0].code, "print(1)");
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_capped() {
        let store = MemoryHistoryStore::new();
        for i in 0..5 {
            store.append(sample_analysis(&format!("print({i})"))).await.unwrap();
        }

        let recent = store.recent(3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].code, "print(4)");
        assert_eq!(recent[2].code, "print(2)");
    }

    #[tokio::test]
    async fn test_concurrent_appends_preserve_order_and_count() {
        let store = Arc::new(MemoryHistoryStore::new());

        let mut handles = Vec::new();
        for task in 0..4 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..10 {
                    store
                        .append(sample_analysis(&format!("task {task} step {i}")))
                        .await
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len().await, 40);

        let recent = store.recent(100).await.unwrap();
        assert_eq!(recent.len(), 40);
        for pair in recent.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty() {
        let store = MemoryHistoryStore::new();
        assert!(store.is_empty().await);
        assert!(store.recent(20).await.unwrap().is_empty());
    }
}
