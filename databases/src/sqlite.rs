//! SQLite history store
//!
//! sqlx-backed implementation of the record-store contract. The schema is
//! created on construction; records are inserted once and never updated or
//! deleted by the gateway.

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use codemind_core::history::{AnalysisRecord, NewAnalysis, RecordStore, StoreError};
use codemind_core::AnalysisReport;

/// History store persisting to a SQLite database file.
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    /// Open (or create) the database at `path` and ensure the schema
    /// exists.
    pub async fn new(path: &str) -> Result<Self, StoreError> {
        let pool = SqlitePool::connect_with(
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
        )
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS analyses (
                id TEXT PRIMARY KEY,
                code TEXT NOT NULL,
                language TEXT NOT NULL,
                result TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_analyses_timestamp ON analyses(timestamp)")
            .execute(&pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        info!("History store ready at {}", path);
        Ok(Self { pool })
    }

    fn record_from_row(row: &SqliteRow) -> Result<AnalysisRecord, StoreError> {
        let id_str: String = row.get("id");
        let id = Uuid::parse_str(&id_str).map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let result_json: String = row.get("result");
        let result: AnalysisReport = serde_json::from_str(&result_json)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let millis: i64 = row.get("timestamp");
        let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| StoreError::Unavailable(format!("invalid timestamp: {millis}")))?;

        Ok(AnalysisRecord {
            id,
            code: row.get("code"),
            language: row.get("language"),
            result,
            timestamp,
        })
    }
}

#[async_trait::async_trait]
impl RecordStore for SqliteHistoryStore {
    async fn append(&self, analysis: NewAnalysis) -> Result<AnalysisRecord, StoreError> {
        let record = AnalysisRecord {
            id: Uuid::new_v4(),
            code: analysis.code,
            language: analysis.language,
            result: analysis.report,
            timestamp: Utc::now(),
        };

        let result_json = serde_json::to_string(&record.result)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        sqlx::query(
            "INSERT INTO analyses (id, code, language, result, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(record.id.to_string())
        .bind(&record.code)
        .bind(&record.language)
        .bind(&result_json)
        .bind(record.timestamp.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        debug!("Persisted analysis record: {}", record.id);
        Ok(record)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, StoreError> {
        // rowid breaks ties between appends landing on the same millisecond
        let rows = sqlx::query(
            "SELECT id, code, language, result, timestamp FROM analyses
             ORDER BY timestamp DESC, rowid DESC LIMIT ?1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        rows.iter().map(Self::record_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_analysis(language: &str) -> NewAnalysis {
        NewAnalysis {
            code: "print('hi')".to_string(),
            language: language.to_string(),
            report: AnalysisReport {
                time: "O(1)".to_string(),
                space: "O(1)".to_string(),
                warnings: vec![],
                suggestions: vec!["Constant time complexity. Very efficient.".to_string()],
            },
        }
    }

    async fn open_store(dir: &tempfile::TempDir) -> SqliteHistoryStore {
        let path = dir.path().join("history.db");
        SqliteHistoryStore::new(path.to_str().unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn test_append_assigns_id_and_timestamp() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;

        let record = store.append(sample_analysis("python")).await.unwrap();
        assert!(!record.id.to_string().is_empty());
        assert!(record.timestamp.timestamp_millis() > 0);

        let recent = store.recent(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0], record);
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_capped() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;

        let mut ids = Vec::new();
        for i in 0..5 {
            let mut analysis = sample_analysis("c");
            analysis.code = format!("int main() {{ return {i}; }}");
            ids.push(store.append(analysis).await.unwrap().id);
        }

        let recent = store.recent(3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].id, ids[4]);
        assert_eq!(recent[1].id, ids[3]);
        assert_eq!(recent[2].id, ids[2]);

        for pair in recent.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[tokio::test]
    async fn test_recent_on_empty_store() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;
        assert!(store.recent(20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.db");

        let record = {
            let store = SqliteHistoryStore::new(path.to_str().unwrap()).await.unwrap();
            store.append(sample_analysis("java")).await.unwrap()
        };

        let store = SqliteHistoryStore::new(path.to_str().unwrap()).await.unwrap();
        let recent = store.recent(20).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, record.id);
        assert_eq!(recent[0].result, record.result);
    }

    #[tokio::test]
    async fn test_concurrent_appends_lose_nothing() {
        let dir = tempdir().unwrap();
        let store = std::sync::Arc::new(open_store(&dir).await);

        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..5 {
                    store.append(sample_analysis("python")).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let recent = store.recent(100).await.unwrap();
        assert_eq!(recent.len(), 20);
        for pair in recent.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }
}
