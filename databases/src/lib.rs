//! CodeMind Databases Module
//!
//! Record-store adapters for the analysis history: a SQLite-backed
//! production store and an in-memory store for tests and store-less runs.
//! Both implement the `RecordStore` contract from `codemind-core`.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryHistoryStore;
pub use sqlite::SqliteHistoryStore;
