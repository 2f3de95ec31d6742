//! CodeMind API Module
//!
//! The API module provides the HTTP surface of the analysis gateway:
//! request/response models, axum handlers, and the server wiring. All
//! decision logic lives in `codemind-core`; this crate only translates
//! between HTTP and the gateway contract.

pub mod handlers;
pub mod models;
pub mod server;

pub use handlers::*;
pub use models::*;
pub use server::*;
