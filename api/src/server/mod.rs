//! API Server Module
//!
//! This module contains the server setup functionality for the gateway's
//! HTTP surface.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use codemind_core::gateway::AnalysisGateway;

use crate::handlers::{analyze, ask_ai, health_check, history, ApiState};
use crate::models::ApiConfig;

/// Main API server
pub struct ApiServer {
    /// Server configuration
    config: ApiConfig,
    /// Shared state
    state: Arc<ApiState>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiConfig, gateway: Arc<AnalysisGateway>) -> Self {
        let state = Arc::new(ApiState { gateway });
        Self { config, state }
    }

    /// Build the router serving the gateway surface. Split out so tests can
    /// drive it without binding a socket. The browser client runs on
    /// another origin, hence the permissive CORS layer.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(health_check))
            .route("/analyze", post(analyze))
            .route("/history", get(history))
            .route("/ask-ai", post(ask_ai))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the API server
    pub async fn start(&self) -> Result<()> {
        info!(
            "Starting CodeMind gateway on {}:{}",
            self.config.host, self.config.port
        );

        let app = self.router();

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid listen address: {}", e))?;
        info!("CodeMind gateway listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start gateway server: {}", e))?;

        Ok(())
    }
}
