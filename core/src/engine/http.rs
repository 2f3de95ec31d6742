//! HTTP client for the external analysis engine

use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tracing::debug;

use super::{AnalysisEngine, EngineError};
use crate::{AnalysisReport, ChatAnswer};

/// Production engine client speaking JSON over HTTP.
///
/// One shared `reqwest::Client` backs all calls, built with the configured
/// request timeout. The client holds no other state and can be cloned and
/// shared freely across concurrent requests.
#[derive(Debug, Clone)]
pub struct HttpEngineClient {
    client: Client,
    base_url: String,
}

impl HttpEngineClient {
    /// Create a client for the engine at `base_url` with a per-request
    /// timeout. The timeout bounds the gateway's only network suspension
    /// point; elapsed timeouts surface as `EngineError::Unavailable`.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| EngineError::Unavailable(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    async fn post_json<T>(&self, path: &str, body: serde_json::Value) -> Result<T, EngineError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Forwarding request to analysis engine: {}", url);

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(EngineError::Failed { status, message });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl AnalysisEngine for HttpEngineClient {
    async fn request_analysis(
        &self,
        code: &str,
        language: &str,
    ) -> Result<AnalysisReport, EngineError> {
        self.post_json("/analyze", json!({ "code": code, "language": language }))
            .await
    }

    async fn request_chat_answer(
        &self,
        code: &str,
        question: &str,
    ) -> Result<ChatAnswer, EngineError> {
        self.post_json("/ask-ai", json!({ "code": code, "question": question }))
            .await
    }
}
