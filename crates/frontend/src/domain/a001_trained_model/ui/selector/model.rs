//! Model Selector - Model Layer
//!
//! Data access for the list of trained models

use crate::shared::api_utils::models_endpoint;
use async_trait::async_trait;
use contracts::domain::a001_trained_model::ModelDescriptor;
use gloo_net::http::Request;
use thiserror::Error;

/// Why the list of trained models could not be obtained
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelsLoadError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP error: {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Source of the trained-model list shown by the selector
#[async_trait(?Send)]
pub trait ModelSource: Send + Sync {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ModelsLoadError>;

    /// Short description for log lines
    fn describe(&self) -> String;
}

/// Reads the list with a single `GET` against the models endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpModelSource {
    endpoint: String,
}

impl HttpModelSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Source for the models endpoint under the given API base
    pub fn with_api_base(base: &str) -> Self {
        Self::new(models_endpoint(Some(base)))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpModelSource {
    fn default() -> Self {
        Self::new(models_endpoint(None))
    }
}

#[async_trait(?Send)]
impl ModelSource for HttpModelSource {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ModelsLoadError> {
        let response = Request::get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ModelsLoadError::Request(e.to_string()))?;

        if !response.ok() {
            return Err(ModelsLoadError::Status {
                status: response.status(),
                status_text: response.status_text(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ModelsLoadError::Request(e.to_string()))?;

        decode_models(&body)
    }

    fn describe(&self) -> String {
        format!("GET {}", self.endpoint)
    }
}

/// Decode the JSON array returned by the models endpoint
pub fn decode_models(body: &str) -> Result<Vec<ModelDescriptor>, ModelsLoadError> {
    serde_json::from_str(body).map_err(|e| ModelsLoadError::Decode(e.to_string()))
}
