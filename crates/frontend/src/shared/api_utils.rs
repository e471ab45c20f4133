//! API utilities for frontend-backend communication
//!
//! Provides helpers for constructing API URLs.

use contracts::domain::a001_trained_model::MODELS_API_PATH;

/// Build a full API URL from an optional base and a path
///
/// An empty base keeps the path relative, so the request goes to the
/// origin that served the dashboard.
///
/// # Example
/// ```rust
/// # use frontend::shared::api_utils::api_url;
/// assert_eq!(api_url("http://localhost:8000/", "/api/models"), "http://localhost:8000/api/models");
/// assert_eq!(api_url("", "/api/models"), "/api/models");
/// ```
pub fn api_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Endpoint the model selector reads the list of trained models from
pub fn models_endpoint(base: Option<&str>) -> String {
    api_url(base.unwrap_or_default(), MODELS_API_PATH)
}
