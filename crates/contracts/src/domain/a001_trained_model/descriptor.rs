use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Endpoint that lists the trained models available for loading
pub const MODELS_API_PATH: &str = "/api/models";

/// Trained model as reported by the models service.
///
/// Only `model_name` is interpreted; every other field of the response is
/// kept unchanged in `extra` and handed to the parent as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Human-readable name, used as display label and list key
    pub model_name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelDescriptor {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            extra: Map::new(),
        }
    }

    /// Additional attribute reported by the service, if present
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}
