pub mod descriptor;

pub use descriptor::{ModelDescriptor, MODELS_API_PATH};
