//! Trained Model Selector UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: ModelSource and the HTTP implementation
//! - view_model.rs: ModelsStatus, ModelCatalog, ModelSelectorVm
//! - view.rs: Main component ModelSelector

mod model;
mod view;
mod view_model;

pub use model::{decode_models, HttpModelSource, ModelSource, ModelsLoadError};
pub use view::ModelSelector;
pub use view_model::{
    placeholder_options, ModelCatalog, ModelSelectorVm, ModelsStatus, SelectionError,
    PLACEHOLDER_LABEL,
};
