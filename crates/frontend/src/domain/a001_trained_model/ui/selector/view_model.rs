//! Model Selector - ViewModel
//!
//! Load status of the model list and the options derived from it

use super::model::{ModelSource, ModelsLoadError};
use crate::shared::components::ui::SelectOption;
use crate::shared::liveness::LivenessToken;
use contracts::domain::a001_trained_model::ModelDescriptor;
use leptos::prelude::*;
use thiserror::Error;

pub const PLACEHOLDER_LABEL: &str = "Choose a trained model";

/// Immutable snapshot of the fetched model list, in service order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
}

/// A change event whose value does not name a model of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("placeholder option selected")]
    Placeholder,
    #[error("model list is not loaded")]
    NotLoaded,
    #[error("option value {0:?} is not a model index")]
    Invalid(String),
    #[error("model index {index} is out of range for {len} models")]
    OutOfRange { index: usize, len: usize },
}

impl ModelCatalog {
    pub fn new(models: Vec<ModelDescriptor>) -> Self {
        Self { models }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Placeholder first, then one option per model in list order
    pub fn options(&self) -> Vec<SelectOption> {
        let mut items = placeholder_options();
        items.extend(self.models.iter().enumerate().map(|(index, model)| {
            SelectOption::new(index.to_string(), model.model_name.clone())
                .with_key(model.model_name.clone())
        }));
        items
    }

    /// Map an option value back to the full model record
    pub fn resolve(&self, value: &str) -> Result<&ModelDescriptor, SelectionError> {
        if value.is_empty() {
            return Err(SelectionError::Placeholder);
        }
        let index: usize = value
            .parse()
            .map_err(|_| SelectionError::Invalid(value.to_string()))?;
        self.models.get(index).ok_or(SelectionError::OutOfRange {
            index,
            len: self.models.len(),
        })
    }

    /// Option value of the given record; names may repeat, so the whole record is compared
    pub fn value_of(&self, model: &ModelDescriptor) -> Option<String> {
        self.models
            .iter()
            .position(|m| m == model)
            .map(|index| index.to_string())
    }
}

/// Options shown while no model list is available
pub fn placeholder_options() -> Vec<SelectOption> {
    vec![SelectOption::new("", PLACEHOLDER_LABEL).disabled()]
}

/// Readiness of the model list
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModelsStatus {
    #[default]
    NotLoaded,
    Loading,
    Loaded(ModelCatalog),
    Failed(String),
}

impl ModelsStatus {
    /// `NotLoaded -> Loading`; any other state is kept
    pub fn begin(self) -> Self {
        match self {
            ModelsStatus::NotLoaded => ModelsStatus::Loading,
            other => other,
        }
    }

    /// `Loading -> Loaded | Failed`; a settled status is never replaced
    pub fn settle(self, result: Result<Vec<ModelDescriptor>, ModelsLoadError>) -> Self {
        match self {
            ModelsStatus::NotLoaded | ModelsStatus::Loading => match result {
                Ok(models) => ModelsStatus::Loaded(ModelCatalog::new(models)),
                Err(e) => ModelsStatus::Failed(e.to_string()),
            },
            settled => settled,
        }
    }

    pub fn catalog(&self) -> Option<&ModelCatalog> {
        match self {
            ModelsStatus::Loaded(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn options(&self) -> Vec<SelectOption> {
        self.catalog()
            .map(ModelCatalog::options)
            .unwrap_or_else(placeholder_options)
    }

    pub fn error(&self) -> Option<String> {
        match self {
            ModelsStatus::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ModelsStatus::Loading)
    }

    /// Resolve a selection against the loaded list
    pub fn select(&self, value: &str) -> Result<ModelDescriptor, SelectionError> {
        match self.catalog() {
            Some(catalog) => catalog.resolve(value).cloned(),
            None if value.is_empty() => Err(SelectionError::Placeholder),
            None => Err(SelectionError::NotLoaded),
        }
    }
}

/// ViewModel for the model selector
#[derive(Clone, Copy)]
pub struct ModelSelectorVm {
    pub status: RwSignal<ModelsStatus>,
}

impl ModelSelectorVm {
    pub fn new() -> Self {
        Self {
            status: RwSignal::new(ModelsStatus::NotLoaded),
        }
    }

    pub fn begin_load(&self) {
        self.status.update(|s| *s = std::mem::take(s).begin());
    }

    /// Apply a load result; `false` if the view model was already disposed
    pub fn finish_load(&self, result: Result<Vec<ModelDescriptor>, ModelsLoadError>) -> bool {
        self.status
            .try_update(|s| *s = std::mem::take(s).settle(result))
            .is_some()
    }

    /// Fetch the model list once and publish the outcome.
    ///
    /// Returns `false` when the result was dropped because the owning
    /// component was unmounted while the request was in flight.
    pub async fn load(
        &self,
        source: &dyn ModelSource,
        liveness: &LivenessToken,
        on_status: Option<Callback<ModelsStatus>>,
    ) -> bool {
        self.begin_load();
        self.notify(on_status);
        log::debug!("loading trained models: {}", source.describe());

        let result = source.list_models().await;

        if !liveness.is_alive() {
            log::debug!("model selector unmounted, dropping result of {}", source.describe());
            return false;
        }
        match &result {
            Ok(models) => log::debug!("loaded {} trained models", models.len()),
            Err(e) => log::error!("failed to load trained models: {}", e),
        }
        if !self.finish_load(result) {
            return false;
        }
        self.notify(on_status);
        true
    }

    fn notify(&self, on_status: Option<Callback<ModelsStatus>>) {
        if let Some(handler) = on_status {
            if let Some(status) = self.status.try_get_untracked() {
                handler.run(status);
            }
        }
    }

    pub fn options(&self) -> Signal<Vec<SelectOption>> {
        let status = self.status;
        Signal::derive(move || status.with(ModelsStatus::options))
    }

    pub fn is_loading(&self) -> Signal<bool> {
        let status = self.status;
        Signal::derive(move || status.with(ModelsStatus::is_loading))
    }

    pub fn error(&self) -> Signal<Option<String>> {
        let status = self.status;
        Signal::derive(move || status.with(ModelsStatus::error))
    }

    pub fn select(&self, value: &str) -> Result<ModelDescriptor, SelectionError> {
        self.status.with_untracked(|s| s.select(value))
    }

    /// Forward a change event to the parent; `false` if nothing was forwarded
    pub fn dispatch(&self, value: &str, load_model: Callback<ModelDescriptor>) -> bool {
        match self.select(value) {
            Ok(model) => {
                log::debug!("trained model selected: {}", model.model_name);
                load_model.run(model);
                true
            }
            Err(e) => {
                log::warn!("ignoring model selection {:?}: {}", value, e);
                false
            }
        }
    }
}

impl Default for ModelSelectorVm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::decode_models;
    use super::*;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct FixedSource(Result<Vec<ModelDescriptor>, ModelsLoadError>);

    #[async_trait(?Send)]
    impl ModelSource for FixedSource {
        async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ModelsLoadError> {
            self.0.clone()
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    /// Revokes the token while the request is in flight
    struct UnmountingSource {
        liveness: LivenessToken,
    }

    #[async_trait(?Send)]
    impl ModelSource for UnmountingSource {
        async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ModelsLoadError> {
            self.liveness.revoke();
            Ok(vec![ModelDescriptor::new("late")])
        }

        fn describe(&self) -> String {
            "unmounting".to_string()
        }
    }

    fn loaded(names: &[&str]) -> ModelsStatus {
        let models = names.iter().map(|n| ModelDescriptor::new(*n)).collect();
        ModelsStatus::NotLoaded.begin().settle(Ok(models))
    }

    fn labels(options: &[SelectOption]) -> Vec<(&str, &str, bool)> {
        options
            .iter()
            .map(|o| (o.value.as_str(), o.label.as_str(), o.disabled))
            .collect()
    }

    #[test]
    fn test_initial_status_shows_only_placeholder() {
        let status = ModelsStatus::default();
        assert_eq!(status, ModelsStatus::NotLoaded);
        assert_eq!(
            labels(&status.options()),
            vec![("", "Choose a trained model", true)]
        );
        assert_eq!(labels(&status.begin().options()).len(), 1);
    }

    #[test]
    fn test_loaded_options_follow_list_order() {
        let status = loaded(&["a", "b"]);
        let options = status.options();
        assert_eq!(
            labels(&options),
            vec![
                ("", "Choose a trained model", true),
                ("0", "a", false),
                ("1", "b", false),
            ]
        );
        assert_eq!(options[1].key, "a");
        assert_eq!(options[2].key, "b");
    }

    #[test]
    fn test_select_returns_full_record() {
        let body = r#"[{"model_name":"a"},{"model_name":"b","epoch":4}]"#;
        let models = decode_models(body).unwrap();
        let status = ModelsStatus::Loading.settle(Ok(models));

        let chosen = status.select("1").unwrap();
        assert_eq!(
            serde_json::to_value(&chosen).unwrap(),
            serde_json::json!({ "model_name": "b", "epoch": 4 })
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let status = loaded(&["a", "b", "c"]);
        assert_eq!(status.options(), status.options());
    }

    #[test]
    fn test_empty_list_allows_no_selection() {
        let status = loaded(&[]);
        assert_eq!(labels(&status.options()), vec![("", "Choose a trained model", true)]);
        assert_eq!(
            status.select("0"),
            Err(SelectionError::OutOfRange { index: 0, len: 0 })
        );
        assert_eq!(status.select(""), Err(SelectionError::Placeholder));
    }

    #[test]
    fn test_select_rejects_unknown_values() {
        let status = loaded(&["a"]);
        assert_eq!(status.select("7"), Err(SelectionError::OutOfRange { index: 7, len: 1 }));
        assert_eq!(
            status.select("a"),
            Err(SelectionError::Invalid("a".to_string()))
        );
        assert_eq!(
            ModelsStatus::NotLoaded.select("0"),
            Err(SelectionError::NotLoaded)
        );
    }

    #[test]
    fn test_failure_is_reported() {
        let status = ModelsStatus::Loading.settle(Err(ModelsLoadError::Status {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        }));
        assert_eq!(
            status.error().as_deref(),
            Some("HTTP error: 500 Internal Server Error")
        );
        assert_eq!(status.options().len(), 1);
        assert!(!status.is_loading());
    }

    #[test]
    fn test_settled_status_is_not_replaced() {
        let status = loaded(&["a"]);
        let again = status.clone().settle(Ok(vec![ModelDescriptor::new("z")]));
        assert_eq!(again, status);

        let failed = ModelsStatus::Failed("offline".to_string());
        assert_eq!(failed.clone().begin(), failed);
        assert_eq!(failed.clone().settle(Ok(Vec::new())), failed);
    }

    #[test]
    fn test_value_of() {
        let catalog = ModelCatalog::new(vec![ModelDescriptor::new("a"), ModelDescriptor::new("b")]);
        assert_eq!(catalog.value_of(&ModelDescriptor::new("b")).as_deref(), Some("1"));
        assert_eq!(catalog.value_of(&ModelDescriptor::new("missing")), None);
    }

    #[test]
    fn test_value_of_duplicate_names() {
        let models = decode_models(r#"[{"model_name":"x"},{"model_name":"x","epoch":2}]"#).unwrap();
        let catalog = ModelCatalog::new(models);

        let second = catalog.resolve("1").unwrap().clone();
        assert_eq!(catalog.value_of(&second).as_deref(), Some("1"));
        let first = catalog.resolve("0").unwrap().clone();
        assert_eq!(catalog.value_of(&first).as_deref(), Some("0"));
    }

    #[test]
    fn test_dispatch_calls_parent_once_with_full_record() {
        let owner = Owner::new();
        owner.with(|| {
            let vm = ModelSelectorVm::new();
            let body = r#"[{"model_name":"a"},{"model_name":"b"}]"#;
            vm.finish_load(Ok(decode_models(body).unwrap()));

            let received = Arc::new(Mutex::new(Vec::<ModelDescriptor>::new()));
            let load_model = Callback::new({
                let received = Arc::clone(&received);
                move |model: ModelDescriptor| received.lock().unwrap().push(model)
            });

            assert!(vm.dispatch("1", load_model));
            let calls = received.lock().unwrap().clone();
            assert_eq!(calls.len(), 1);
            assert_eq!(
                serde_json::to_value(&calls[0]).unwrap(),
                serde_json::json!({ "model_name": "b" })
            );
        });
    }

    #[test]
    fn test_dispatch_skips_unresolvable_values() {
        let owner = Owner::new();
        owner.with(|| {
            let vm = ModelSelectorVm::new();
            vm.finish_load(Ok(vec![ModelDescriptor::new("a"), ModelDescriptor::new("b")]));

            let calls = Arc::new(AtomicUsize::new(0));
            let load_model = Callback::new({
                let calls = Arc::clone(&calls);
                move |_: ModelDescriptor| {
                    calls.fetch_add(1, Ordering::SeqCst);
                }
            });

            for value in ["", "7", "x"] {
                assert!(!vm.dispatch(value, load_model));
            }
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        });
    }

    #[test]
    fn test_vm_load_publishes_models() {
        let owner = Owner::new();
        owner.with(|| {
            let vm = ModelSelectorVm::new();
            let source = FixedSource(Ok(vec![ModelDescriptor::new("a"), ModelDescriptor::new("b")]));

            assert!(block_on(vm.load(&source, &LivenessToken::new(), None)));
            assert_eq!(vm.status.get_untracked(), loaded(&["a", "b"]));
        });
    }

    #[test]
    fn test_vm_load_surfaces_failure() {
        let owner = Owner::new();
        owner.with(|| {
            let vm = ModelSelectorVm::new();
            let source = FixedSource(Err(ModelsLoadError::Request("offline".to_string())));

            assert!(block_on(vm.load(&source, &LivenessToken::new(), None)));
            assert_eq!(
                vm.status.get_untracked(),
                ModelsStatus::Failed("Request failed: offline".to_string())
            );
        });
    }

    #[test]
    fn test_vm_load_drops_result_after_unmount() {
        let owner = Owner::new();
        owner.with(|| {
            let vm = ModelSelectorVm::new();
            let liveness = LivenessToken::new();
            let source = UnmountingSource {
                liveness: liveness.clone(),
            };

            assert!(!block_on(vm.load(&source, &liveness, None)));
            assert_eq!(vm.status.get_untracked(), ModelsStatus::Loading);
        });
    }

    #[test]
    fn test_vm_ignores_result_after_dispose() {
        let owner = Owner::new();
        let vm = owner.with(ModelSelectorVm::new);
        vm.begin_load();
        assert!(vm.status.with_untracked(ModelsStatus::is_loading));

        owner.cleanup();
        assert!(!vm.finish_load(Ok(vec![ModelDescriptor::new("late")])));
    }
}
