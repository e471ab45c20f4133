//! Model Selector - View Component
//!
//! Dropdown of trained models that forwards the chosen record to the parent

use super::model::{HttpModelSource, ModelSource};
use super::view_model::{ModelSelectorVm, ModelsStatus};
use crate::shared::components::ui::Select;
use crate::shared::liveness::LivenessToken;
use contracts::domain::a001_trained_model::ModelDescriptor;
use leptos::prelude::*;
use std::sync::Arc;

#[component]
#[allow(non_snake_case)]
pub fn ModelSelector(
    /// Option value shown as selected: a model index, or empty for the placeholder
    #[prop(into)]
    current_model: Signal<String>,
    /// Receives the full record of the chosen model
    load_model: Callback<ModelDescriptor>,
    /// Where the model list comes from; defaults to `GET /api/models`
    #[prop(optional)]
    source: Option<Arc<dyn ModelSource>>,
    /// Notified on every load status change
    #[prop(optional)]
    on_status: Option<Callback<ModelsStatus>>,
) -> impl IntoView {
    let vm = ModelSelectorVm::new();
    let source: Arc<dyn ModelSource> =
        source.unwrap_or_else(|| Arc::new(HttpModelSource::default()));

    let liveness = LivenessToken::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || liveness.revoke()
    });

    // Load models once on mount
    leptos::task::spawn_local(async move {
        vm.load(source.as_ref(), &liveness, on_status).await;
    });

    let handle_change = Callback::new(move |ev: web_sys::Event| {
        vm.dispatch(&event_target_value(&ev), load_model);
        ev.prevent_default();
    });

    let options = vm.options();
    let is_loading = vm.is_loading();
    let error = vm.error();

    view! {
        <div class="select">
            <Select
                value=current_model
                options=options
                disabled=is_loading
                on_change=handle_change
            />
            {move || is_loading.get().then(|| view! {
                <p class="select__hint">"Loading models…"</p>
            })}
            {move || error.get().map(|err| view! {
                <p class="select__error">"Could not load models: " {err}</p>
            })}
        </div>
    }
}
