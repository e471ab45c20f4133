use crate::domain::a001_trained_model::ui::selector::{ModelCatalog, ModelSelector, ModelsStatus};
use contracts::domain::a001_trained_model::ModelDescriptor;
use leptos::prelude::*;

/// Dashboard slot hosting the model selector.
///
/// Owns the displayed selection and the last chosen model; loading the model
/// itself is left to the backend.
#[component]
pub fn App() -> impl IntoView {
    let current_model = RwSignal::new(String::new());
    let loaded_model = RwSignal::new(None::<ModelDescriptor>);
    let catalog = RwSignal::new(None::<ModelCatalog>);
    let load_error = RwSignal::new(None::<String>);

    let load_model = Callback::new(move |model: ModelDescriptor| {
        log::info!("model chosen for loading: {}", model.model_name);
        let position = catalog.with_untracked(|c| {
            c.as_ref()
                .and_then(|c| c.value_of(&model))
                .unwrap_or_default()
        });
        current_model.set(position);
        loaded_model.set(Some(model));
    });

    let on_status = Callback::new(move |status: ModelsStatus| {
        load_error.set(status.error());
        if let ModelsStatus::Loaded(loaded) = status {
            catalog.set(Some(loaded));
        }
    });

    view! {
        <div class="dashboard">
            <header class="dashboard__header">
                <h1>"Caladrius"</h1>
                <ModelSelector
                    current_model=current_model
                    load_model=load_model
                    on_status=on_status
                />
            </header>
            <section class="dashboard__model">
                {move || match loaded_model.get() {
                    Some(model) => view! {
                        <p>"Current model: " <strong>{model.model_name}</strong></p>
                    }.into_any(),
                    None => view! { <p>"No model loaded"</p> }.into_any(),
                }}
                {move || load_error.get().map(|err| view! {
                    <p class="dashboard__error">{err}</p>
                })}
            </section>
        </div>
    }
}
