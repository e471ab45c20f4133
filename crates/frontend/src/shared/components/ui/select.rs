use leptos::prelude::*;

/// One entry of a [`Select`] control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value reported on change
    pub value: String,
    pub label: String,
    /// Identity used when re-rendering the option list
    pub key: String,
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            key: value.clone(),
            value,
            label: label.into(),
            disabled: false,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Select component with label support
///
/// The displayed selection is controlled by `value`: the `value` property is
/// re-applied on every change of `value` or `options`, so a user pick that the
/// owner does not adopt is reverted. Per-option `selected` covers the first
/// render. The change handler receives the raw DOM event so callers can read
/// the new value and stop the default action.
#[component]
pub fn Select(
    /// Label text (optional)
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Current value
    #[prop(into)]
    value: Signal<String>,
    /// Change event handler
    #[prop(optional)]
    on_change: Option<Callback<web_sys::Event>>,
    /// Options in display order
    #[prop(into)]
    options: Signal<Vec<SelectOption>>,
    /// Disabled state
    #[prop(optional, into)]
    disabled: Option<Signal<bool>>,
    /// ID for the select element
    #[prop(optional, into)]
    id: MaybeProp<String>,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let select_id = move || id.get().unwrap_or_default();
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=select_id>
                    {l}
                </label>
            })}
            <select
                id=select_id
                class=move || format!("form__select {}", additional_class())
                disabled=move || disabled.map(|d| d.get()).unwrap_or(false)
                prop:value=move || {
                    // Re-run when options change so the value applies to the new list
                    options.track();
                    value.get()
                }
                on:change=move |ev| {
                    if let Some(handler) = on_change {
                        handler.run(ev);
                    }
                }
            >
                <For
                    each=move || options.get()
                    key=|opt| (opt.value.clone(), opt.key.clone())
                    children=move |opt| {
                        let val_clone = opt.value.clone();
                        let is_selected = move || value.get() == val_clone;
                        view! {
                            <option value=opt.value disabled=opt.disabled selected=is_selected>
                                {opt.label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
