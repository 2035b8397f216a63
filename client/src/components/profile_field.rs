//! Single profile field in view or edit mode.
//!
//! DESIGN
//! ======
//! The field renders once per edit-mode toggle. The value and error are
//! signals so typing updates the input in place instead of rebuilding it
//! (rebuilding would drop focus on every keystroke).

#[cfg(test)]
#[path = "profile_field_test.rs"]
mod profile_field_test;

use leptos::prelude::*;

use crate::net::types::{EmploymentStatus, ProfileField, WorkLocationType};
use crate::state::profile::{FieldSpec, InputKind};
use crate::util::format::format_date;

/// Text shown for a stored value outside edit mode.
pub fn display_text(spec: &FieldSpec, value: Option<&str>) -> String {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return "N/A".to_owned();
    };
    match spec.kind {
        InputKind::Date => format_date(value),
        InputKind::Select => select_options(spec.key)
            .into_iter()
            .find(|(wire, _)| *wire == value)
            .map_or_else(|| value.to_owned(), |(_, label)| label.to_owned()),
        _ => value.to_owned(),
    }
}

/// `(wire value, label)` pairs for select fields.
pub fn select_options(key: ProfileField) -> Vec<(&'static str, &'static str)> {
    match key {
        ProfileField::EmploymentStatus => EmploymentStatus::ALL.iter().map(|s| (s.as_str(), s.label())).collect(),
        ProfileField::WorkLocationType => WorkLocationType::ALL.iter().map(|w| (w.as_str(), w.label())).collect(),
        _ => Vec::new(),
    }
}

fn input_type(kind: InputKind) -> &'static str {
    match kind {
        InputKind::Date => "date",
        InputKind::Number => "number",
        InputKind::Email => "email",
        InputKind::Tel => "tel",
        InputKind::Text | InputKind::Textarea | InputKind::Select => "text",
    }
}

#[component]
pub fn ProfileFieldView(
    spec: FieldSpec,
    editing: bool,
    #[prop(into)] value: Signal<Option<String>>,
    #[prop(into)] error: Signal<Option<String>>,
    on_change: Callback<(ProfileField, String)>,
) -> impl IntoView {
    let key = spec.key;
    let label = spec.label;

    if !editing {
        return view! {
            <div class="profile-field">
                <span class="profile-field__label">{label}</span>
                <span class="profile-field__value">{move || display_text(&spec, value.get().as_deref())}</span>
            </div>
        }
        .into_any();
    }

    let placeholder = spec.placeholder.unwrap_or_default();
    let on_input = move |ev: leptos::ev::Event| on_change.run((key, event_target_value(&ev)));
    let current = move || value.get().unwrap_or_default();

    let input = match spec.kind {
        InputKind::Textarea => view! {
            <textarea
                class="profile-field__input profile-field__input--textarea"
                rows="4"
                placeholder=placeholder
                prop:value=current
                on:input=on_input
            ></textarea>
        }
        .into_any(),
        InputKind::Select => {
            let options = select_options(key)
                .into_iter()
                .map(|(wire, option_label)| {
                    view! {
                        <option value=wire selected=move || value.get().as_deref() == Some(wire)>
                            {option_label}
                        </option>
                    }
                })
                .collect::<Vec<_>>();
            view! {
                <select class="profile-field__input" on:change=on_input>
                    <option value="" selected=move || value.get().is_none_or(|v| v.is_empty())>
                        "Select..."
                    </option>
                    {options}
                </select>
            }
            .into_any()
        }
        InputKind::Date => view! {
            <input
                class="profile-field__input"
                type="date"
                prop:value=move || value.get().map(|v| v.chars().take(10).collect::<String>()).unwrap_or_default()
                on:input=on_input
            />
        }
        .into_any(),
        kind => view! {
            <input
                class="profile-field__input"
                type=input_type(kind)
                placeholder=placeholder
                prop:value=current
                on:input=on_input
            />
        }
        .into_any(),
    };

    view! {
        <div class="profile-field" class=("profile-field--invalid", move || error.get().is_some())>
            <label class="profile-field__label">{label}</label>
            {input}
            <Show when=move || error.get().is_some()>
                <p class="profile-field__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
    .into_any()
}
