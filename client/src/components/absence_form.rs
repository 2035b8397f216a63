//! Time-off request form shared by the absence page and the profile card.

use leptos::prelude::*;

use crate::net::types::AbsenceType;
use crate::state::absence::{AbsenceForm, FormErrors, FormField, MAX_NOTE_CHARS, validate_absence};
use crate::util::format::today;

/// Validates locally, then calls `on_submit` with the form owned by the
/// caller. The caller sends the request and resets the form on success.
#[component]
pub fn AbsenceFormCard(
    form: RwSignal<AbsenceForm>,
    #[prop(into)] submitting: Signal<bool>,
    on_submit: Callback<()>,
    #[prop(optional)] max_days: Option<i64>,
    #[prop(into, default = "Request Time Off".to_owned())] title: String,
) -> impl IntoView {
    let errors = RwSignal::new(FormErrors::new());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let found = form.with_untracked(|f| validate_absence(f, today(), max_days));
        let valid = found.is_empty();
        errors.set(found);
        if valid {
            on_submit.run(());
        }
    };

    let error_for = move |field: FormField| move || errors.with(|e| e.get(&field).cloned());
    let edit = move |field: FormField, value: String| {
        form.update(|f| match field {
            FormField::StartDate => f.start_date = value,
            FormField::EndDate => f.end_date = value,
            FormField::Note => f.note = value,
        });
        errors.update(|e| {
            e.remove(&field);
        });
    };

    let type_options = AbsenceType::ALL
        .into_iter()
        .map(|kind| {
            view! {
                <option value=kind.as_str() selected=move || form.with(|f| f.kind == kind)>
                    {kind.label()}
                </option>
            }
        })
        .collect::<Vec<_>>();

    let start_error = error_for(FormField::StartDate);
    let end_error = error_for(FormField::EndDate);
    let note_error = error_for(FormField::Note);

    view! {
        <form class="absence-form" on:submit=submit>
            <h2 class="absence-form__title">{title}</h2>
            {max_days.map(|max| view! { <p class="absence-form__hint">{format!("Up to {max} days per request.")}</p> })}
            <div class="absence-form__row">
                <label class="absence-form__field">
                    <span>"Start date"</span>
                    <input
                        type="date"
                        prop:value=move || form.with(|f| f.start_date.clone())
                        on:input=move |ev| edit(FormField::StartDate, event_target_value(&ev))
                    />
                    {move || start_error().map(|msg| view! { <span class="absence-form__error">{msg}</span> })}
                </label>
                <label class="absence-form__field">
                    <span>"End date"</span>
                    <input
                        type="date"
                        prop:value=move || form.with(|f| f.end_date.clone())
                        on:input=move |ev| edit(FormField::EndDate, event_target_value(&ev))
                    />
                    {move || end_error().map(|msg| view! { <span class="absence-form__error">{msg}</span> })}
                </label>
            </div>
            <label class="absence-form__field">
                <span>"Type"</span>
                <select on:change=move |ev| {
                    if let Some(kind) = AbsenceType::parse(&event_target_value(&ev)) {
                        form.update(|f| f.kind = kind);
                        errors.update(|e| {
                            e.remove(&FormField::StartDate);
                            e.remove(&FormField::EndDate);
                        });
                    }
                }>
                    {type_options}
                </select>
            </label>
            <label class="absence-form__field">
                <span>"Note (optional)"</span>
                <textarea
                    rows="3"
                    maxlength=MAX_NOTE_CHARS.to_string()
                    prop:value=move || form.with(|f| f.note.clone())
                    on:input=move |ev| edit(FormField::Note, event_target_value(&ev))
                ></textarea>
                {move || note_error().map(|msg| view! { <span class="absence-form__error">{msg}</span> })}
            </label>
            <button type="submit" class="btn btn--primary" disabled=move || submitting.get()>
                {move || if submitting.get() { "Submitting..." } else { "Submit Request" }}
            </button>
        </form>
    }
}
