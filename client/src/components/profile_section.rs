//! Titled group of profile fields for one tier.

use leptos::prelude::*;

use crate::components::profile_field::ProfileFieldView;
use crate::net::types::ProfileField;
use crate::state::profile::{ProfileEditor, SectionSpec, visible_fields};

/// Renders the fields of `section` the viewer may see. The whole section is
/// omitted when none survive the filter.
#[component]
pub fn ProfileSection(
    section: SectionSpec,
    editor: RwSignal<ProfileEditor>,
    on_change: Callback<(ProfileField, String)>,
) -> impl IntoView {
    // Only the field list and edit mode drive re-rendering; values flow
    // through per-field signals.
    let rows = Memo::new(move |_| {
        editor.with(|e| {
            let Some(profile) = e.profile.as_ref() else {
                return (false, Vec::new());
            };
            let rows = visible_fields(section.fields, profile, e.metadata(), e.edit_mode)
                .into_iter()
                .map(|f| (f.spec, f.editable))
                .collect::<Vec<_>>();
            (e.edit_mode, rows)
        })
    });

    move || {
        let (edit_mode, rows) = rows.get();
        if rows.is_empty() {
            return ().into_any();
        }
        let fields = rows
            .into_iter()
            .map(|(spec, editable)| {
                let key = spec.key;
                let value = Signal::derive(move || editor.with(|e| e.current_value(key)));
                let error = Signal::derive(move || editor.with(|e| e.field_error(key)));
                view! {
                    <ProfileFieldView
                        spec=spec
                        editing=edit_mode && editable
                        value=value
                        error=error
                        on_change=on_change
                    />
                }
            })
            .collect::<Vec<_>>();
        view! {
            <section class="profile-section">
                <h2 class="profile-section__title">{section.title}</h2>
                <div class="profile-section__grid">{fields}</div>
            </section>
        }
        .into_any()
    }
}
