//! Profile page: gated field sections, inline editing, feedback, and a
//! time-off card on one's own profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted at `/profile/:user_id`. The route id is checked before any
//! request; the profile and its feedback load independently so a forbidden
//! feedback query never hides the profile itself.
//!
//! DESIGN
//! ======
//! Saving is optimistic. `ProfileEditor::begin_save` merges the edits into
//! the displayed profile and hands back a snapshot; the spawned PATCH feeds
//! its result to `finish_save`, which either adopts the server copy or rolls
//! the snapshot back and reopens edit mode.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::absence_form::AbsenceFormCard;
use crate::components::feedback_list::FeedbackList;
use crate::components::feedback_modal::FeedbackModal;
use crate::components::profile_section::ProfileSection;
use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::{AbsenceRequest, FeedbackListItem, ProfileField};
use crate::state::absence::{self, AbsenceForm, PROFILE_MAX_DAYS, SUBMIT_FAILED};
use crate::state::auth::AuthState;
use crate::state::feedback::{FeedbackPanel, load_feedback_for};
use crate::state::profile::{self, ProfileEditor, SECTIONS, SaveStep};
use crate::util::format::{format_date, today};
use crate::util::task::spawn;

fn go_back() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                let _ = history.back();
            }
        }
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let client = expect_context::<ApiClient>();
    let params = use_params_map();
    let user_id = Memo::new(move |_| params.with(|p| p.get("user_id").unwrap_or_default()));

    let editor = RwSignal::new(ProfileEditor::default());
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(None::<String>);
    let feedback = RwSignal::new(FeedbackPanel::Loading);
    let show_feedback_modal = RwSignal::new(false);

    let viewer_id = move || auth_state.with(|a| a.user_id().map(str::to_owned));
    let is_own = move || viewer_id().is_some_and(|id| id == user_id.get());

    let load_feedback = {
        let client = client.clone();
        move |id: String| {
            feedback.set(FeedbackPanel::Loading);
            let client = client.clone();
            spawn(async move {
                let panel = load_feedback_for(&client, &id).await;
                if user_id.get_untracked() == id {
                    feedback.set(panel);
                }
            });
        }
    };

    let load_profile = {
        let client = client.clone();
        let load_feedback = load_feedback.clone();
        move |id: String| {
            editor.set(ProfileEditor::default());
            load_error.set(None);
            if !profile::is_profile_id(&id) {
                load_error.set(Some("Profile not found".to_owned()));
                loading.set(false);
                return;
            }
            loading.set(true);
            load_feedback(id.clone());
            let client = client.clone();
            spawn(async move {
                let result = api::fetch_profile(&client, &id).await;
                if user_id.get_untracked() != id {
                    return;
                }
                match result {
                    Ok(p) => editor.set(ProfileEditor::loaded(p)),
                    Err(err) => {
                        log::warn!("profile load failed: {err}");
                        load_error.set(Some(profile::profile_error_message(&err, "Failed to load profile")));
                    }
                }
                loading.set(false);
            });
        }
    };

    Effect::new(move || load_profile(user_id.get()));

    let retry_feedback = Callback::new(move |()| load_feedback(user_id.get_untracked()));

    let on_change = Callback::new(move |(key, value): (ProfileField, String)| {
        editor.update(|e| e.set_field(key, value));
    });

    let on_edit = move |_| {
        let viewer = viewer_id();
        editor.update(|e| {
            e.begin_edit(viewer.as_deref());
        });
    };
    let on_cancel = move |_| editor.update(ProfileEditor::cancel);

    let save_client = client.clone();
    let on_save = Callback::new(move |()| {
        if editor.with_untracked(|e| e.saving) {
            return;
        }
        let mut step = SaveStep::NoChanges;
        editor.update(|e| step = e.begin_save(today()));
        let SaveStep::Submit(pending) = step else {
            return;
        };
        let client = save_client.clone();
        let id = user_id.get_untracked();
        spawn(async move {
            let result = api::update_profile(&client, &id, &pending.updates).await;
            if user_id.get_untracked() != id {
                log::debug!("dropping save result for {id}: route changed");
                return;
            }
            editor.update(|e| e.finish_save(pending, result));
        });
    });

    let on_feedback_created = Callback::new(move |item: FeedbackListItem| feedback.update(|f| f.prepend(item)));
    let close_feedback_modal = Callback::new(move |()| show_feedback_modal.set(false));

    let can_edit = move || editor.with(|e| e.can_edit(viewer_id().as_deref()));
    let edit_mode = move || editor.with(|e| e.edit_mode);
    let header_name = move || editor.with(|e| e.display_profile().map(|p| p.display_name()).unwrap_or_default());
    let header_subtitle = move || {
        editor.with(|e| e.display_profile().map(|p| profile::header_subtitle(&p)).unwrap_or_default())
    };
    let photo_url = move || editor.with(|e| e.current_value(ProfileField::ProfilePhotoUrl));

    let body = move || {
        if loading.get() {
            return view! { <p class="page-loading">"Loading profile..."</p> }.into_any();
        }
        if let Some(message) = load_error.get() {
            return view! { <div class="banner banner--error">{message}</div> }.into_any();
        }
        ().into_any()
    };

    view! {
        <div class="profile-page">
            <button class="btn btn--link" on:click=move |_| go_back()>
                "← Back"
            </button>
            {body}
            <Show when=move || !loading.get() && load_error.get().is_none()>
                <header class="profile-header">
                    {move || {
                        photo_url()
                            .map(|src| view! { <img class="profile-header__photo" src=src alt="Profile photo"/> })
                    }}
                    <div class="profile-header__text">
                        <h1>{header_name}</h1>
                        <p class="profile-header__subtitle">{header_subtitle}</p>
                    </div>
                    <div class="profile-header__actions">
                        <Show when=move || can_edit() && !edit_mode()>
                            <button class="btn btn--primary" on:click=on_edit>"Edit Profile"</button>
                        </Show>
                        <Show when=edit_mode>
                            <button class="btn" on:click=on_cancel>"Cancel"</button>
                            <button
                                class="btn btn--primary"
                                disabled=move || editor.with(|e| e.saving)
                                on:click=move |_| on_save.run(())
                            >
                                {move || if editor.with(|e| e.saving) { "Saving..." } else { "Save Changes" }}
                            </button>
                        </Show>
                        <Show when=move || !is_own() && viewer_id().is_some()>
                            <button class="btn" on:click=move |_| show_feedback_modal.set(true)>
                                "Give Feedback"
                            </button>
                        </Show>
                    </div>
                </header>

                <Show when=move || editor.with(|e| e.error.is_some())>
                    <div class="banner banner--error">
                        {move || editor.with(|e| e.error.clone().unwrap_or_default())}
                    </div>
                </Show>

                {SECTIONS
                    .into_iter()
                    .map(|section| view! { <ProfileSection section=section editor=editor on_change=on_change/> })
                    .collect::<Vec<_>>()}

                <Show when=is_own>
                    <TimeOffCard/>
                </Show>

                <FeedbackList panel=feedback title="Feedback" on_retry=retry_feedback/>
            </Show>

            <Show when=move || show_feedback_modal.get()>
                <FeedbackModal
                    recipient_id=user_id.get_untracked()
                    recipient_name=header_name()
                    on_close=close_feedback_modal
                    on_created=on_feedback_created
                />
            </Show>
        </div>
    }
}

/// Absence request card shown on the viewer's own profile.
#[component]
fn TimeOffCard() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let client = expect_context::<ApiClient>();
    let form = RwSignal::new(AbsenceForm::default());
    let submitting = RwSignal::new(false);
    let message = RwSignal::new(None::<Result<String, String>>);
    let mine = RwSignal::new(Vec::<AbsenceRequest>::new());

    let on_submit = Callback::new(move |()| {
        let request = form.with_untracked(AbsenceForm::to_request);
        let include_pending = auth_state.with_untracked(AuthState::is_manager);
        submitting.set(true);
        message.set(None);
        let client = client.clone();
        spawn(async move {
            match absence::submit_and_reload(&client, &request, include_pending).await {
                Ok(reloaded) => {
                    form.update(AbsenceForm::reset_after_submit);
                    message.set(Some(Ok("Time-off request submitted.".to_owned())));
                    match reloaded.mine {
                        Ok(items) => mine.set(items),
                        Err(err) => log::warn!("absence reload failed: {err}"),
                    }
                }
                Err(err) => {
                    log::warn!("absence submit failed: {err}");
                    message.set(Some(Err(err.user_message(SUBMIT_FAILED))));
                }
            }
            submitting.set(false);
        });
    });

    view! {
        <section class="time-off-card">
            <AbsenceFormCard
                form=form
                submitting=submitting
                on_submit=on_submit
                max_days=PROFILE_MAX_DAYS
                title="Request time off"
            />
            {move || {
                message
                    .get()
                    .map(|m| match m {
                        Ok(text) => view! { <p class="banner banner--success">{text}</p> }.into_any(),
                        Err(text) => view! { <p class="banner banner--error">{text}</p> }.into_any(),
                    })
            }}
            <Show when=move || !mine.with(Vec::is_empty)>
                <ul class="time-off-card__recent">
                    {move || {
                        mine.get()
                            .into_iter()
                            .take(3)
                            .map(|r| {
                                view! {
                                    <li>
                                        {format!("{} to {}", format_date(&r.start_date), format_date(&r.end_date))}
                                        " "
                                        <span class=absence::status_class(r.status)>{r.status.as_str()}</span>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>
        </section>
    }
}
