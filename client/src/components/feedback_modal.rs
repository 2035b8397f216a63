//! Modal for writing feedback, with an optional AI polish pass.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opened from profile pages and directory cards. Submitting posts to the
//! feedback endpoint and hands the created item back to the opener so it can
//! be prepended to whatever list is on screen.

use leptos::prelude::*;

use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::FeedbackListItem;
use crate::state::feedback::FeedbackDraft;
use crate::util::task::spawn;

#[component]
pub fn FeedbackModal(
    #[prop(into)] recipient_id: String,
    #[prop(into)] recipient_name: String,
    on_close: Callback<()>,
    on_created: Callback<FeedbackListItem>,
) -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let draft = RwSignal::new(FeedbackDraft::default());

    let polish_client = client.clone();
    let on_polish = move |_| {
        let mut text = None;
        draft.update(|d| text = d.begin_polish());
        let Some(text) = text else {
            return;
        };
        let client = polish_client.clone();
        spawn(async move {
            let result = api::polish_feedback(&client, &text).await;
            draft.update(|d| d.finish_polish(result));
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut body = None;
        draft.update(|d| body = d.begin_submit(&recipient_id));
        let Some(body) = body else {
            return;
        };
        let client = client.clone();
        spawn(async move {
            let result = api::create_feedback(&client, &body).await;
            let mut created = None;
            draft.update(|d| created = d.finish_submit(result));
            if let Some(item) = created {
                on_created.run(item);
                on_close.run(());
            }
        });
    };

    let busy = move || draft.with(|d| d.submitting || d.polishing);

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog--feedback" on:click=move |ev| ev.stop_propagation()>
                <h2>{format!("Feedback for {recipient_name}")}</h2>
                <form class="feedback-form" on:submit=on_submit>
                    <textarea
                        class="feedback-form__text"
                        rows="6"
                        placeholder="Share specific, constructive feedback..."
                        prop:value=move || draft.with(|d| d.text.clone())
                        on:input=move |ev| draft.update(|d| d.set_text(event_target_value(&ev)))
                    ></textarea>
                    <div class="feedback-form__hint" class=("feedback-form__hint--ok", move || draft.with(FeedbackDraft::long_enough))>
                        {move || draft.with(FeedbackDraft::hint)}
                        <Show when=move || draft.with(|d| d.used_polish)>
                            <span class="badge badge--ai">"AI polished"</span>
                        </Show>
                    </div>

                    {move || {
                        draft
                            .with(|d| d.suggestion.clone())
                            .map(|s| {
                                view! {
                                    <div class="polish-compare">
                                        <div class="polish-compare__column">
                                            <h3>"Original"</h3>
                                            <p>{s.original_text}</p>
                                        </div>
                                        <div class="polish-compare__column polish-compare__column--suggested">
                                            <h3>"Suggested"</h3>
                                            <p>{s.polished_text}</p>
                                        </div>
                                        <div class="polish-compare__actions">
                                            <button
                                                type="button"
                                                class="btn btn--primary"
                                                on:click=move |_| draft.update(FeedbackDraft::apply_polished)
                                            >
                                                "Use polished version"
                                            </button>
                                            <button
                                                type="button"
                                                class="btn"
                                                on:click=move |_| draft.update(FeedbackDraft::keep_original)
                                            >
                                                "Keep editing original"
                                            </button>
                                        </div>
                                    </div>
                                }
                            })
                    }}

                    <Show when=move || draft.with(|d| d.error.is_some())>
                        <p class="banner banner--error">{move || draft.with(|d| d.error.clone().unwrap_or_default())}</p>
                    </Show>

                    <div class="dialog__actions">
                        <button type="button" class="btn" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                        <button
                            type="button"
                            class="btn"
                            disabled=move || busy() || !draft.with(FeedbackDraft::long_enough)
                            on:click=on_polish
                        >
                            {move || if draft.with(|d| d.polishing) { "Polishing..." } else { "Polish with AI" }}
                        </button>
                        <button
                            type="submit"
                            class="btn btn--primary"
                            disabled=move || busy() || !draft.with(FeedbackDraft::can_submit)
                        >
                            {move || if draft.with(|d| d.submitting) { "Submitting..." } else { "Submit Feedback" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
