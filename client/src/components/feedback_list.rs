//! Feedback entries with loading, empty, error and forbidden states.

use leptos::prelude::*;

use crate::net::types::FeedbackListItem;
use crate::state::feedback::FeedbackPanel;
use crate::util::format::format_timestamp;

#[component]
fn FeedbackEntry(item: FeedbackListItem, show_recipient: bool) -> impl IntoView {
    let who = if show_recipient {
        format!("To {}", item.recipient.display_name())
    } else {
        item.author.display_name()
    };
    let when = format_timestamp(&item.created_at);
    let polished = item.ai_polished;
    view! {
        <li class="feedback-item">
            <div class="feedback-item__meta">
                <span class="feedback-item__author">{who}</span>
                <span class="feedback-item__date">{when}</span>
                <Show when=move || polished>
                    <span class="badge badge--ai">"AI polished"</span>
                </Show>
            </div>
            <p class="feedback-item__text">{item.text}</p>
        </li>
    }
}

/// Renders a feedback panel. `Forbidden` renders nothing at all.
#[component]
pub fn FeedbackList(
    panel: RwSignal<FeedbackPanel>,
    #[prop(into)] title: String,
    #[prop(default = "No feedback yet.")] empty_text: &'static str,
    #[prop(optional)] show_recipient: bool,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    let body = move || match panel.get() {
        FeedbackPanel::Loading => view! { <p class="feedback-list__status">"Loading feedback..."</p> }.into_any(),
        FeedbackPanel::Failed(message) => view! {
            <div class="banner banner--error">
                <span>{message}</span>
                {on_retry.map(|retry| {
                    view! { <button class="btn" on:click=move |_| retry.run(())>"Retry"</button> }
                })}
            </div>
        }
        .into_any(),
        FeedbackPanel::Loaded(items) if items.is_empty() => {
            view! { <p class="feedback-list__status">{empty_text}</p> }.into_any()
        }
        FeedbackPanel::Loaded(items) => {
            let entries = items
                .into_iter()
                .map(|item| view! { <FeedbackEntry item=item show_recipient=show_recipient/> })
                .collect::<Vec<_>>();
            view! { <ul class="feedback-list__items">{entries}</ul> }.into_any()
        }
        FeedbackPanel::Forbidden => ().into_any(),
    };

    view! {
        <Show when=move || !matches!(panel.get(), FeedbackPanel::Forbidden)>
            <section class="feedback-list">
                <h2 class="feedback-list__title">{title.clone()}</h2>
                {body}
            </section>
        </Show>
    }
}
