//! Absence page: request time off, track requests, and (for managers)
//! approve or reject the team's pending requests.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every mutation is followed by a reload of both lists. The approval queue
//! and the requester-name lookup only load for managers.

use leptos::prelude::*;

use crate::components::absence_form::AbsenceFormCard;
use crate::net::http::ApiClient;
use crate::net::types::{AbsenceDecision, AbsenceRequest};
use crate::state::absence::{self, AbsenceForm, AbsenceLists, DECISION_FAILED, PersonLookup, SUBMIT_FAILED};
use crate::state::auth::AuthState;
use crate::util::format::format_date;
use crate::util::task::spawn;

/// Ask for an optional rejection note. Cancelling rejects without one.
fn prompt_note(message: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window().and_then(|w| w.prompt_with_message(message).ok().flatten())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        None
    }
}

#[component]
pub fn AbsencePage() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let client = expect_context::<ApiClient>();

    let lists = RwSignal::new(AbsenceLists::default());
    let lookup = RwSignal::new(PersonLookup::new());
    let loading = RwSignal::new(true);
    let form = RwSignal::new(AbsenceForm::default());
    let submitting = RwSignal::new(false);
    let banner = RwSignal::new(None::<Result<String, String>>);
    let deciding = RwSignal::new(None::<String>);

    let is_manager = move || auth_state.with(AuthState::is_manager);

    let load_client = client.clone();
    Effect::new(move || {
        let manager = is_manager();
        loading.set(true);
        let client = load_client.clone();
        spawn(async move {
            let reloaded = absence::reload_lists(&client, manager).await;
            lists.update(|l| l.apply(reloaded));
            loading.set(false);
            if manager {
                lookup.set(absence::load_person_lookup(&client).await);
            }
        });
    });

    let submit_client = client.clone();
    let on_submit = Callback::new(move |()| {
        let request = form.with_untracked(AbsenceForm::to_request);
        let manager = auth_state.with_untracked(AuthState::is_manager);
        submitting.set(true);
        banner.set(None);
        let client = submit_client.clone();
        spawn(async move {
            match absence::submit_and_reload(&client, &request, manager).await {
                Ok(reloaded) => {
                    form.update(AbsenceForm::reset_after_submit);
                    lists.update(|l| l.apply(reloaded));
                    banner.set(Some(Ok("Request submitted.".to_owned())));
                }
                Err(err) => {
                    log::warn!("absence submit failed: {err}");
                    banner.set(Some(Err(err.user_message(SUBMIT_FAILED))));
                }
            }
            submitting.set(false);
        });
    });

    let decide = Callback::new(move |(id, decision): (String, AbsenceDecision)| {
        if deciding.get_untracked().is_some() {
            return;
        }
        let note = match decision {
            AbsenceDecision::Approve => None,
            AbsenceDecision::Reject => prompt_note("Add a note for the rejection (optional)"),
        };
        deciding.set(Some(id.clone()));
        banner.set(None);
        let client = client.clone();
        spawn(async move {
            match absence::decide_and_reload(&client, &id, decision, note).await {
                Ok(reloaded) => lists.update(|l| l.apply(reloaded)),
                Err(err) => {
                    log::warn!("absence decision failed: {err}");
                    banner.set(Some(Err(err.user_message(DECISION_FAILED))));
                }
            }
            deciding.set(None);
        });
    });

    let my_rows = move || {
        lists.with(|l| l.mine.clone()).into_iter().map(|r| view! { <RequestRow request=r/> }).collect::<Vec<_>>()
    };
    let pending_rows = move || {
        let names = lookup.get();
        lists
            .with(|l| l.pending.clone())
            .into_iter()
            .map(|r| {
                let requester = absence::requester_label(&names, &r.user_id);
                let id = r.id.clone();
                let busy = {
                    let id = id.clone();
                    move || deciding.get().is_some_and(|d| d == id)
                };
                view! {
                    <PendingRow request=r requester=requester>
                        <button
                            class="btn btn--primary"
                            disabled=busy.clone()
                            on:click={
                                let id = id.clone();
                                move |_| decide.run((id.clone(), AbsenceDecision::Approve))
                            }
                        >
                            "Approve"
                        </button>
                        <button
                            class="btn btn--danger"
                            disabled=busy.clone()
                            on:click={
                                let id = id.clone();
                                move |_| decide.run((id.clone(), AbsenceDecision::Reject))
                            }
                        >
                            "Reject"
                        </button>
                    </PendingRow>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="absence-page">
            <header class="absence-page__header">
                <a class="btn btn--link" href="/">"← Home"</a>
                <h1>"Time Off"</h1>
            </header>

            {move || {
                banner
                    .get()
                    .map(|b| match b {
                        Ok(text) => view! { <p class="banner banner--success">{text}</p> }.into_any(),
                        Err(text) => view! { <p class="banner banner--error">{text}</p> }.into_any(),
                    })
            }}

            <AbsenceFormCard form=form submitting=submitting on_submit=on_submit/>

            <section class="absence-list">
                <h2>"My Requests"</h2>
                <Show when=move || lists.with(|l| l.mine_error.is_some())>
                    <p class="banner banner--error">{move || lists.with(|l| l.mine_error.clone().unwrap_or_default())}</p>
                </Show>
                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <p class="page-loading">"Loading requests..."</p> }
                >
                    <Show
                        when=move || !lists.with(|l| l.mine.is_empty())
                        fallback=|| view! { <p class="absence-list__empty">"No absence requests yet."</p> }
                    >
                        <ul class="absence-list__items">{my_rows}</ul>
                    </Show>
                </Show>
            </section>

            <Show when=is_manager>
                <section class="absence-list absence-list--pending">
                    <h2>"Pending Approvals"</h2>
                    <Show when=move || lists.with(|l| l.pending_error.is_some())>
                        <p class="banner banner--error">
                            {move || lists.with(|l| l.pending_error.clone().unwrap_or_default())}
                        </p>
                    </Show>
                    <Show
                        when=move || !lists.with(|l| l.pending.is_empty())
                        fallback=|| view! { <p class="absence-list__empty">"No pending requests."</p> }
                    >
                        <ul class="absence-list__items">{pending_rows}</ul>
                    </Show>
                </section>
            </Show>
        </div>
    }
}

fn date_range(request: &AbsenceRequest) -> String {
    format!("{} to {}", format_date(&request.start_date), format_date(&request.end_date))
}

#[component]
fn RequestRow(request: AbsenceRequest) -> impl IntoView {
    view! {
        <li class="absence-row">
            <span class="absence-row__dates">{date_range(&request)}</span>
            <span class="absence-row__type">{request.kind.label()}</span>
            <span class=absence::status_class(request.status)>{request.status.as_str()}</span>
            {request.note.map(|n| view! { <p class="absence-row__note">{n}</p> })}
        </li>
    }
}

#[component]
fn PendingRow(request: AbsenceRequest, requester: String, children: Children) -> impl IntoView {
    view! {
        <li class="absence-row absence-row--pending">
            <span class="absence-row__requester">{requester}</span>
            <span class="absence-row__dates">{date_range(&request)}</span>
            <span class="absence-row__type">{request.kind.label()}</span>
            {request.note.map(|n| view! { <p class="absence-row__note">{n}</p> })}
            <div class="absence-row__actions">{children()}</div>
        </li>
    }
}
