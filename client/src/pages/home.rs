//! Home page: session summary, navigation, and the user's feedback.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Feedback panels and the header
//! name reload whenever the signed-in user changes, which is how the demo
//! switch-user flow refreshes the page without a navigation.

use futures::future::join3;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::feedback_list::FeedbackList;
use crate::components::switch_user_dialog::SwitchUserDialog;
use crate::config::ClientConfig;
use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::Role;
use crate::state::auth::{self, AuthState};
use crate::state::feedback::{FeedbackPanel, load_authored, load_received};
use crate::util::task::spawn;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let client = expect_context::<ApiClient>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();
    let switch_enabled = config.switch_user_enabled;

    let display_name = RwSignal::new(None::<String>);
    let received = RwSignal::new(FeedbackPanel::Loading);
    let authored = RwSignal::new(FeedbackPanel::Loading);
    let show_switch = RwSignal::new(false);

    let load = {
        let client = client.clone();
        move |user_id: String| {
            received.set(FeedbackPanel::Loading);
            authored.set(FeedbackPanel::Loading);
            let client = client.clone();
            spawn(async move {
                let (r, a, profile) =
                    join3(load_received(&client), load_authored(&client), api::query_profile(&client, &user_id)).await;
                received.set(r);
                authored.set(a);
                match profile {
                    Ok(p) => display_name.set(Some(p.display_name()).filter(|n| !n.is_empty())),
                    Err(e) => log::debug!("home profile lookup failed: {e}"),
                }
            });
        }
    };

    Effect::new(move || {
        if let Some(user_id) = auth_state.with(|a| a.user_id().map(str::to_owned)) {
            display_name.set(None);
            load(user_id);
        }
    });

    let retry_received = {
        let client = client.clone();
        Callback::new(move |()| {
            received.set(FeedbackPanel::Loading);
            let client = client.clone();
            spawn(async move { received.set(load_received(&client).await) });
        })
    };
    let retry_authored = {
        let client = client.clone();
        Callback::new(move |()| {
            authored.set(FeedbackPanel::Loading);
            let client = client.clone();
            spawn(async move { authored.set(load_authored(&client).await) });
        })
    };

    let on_logout = {
        let client = client.clone();
        move |_| {
            auth_state.set(auth::logout(client.session()));
            navigate("/login", NavigateOptions::default());
        }
    };

    let user = move || auth_state.get().user;
    let profile_href = move || user().map(|u| format!("/profile/{}", u.user_id)).unwrap_or_default();
    let greeting = move || {
        display_name
            .get()
            .or_else(|| user().map(|u| u.email))
            .map(|name| format!("Welcome, {name}"))
            .unwrap_or_default()
    };
    let close_switch = Callback::new(move |()| show_switch.set(false));

    view! {
        <div class="home-page">
            <header class="home-page__header">
                <h1>{greeting}</h1>
                <div class="home-page__actions">
                    <Show when=move || switch_enabled>
                        <button class="btn" on:click=move |_| show_switch.set(true)>
                            "Switch User"
                        </button>
                    </Show>
                    <button class="btn" on:click=on_logout>
                        "Logout"
                    </button>
                </div>
            </header>

            <section class="session-card">
                <div class="session-card__row">
                    <span class="session-card__label">"Email"</span>
                    <span class="session-card__value">{move || user().map(|u| u.email).unwrap_or_default()}</span>
                    <span
                        class="badge"
                        class=("badge--manager", move || auth_state.with(AuthState::is_manager))
                    >
                        {move || user().map(|u| u.role.as_str()).unwrap_or(Role::Employee.as_str())}
                    </span>
                </div>
                <div class="session-card__row">
                    <span class="session-card__label">"User ID"</span>
                    <span class="session-card__value session-card__value--mono">
                        {move || user().map(|u| u.user_id).unwrap_or_default()}
                    </span>
                </div>
                <div class="session-card__row">
                    <span class="session-card__label">"Employee ID"</span>
                    <span class="session-card__value">{move || user().map(|u| u.employee_id).unwrap_or_default()}</span>
                </div>
                <Show when=move || user().is_some_and(|u| u.manager_id.is_some())>
                    <div class="session-card__row">
                        <span class="session-card__label">"Manager ID"</span>
                        <span class="session-card__value session-card__value--mono">
                            {move || user().and_then(|u| u.manager_id).unwrap_or_default()}
                        </span>
                    </div>
                </Show>
            </section>

            <nav class="home-page__links">
                <a class="btn btn--primary" href=profile_href>"My Profile"</a>
                <a class="btn" href="/people">"People Directory"</a>
                <a class="btn" href="/absence">"Time Off"</a>
            </nav>

            <div class="home-page__feedback">
                <FeedbackList
                    panel=received
                    title="Feedback Received"
                    empty_text="No feedback received yet."
                    on_retry=retry_received
                />
                <FeedbackList
                    panel=authored
                    title="Feedback Given"
                    empty_text="You haven't given any feedback yet."
                    show_recipient=true
                    on_retry=retry_authored
                />
            </div>

            <Show when=move || show_switch.get()>
                <SwitchUserDialog on_close=close_switch/>
            </Show>
        </div>
    }
}
