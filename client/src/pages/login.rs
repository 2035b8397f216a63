//! Login page with email + password auth.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::http::ApiClient;
use crate::state::auth::{self, AuthState, DEMO_USERS};
use crate::util::task::spawn;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let client = expect_context::<ApiClient>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Already signed in: go home.
    let navigate_home = navigate.clone();
    Effect::new(move || {
        if auth_state.get().is_authenticated() {
            navigate_home("/", NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match auth::validate_login_input(&email.get(), &password.get()) {
            Ok(pair) => pair,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(String::new());

        let client = client.clone();
        let navigate = navigate.clone();
        spawn(async move {
            match auth::login(&client, &email_value, &password_value).await {
                Ok(next) => {
                    auth_state.set(next);
                    navigate("/", NavigateOptions::default());
                }
                Err(e) => {
                    log::debug!("login failed: {e}");
                    info.set(auth::login_error_message(&e));
                    busy.set(false);
                }
            }
        });
    };

    let demo_accounts = DEMO_USERS
        .into_iter()
        .map(|(label, address)| view! { <li><strong>{label}</strong>" "{address}</li> })
        .collect::<Vec<_>>();

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"PeopleDesk"</h1>
                <p class="login-card__subtitle">"Sign in to your account"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@company.com"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">"Demo accounts"</p>
                <ul class="login-demo">{demo_accounts}</ul>
            </div>
        </div>
    }
}
