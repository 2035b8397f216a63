//! Demo-only dialog for swapping the signed-in user by email.

use leptos::prelude::*;

use crate::net::http::ApiClient;
use crate::state::auth::{self, AuthState, DEMO_USERS};
use crate::util::task::spawn;

#[component]
pub fn SwitchUserDialog(on_close: Callback<()>) -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let client = expect_context::<ApiClient>();
    let email = RwSignal::new(String::new());
    let error = RwSignal::new(None::<&'static str>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let target = match auth::validate_switch_email(&email.get_untracked()) {
            Ok(target) => target,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        busy.set(true);
        error.set(None);
        let client = client.clone();
        spawn(async move {
            match auth::switch_user(&client, &target).await {
                Ok(next) => {
                    auth_state.set(next);
                    busy.set(false);
                    on_close.run(());
                }
                Err(err) => {
                    log::warn!("switch user failed: {err}");
                    error.set(Some(auth::switch_user_error_message(&err)));
                    busy.set(false);
                }
            }
        });
    };

    let quick_picks = DEMO_USERS
        .into_iter()
        .map(|(label, address)| {
            view! {
                <button
                    type="button"
                    class="btn btn--chip"
                    on:click=move |_| {
                        email.set(address.to_owned());
                        error.set(None);
                    }
                >
                    {label}
                </button>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog--switch-user" on:click=move |ev| ev.stop_propagation()>
                <h2>"Switch User"</h2>
                <p class="dialog__hint">"Sign in as another demo account."</p>
                <div class="dialog__chips">{quick_picks}</div>
                <form on:submit=on_submit>
                    <input
                        class="dialog__input"
                        type="email"
                        placeholder="name@company.com"
                        prop:value=move || email.get()
                        on:input=move |ev| {
                            email.set(event_target_value(&ev));
                            error.set(None);
                        }
                    />
                    <Show when=move || error.get().is_some()>
                        <p class="banner banner--error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <div class="dialog__actions">
                        <button type="button" class="btn" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn--primary" disabled=move || busy.get()>
                            {move || if busy.get() { "Switching..." } else { "Switch" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
