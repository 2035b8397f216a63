//! Route guard for pages that need a signed-in session.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

/// Renders `children` once a session is present. Shows a loading line while
/// session storage is being read and sends everyone else to `/login`.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    install_unauth_redirect(auth, use_navigate());

    move || {
        let state = auth.get();
        if state.loading {
            view! { <div class="page-loading">"Loading..."</div> }.into_any()
        } else if state.is_authenticated() {
            children().into_any()
        } else {
            ().into_any()
        }
    }
}
