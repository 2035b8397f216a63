//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::protected_route::ProtectedRoute;
use crate::config::ClientConfig;
use crate::net::http::ApiClient;
use crate::net::transport::BrowserTransport;
use crate::pages::{
    absence::AbsencePage, directory::DirectoryPage, home::HomePage, login::LoginPage, profile::ProfilePage,
};
use crate::state::auth::AuthState;
use crate::util::auth::{redirect_to_login, reload_page};
use crate::util::storage::BrowserSessionStore;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session, API client and config contexts, restores the
/// session from storage once in the browser, and sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let auth = RwSignal::new(AuthState::pending());

    let client = ApiClient::new(config.api_base_url.clone(), Arc::new(BrowserTransport), Arc::new(BrowserSessionStore))
        .with_unauthorized_handler(move || {
            auth.set(AuthState::default());
            redirect_to_login();
        });

    // Effects only run after hydration, so the server always renders the
    // loading state for protected routes.
    let restore_client = client.clone();
    Effect::new(move || {
        auth.set(AuthState::restore(restore_client.session()));
    });

    provide_context(auth);
    provide_context(client);
    provide_context(config);

    view! {
        <Stylesheet id="leptos" href="/pkg/peopledesk.css"/>
        <Title text="PeopleDesk"/>

        <ErrorBoundary fallback=|_errors| {
            view! {
                <div class="error-page">
                    <h1>"Something went wrong"</h1>
                    <button class="btn btn--primary" on:click=move |_| reload_page()>
                        "Refresh"
                    </button>
                </div>
            }
        }>
            <Router>
                <Routes fallback=|| view! { <Redirect path="/"/> }>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route
                        path=StaticSegment("")
                        view=|| view! { <ProtectedRoute><HomePage/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("people")
                        view=|| view! { <ProtectedRoute><DirectoryPage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("profile"), ParamSegment("user_id"))
                        view=|| view! { <ProtectedRoute><ProfilePage/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("absence")
                        view=|| view! { <ProtectedRoute><AbsencePage/></ProtectedRoute> }
                    />
                </Routes>
            </Router>
        </ErrorBoundary>
    }
}
