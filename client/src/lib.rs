//! # client
//!
//! Leptos + WASM frontend for the PeopleDesk employee directory.
//!
//! This crate contains pages, components, session/profile/absence/feedback
//! state, the REST + GraphQL network layer, and browser utilities. The
//! `hydrate` feature builds the browser bundle; `ssr` is enabled by the host
//! package for server rendering.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs console logging and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::debug!("hydrating peopledesk client");
    leptos::mount::hydrate_body(app::App);
}
