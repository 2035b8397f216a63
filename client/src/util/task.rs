//! Browser-only async task spawning.
//!
//! Event handlers only fire after hydration, so server renders never reach
//! a spawn. The ssr build still type-checks the same call sites.

use std::future::Future;

pub fn spawn<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(fut);
    #[cfg(not(feature = "hydrate"))]
    drop(fut);
}
