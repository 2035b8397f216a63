//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `profile`, `absence`, `feedback`,
//! `directory`) so each page depends on a small focused model. Models are
//! plain structs held in signals; async workflows are free functions over
//! `ApiClient`.

pub mod absence;
pub mod auth;
pub mod directory;
pub mod feedback;
pub mod profile;
