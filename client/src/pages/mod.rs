//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod absence;
pub mod directory;
pub mod home;
pub mod login;
pub mod profile;
