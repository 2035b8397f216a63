//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render profile, feedback and absence surfaces while reading
//! the session and API client from Leptos context providers.

pub mod absence_form;
pub mod feedback_list;
pub mod feedback_modal;
pub mod profile_field;
pub mod profile_section;
pub mod protected_route;
pub mod switch_user_dialog;
