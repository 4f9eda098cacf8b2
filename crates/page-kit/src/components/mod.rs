//! Leptos components rendered into the host page

pub mod alert_container;
pub mod status_view;
