//! BDD step definitions for the page kit

pub mod poller_steps;
