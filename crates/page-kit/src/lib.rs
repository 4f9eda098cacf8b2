//! Page kit - alerts and reload polling for the admin pages
//!
//! Two independent browser utilities:
//!
//! - [`notifier::AlertNotifier`] stacks dismissible success/warning/error
//!   alerts in a container pinned to the bottom of the viewport.
//! - [`poller::PollSession`] replaces the page with a status view and polls
//!   the server until it is back up (reload) or gone (quit).
//!
//! With the `csr` feature the crate builds to WebAssembly and exports
//! `push_alert`, `reloader` and `quitter` to the host page.

pub mod alert;
pub mod components;
pub mod config;
pub mod error;
pub mod io;
pub mod notifier;
pub mod page;
pub mod poller;
pub mod timer;

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub mod web;

pub use alert::{AlertId, AlertKind};
pub use config::{parse_config, AlertConfig, Config, PollerConfig};
pub use error::{PageKitError, Result};
pub use notifier::AlertNotifier;
pub use poller::{quitter, reloader, PollMode, PollOutcome, PollSession};
