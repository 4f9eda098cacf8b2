//! WebAssembly entry points called by the host page
//!
//! The page loads the module, which mounts the alert container once the
//! document is parsed. Page scripts then call the exported functions:
//!
//! ```javascript
//! push_alert("user added", "success");
//! reloader("/admin");   // after asking the server to restart
//! quitter();            // after asking the server to shut down
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::components::alert_container::AlertContainer;
use crate::config::{parse_config, AlertConfig, Config};
use crate::io::GlooHttpClient;
use crate::notifier::AlertNotifier;
use crate::page::BrowserPage;
use crate::poller::PollSession;
use crate::PageKitError;

/// Id of the optional `<script type="application/json">` element holding
/// the page's configuration
pub const CONFIG_ELEMENT_ID: &str = "page-kit-config";

thread_local! {
    static CONFIG: RefCell<Config> = RefCell::new(Config::default());
    static NOTIFIER: RefCell<Option<AlertNotifier>> = const { RefCell::new(None) };
}

/// Module start: logging, panic reporting, configuration and the alert
/// container
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let config = read_page_config();
    CONFIG.with(|c| *c.borrow_mut() = config);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        tracing::error!("No document, alerts are disabled");
        return;
    };

    if document.ready_state() == "loading" {
        let on_loaded = Closure::once_into_js(init_alerts);
        let listening = document
            .add_event_listener_with_callback("DOMContentLoaded", on_loaded.unchecked_ref());
        if let Err(e) = listening {
            tracing::error!("Failed to wait for DOMContentLoaded: {:?}", e);
        }
    } else {
        init_alerts();
    }
}

/// Show an alert of kind `"success"`, `"warning"` or `"error"`
#[wasm_bindgen]
pub fn push_alert(content: &str, kind: &str) {
    NOTIFIER.with(|notifier| match notifier.borrow().as_ref() {
        Some(notifier) => notifier.push_alert(content, kind),
        None => tracing::error!("{}", PageKitError::Uninitialized),
    });
}

/// Replace the page with a restart notice and go to `url` once it answers
#[wasm_bindgen]
pub fn reloader(url: String) {
    let config = CONFIG.with(|c| c.borrow().poller.clone());
    let http = Rc::new(GlooHttpClient);
    let page = Rc::new(BrowserPage);
    spawn_session(PollSession::reload(url, &config, http, page));
}

/// Replace the page with a shutdown notice and wait for the server to go away
#[wasm_bindgen]
pub fn quitter() {
    let config = CONFIG.with(|c| c.borrow().poller.clone());
    let http = Rc::new(GlooHttpClient);
    let page = Rc::new(BrowserPage);
    match PollSession::quit(&config, http, page) {
        Ok(session) => spawn_session(session),
        Err(e) => tracing::error!("Cannot start shutdown poll: {}", e),
    }
}

fn spawn_session(mut session: PollSession) {
    wasm_bindgen_futures::spawn_local(async move {
        let target = session.target().to_string();
        match session.run().await {
            Ok(outcome) => tracing::debug!("Poll session for {} ended: {:?}", target, outcome),
            Err(e) => tracing::error!("Poll session for {} failed: {}", target, e),
        }
    });
}

fn init_alerts() {
    let config = CONFIG.with(|c| c.borrow().alerts.clone());
    match mount_alerts(&config) {
        Ok(notifier) => NOTIFIER.with(|n| *n.borrow_mut() = Some(notifier)),
        Err(e) => tracing::error!("{}", e),
    }
}

/// Pin the container element to the viewport and render alerts into it.
/// Inline styles other than the pinning properties are kept.
pub fn mount_alerts(config: &AlertConfig) -> crate::Result<AlertNotifier> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| PageKitError::Page("no document".to_string()))?;

    let container = document
        .get_element_by_id(&config.container_id)
        .ok_or_else(|| PageKitError::ContainerNotFound(config.container_id.clone()))?;
    let container: web_sys::HtmlElement = container.dyn_into().map_err(|_| {
        PageKitError::Page(format!("'#{}' is not an HTML element", config.container_id))
    })?;

    let style = container.style();
    for (property, value) in config.container_style() {
        style
            .set_property(property, &value)
            .map_err(|e| PageKitError::Page(format!("{:?}", e)))?;
    }

    let notifier = AlertNotifier::new(config);
    let mounted = notifier.clone();
    leptos::mount::mount_to(container, move || {
        view! { <AlertContainer notifier=mounted /> }
    })
    .forget();

    tracing::debug!("Alert container '#{}' mounted", config.container_id);
    Ok(notifier)
}

fn read_page_config() -> Config {
    let text = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|e| e.text_content());

    match text {
        Some(text) => parse_config(&text).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid page configuration: {}", e);
            Config::default()
        }),
        None => Config::default(),
    }
}
