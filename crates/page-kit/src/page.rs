//! The host page as seen by the reload poller

use leptos::prelude::*;

use crate::poller::PollStatus;
#[cfg(all(feature = "csr", target_arch = "wasm32"))]
use crate::PageKitError;

/// Page-level side effects of a poll session
#[cfg_attr(test, mockall::automock)]
pub trait Page {
    /// Replace the whole page body with a status view bound to `status`.
    /// There is no way back to the previous content.
    fn show_status(&self, status: RwSignal<PollStatus>) -> crate::Result<()>;

    /// Full browser navigation to `url`
    fn navigate(&self, url: &str) -> crate::Result<()>;

    /// URL of the page currently displayed
    fn current_url(&self) -> crate::Result<String>;
}

/// The real browser window and document
#[cfg(all(feature = "csr", target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct BrowserPage;

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
impl Page for BrowserPage {
    fn show_status(&self, status: RwSignal<PollStatus>) -> crate::Result<()> {
        use crate::components::status_view::StatusView;

        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .ok_or_else(|| PageKitError::Page("document has no body".to_string()))?;

        body.set_inner_html("");
        leptos::mount::mount_to(body, move || view! { <StatusView status=status /> }).forget();
        Ok(())
    }

    fn navigate(&self, url: &str) -> crate::Result<()> {
        let location = window()?.location();
        location
            .assign(url)
            .map_err(|e| PageKitError::Page(format!("navigation to {} failed: {:?}", url, e)))
    }

    fn current_url(&self) -> crate::Result<String> {
        let href = window()?.location().href();
        href.map_err(|e| PageKitError::Page(format!("{:?}", e)))
    }
}

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
fn window() -> crate::Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| PageKitError::Page("no window".to_string()))
}
