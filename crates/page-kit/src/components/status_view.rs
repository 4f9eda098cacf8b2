//! Status view shown while waiting for a restart or shutdown

use leptos::prelude::*;

use crate::poller::PollStatus;

/// Progress bar plus status text. Replaces the whole page body.
#[component]
pub fn StatusView(status: RwSignal<PollStatus>) -> impl IntoView {
    let text = move || status.with(|s| s.text.clone());
    let progress = move || status.with(|s| s.progress.map(|p| p.to_string()));

    view! {
        <div class="container py-5 px-5">
            <div class="column is-10 is-offset-1">
                <span id="text">{text}</span>
                <progress id="progbar" class="progress is-info" max="100" value=progress></progress>
            </div>
        </div>
    }
}
