//! Alert container component

use leptos::prelude::*;

use crate::alert::AlertTemplate;
use crate::notifier::AlertNotifier;

/// Renders the notifier's alerts in arrival order. Each alert carries a
/// dismiss button that removes only that alert.
#[component]
pub fn AlertContainer(notifier: AlertNotifier) -> impl IntoView {
    let stack = notifier.stack();

    view! {
        <For
            each=move || stack.with(|s| s.alerts().to_vec())
            key=|alert| alert.id
            children=move |alert| {
                let id = alert.id;
                let notifier = notifier.clone();
                view! {
                    <div class=alert.class>
                        <button
                            class=AlertTemplate::DISMISS_CLASS
                            on:click=move |_| {
                                notifier.dismiss(id);
                            }
                        ></button>
                        <span class=AlertTemplate::CONTENT_CLASS>{alert.text}</span>
                    </div>
                }
            }
        />
    }
}
