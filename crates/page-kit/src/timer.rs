//! Event-loop timers: tokio natively, browser timeouts in wasm

use std::future::Future;
use std::time::Duration;

/// Suspend for `duration` without blocking the event loop
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Suspend for `duration` without blocking the event loop
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

/// Run `future` for at most `duration`. Returns `None` on timeout.
pub async fn timeout<F: Future>(duration: Duration, future: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        output = future => Some(output),
        _ = sleep(duration) => None,
    }
}
