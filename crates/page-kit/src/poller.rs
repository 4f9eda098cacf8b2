//! Reload poller: wait for a server to come back up (reload) or go down
//! (quit), then redirect or report completion
//!
//! A session announces itself by replacing the page with a status view,
//! waits out a grace delay and then probes the target once per interval.
//! Probes never overlap: the next tick is scheduled only after the
//! previous probe has resolved or timed out.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use tokio_util::sync::CancellationToken;

use crate::config::PollerConfig;
use crate::io::HttpClient;
use crate::page::Page;
use crate::timer;

pub const RELOAD_WAITING_TEXT: &str = "Waiting for server restart...";
pub const RELOAD_GAVE_UP_TEXT: &str = "Gave up waiting for server restart";
pub const QUIT_WAITING_TEXT: &str = "Shutting down server...";
pub const QUIT_COMPLETE_TEXT: &str = "Server shutdown complete";
pub const QUIT_GAVE_UP_TEXT: &str = "Gave up waiting for server shutdown";

/// What the session is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollMode {
    /// Server comes back and answers 200
    Reload,
    /// Server stops answering at the transport level
    Quit,
}

impl PollMode {
    pub fn is_satisfied(self, outcome: &ProbeOutcome) -> bool {
        match self {
            PollMode::Reload => matches!(outcome, ProbeOutcome::Status(200)),
            PollMode::Quit => matches!(outcome, ProbeOutcome::TransportFailure(_)),
        }
    }

    fn waiting_text(self) -> &'static str {
        match self {
            PollMode::Reload => RELOAD_WAITING_TEXT,
            PollMode::Quit => QUIT_WAITING_TEXT,
        }
    }

    fn gave_up_text(self) -> &'static str {
        match self {
            PollMode::Reload => RELOAD_GAVE_UP_TEXT,
            PollMode::Quit => QUIT_GAVE_UP_TEXT,
        }
    }
}

impl fmt::Display for PollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollMode::Reload => write!(f, "reload"),
            PollMode::Quit => write!(f, "quit"),
        }
    }
}

/// Result of a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered with this status
    Status(u16),
    /// Connection refused, reset or otherwise failed below HTTP
    TransportFailure(String),
    /// No answer within the probe timeout
    TimedOut,
}

/// Model behind the status view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollStatus {
    pub text: String,
    /// `None` renders an indeterminate progress bar. A session that gave
    /// up shows 0.
    pub progress: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Announcing,
    Waiting,
    Probing { attempts: u32 },
    Satisfied { attempts: u32 },
    Exhausted { attempts: u32 },
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Satisfied { .. }
                | SessionState::Exhausted { .. }
                | SessionState::Cancelled
        )
    }

    fn attempts(&self) -> u32 {
        match self {
            SessionState::Probing { attempts }
            | SessionState::Satisfied { attempts }
            | SessionState::Exhausted { attempts } => *attempts,
            _ => 0,
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Satisfied { attempts: u32 },
    Exhausted { attempts: u32 },
    Cancelled,
}

/// One reachability poll against a target URL
pub struct PollSession {
    mode: PollMode,
    target: String,
    config: PollerConfig,
    http: Rc<dyn HttpClient>,
    page: Rc<dyn Page>,
    status: RwSignal<PollStatus>,
    state: SessionState,
    cancel: CancellationToken,
}

impl fmt::Debug for PollSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollSession")
            .field("mode", &self.mode)
            .field("target", &self.target)
            .field("state", &self.state)
            .finish()
    }
}

impl PollSession {
    pub fn new(
        mode: PollMode,
        target: impl Into<String>,
        config: &PollerConfig,
        http: Rc<dyn HttpClient>,
        page: Rc<dyn Page>,
    ) -> Self {
        Self {
            mode,
            target: target.into(),
            config: config.clone(),
            http,
            page,
            status: RwSignal::new(PollStatus::default()),
            state: SessionState::Announcing,
            cancel: CancellationToken::new(),
        }
    }

    /// Wait for `url` to answer 200, then navigate there
    pub fn reload(
        url: impl Into<String>,
        config: &PollerConfig,
        http: Rc<dyn HttpClient>,
        page: Rc<dyn Page>,
    ) -> Self {
        Self::new(PollMode::Reload, url, config, http, page)
    }

    /// Wait for the current page's server to stop answering
    pub fn quit(
        config: &PollerConfig,
        http: Rc<dyn HttpClient>,
        page: Rc<dyn Page>,
    ) -> crate::Result<Self> {
        let target = page.current_url()?;
        Ok(Self::new(PollMode::Quit, target, config, http, page))
    }

    /// Use an externally owned token to stop the session
    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn mode(&self) -> PollMode {
        self.mode
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn status(&self) -> RwSignal<PollStatus> {
        self.status
    }

    /// Drive the session to a terminal state.
    ///
    /// Calling `run` on a finished session returns its outcome without
    /// touching the page or probing again. An invalid [`PollerConfig`] is
    /// rejected before the page is replaced.
    pub async fn run(&mut self) -> crate::Result<PollOutcome> {
        if let Some(outcome) = self.outcome() {
            return Ok(outcome);
        }

        self.config.validate()?;
        self.announce()?;

        self.state = SessionState::Waiting;
        tracing::debug!(
            "Waiting {:?} before probing {} ({} mode)",
            self.config.initial_delay,
            self.target,
            self.mode
        );
        if !self.pause(self.config.initial_delay).await {
            return Ok(self.cancelled());
        }

        self.state = SessionState::Probing { attempts: 0 };
        loop {
            if !self.pause(self.config.interval).await {
                return Ok(self.cancelled());
            }

            let outcome = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Ok(self.cancelled()),
                outcome = self.probe() => outcome,
            };

            let attempts = self.state.attempts() + 1;
            self.state = SessionState::Probing { attempts };
            tracing::debug!("Probe {} of {}: {:?}", attempts, self.target, outcome);

            if self.mode.is_satisfied(&outcome) {
                return self.satisfy();
            }

            if let Some(max_attempts) = self.config.max_attempts {
                if attempts >= max_attempts {
                    return Ok(self.exhaust());
                }
            }
        }
    }

    fn announce(&mut self) -> crate::Result<()> {
        self.state = SessionState::Announcing;
        self.status.update(|status| {
            status.text = self.mode.waiting_text().to_string();
            status.progress = None;
        });
        self.page.show_status(self.status)
    }

    /// Sleep unless cancelled first. Returns false on cancellation.
    async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => false,
            _ = timer::sleep(duration) => true,
        }
    }

    async fn probe(&self) -> ProbeOutcome {
        match timer::timeout(self.config.probe_timeout, self.http.get(&self.target)).await {
            Some(Ok(response)) => ProbeOutcome::Status(response.status),
            Some(Err(e)) => ProbeOutcome::TransportFailure(e.to_string()),
            None => ProbeOutcome::TimedOut,
        }
    }

    /// Completion action. Only a probing session can be satisfied, so the
    /// action runs at most once.
    fn satisfy(&mut self) -> crate::Result<PollOutcome> {
        let SessionState::Probing { attempts } = self.state else {
            return Ok(self.outcome().unwrap_or(PollOutcome::Cancelled));
        };
        self.state = SessionState::Satisfied { attempts };

        match self.mode {
            PollMode::Reload => {
                tracing::info!(
                    "{} is reachable after {} probes, navigating",
                    self.target,
                    attempts
                );
                self.page.navigate(&self.target)?;
            }
            PollMode::Quit => {
                tracing::info!(
                    "{} is unreachable after {} probes, shutdown complete",
                    self.target,
                    attempts
                );
                self.status.update(|status| {
                    status.text = QUIT_COMPLETE_TEXT.to_string();
                    status.progress = Some(100);
                });
            }
        }

        Ok(PollOutcome::Satisfied { attempts })
    }

    fn exhaust(&mut self) -> PollOutcome {
        let attempts = self.state.attempts();
        self.state = SessionState::Exhausted { attempts };
        tracing::warn!(
            "Giving up on {} after {} probes ({} mode)",
            self.target,
            attempts,
            self.mode
        );
        self.status.update(|status| {
            status.text = self.mode.gave_up_text().to_string();
            status.progress = Some(0);
        });
        PollOutcome::Exhausted { attempts }
    }

    fn cancelled(&mut self) -> PollOutcome {
        tracing::debug!("Poll session for {} cancelled", self.target);
        self.state = SessionState::Cancelled;
        PollOutcome::Cancelled
    }

    fn outcome(&self) -> Option<PollOutcome> {
        match self.state {
            SessionState::Satisfied { attempts } => Some(PollOutcome::Satisfied { attempts }),
            SessionState::Exhausted { attempts } => Some(PollOutcome::Exhausted { attempts }),
            SessionState::Cancelled => Some(PollOutcome::Cancelled),
            _ => None,
        }
    }
}

/// Replace the page with a restart notice, wait for `url` to answer 200
/// and navigate there
pub async fn reloader(
    url: &str,
    config: &PollerConfig,
    http: Rc<dyn HttpClient>,
    page: Rc<dyn Page>,
) -> crate::Result<PollOutcome> {
    PollSession::reload(url, config, http, page).run().await
}

/// Replace the page with a shutdown notice and wait for the current page's
/// server to stop answering
pub async fn quitter(
    config: &PollerConfig,
    http: Rc<dyn HttpClient>,
    page: Rc<dyn Page>,
) -> crate::Result<PollOutcome> {
    PollSession::quit(config, http, page)?.run().await
}
