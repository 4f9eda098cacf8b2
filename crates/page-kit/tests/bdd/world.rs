//! BDD test world for the page kit

use std::time::Duration;

use cucumber::World;
use page_kit::alert::AlertId;
use page_kit::poller::PollStatus;
use page_kit::{AlertNotifier, PollOutcome};

use crate::steps::poller_steps::ScriptedProbe;

#[derive(Debug, Default, World)]
pub struct PageKitWorld {
    // Alert testing
    pub notifier: Option<AlertNotifier>,
    pub alert_ids: Vec<AlertId>,
    pub logged_errors: usize,

    // Poller testing
    pub script: Vec<ScriptedProbe>,
    pub current_url: Option<String>,
    pub max_attempts: Option<u32>,
    pub probes: u32,
    pub announcements: u32,
    pub navigations: Vec<(String, Duration)>,
    pub status: Option<PollStatus>,
    pub outcome: Option<page_kit::Result<PollOutcome>>,
}
