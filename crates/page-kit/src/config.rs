//! Configuration types for the alert notifier and the reload poller

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub poller: PollerConfig,
}

/// Where the alert container lives and how it is pinned to the viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default = "default_container_id")]
    pub container_id: String,
    #[serde(default = "default_bottom")]
    pub bottom: String,
    #[serde(default = "default_z_index")]
    pub z_index: i32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            bottom: default_bottom(),
            z_index: default_z_index(),
        }
    }
}

impl AlertConfig {
    /// CSS properties that pin the container to the bottom of the viewport.
    /// Other inline styles on the container are left alone.
    pub fn container_style(&self) -> [(&'static str, String); 3] {
        [
            ("position", "fixed".to_string()),
            ("bottom", self.bottom.clone()),
            ("z-index", self.z_index.to_string()),
        ]
    }
}

/// Timing of a reachability poll session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Grace delay before the first probe tick
    #[serde(default = "default_initial_delay", with = "humantime_serde")]
    pub initial_delay: Duration,
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
    /// A probe that takes longer than this counts as not yet satisfied
    #[serde(default = "default_probe_timeout", with = "humantime_serde")]
    pub probe_timeout: Duration,
    /// `None` polls until the condition is met. Zero is rejected.
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            initial_delay: default_initial_delay(),
            interval: default_interval(),
            probe_timeout: default_probe_timeout(),
            max_attempts: None,
        }
    }
}

fn default_container_id() -> String {
    "alert_container".to_string()
}

fn default_bottom() -> String {
    "1em".to_string()
}

fn default_z_index() -> i32 {
    9999
}

fn default_initial_delay() -> Duration {
    Duration::from_millis(3000)
}

fn default_interval() -> Duration {
    Duration::from_millis(2000)
}

fn default_probe_timeout() -> Duration {
    Duration::from_secs(10)
}

impl PollerConfig {
    /// Reject timings under which a session can never finish
    pub fn validate(&self) -> crate::Result<()> {
        if self.interval.is_zero() {
            return Err(crate::PageKitError::Config(
                "poller interval must be greater than zero".to_string(),
            ));
        }
        if self.probe_timeout.is_zero() {
            return Err(crate::PageKitError::Config(
                "poller probe_timeout must be greater than zero".to_string(),
            ));
        }
        if self.max_attempts == Some(0) {
            return Err(crate::PageKitError::Config(
                "poller max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse configuration from a JSON document
pub fn parse_config(json: &str) -> crate::Result<Config> {
    let config: Config = serde_json::from_str(json)?;
    config.poller.validate()?;
    if config.alerts.container_id.is_empty() {
        return Err(crate::PageKitError::Config(
            "alert container id must not be empty".to_string(),
        ));
    }
    Ok(config)
}
