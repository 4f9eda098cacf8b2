//! Alert kinds, templates and the ordered alert stack

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PageKitError;

/// Severity of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Success,
    Warning,
    Error,
}

impl AlertKind {
    pub const ALL: [AlertKind; 3] = [AlertKind::Success, AlertKind::Warning, AlertKind::Error];

    fn index(self) -> usize {
        match self {
            AlertKind::Success => 0,
            AlertKind::Warning => 1,
            AlertKind::Error => 2,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::Success => write!(f, "success"),
            AlertKind::Warning => write!(f, "warning"),
            AlertKind::Error => write!(f, "error"),
        }
    }
}

impl FromStr for AlertKind {
    type Err = PageKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(AlertKind::Success),
            "warning" => Ok(AlertKind::Warning),
            "error" => Ok(AlertKind::Error),
            other => Err(PageKitError::InvalidAlertKind(other.to_string())),
        }
    }
}

/// Detached markup for one alert kind: the notification box class,
/// a dismiss button and a message slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertTemplate {
    pub kind: AlertKind,
    pub class: &'static str,
}

impl AlertTemplate {
    pub const DISMISS_CLASS: &'static str = "delete";
    pub const CONTENT_CLASS: &'static str = "alert_content";

    fn new(kind: AlertKind) -> Self {
        let class = match kind {
            AlertKind::Success => "notification is-success",
            AlertKind::Warning => "notification is-warning",
            AlertKind::Error => "notification is-danger",
        };
        Self { kind, class }
    }

    /// Clone the template with `content` installed in the message slot
    pub fn instantiate(&self, id: AlertId, content: &str) -> Alert {
        Alert {
            id,
            kind: self.kind,
            class: self.class,
            text: capitalize_first(content),
        }
    }
}

/// One template per alert kind, indexed by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertTemplates([AlertTemplate; 3]);

impl AlertTemplates {
    pub fn new() -> Self {
        Self(AlertKind::ALL.map(AlertTemplate::new))
    }

    pub fn get(&self, kind: AlertKind) -> &AlertTemplate {
        &self.0[kind.index()]
    }
}

impl Default for AlertTemplates {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of an alert within its container
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlertId(u64);

/// An alert displayed in the container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub kind: AlertKind,
    pub class: &'static str,
    pub text: String,
}

/// Contents of the alert container, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertStack {
    next_id: u64,
    alerts: Vec<Alert>,
}

impl AlertStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the id for the next alert
    pub fn next_id(&mut self) -> AlertId {
        let id = AlertId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn push(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    /// Remove a single alert, returning true if it was present
    pub fn remove(&mut self, id: AlertId) -> bool {
        match self.alerts.iter().position(|a| a.id == id) {
            Some(index) => {
                self.alerts.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn get(&self, id: AlertId) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Uppercase the first character (ASCII only), leave the rest untouched
pub fn capitalize_first(content: &str) -> String {
    let mut chars = content.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(content.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}
