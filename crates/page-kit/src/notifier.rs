//! Alert notifier: the page's alert container and its push/dismiss operations

use leptos::prelude::*;

use crate::alert::{AlertId, AlertKind, AlertStack, AlertTemplates};
use crate::config::AlertConfig;
use crate::PageKitError;

/// Handle to the page's alert container.
///
/// Created once during page initialization and shared by everything that
/// pushes alerts. Cloning the handle shares the same container.
#[derive(Debug, Clone)]
pub struct AlertNotifier {
    stack: RwSignal<AlertStack>,
    templates: AlertTemplates,
    config: AlertConfig,
}

impl AlertNotifier {
    pub fn new(config: &AlertConfig) -> Self {
        tracing::debug!(
            "Created alert notifier for container '#{}'",
            config.container_id
        );
        Self {
            stack: RwSignal::new(AlertStack::new()),
            templates: AlertTemplates::new(),
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Reactive contents of the container, rendered by `AlertContainer`
    pub fn stack(&self) -> RwSignal<AlertStack> {
        self.stack
    }

    /// Append an alert of the given kind to the container
    pub fn push(&self, content: &str, kind: AlertKind) -> crate::Result<AlertId> {
        if content.is_empty() {
            return Err(PageKitError::EmptyAlert);
        }

        let template = self.templates.get(kind);
        let id = self.stack.try_update(|stack| {
            let id = stack.next_id();
            stack.push(template.instantiate(id, content));
            id
        });

        match id {
            Some(id) => {
                tracing::debug!("Pushed {} alert {:?}", kind, id);
                Ok(id)
            }
            None => Err(PageKitError::Page("alert container disposed".to_string())),
        }
    }

    /// Validate `kind` and push the alert, logging instead of failing
    pub fn push_alert(&self, content: &str, kind: &str) {
        let result = kind
            .parse::<AlertKind>()
            .and_then(|kind| self.push(content, kind));

        match result {
            Ok(_) => {}
            Err(e @ PageKitError::EmptyAlert) => tracing::warn!("{}", e),
            Err(e) => tracing::error!("{}", e),
        }
    }

    /// Remove a single alert, returning true if it was still displayed
    pub fn dismiss(&self, id: AlertId) -> bool {
        let removed = self
            .stack
            .try_update(|stack| stack.remove(id))
            .unwrap_or(false);
        tracing::debug!("Dismissed alert {:?} (removed={})", id, removed);
        removed
    }

    pub fn len(&self) -> usize {
        self.stack.with_untracked(|stack| stack.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the displayed alert texts, in container order
    pub fn texts(&self) -> Vec<String> {
        self.stack
            .with_untracked(|stack| stack.alerts().iter().map(|a| a.text.clone()).collect())
    }
}
