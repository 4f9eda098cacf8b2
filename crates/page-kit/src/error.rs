//! Error types for the page kit

/// Errors that can occur in the alert notifier or the reload poller
#[derive(Debug, thiserror::Error)]
pub enum PageKitError {
    #[error("{0} is not a valid alert kind")]
    InvalidAlertKind(String),

    #[error("Alert content is empty")]
    EmptyAlert,

    #[error("Alert notifier used before page initialization")]
    Uninitialized,

    #[error("Alert container '#{0}' not found")]
    ContainerNotFound(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Page error: {0}")]
    Page(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for page kit operations
pub type Result<T> = std::result::Result<T, PageKitError>;
