//! Widget errors.

use thiserror::Error;

/// Errors raised while mounting or configuring a widget.
///
/// Running widgets never fail: operations with unmet preconditions are
/// no-ops. Errors only surface from construction and configuration.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Required element not found: {0}")]
    MissingElement(String),
    #[error("Card deck has no cards")]
    EmptyDeck,
    #[error("Typing loop has no words")]
    EmptyWordList,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<serde_json::Error> for WidgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for widget construction.
pub type WidgetResult<T> = Result<T, WidgetError>;
