//! Single error-display slot

use tracing::debug;

/// Owns the one user-facing error message; visible iff present
#[derive(Debug, Clone, Default)]
pub struct ErrorPresenter {
    message: Option<String>,
}

impl ErrorPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is shown with `message`
    pub fn show(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "Showing error");
        self.message = Some(message);
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}
