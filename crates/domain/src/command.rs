//! Outbound commands relayed to the controller.

use crate::error::ValidationError;

/// Command sent once after connecting to request every device's status.
pub const STATUS_REQUEST: &str = "STATUS";

/// A validated free-text command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    text: String,
}

impl Command {
    /// Trim `text` and reject it when nothing is left.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCommand`] for blank input.
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyCommand);
        }
        Ok(Self {
            text: text.to_string(),
        })
    }

    /// The command as the user typed it (trimmed).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Wire payload: the controller expects lower-case text.
    #[must_use]
    pub fn payload(&self) -> String {
        self.text.to_lowercase()
    }
}
