//! Inbound message classification.
//!
//! Everything published under the dashboard topic prefix lands here first.
//! Our own commands echo back on the command topic and are dropped first.
//! The remaining checks run in a fixed order: sensor prefix, reply topic,
//! status separator. Whatever is left is ignored.

use crate::error::ParseError;
use crate::notification::StatusNotification;

/// Payload prefix marking a sensor reading.
pub const SENSOR_PREFIX: &str = "SENSOR:";

/// Topic fragment marking a reply from the controller.
pub const REPLY_TOPIC: &str = "voice_reply";

/// Topic suffix commands are published on.
pub const COMMAND_TOPIC: &str = "voice_input";

/// What an inbound publish turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Free-text sensor reading (prefix stripped, trimmed).
    Sensor(String),
    /// Controller reply, to be shown and spoken.
    Reply(String),
    /// Device status report.
    Status(StatusNotification),
    /// Not something the dashboard cares about.
    Ignored(IgnoreReason),
}

/// Why a message was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Echo of a command this dashboard published.
    OwnCommand,
    /// No `:` anywhere in the payload.
    NoSeparator,
    /// Had a separator but a blank half.
    Malformed(ParseError),
}

impl InboundMessage {
    /// Classify `payload` received on `topic` (relative to the topic prefix).
    #[must_use]
    pub fn classify(topic: &str, payload: &str) -> Self {
        if topic == COMMAND_TOPIC {
            return Self::Ignored(IgnoreReason::OwnCommand);
        }
        if let Some(reading) = payload.strip_prefix(SENSOR_PREFIX) {
            return Self::Sensor(reading.trim().to_string());
        }
        if topic.contains(REPLY_TOPIC) {
            return Self::Reply(payload.trim().to_string());
        }
        match StatusNotification::parse(payload) {
            Ok(notification) => Self::Status(notification),
            Err(ParseError::MissingSeparator) => Self::Ignored(IgnoreReason::NoSeparator),
            Err(err) => Self::Ignored(IgnoreReason::Malformed(err)),
        }
    }
}
