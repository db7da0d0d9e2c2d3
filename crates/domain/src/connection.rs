//! Transport connection lifecycle.
//!
//! ```text
//!             Attempt                Established
//!  Closed ──────────────▶ Connecting ───────────▶ Connected
//!    ▲                      │  ▲                     │
//!    │        Failed        ▼  │ Attempt             │ Failed / Lost
//!    └──── Lost ───────── Error ◀────────────────────┘
//! ```
//!
//! The state is owned by the transport's connection handle and only ever
//! changed through [`ConnectionState::apply`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current state of the broker connection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ConnectionState {
    /// Never connected, or shut down.
    #[default]
    Closed,
    /// A connection attempt is in progress.
    Connecting,
    /// The broker acknowledged the session.
    Connected,
    /// The last attempt or the live session failed.
    Error { reason: String },
}

/// Something that happened to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Starting a (re)connection attempt.
    Attempt,
    /// The broker acknowledged the connection.
    Established,
    /// The attempt or session failed.
    Failed(String),
    /// The session ended cleanly (disconnect or shutdown).
    Lost,
}

impl ConnectionState {
    /// Next state after `event`.
    ///
    /// Events that make no sense in the current state (e.g. `Established`
    /// while `Closed`) leave the state unchanged.
    #[must_use]
    pub fn apply(&self, event: ConnectionEvent) -> Self {
        match (self, event) {
            (Self::Closed | Self::Error { .. } | Self::Connecting, ConnectionEvent::Attempt) => {
                Self::Connecting
            }
            (Self::Connecting | Self::Connected, ConnectionEvent::Established) => Self::Connected,
            (_, ConnectionEvent::Failed(reason)) => Self::Error { reason },
            (_, ConnectionEvent::Lost) => Self::Closed,
            (current, _) => current.clone(),
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("closed"),
            Self::Connecting => f.write_str("connecting"),
            Self::Connected => f.write_str("connected"),
            Self::Error { reason } => write!(f, "error: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_closed() {
        assert_eq!(ConnectionState::default(), ConnectionState::Closed);
    }

    #[test]
    fn should_walk_happy_path() {
        let state = ConnectionState::Closed
            .apply(ConnectionEvent::Attempt)
            .apply(ConnectionEvent::Established);
        assert!(state.is_connected());
    }

    #[test]
    fn should_record_failure_reason() {
        let state = ConnectionState::Connecting.apply(ConnectionEvent::Failed("refused".into()));
        assert_eq!(
            state,
            ConnectionState::Error {
                reason: "refused".to_string()
            }
        );
        assert!(!state.is_connected());
    }

    #[test]
    fn should_reconnect_after_error() {
        let state = ConnectionState::Error {
            reason: "timeout".to_string(),
        }
        .apply(ConnectionEvent::Attempt);
        assert_eq!(state, ConnectionState::Connecting);
    }

    #[test]
    fn should_ignore_established_while_closed() {
        let state = ConnectionState::Closed.apply(ConnectionEvent::Established);
        assert_eq!(state, ConnectionState::Closed);
    }

    #[test]
    fn should_ignore_attempt_while_connected() {
        let state = ConnectionState::Connected.apply(ConnectionEvent::Attempt);
        assert_eq!(state, ConnectionState::Connected);
    }

    #[test]
    fn should_close_on_lost() {
        let state = ConnectionState::Connected.apply(ConnectionEvent::Lost);
        assert_eq!(state, ConnectionState::Closed);
    }

    #[test]
    fn should_serialize_with_state_tag() {
        let json = serde_json::to_value(ConnectionState::Error {
            reason: "x".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"state": "error", "reason": "x"}));
    }
}
