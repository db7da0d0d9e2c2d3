//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`DomainError`]
//! via `#[from]` when crossing a port boundary.

/// Top-level error carried across port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// An input violated a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// An inbound message could not be parsed.
    #[error("parse error")]
    Parse(#[from] ParseError),

    /// The transport is not connected, so nothing can be sent.
    #[error("not connected")]
    NotConnected,

    /// An adapter-level failure (transport, IO, …).
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("mapping key must not be empty")]
    EmptyMatchKey,

    #[error("target id must not be empty")]
    EmptyTargetId,

    #[error("mapping must contain at least one entry")]
    EmptyMapping,

    #[error("command text must not be empty")]
    EmptyCommand,

    #[error("unknown target kind {0:?}")]
    UnknownTargetKind(String),

    #[error("unknown match policy {0:?}")]
    UnknownMatchPolicy(String),
}

/// Reasons a raw notification string is not a status notification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("notification has no ':' separator")]
    MissingSeparator,

    #[error("notification has an empty device name")]
    EmptyName,

    #[error("notification has an empty status")]
    EmptyStatus,
}
