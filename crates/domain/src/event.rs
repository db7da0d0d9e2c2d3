//! Dashboard events: what connected clients are told about.

use serde::Serialize;

use crate::board::TargetView;
use crate::chat::ChatMessage;
use crate::connection::ConnectionState;

/// A change pushed to live dashboard clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// A tile received a new status.
    TargetChanged { target: TargetView },
    /// A line was appended to the transcript.
    ChatAppended { message: ChatMessage },
    /// A controller reply that speech-capable clients should read aloud.
    Speak { text: String },
    /// The broker connection changed state.
    ConnectionChanged { connection: ConnectionState },
}
