//! Dashboard service: the use-case behind every inbound message and command.
//!
//! Holds the immutable mapping plus the mutable board, transcript and
//! connection mirror. Locks are `std::sync` and never held across an
//! `.await`.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use homedash_domain::board::{TargetView, UiBoard};
use homedash_domain::chat::{ChatLog, ChatMessage, ChatSender};
use homedash_domain::command::{Command, STATUS_REQUEST};
use homedash_domain::connection::ConnectionState;
use homedash_domain::error::DomainError;
use homedash_domain::event::DashboardEvent;
use homedash_domain::mapping::DeviceMapping;
use homedash_domain::message::InboundMessage;
use homedash_domain::reconciler::{MatchPolicy, reconcile_notification};
use homedash_domain::time::now;

use crate::ports::{CommandPublisher, EventPublisher, TransportContext};

/// Notice appended to the transcript when the dashboard starts.
pub const READY_NOTICE: &str = "System ready. Type \"status\" to refresh every device.";

/// Construction-time settings for [`DashboardService`].
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub mapping: DeviceMapping,
    pub policy: MatchPolicy,
    /// Maximum transcript length.
    pub chat_capacity: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            mapping: DeviceMapping::default(),
            policy: MatchPolicy::default(),
            chat_capacity: 200,
        }
    }
}

/// What [`DashboardService::handle_inbound`] did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundOutcome {
    /// A status report changed these tiles.
    Updated(Vec<TargetView>),
    /// A status report named a device no mapping entry matches.
    Unmatched,
    /// A sensor reading went to the transcript.
    Sensor,
    /// A controller reply went to the transcript and was broadcast for speech.
    Reply,
    /// The message was not for the dashboard.
    Ignored,
}

/// Application service for the status dashboard.
pub struct DashboardService<P, E> {
    mapping: DeviceMapping,
    policy: MatchPolicy,
    board: RwLock<UiBoard>,
    chat: RwLock<ChatLog>,
    connection: RwLock<ConnectionState>,
    publisher: P,
    events: E,
}

impl<P, E> DashboardService<P, E>
where
    P: CommandPublisher + Send + Sync,
    E: EventPublisher + Send + Sync,
{
    /// Create a service with a board seeded from `settings.mapping`.
    pub fn new(settings: DashboardSettings, publisher: P, events: E) -> Self {
        let board = UiBoard::from_mapping(&settings.mapping);
        Self {
            mapping: settings.mapping,
            policy: settings.policy,
            board: RwLock::new(board),
            chat: RwLock::new(ChatLog::with_capacity(settings.chat_capacity)),
            connection: RwLock::new(ConnectionState::default()),
            publisher,
            events,
        }
    }

    /// Classify and apply one inbound message.
    pub async fn handle_inbound(&self, topic: &str, payload: &str) -> InboundOutcome {
        match InboundMessage::classify(topic, payload) {
            InboundMessage::Sensor(reading) => {
                self.append_chat(ChatSender::Sensor, reading).await;
                InboundOutcome::Sensor
            }
            InboundMessage::Reply(text) => {
                self.append_chat(ChatSender::Bot, text.clone()).await;
                self.emit(DashboardEvent::Speak { text }).await;
                InboundOutcome::Reply
            }
            InboundMessage::Status(notification) => {
                let updates = reconcile_notification(&self.mapping, self.policy, &notification);
                if updates.is_empty() {
                    tracing::debug!(device = %notification.name, "no mapping entry matches device");
                    return InboundOutcome::Unmatched;
                }
                let changed = self.board_mut().apply(&updates, now());
                tracing::debug!(
                    device = %notification.name,
                    status = %notification.status,
                    targets = changed.len(),
                    "status applied"
                );
                for target in &changed {
                    self.emit(DashboardEvent::TargetChanged {
                        target: target.clone(),
                    })
                    .await;
                }
                InboundOutcome::Updated(changed)
            }
            InboundMessage::Ignored(reason) => {
                tracing::debug!(topic, ?reason, "ignoring inbound message");
                InboundOutcome::Ignored
            }
        }
    }

    /// Relay a user command to the controller and record it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] for blank text, or the publisher's
    /// error (typically [`DomainError::NotConnected`]). Nothing is recorded
    /// when sending fails.
    pub async fn send_command(&self, text: &str) -> Result<ChatMessage, DomainError> {
        let command = Command::new(text)?;
        self.publisher.publish_command(command.payload()).await?;
        tracing::info!(command = command.text(), "command sent");
        Ok(self.append_chat(ChatSender::User, command.text()).await)
    }

    /// Ask the controller for a full status report.
    ///
    /// # Errors
    ///
    /// Returns the publisher's error.
    pub async fn request_status(&self) -> Result<(), DomainError> {
        let command = Command::new(STATUS_REQUEST)?;
        self.publisher.publish_command(command.payload()).await?;
        tracing::debug!("status requested");
        Ok(())
    }

    /// Mirror a connection change onto the board and tell clients.
    pub async fn set_connection(&self, state: ConnectionState) {
        let touched = self.board_mut().on_connection(&state);
        *self
            .connection
            .write()
            .unwrap_or_else(PoisonError::into_inner) = state.clone();
        tracing::info!(connection = %state, placeholders = touched, "connection changed");
        self.emit(DashboardEvent::ConnectionChanged { connection: state })
            .await;
    }

    /// Append the start-up notice to the transcript.
    pub async fn announce_ready(&self) {
        self.append_chat(ChatSender::System, READY_NOTICE).await;
    }

    /// Snapshot of every tile, in mapping order.
    #[must_use]
    pub fn targets(&self) -> Vec<TargetView> {
        self.board().iter().cloned().collect()
    }

    /// Snapshot of one tile.
    #[must_use]
    pub fn target(&self, target_id: &str) -> Option<TargetView> {
        self.board().get(target_id).cloned()
    }

    /// Number of tiles showing an active device.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.board().active_count()
    }

    /// The newest `limit` transcript lines, oldest first.
    #[must_use]
    pub fn chat(&self, limit: usize) -> Vec<ChatMessage> {
        self.chat
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .recent(limit)
    }

    #[must_use]
    pub fn connection(&self) -> ConnectionState {
        self.connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn append_chat(&self, sender: ChatSender, text: impl Into<String>) -> ChatMessage {
        let message = ChatMessage::new(sender, text);
        self.chat
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        self.emit(DashboardEvent::ChatAppended {
            message: message.clone(),
        })
        .await;
        message
    }

    async fn emit(&self, event: DashboardEvent) {
        if let Err(err) = self.events.publish(event).await {
            tracing::warn!(error = %err, "failed to publish dashboard event");
        }
    }

    fn board(&self) -> RwLockReadGuard<'_, UiBoard> {
        self.board.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn board_mut(&self) -> RwLockWriteGuard<'_, UiBoard> {
        self.board.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P, E> TransportContext for DashboardService<P, E>
where
    P: CommandPublisher + Send + Sync,
    E: EventPublisher + Send + Sync,
{
    async fn handle_message(&self, topic: &str, payload: &str) {
        self.handle_inbound(topic, payload).await;
    }

    async fn connection_changed(&self, state: ConnectionState) {
        self.set_connection(state).await;
    }

    async fn request_status(&self) -> Result<(), DomainError> {
        DashboardService::request_status(self).await
    }
}
