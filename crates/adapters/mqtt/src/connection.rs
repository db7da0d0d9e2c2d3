//! Connection handle: the single owner of the broker connection state.

use std::sync::Arc;

use tokio::sync::watch;

use homedash_domain::connection::{ConnectionEvent, ConnectionState};

/// Shared, cloneable view of the connection lifecycle.
///
/// The event loop task drives it with [`apply`](Self::apply); publishers and
/// observers read it or [`subscribe`](Self::subscribe) to changes.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    tx: Arc<watch::Sender<ConnectionState>>,
}

impl Default for ConnectionHandle {
    fn default() -> Self {
        let (tx, _) = watch::channel(ConnectionState::default());
        Self { tx: Arc::new(tx) }
    }
}

impl ConnectionHandle {
    /// Apply `event` and return the resulting state.
    pub fn apply(&self, event: ConnectionEvent) -> ConnectionState {
        let mut next = ConnectionState::default();
        self.tx.send_modify(|state| {
            *state = state.apply(event);
            next = state.clone();
        });
        next
    }

    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.tx.borrow().is_connected()
    }

    /// Watch future state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.tx.subscribe()
    }
}
