//! Dashboard board: the current UI state of every target.
//!
//! The board is seeded from the mapping with placeholder tiles. Reconciler
//! output replaces a placeholder with a reported state; connection changes
//! only ever touch tiles that are still placeholders.

use serde::Serialize;

use crate::connection::ConnectionState;
use crate::mapping::{DeviceMapping, TargetKind};
use crate::time::Timestamp;
use crate::ui::{Indicator, UiState, UiUpdate};

/// Placeholder text before the transport has connected.
pub const UNKNOWN_TEXT: &str = "Unknown";
/// Placeholder text while connected but before any report.
pub const NO_REPORT_TEXT: &str = "Off";
/// Placeholder text while disconnected.
pub const OFFLINE_TEXT: &str = "Offline";

/// One tile of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetView {
    pub target_id: String,
    pub kind: TargetKind,
    pub display_text: String,
    pub is_active: bool,
    pub indicator: Indicator,
    /// `None` while the tile still shows a placeholder.
    pub updated_at: Option<Timestamp>,
}

impl TargetView {
    fn placeholder(target_id: &str, kind: TargetKind) -> Self {
        Self {
            target_id: target_id.to_string(),
            kind,
            display_text: UNKNOWN_TEXT.to_string(),
            is_active: false,
            indicator: Indicator::Offline,
            updated_at: None,
        }
    }

    /// Whether the tile has never received a status report.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.updated_at.is_none()
    }

    /// CSS colour of the tile.
    #[must_use]
    pub fn color(&self) -> &'static str {
        self.indicator.color()
    }

    fn set_state(&mut self, state: &UiState, at: Timestamp) {
        self.display_text.clone_from(&state.display_text);
        self.is_active = state.is_active;
        self.indicator = state.indicator();
        self.updated_at = Some(at);
    }
}

/// Current state of every dashboard target, in mapping order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UiBoard {
    targets: Vec<TargetView>,
}

impl UiBoard {
    /// Seed one placeholder tile per distinct mapping target.
    #[must_use]
    pub fn from_mapping(mapping: &DeviceMapping) -> Self {
        let targets = mapping
            .targets()
            .into_iter()
            .map(|(id, kind)| TargetView::placeholder(id, kind))
            .collect();
        Self { targets }
    }

    /// Apply reconciler output, returning the tiles that changed.
    ///
    /// Updates for a target the board has never seen append a new tile.
    pub fn apply(&mut self, updates: &[UiUpdate], at: Timestamp) -> Vec<TargetView> {
        let mut changed = Vec::with_capacity(updates.len());
        for update in updates {
            let index = match self.position(&update.target_id) {
                Some(index) => index,
                None => {
                    self.targets.push(TargetView::placeholder(
                        &update.target_id,
                        TargetKind::infer(&update.target_id),
                    ));
                    self.targets.len() - 1
                }
            };
            let tile = &mut self.targets[index];
            tile.set_state(&update.state, at);
            changed.push(tile.clone());
        }
        changed
    }

    /// Refresh placeholder tiles for a new connection state.
    ///
    /// Returns the number of tiles touched.
    pub fn on_connection(&mut self, state: &ConnectionState) -> usize {
        let (text, indicator) = match state {
            ConnectionState::Connected => (NO_REPORT_TEXT, Indicator::Inactive),
            ConnectionState::Closed | ConnectionState::Error { .. } => {
                (OFFLINE_TEXT, Indicator::Offline)
            }
            ConnectionState::Connecting => return 0,
        };
        let mut touched = 0;
        for tile in self.targets.iter_mut().filter(|t| t.is_placeholder()) {
            tile.display_text = text.to_string();
            tile.indicator = indicator;
            touched += 1;
        }
        touched
    }

    #[must_use]
    pub fn get(&self, target_id: &str) -> Option<&TargetView> {
        self.targets.iter().find(|t| t.target_id == target_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetView> {
        self.targets.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of tiles currently reporting an active device.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_active).count()
    }

    fn position(&self, target_id: &str) -> Option<usize> {
        self.targets.iter().position(|t| t.target_id == target_id)
    }
}
