//! UI state: what a dashboard target shows.

use serde::{Deserialize, Serialize};

use crate::mapping::TargetKind;
use crate::vocabulary;

/// Text and activity flag shown by a single UI target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub display_text: String,
    pub is_active: bool,
}

impl UiState {
    /// Derive the state a target of `kind` shows for `status`.
    ///
    /// | Kind | Active | Inactive |
    /// |------|--------|----------|
    /// | door | `Open` | `Locked` |
    /// | curtain | raw status | raw status |
    /// | standard | `On` | `Off` |
    #[must_use]
    pub fn from_status(kind: TargetKind, status: &str) -> Self {
        let is_active = vocabulary::is_active(status);
        let display_text = match kind {
            TargetKind::Door if is_active => "Open".to_string(),
            TargetKind::Door => "Locked".to_string(),
            TargetKind::Curtain => status.to_string(),
            TargetKind::Standard if is_active => "On".to_string(),
            TargetKind::Standard => "Off".to_string(),
        };
        Self {
            display_text,
            is_active,
        }
    }

    #[must_use]
    pub fn indicator(&self) -> Indicator {
        if self.is_active {
            Indicator::Active
        } else {
            Indicator::Inactive
        }
    }
}

/// Colour class of a rendered target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Active,
    Inactive,
    /// No data and no connection.
    Offline,
}

impl Indicator {
    /// CSS colour for this indicator.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Active => "#4CAF50",
            Self::Inactive => "#f44336",
            Self::Offline => "#9e9e9e",
        }
    }
}

/// Outbound instruction: set `target_id` to `state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiUpdate {
    pub target_id: String,
    #[serde(flatten)]
    pub state: UiState,
}

impl UiUpdate {
    #[must_use]
    pub fn new(target_id: impl Into<String>, state: UiState) -> Self {
        Self {
            target_id: target_id.into(),
            state,
        }
    }
}
