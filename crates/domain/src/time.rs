//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for chat entries and board updates.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp as a wall-clock `HH:MM:SS` label for the dashboard.
#[must_use]
pub fn clock_label(ts: &Timestamp) -> String {
    ts.format("%H:%M:%S").to_string()
}
