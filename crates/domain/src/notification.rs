//! Status notification: `"<DeviceName>: <Status>"` split into its halves.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A single device status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusNotification {
    /// Device label as reported, trimmed (case preserved).
    pub name: String,
    /// Status label as reported, trimmed (case preserved).
    pub status: String,
}

impl StatusNotification {
    /// Split `raw` on the **first** `:` and trim both halves.
    ///
    /// Everything after the first colon belongs to the status, so
    /// `"Tirai: posisi: 50%"` yields the status `"posisi: 50%"`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingSeparator`] when there is no colon, and
    /// [`ParseError::EmptyName`] / [`ParseError::EmptyStatus`] when a half is
    /// blank after trimming.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let (name, status) = raw.split_once(':').ok_or(ParseError::MissingSeparator)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::EmptyName);
        }
        let status = status.trim();
        if status.is_empty() {
            return Err(ParseError::EmptyStatus);
        }
        Ok(Self {
            name: name.to_string(),
            status: status.to_string(),
        })
    }
}

impl FromStr for StatusNotification {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_split_on_colon_and_trim() {
        let n = StatusNotification::parse("  Lampu Utama :  ON ").unwrap();
        assert_eq!(n.name, "Lampu Utama");
        assert_eq!(n.status, "ON");
    }

    #[test]
    fn should_keep_later_colons_in_status() {
        let n: StatusNotification = "Tirai: posisi: 50%".parse().unwrap();
        assert_eq!(n.name, "Tirai");
        assert_eq!(n.status, "posisi: 50%");
    }

    #[test]
    fn should_reject_message_without_colon() {
        assert_eq!(
            StatusNotification::parse("Sistem siap"),
            Err(ParseError::MissingSeparator)
        );
    }

    #[test]
    fn should_reject_blank_name() {
        assert_eq!(StatusNotification::parse("  : ON"), Err(ParseError::EmptyName));
    }

    #[test]
    fn should_reject_blank_status() {
        assert_eq!(
            StatusNotification::parse("Kipas:   "),
            Err(ParseError::EmptyStatus)
        );
    }
}
