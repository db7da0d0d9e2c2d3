//! Device mapping: which UI targets a device name refers to.
//!
//! A [`DeviceMapping`] is an ordered table of `(match key, target id)` pairs.
//! A device name refers to a target when the lower-cased name *contains* the
//! match key, so one name can hit several entries and order is significant.
//! The table is built once at start-up and never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// How a UI target renders its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Shows `Open` / `Locked`.
    Door,
    /// Shows the raw status text (positional state).
    Curtain,
    /// Shows `On` / `Off`.
    #[default]
    Standard,
}

impl TargetKind {
    /// Infer the kind from a target id: `door` and `curtain` are special,
    /// everything else is [`Standard`](Self::Standard).
    #[must_use]
    pub fn infer(target_id: &str) -> Self {
        match target_id {
            "door" => Self::Door,
            "curtain" => Self::Curtain,
            _ => Self::Standard,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Door => f.write_str("door"),
            Self::Curtain => f.write_str("curtain"),
            Self::Standard => f.write_str("standard"),
        }
    }
}

impl FromStr for TargetKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "door" => Ok(Self::Door),
            "curtain" => Ok(Self::Curtain),
            "standard" => Ok(Self::Standard),
            other => Err(ValidationError::UnknownTargetKind(other.to_string())),
        }
    }
}

/// One row of the mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    match_key: String,
    target_id: String,
    kind: TargetKind,
}

impl MappingEntry {
    /// Build an entry, inferring the target kind from the id.
    ///
    /// The key is trimmed and lower-cased, the target id trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyMatchKey`] or
    /// [`ValidationError::EmptyTargetId`] when either side is blank.
    pub fn new(match_key: &str, target_id: &str) -> Result<Self, ValidationError> {
        let kind = TargetKind::infer(target_id.trim());
        Self::with_kind(match_key, target_id, kind)
    }

    /// Build an entry with an explicit target kind.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_kind(
        match_key: &str,
        target_id: &str,
        kind: TargetKind,
    ) -> Result<Self, ValidationError> {
        let match_key = match_key.trim().to_lowercase();
        if match_key.is_empty() {
            return Err(ValidationError::EmptyMatchKey);
        }
        let target_id = target_id.trim();
        if target_id.is_empty() {
            return Err(ValidationError::EmptyTargetId);
        }
        Ok(Self {
            match_key,
            target_id: target_id.to_string(),
            kind,
        })
    }

    /// Lower-cased substring looked up in device names.
    #[must_use]
    pub fn match_key(&self) -> &str {
        &self.match_key
    }

    /// UI target updated when the key matches.
    #[must_use]
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    #[must_use]
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Whether this entry refers to `lowered_name` (already lower-cased).
    #[must_use]
    pub fn matches(&self, lowered_name: &str) -> bool {
        lowered_name.contains(self.match_key.as_str())
    }
}

/// Ordered, immutable `match key → UI target` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeviceMapping {
    entries: Vec<MappingEntry>,
}

impl DeviceMapping {
    /// Build a mapping from entries, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyMapping`] when `entries` is empty.
    pub fn new(entries: Vec<MappingEntry>) -> Result<Self, ValidationError> {
        if entries.is_empty() {
            return Err(ValidationError::EmptyMapping);
        }
        Ok(Self { entries })
    }

    /// Build a mapping from `(key, target)` pairs, inferring target kinds.
    ///
    /// # Errors
    ///
    /// Returns the first entry validation failure, or
    /// [`ValidationError::EmptyMapping`] when `pairs` is empty.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(key, target)| MappingEntry::new(key, target))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct targets in first-seen order, with the kind of their first entry.
    #[must_use]
    pub fn targets(&self) -> Vec<(&str, TargetKind)> {
        let mut seen: Vec<(&str, TargetKind)> = Vec::new();
        for entry in &self.entries {
            if !seen.iter().any(|(id, _)| *id == entry.target_id()) {
                seen.push((entry.target_id(), entry.kind()));
            }
        }
        seen
    }
}

impl Default for DeviceMapping {
    /// The table used by the reference deployment.
    ///
    /// The main lamp appears twice: the status page calls it `lamp1`, the home
    /// page `lamp`.
    fn default() -> Self {
        const TABLE: [(&str, &str); 13] = [
            ("lampu utama", "lamp1"),
            ("lampu utama", "lamp"),
            ("lampu kamar", "lamp2"),
            ("lampu tamu", "lamp3"),
            ("solenoid door", "door"),
            ("ac", "status-ac"),
            ("kipas", "fan"),
            ("colokan terminal", "socket"),
            ("pompa penyiram", "pump"),
            ("solenoid valve", "valve"),
            ("kran", "valve"),
            ("tirai buka", "curtain"),
            ("tirai tutup", "curtain"),
        ];
        let entries = TABLE
            .iter()
            .map(|(key, target)| MappingEntry {
                match_key: (*key).to_string(),
                target_id: (*target).to_string(),
                kind: TargetKind::infer(target),
            })
            .collect();
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a DeviceMapping {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
