//! Status reconciler: turns a `(name, status)` pair into UI updates.
//!
//! Pure and stateless: the output depends only on the mapping, the policy and
//! the two input strings. Applying the output is the caller's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::mapping::DeviceMapping;
use crate::notification::StatusNotification;
use crate::ui::{UiState, UiUpdate};

/// What to do when several mapping keys match one device name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Emit an update for every matching entry, in mapping order.
    #[default]
    All,
    /// Keep only the first matching key. Entries sharing that key are
    /// aliases of one device and all apply.
    First,
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::First => f.write_str("first"),
        }
    }
}

impl FromStr for MatchPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "first" => Ok(Self::First),
            other => Err(ValidationError::UnknownMatchPolicy(other.to_string())),
        }
    }
}

/// Compute the UI updates for one device status.
///
/// `name` is compared lower-cased against every mapping key; each entry whose
/// key is a substring of it yields one [`UiUpdate`] for its target. An
/// unrecognised device yields an empty vector.
#[must_use]
pub fn reconcile(
    mapping: &DeviceMapping,
    policy: MatchPolicy,
    name: &str,
    status: &str,
) -> Vec<UiUpdate> {
    let lowered = name.to_lowercase();
    let mut matches = mapping.iter().filter(|entry| entry.matches(&lowered)).peekable();
    let first_key = match policy {
        MatchPolicy::All => None,
        MatchPolicy::First => matches.peek().map(|entry| entry.match_key().to_string()),
    };
    matches
        .filter(|entry| first_key.as_deref().is_none_or(|key| entry.match_key() == key))
        .map(|entry| UiUpdate::new(entry.target_id(), UiState::from_status(entry.kind(), status)))
        .collect()
}

/// [`reconcile`] for an already parsed notification.
#[must_use]
pub fn reconcile_notification(
    mapping: &DeviceMapping,
    policy: MatchPolicy,
    notification: &StatusNotification,
) -> Vec<UiUpdate> {
    reconcile(mapping, policy, &notification.name, &notification.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::ON_WORDS;

    fn lamps() -> DeviceMapping {
        DeviceMapping::from_pairs([("lampu", "lamp"), ("lampu kamar", "lamp2")]).unwrap()
    }

    fn targets(updates: &[UiUpdate]) -> Vec<&str> {
        updates.iter().map(|u| u.target_id.as_str()).collect()
    }

    #[test]
    fn should_return_nothing_when_no_key_matches() {
        let updates = reconcile(&lamps(), MatchPolicy::All, "Kipas Angin", "ON");
        assert!(updates.is_empty());
    }

    #[test]
    fn should_return_nothing_for_any_policy_when_name_is_unknown() {
        let mapping = DeviceMapping::default();
        for policy in [MatchPolicy::All, MatchPolicy::First] {
            assert!(reconcile(&mapping, policy, "Kulkas", "NYALA").is_empty());
        }
    }

    #[test]
    fn should_match_case_insensitively() {
        let mapping = DeviceMapping::from_pairs([("lampu utama", "lamp")]).unwrap();
        let updates = reconcile(&mapping, MatchPolicy::All, "LAMPU UTAMA", "ON");
        assert_eq!(targets(&updates), ["lamp"]);
    }

    #[test]
    fn should_produce_end_to_end_example() {
        let mapping = DeviceMapping::from_pairs([("lampu utama", "lamp")]).unwrap();
        let updates = reconcile(&mapping, MatchPolicy::All, "Lampu Utama", "ON");
        assert_eq!(
            updates,
            vec![UiUpdate::new(
                "lamp",
                UiState {
                    display_text: "On".to_string(),
                    is_active: true,
                }
            )]
        );
    }

    #[test]
    fn should_return_every_matching_target_with_all_policy() {
        let updates = reconcile(&lamps(), MatchPolicy::All, "lampu kamar", "Nyala");
        assert_eq!(targets(&updates), ["lamp", "lamp2"]);
    }

    #[test]
    fn should_stop_at_first_match_with_first_policy() {
        let updates = reconcile(&lamps(), MatchPolicy::First, "lampu kamar", "Nyala");
        assert_eq!(targets(&updates), ["lamp"]);
    }

    #[test]
    fn should_keep_aliases_of_first_key_with_first_policy() {
        let mapping = DeviceMapping::from_pairs([
            ("lampu", "lamp1"),
            ("lampu kamar", "lamp2"),
            ("lampu", "lamp"),
        ])
        .unwrap();
        let updates = reconcile(&mapping, MatchPolicy::First, "Lampu Kamar", "ON");
        assert_eq!(targets(&updates), ["lamp1", "lamp"]);
    }

    #[test]
    fn should_update_both_main_lamp_targets_with_first_policy() {
        let mapping = DeviceMapping::default();
        let updates = reconcile(&mapping, MatchPolicy::First, "Lampu Utama", "Nyala");
        assert_eq!(targets(&updates), ["lamp1", "lamp"]);
    }

    #[test]
    fn should_mark_every_on_word_active() {
        let mapping = DeviceMapping::from_pairs([("kipas", "fan")]).unwrap();
        for word in ON_WORDS {
            let updates = reconcile(&mapping, MatchPolicy::All, "kipas", word);
            assert!(updates[0].state.is_active, "{word} should be active");
        }
    }

    #[test]
    fn should_mark_off_words_inactive() {
        let mapping = DeviceMapping::from_pairs([("kipas", "fan")]).unwrap();
        for word in ["OFF", "Mati", "Terkunci"] {
            let updates = reconcile(&mapping, MatchPolicy::All, "kipas", word);
            assert!(!updates[0].state.is_active, "{word} should be inactive");
            assert_eq!(updates[0].state.display_text, "Off");
        }
    }

    #[test]
    fn should_render_door_as_open_or_locked() {
        let mapping = DeviceMapping::default();
        let open = reconcile(&mapping, MatchPolicy::All, "Solenoid Door", "TERBUKA");
        let locked = reconcile(&mapping, MatchPolicy::All, "Solenoid Door", "Terkunci");
        assert_eq!(open[0].state.display_text, "Open");
        assert_eq!(locked[0].state.display_text, "Locked");
    }

    #[test]
    fn should_render_curtain_with_raw_status() {
        let mapping = DeviceMapping::default();
        let updates = reconcile(&mapping, MatchPolicy::All, "Tirai Buka", "sedang MEMBUKA");
        assert_eq!(targets(&updates), ["curtain"]);
        assert_eq!(updates[0].state.display_text, "sedang MEMBUKA");
    }

    #[test]
    fn should_update_both_main_lamp_targets_with_default_mapping() {
        let mapping = DeviceMapping::default();
        let updates = reconcile(&mapping, MatchPolicy::All, "Lampu Utama", "Nyala");
        assert_eq!(targets(&updates), ["lamp1", "lamp"]);
    }

    #[test]
    fn should_be_idempotent() {
        let mapping = DeviceMapping::default();
        let first = reconcile(&mapping, MatchPolicy::All, "Kran Air", "MATI");
        let second = reconcile(&mapping, MatchPolicy::All, "Kran Air", "MATI");
        assert_eq!(first, second);
    }

    #[test]
    fn should_reconcile_parsed_notification() {
        let notification = StatusNotification::parse("Pompa Penyiram: HIDUP").unwrap();
        let updates =
            reconcile_notification(&DeviceMapping::default(), MatchPolicy::All, &notification);
        assert_eq!(targets(&updates), ["pump"]);
        assert!(updates[0].state.is_active);
    }

    #[test]
    fn should_parse_policy_from_config_string() {
        assert_eq!("FIRST".parse::<MatchPolicy>(), Ok(MatchPolicy::First));
        assert!("some".parse::<MatchPolicy>().is_err());
    }
}
