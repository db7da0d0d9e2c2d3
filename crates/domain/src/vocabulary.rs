//! On-vocabulary: the fixed set of status words meaning "active".
//!
//! Controllers report statuses in free text, mostly Indonesian
//! (`"Nyala"`, `"Terbuka"`, `"Mati"`, …). A status is active when, upper-cased,
//! it contains one of [`ON_WORDS`]. Everything else is inactive.

/// Status words interpreted as "active / on".
pub const ON_WORDS: [&str; 7] = ["ON", "NYALA", "TERBUKA", "MEMBUKA", "HIDUP", "AKTIF", "BUKA"];

/// Whether `status` denotes an active device.
///
/// Matching is a substring test on the upper-cased status, so inflected
/// forms such as `"MENYALA"`, `"DINYALAKAN"` or `"DIBUKA"` count as active.
#[must_use]
pub fn is_active(status: &str) -> bool {
    let status = status.to_uppercase();
    ON_WORDS.iter().any(|word| status.contains(word))
}
