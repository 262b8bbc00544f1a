//! Ranking of media variants by their quality label.

use super::model::MediaVariant;

/// Numeric rank of a quality label: its leading integer.
///
/// `"320kbps"` ranks 320, `"500x500"` ranks 500, anything without a
/// leading number ranks 0.
pub fn quality_rank(label: &str) -> u32 {
    let digits: String = label
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Pick the best variant with a non-empty URL. Ties go to the later entry,
/// catalogs list renditions in ascending quality.
pub(super) fn best_variant(variants: &[MediaVariant]) -> Option<&MediaVariant> {
    variants
        .iter()
        .filter(|v| !v.url.trim().is_empty())
        .max_by_key(|v| quality_rank(&v.quality))
}
