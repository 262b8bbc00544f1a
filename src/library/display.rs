use super::model::Track;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

pub(super) fn artist_or_unknown(artists: &str) -> &str {
    let trimmed = artists.trim();
    if trimmed.is_empty() {
        UNKNOWN_ARTIST
    } else {
        trimmed
    }
}

/// Build the one-line label used by list views: `"Artist - Name"`.
///
/// Blank parts are skipped; when both are blank the track id is used so the
/// entry is still distinguishable.
pub fn display_line(track: &Track) -> String {
    let mut parts: Vec<&str> = Vec::new();

    let artists = track.primary_artists.trim();
    if !artists.is_empty() {
        parts.push(artists);
    }
    let name = track.name.trim();
    if !name.is_empty() {
        parts.push(name);
    }

    if parts.is_empty() {
        track.id.clone()
    } else {
        parts.join(" - ")
    }
}
