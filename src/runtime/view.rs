//! Plain-text rendering for the command loop.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::LazyLock;
use std::time::Duration;

use crate::audio::{PlaybackInfo, SessionState, UNKNOWN_DURATION_MILLIS};
use crate::library::{SearchPage, display_line};
use crate::store::QueueSnapshot;

static COMMANDS: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("search <q> [page]", "search tracks by title or artist");
    map.insert("artist <q> [page]", "search tracks by artist");
    map.insert("play <n>", "play result n, queueing the result page");
    map.insert("add <n>", "append result n to the queue");
    map.insert("queue", "show the queue");
    map.insert("jump <i>", "play queue entry i");
    map.insert("rm <i>", "remove queue entry i");
    map.insert("up <i>", "move queue entry i up");
    map.insert("down <i>", "move queue entry i down");
    map.insert("next", "play the next entry");
    map.insert("prev", "play the previous entry");
    map.insert("toggle", "pause or resume");
    map.insert("stop", "stop and release audio");
    map.insert("seek <seconds>", "seek within the current track");
    map.insert("status", "show what is playing");
    map.insert("config", "print effective settings");
    map.insert("help", "show this help");
    map.insert("quit", "exit");
    map
});

pub fn help_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "search <q> [page]",
        "artist <q> [page]",
        "play <n>",
        "add <n>",
        "queue",
        "jump <i>",
        "rm <i>",
        "up <i>",
        "down <i>",
        "next",
        "prev",
        "toggle",
        "stop",
        "seek <seconds>",
        "status",
        "config",
        "help",
        "quit",
    ];
    order
        .iter()
        .filter_map(|k| COMMANDS.get(k).map(|v| format!("  {k:<20} {v}")))
        .collect::<Vec<String>>()
        .join("\n")
}

/// Format a `Duration` as `M:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Empty => "stopped",
        SessionState::Loading => "loading",
        SessionState::Playing => "playing",
        SessionState::Paused => "paused",
        SessionState::Ended => "ended",
    }
}

pub fn status_line(info: &PlaybackInfo) -> String {
    let Some(track) = info.track.as_ref() else {
        return format!("[{}] nothing loaded", state_label(info.state));
    };

    let elapsed = format_mmss(Duration::from_millis(info.position_millis));
    let total = if info.duration_millis <= UNKNOWN_DURATION_MILLIS {
        "-:--".to_string()
    } else {
        format_mmss(Duration::from_millis(info.duration_millis))
    };
    format!(
        "[{}] {} {elapsed} / {total}",
        state_label(info.state),
        display_line(track)
    )
}

pub fn queue_listing(queue: &QueueSnapshot, playback: &PlaybackInfo) -> String {
    if queue.queue.is_empty() {
        return "queue is empty".to_string();
    }

    let mut out = String::new();
    for (i, track) in queue.queue.iter().enumerate() {
        let marker = if i == queue.current_index {
            if playback.track.as_ref() == Some(track) && playback.is_playing {
                ">"
            } else {
                "*"
            }
        } else {
            " "
        };
        let _ = writeln!(out, "{marker} {:>3}. {}", i + 1, display_line(track));
    }
    out.pop();
    out
}

pub fn results_listing(page: &SearchPage, page_size: usize) -> String {
    if page.results.is_empty() {
        return format!("no results (page {})", page.page);
    }

    let mut out = String::new();
    for (i, track) in page.results.iter().enumerate() {
        let _ = writeln!(out, "  {:>3}. {}", i + 1, display_line(track));
    }
    let _ = write!(out, "page {} of {} matches", page.page, page.total);
    if page.has_more(page_size) {
        out.push_str(" (more on the next page)");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Track;

    fn t(id: &str, artist: &str) -> Track {
        Track::new(id, id.to_uppercase())
            .with_artists(artist)
            .with_audio("320kbps", &format!("file:///music/{id}.mp3"))
    }

    #[test]
    fn mmss_pads_seconds_only() {
        assert_eq!(format_mmss(Duration::from_millis(0)), "0:00");
        assert_eq!(format_mmss(Duration::from_millis(65_999)), "1:05");
        assert_eq!(format_mmss(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn status_line_hides_unknown_duration() {
        let info = PlaybackInfo {
            track: Some(t("a", "Band")),
            state: SessionState::Loading,
            ..PlaybackInfo::default()
        };
        assert_eq!(status_line(&info), "[loading] Band - A 0:00 / -:--");
        assert_eq!(
            status_line(&PlaybackInfo::default()),
            "[stopped] nothing loaded"
        );
    }

    #[test]
    fn queue_listing_marks_current_entry() {
        let queue = QueueSnapshot {
            queue: vec![t("a", "X"), t("b", "Y")],
            current_index: 1,
        };
        let playback = PlaybackInfo {
            track: Some(t("b", "Y")),
            state: SessionState::Playing,
            is_playing: true,
            ..PlaybackInfo::default()
        };

        let listing = queue_listing(&queue, &playback);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines, vec!["    1. X - A", ">   2. Y - B"]);

        let idle = queue_listing(&queue, &PlaybackInfo::default());
        assert!(idle.ends_with("*   2. Y - B"));
    }

    #[test]
    fn results_listing_reports_more_pages() {
        let page = SearchPage {
            results: vec![t("a", "X")],
            page: 1,
            total: 3,
        };
        let out = results_listing(&page, 1);
        assert!(out.starts_with("    1. X - A"));
        assert!(out.ends_with("page 1 of 3 matches (more on the next page)"));
    }

    #[test]
    fn help_lists_every_command() {
        let help = help_text();
        assert_eq!(help.lines().count(), COMMANDS.len());
        assert!(help.contains("seek <seconds>"));
    }
}
