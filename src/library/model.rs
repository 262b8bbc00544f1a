use serde::{Deserialize, Serialize};

use super::display;
use super::quality::best_variant;

/// One rendition of a media asset (an image size or an audio bitrate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaVariant {
    /// Quality label as reported by the catalog, e.g. `"320kbps"` or `"500x500"`.
    #[serde(default)]
    pub quality: String,
    pub url: String,
}

impl MediaVariant {
    pub fn new(quality: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            quality: quality.into(),
            url: url.into(),
        }
    }
}

/// A catalog entry. Equality and deduplication go through `id` only.
///
/// A track without any audio variant is a valid catalog entry, it just
/// cannot be played.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub primary_artists: String,
    #[serde(default, rename = "image")]
    pub images: Vec<MediaVariant>,
    #[serde(default, rename = "downloadUrl")]
    pub audio: Vec<MediaVariant>,
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Track {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            primary_artists: String::new(),
            images: Vec::new(),
            audio: Vec::new(),
        }
    }

    pub fn with_artists(mut self, artists: impl Into<String>) -> Self {
        self.primary_artists = artists.into();
        self
    }

    pub fn with_audio(mut self, quality: &str, url: &str) -> Self {
        self.audio.push(MediaVariant::new(quality, url));
        self
    }

    pub fn with_image(mut self, quality: &str, url: &str) -> Self {
        self.images.push(MediaVariant::new(quality, url));
        self
    }

    /// URL of the highest ranked audio variant, if any is playable.
    pub fn best_audio_url(&self) -> Option<&str> {
        best_variant(&self.audio).map(|v| v.url.as_str())
    }

    /// URL of the highest ranked image variant.
    pub fn best_image_url(&self) -> Option<&str> {
        best_variant(&self.images).map(|v| v.url.as_str())
    }

    pub fn is_playable(&self) -> bool {
        self.best_audio_url().is_some()
    }

    /// Artist names for display, `"Unknown Artist"` when the catalog had none.
    pub fn artist_display(&self) -> &str {
        display::artist_or_unknown(&self.primary_artists)
    }
}
