use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Size class of a Last.fm artwork variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Small,
    Medium,
    Large,
    Extralarge,
    /// Any size class Last.fm adds later, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// One artwork variant attached to a scrobbled track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    pub size: ImageSize,
    /// Image URL. Empty when Last.fm has no artwork for the track.
    pub url: String,
}

/// The most recently played track as reported by Last.fm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub artist: String,
    /// Album name, empty when the scrobble carries no album.
    pub album: String,
    /// Public Last.fm page of the track.
    pub url: String,
    /// Artwork variants in the order Last.fm lists them.
    pub images: Vec<Artwork>,
    pub now_playing: bool,
    /// Unix timestamp of the scrobble. `None` for the track currently playing.
    pub timestamp: Option<u64>,
    /// MusicBrainz recording id, when Last.fm knows it.
    pub mbid: Option<String>,
}

impl Track {
    /// URL of the first artwork variant of the given size class.
    pub fn image(&self, size: &ImageSize) -> Option<&str> {
        self.images
            .iter()
            .find(|image| &image.size == size)
            .map(|image| image.url.as_str())
    }

    pub fn scrobbled_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|ts| i64::try_from(ts).ok())
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}
