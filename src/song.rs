use crate::streaming::StreamingLinkSet;
use crate::track::{ImageSize, Track};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key under which the Last.fm page of the track is always stored.
pub const LASTFM_LINK_KEY: &str = "lastfm";

/// Which lookup produced the link handed to song.link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkSource {
    /// Spotify link embedded in the Last.fm track page
    Spotify,
    /// Apple Music track found through the album buy links
    AppleMusic,
}

/// Cover art in the sizes exposed to consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverArt {
    pub small: String,
    pub medium: String,
    pub large: String,
    /// Only set when song.link returned artwork.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extralarge: Option<String>,
}

/// The resolved song record.
///
/// Created from a scrobbled [`Track`] and then enriched with whatever
/// song.link returned. The Last.fm link is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub now_playing: bool,
    /// Platform name to URL, sorted by platform name.
    pub links: BTreeMap<String, String>,
    pub cover_art: CoverArt,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_source: Option<LinkSource>,
}

impl Song {
    /// Seed a song from scrobble metadata.
    ///
    /// Last.fm image sizes are shifted one class down: its `medium` becomes
    /// our `small`, `large` becomes `medium` and `extralarge` becomes `large`.
    pub fn from_track(track: &Track) -> Self {
        let image = |size: ImageSize| track.image(&size).unwrap_or_default().to_string();

        let mut links = BTreeMap::new();
        links.insert(LASTFM_LINK_KEY.to_string(), track.url.clone());

        Self {
            title: track.name.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            now_playing: track.now_playing,
            links,
            cover_art: CoverArt {
                small: image(ImageSize::Medium),
                medium: image(ImageSize::Large),
                large: image(ImageSize::Extralarge),
                extralarge: None,
            },
            link_source: None,
        }
    }

    /// Fold song.link results into the record.
    ///
    /// Every platform link is added except one named like the reserved
    /// Last.fm key. Extra-large artwork is set only when song.link has some.
    pub fn merge_streaming_links(&mut self, streaming: &StreamingLinkSet, source: LinkSource) {
        for (platform, url) in streaming.platform_urls() {
            if platform == LASTFM_LINK_KEY {
                log::debug!("Ignoring song.link entry for reserved key '{platform}'");
                continue;
            }
            self.links.insert(platform.to_string(), url.to_string());
        }

        match streaming.artwork_url() {
            Some(url) => self.cover_art.extralarge = Some(url.to_string()),
            None => log::debug!("No song.link artwork for '{}'", self.title),
        }

        self.link_source = Some(source);
    }

    /// Last.fm page of the track.
    pub fn lastfm_url(&self) -> &str {
        self.links
            .get(LASTFM_LINK_KEY)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
