//! HTML parsing utilities for Last.fm and Apple Music pages.
//!
//! Every function here is pure: it takes an already fetched page and returns
//! what it found. The selectors depend on markup owned by third parties, so
//! absence is reported as `None` rather than as an error.

use crate::{Result, SongLinkError};
use http_types::Url;
use scraper::{Html, Selector};
use serde::Deserialize;

/// Spotify deep link on a Last.fm track page.
const SPOTIFY_PLAYLINK_SELECTOR: &str = ".play-this-track-playlink--spotify";
/// iTunes entry of a Last.fm album buy-links partial.
const ITUNES_BUYLINK_SELECTOR: &str = "[data-analytics-label=\"itunes\"]";
/// Structured album data embedded in an Apple Music album page.
const APPLE_MUSIC_ALBUM_SCHEMA_SELECTOR: &str = "script#schema\\:music-album";

/// Parser for the pages visited while looking for a canonical link.
///
/// Stateless; it exists so the client can hold one and tests can call the
/// same methods on fixtures.
#[derive(Debug, Clone, Default)]
pub struct SongLinkParser;

#[derive(Deserialize)]
struct AppleMusicAlbumSchema {
    #[serde(default)]
    tracks: Vec<AppleMusicSchemaTrack>,
}

#[derive(Deserialize)]
struct AppleMusicSchemaTrack {
    name: Option<String>,
    url: Option<String>,
}

impl SongLinkParser {
    pub fn new() -> Self {
        Self
    }

    /// Extract the Spotify link from a Last.fm track page.
    pub fn parse_spotify_link(&self, document: &Html) -> Option<String> {
        first_href(document, SPOTIFY_PLAYLINK_SELECTOR)
    }

    /// Extract the iTunes store link from a Last.fm album buy-links partial.
    pub fn parse_itunes_buy_link(&self, document: &Html) -> Option<String> {
        first_href(document, ITUNES_BUYLINK_SELECTOR)
    }

    /// Pull the Apple Music catalog id out of an iTunes store link.
    ///
    /// `https://itunes.apple.com/us/album/id1667893410?app=itunes` and
    /// `https://itunes.apple.com/us/album/brand-new/id1667893410` both yield
    /// `1667893410`. Unparseable links, non-album links and non-numeric ids
    /// yield `None`.
    pub fn parse_apple_music_album_id(&self, link: &str) -> Option<String> {
        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(e) => {
                log::debug!("Unparseable iTunes link '{link}': {e}");
                return None;
            }
        };

        let path = url.path();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some(album) = segments.iter().position(|segment| *segment == "album") else {
            log::debug!("No album in iTunes link path '{path}'");
            return None;
        };

        // `/album/id<digits>`, else `/album/<slug>/id<digits>`
        let id = segments
            .get(album + 1)
            .and_then(|segment| catalog_id(segment))
            .or_else(|| segments[album + 1..].last().and_then(|s| catalog_id(s)));

        let Some(id) = id else {
            log::debug!("No album id in iTunes link path '{path}'");
            return None;
        };

        Some(id.to_string())
    }

    /// Find the URL of the track named `title` on an Apple Music album page.
    ///
    /// The title has to match exactly. A page without the schema script or
    /// without a matching track yields `Ok(None)`; a schema script that is
    /// not valid JSON is a [`SongLinkError::Parse`].
    pub fn parse_apple_music_track_link(
        &self,
        document: &Html,
        title: &str,
    ) -> Result<Option<String>> {
        let selector = Selector::parse(APPLE_MUSIC_ALBUM_SCHEMA_SELECTOR).unwrap();
        let Some(script) = document.select(&selector).next() else {
            log::debug!("Apple Music album page has no schema script");
            return Ok(None);
        };

        let json = script.text().collect::<String>();
        let schema: AppleMusicAlbumSchema = serde_json::from_str(&json)
            .map_err(|e| SongLinkError::Parse(format!("Apple Music album schema: {e}")))?;

        log::debug!("Apple Music album lists {} tracks", schema.tracks.len());

        Ok(schema
            .tracks
            .into_iter()
            .filter(|track| track.name.as_deref() == Some(title))
            .find_map(|track| track.url))
    }
}

/// Digits of an `id<digits>` path segment.
fn catalog_id(segment: &str) -> Option<&str> {
    segment
        .strip_prefix("id")
        .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
}

fn first_href(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}
