//! song.link (Odesli) link aggregation payloads.

use crate::{Result, SongLinkError};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Entity namespaces consulted for artwork, in order of preference.
pub const ARTWORK_PROVIDER_PREFIXES: [&str; 2] = ["ITUNES_SONG::", "SPOTIFY_SONG::"];

/// Link to one song on one platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformLink {
    pub url: String,
    pub entity_unique_id: Option<String>,
    pub native_app_uri_mobile: Option<String>,
    pub native_app_uri_desktop: Option<String>,
}

/// Metadata song.link holds about one provider entity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongEntity {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub thumbnail_url: Option<String>,
    pub thumbnail_width: Option<u32>,
    pub thumbnail_height: Option<u32>,
    pub api_provider: Option<String>,
}

/// Cross-platform links for one song as returned by song.link.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingLinkSet {
    /// Entity the lookup URL resolved to.
    pub entity_unique_id: Option<String>,
    /// song.link landing page for the song.
    pub page_url: Option<String>,
    #[serde(default)]
    pub links_by_platform: BTreeMap<String, PlatformLink>,
    #[serde(default)]
    pub entities_by_unique_id: BTreeMap<String, SongEntity>,
}

impl StreamingLinkSet {
    /// Thumbnail of the first entity whose id starts with `prefix`.
    ///
    /// Entities are keyed in a sorted map, so among several matches the
    /// lexicographically smallest id wins. Entities without a thumbnail are
    /// skipped.
    pub fn thumbnail_for_prefix(&self, prefix: &str) -> Option<&str> {
        self.entities_by_unique_id
            .range(prefix.to_string()..)
            .take_while(|(id, _)| id.starts_with(prefix))
            .find_map(|(_, entity)| entity.thumbnail_url.as_deref())
    }

    /// Artwork URL following [`ARTWORK_PROVIDER_PREFIXES`].
    pub fn artwork_url(&self) -> Option<&str> {
        ARTWORK_PROVIDER_PREFIXES
            .iter()
            .find_map(|prefix| self.thumbnail_for_prefix(prefix))
    }

    /// Platform name to URL pairs.
    pub fn platform_urls(&self) -> impl Iterator<Item = (&str, &str)> {
        self.links_by_platform
            .iter()
            .map(|(platform, link)| (platform.as_str(), link.url.as_str()))
    }
}

/// Parse a song.link `/v1-alpha.1/links` response.
pub fn parse_streaming_links_response(json: &str) -> Result<StreamingLinkSet> {
    serde_json::from_str(json).map_err(|e| SongLinkError::Parse(format!("song.link: {e}")))
}
