//! Last.fm JSON API payloads for `user.getrecenttracks`.

use crate::config::TrackSelection;
use crate::track::{Artwork, ImageSize, Track};
use crate::{Result, SongLinkError};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct ApiRecentTracksResponse {
    pub recenttracks: ApiRecentTracks,
}

#[derive(Deserialize)]
pub struct ApiRecentTracks {
    #[serde(default)]
    pub track: OneOrMany<ApiTrack>,
}

/// Last.fm collapses single-element lists into a bare object.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Deserialize)]
pub struct ApiTrack {
    pub name: String,
    pub artist: ApiTextField,
    pub album: ApiTextField,
    pub url: String,
    #[serde(default)]
    pub image: Vec<ApiImage>,
    #[serde(default)]
    pub mbid: Option<String>,
    pub date: Option<ApiDate>,
    #[serde(rename = "@attr")]
    pub attr: Option<ApiTrackAttr>,
}

#[derive(Deserialize)]
pub struct ApiTextField {
    #[serde(rename = "#text", default)]
    pub text: String,
}

#[derive(Deserialize)]
pub struct ApiImage {
    pub size: ImageSize,
    #[serde(rename = "#text", default)]
    pub text: String,
}

#[derive(Deserialize)]
pub struct ApiDate {
    pub uts: String,
}

#[derive(Deserialize)]
pub struct ApiTrackAttr {
    pub nowplaying: Option<String>,
}

/// Error body returned by the Last.fm API.
#[derive(Deserialize)]
pub struct ApiErrorResponse {
    pub error: i32,
    pub message: String,
}

impl From<ApiTrack> for Track {
    fn from(t: ApiTrack) -> Self {
        let now_playing = t
            .attr
            .as_ref()
            .and_then(|attr| attr.nowplaying.as_deref())
            == Some("true");

        Track {
            name: t.name,
            artist: t.artist.text,
            album: t.album.text,
            url: t.url,
            images: t
                .image
                .into_iter()
                .map(|image| Artwork {
                    size: image.size,
                    url: image.text,
                })
                .collect(),
            now_playing,
            timestamp: t.date.and_then(|date| date.uts.parse().ok()),
            mbid: t.mbid.filter(|mbid| !mbid.is_empty()),
        }
    }
}

/// Parse a `user.getrecenttracks` body into tracks, newest first.
///
/// Last.fm error bodies are turned into [`SongLinkError::Api`].
pub fn parse_api_recent_tracks_response(json: &str) -> Result<Vec<Track>> {
    if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(json) {
        return Err(SongLinkError::Api {
            code: error.error,
            message: error.message,
        });
    }

    let response: ApiRecentTracksResponse =
        serde_json::from_str(json).map_err(|e| SongLinkError::Parse(e.to_string()))?;

    Ok(response
        .recenttracks
        .track
        .into_vec()
        .into_iter()
        .map(Track::from)
        .collect())
}

/// Pick the most recent track according to the selection policy.
pub fn select_recent_track(tracks: Vec<Track>, selection: TrackSelection) -> Option<Track> {
    match selection {
        TrackSelection::IncludeNowPlaying => tracks.into_iter().next(),
        TrackSelection::SkipNowPlaying => tracks.into_iter().find(|t| !t.now_playing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TRACKS: &str = r##"{
        "recenttracks": {
            "track": [
                {
                    "artist": {"mbid": "", "#text": "grouptherapy. & Jadagrace"},
                    "streamable": "0",
                    "image": [
                        {"size": "small", "#text": "https://img/34s.png"},
                        {"size": "medium", "#text": "https://img/64s.png"},
                        {"size": "large", "#text": "https://img/174s.png"},
                        {"size": "extralarge", "#text": "https://img/300x300.png"}
                    ],
                    "mbid": "",
                    "album": {"mbid": "", "#text": "Brand New - Single"},
                    "name": "Brand New",
                    "@attr": {"nowplaying": "true"},
                    "url": "https://www.last.fm/music/grouptherapy.+&+Jadagrace/_/Brand+New"
                },
                {
                    "artist": {"mbid": "0b0c25f4-f31c-46a5-a4fb-ccbf53d663bd", "#text": "Jon Hopkins"},
                    "streamable": "0",
                    "image": [],
                    "mbid": "2868f938-9efb-4900-a151-062743f9f04e",
                    "album": {"mbid": "", "#text": "Immunity"},
                    "name": "Immunity",
                    "url": "https://www.last.fm/music/Jon+Hopkins/_/Immunity",
                    "date": {"uts": "1677426661", "#text": "26 Feb 2023, 15:51"}
                }
            ],
            "@attr": {"user": "someone", "totalPages": "100", "page": "1", "perPage": "1", "total": "100"}
        }
    }"##;

    #[test]
    fn test_parse_api_recent_tracks() {
        let tracks = parse_api_recent_tracks_response(TWO_TRACKS).unwrap();
        assert_eq!(tracks.len(), 2);

        let first = &tracks[0];
        assert_eq!(first.name, "Brand New");
        assert_eq!(first.artist, "grouptherapy. & Jadagrace");
        assert_eq!(first.album, "Brand New - Single");
        assert!(first.now_playing);
        assert_eq!(first.timestamp, None);
        assert_eq!(first.mbid, None);
        assert_eq!(first.images.len(), 4);
        assert_eq!(
            first.image(&ImageSize::Extralarge),
            Some("https://img/300x300.png")
        );

        let second = &tracks[1];
        assert!(!second.now_playing);
        assert_eq!(second.timestamp, Some(1677426661));
        assert_eq!(
            second.mbid.as_deref(),
            Some("2868f938-9efb-4900-a151-062743f9f04e")
        );
        assert!(second.scrobbled_at().is_some());
    }

    #[test]
    fn test_selection_policies() {
        let tracks = parse_api_recent_tracks_response(TWO_TRACKS).unwrap();

        let included =
            select_recent_track(tracks.clone(), TrackSelection::IncludeNowPlaying).unwrap();
        assert_eq!(included.name, "Brand New");

        let skipped = select_recent_track(tracks, TrackSelection::SkipNowPlaying).unwrap();
        assert_eq!(skipped.name, "Immunity");
    }

    #[test]
    fn test_only_now_playing_with_skip_policy_is_no_track() {
        let mut tracks = parse_api_recent_tracks_response(TWO_TRACKS).unwrap();
        tracks.truncate(1);
        assert!(select_recent_track(tracks, TrackSelection::SkipNowPlaying).is_none());
    }

    #[test]
    fn test_empty_track_list() {
        let json = r#"{"recenttracks": {"track": [], "@attr": {"user": "someone", "total": "0"}}}"#;
        let tracks = parse_api_recent_tracks_response(json).unwrap();
        assert!(tracks.is_empty());
        assert!(select_recent_track(tracks, TrackSelection::IncludeNowPlaying).is_none());
    }

    #[test]
    fn test_single_track_object() {
        let json = r##"{"recenttracks": {"track": {
            "name": "Immunity",
            "artist": {"#text": "Jon Hopkins"},
            "album": {"#text": "Immunity"},
            "url": "https://www.last.fm/music/Jon+Hopkins/_/Immunity",
            "image": [{"size": "mega", "#text": "https://img/mega.png"}],
            "date": {"uts": "1677426661"}
        }}}"##;
        let tracks = parse_api_recent_tracks_response(json).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(
            tracks[0].images[0].size,
            ImageSize::Other("mega".to_string())
        );
    }

    #[test]
    fn test_api_error_body() {
        let json = r#"{"error": 6, "message": "User not found"}"#;
        match parse_api_recent_tracks_response(json) {
            Err(SongLinkError::Api { code, message }) => {
                assert_eq!(code, 6);
                assert_eq!(message, "User not found");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let result = parse_api_recent_tracks_response("<html>not json</html>");
        assert!(matches!(result, Err(SongLinkError::Parse(_))));
    }
}
