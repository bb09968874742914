use crate::{Result, SongLinkError};
use std::env;

/// Environment variable holding the Last.fm API key.
pub const API_KEY_VAR: &str = "LASTFM_API_KEY";
/// Environment variable holding the Last.fm username.
pub const USER_VAR: &str = "LASTFM_USER";
/// Optional two-letter country code for song.link and Apple Music lookups.
pub const COUNTRY_VAR: &str = "SONGLINK_COUNTRY";

// Names used by older `.env` files.
const LEGACY_API_KEY_VAR: &str = "API_KEY";
const LEGACY_USER_VAR: &str = "USER_ID";

/// How the most recent track is picked from the recent tracks list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackSelection {
    /// Take the first entry, even when it is the track currently playing.
    #[default]
    IncludeNowPlaying,
    /// Take the first entry that has finished playing.
    SkipNowPlaying,
}

impl TrackSelection {
    /// Number of entries to request from `user.getrecenttracks`.
    ///
    /// Last.fm normally returns the now-playing entry on top of `limit`
    /// scrobbles. [`TrackSelection::SkipNowPlaying`] asks for one more in
    /// case the now-playing entry is counted towards the limit.
    pub fn request_limit(self) -> u32 {
        match self {
            TrackSelection::IncludeNowPlaying => 1,
            TrackSelection::SkipNowPlaying => 2,
        }
    }
}

/// Base URLs of every upstream service.
///
/// The defaults point at the production services; tests swap them for
/// local addresses served by a scripted HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Last.fm JSON API root
    pub lastfm_api: String,
    /// Last.fm website, used for album buy-link partials
    pub lastfm_web: String,
    /// Apple Music website
    pub apple_music: String,
    /// song.link (Odesli) API root
    pub songlink_api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            lastfm_api: "https://ws.audioscrobbler.com/2.0/".to_string(),
            lastfm_web: "https://www.last.fm".to_string(),
            apple_music: "https://music.apple.com".to_string(),
            songlink_api: "https://api.song.link".to_string(),
        }
    }
}

/// Configuration loaded once at startup and handed to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Last.fm API key
    pub api_key: String,
    /// Last.fm username whose scrobbles are looked up
    pub user: String,
    /// Now-playing policy for picking the most recent track
    pub selection: TrackSelection,
    /// Country passed to song.link and Apple Music. `None` lets both
    /// services default to the US catalog, which has the broadest coverage.
    pub country: Option<String>,
    /// Upstream base URLs
    pub endpoints: Endpoints,
}

impl Config {
    /// Create a configuration with default endpoints and selection policy.
    ///
    /// Returns [`SongLinkError::Config`] when either value is empty.
    pub fn new(api_key: impl Into<String>, user: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let user = user.into();

        if api_key.trim().is_empty() {
            return Err(SongLinkError::Config(format!("{API_KEY_VAR} is empty")));
        }
        if user.trim().is_empty() {
            return Err(SongLinkError::Config(format!("{USER_VAR} is empty")));
        }

        Ok(Self {
            api_key,
            user,
            selection: TrackSelection::default(),
            country: None,
            endpoints: Endpoints::default(),
        })
    }

    /// Load configuration from the process environment.
    ///
    /// Reads `LASTFM_API_KEY` and `LASTFM_USER` (falling back to `API_KEY`
    /// and `USER_ID`) plus the optional `SONGLINK_COUNTRY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |primary: &str, legacy: &str| {
            lookup(primary)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| lookup(legacy).filter(|v| !v.trim().is_empty()))
        };

        let api_key = read(API_KEY_VAR, LEGACY_API_KEY_VAR).ok_or_else(|| {
            SongLinkError::Config(format!("{API_KEY_VAR} environment variable not set"))
        })?;
        let user = read(USER_VAR, LEGACY_USER_VAR).ok_or_else(|| {
            SongLinkError::Config(format!("{USER_VAR} environment variable not set"))
        })?;

        let mut config = Self::new(api_key, user)?;
        config.country = lookup(COUNTRY_VAR).and_then(|c| normalize_country(&c));
        Ok(config)
    }

    pub fn with_selection(mut self, selection: TrackSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_country(mut self, country: Option<&str>) -> Self {
        self.country = country.and_then(normalize_country);
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

fn normalize_country(raw: &str) -> Option<String> {
    let country = raw.trim();
    if country.is_empty() {
        None
    } else {
        Some(country.to_ascii_lowercase())
    }
}
