//! Resolve a Last.fm user's latest scrobble into cross-platform streaming
//! links and cover art.
//!
//! The pipeline fetches the most recent track from the Last.fm API, looks for
//! a Spotify link on the track's Last.fm page (or, failing that, for the
//! track on Apple Music through the album's buy links), hands that link to
//! song.link and merges everything into one [`Song`].

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod parsing;
pub mod resolver;
pub mod song;
pub mod streaming;
pub mod track;
pub mod r#trait;

pub use client::SongLinkClientImpl;
pub use config::{Config, Endpoints, TrackSelection};
pub use error::SongLinkError;
pub use parsing::SongLinkParser;
pub use r#trait::SongLinkClient;
pub use resolver::SongResolver;
pub use song::{CoverArt, LinkSource, Song, LASTFM_LINK_KEY};
pub use streaming::{PlatformLink, SongEntity, StreamingLinkSet};
pub use track::{Artwork, ImageSize, Track};

#[cfg(feature = "mock")]
pub use r#trait::MockSongLinkClient;

// Re-export scraper types for testing
pub use scraper::Html;

pub type Result<T> = std::result::Result<T, SongLinkError>;
