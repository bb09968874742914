use thiserror::Error;

/// Error types for scrobble link resolution.
///
/// Only unexpected failures are errors. Legitimate absence (no scrobbles yet,
/// no Spotify link on the track page, no iTunes buy link, no matching Apple
/// Music track) is reported as `Ok(None)` by the lookups instead.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use scrobble_links::{Config, SongLinkError};
///
/// match Config::from_env() {
///     Ok(config) => println!("Resolving songs for {}", config.user),
///     Err(SongLinkError::Config(msg)) => eprintln!("Configuration error: {}", msg),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum SongLinkError {
    /// HTTP/network related errors.
    ///
    /// This includes connection failures, DNS errors, too many redirects and
    /// responses with a non-success status code.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse an upstream response.
    ///
    /// This happens when Last.fm, Apple Music or song.link change their JSON
    /// or HTML structure, or when a URL cannot be parsed.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Error body returned by the Last.fm API.
    ///
    /// Last.fm reports failures such as an unknown user or an invalid API key
    /// as `{"error": <code>, "message": "..."}`, sometimes with a 200 status.
    #[error("Last.fm API error {code}: {message}")]
    Api {
        /// Last.fm error code (e.g. 6 for "User not found", 10 for an invalid API key)
        code: i32,
        /// Human readable message from Last.fm
        message: String,
    },

    /// Missing or empty configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}
