use crate::{Result, StreamingLinkSet, Track};
use async_trait::async_trait;

/// Every network lookup the resolution pipeline needs.
///
/// [`SongLinkClientImpl`](crate::SongLinkClientImpl) implements this over
/// HTTP. The pipeline in [`SongResolver`](crate::SongResolver) only talks to
/// this trait, so it can be driven by a mock in tests.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockSongLinkClient`
/// that implements this trait using the `mockall` library.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait(?Send)]
pub trait SongLinkClient {
    /// Fetch the configured user's most recent track.
    ///
    /// `Ok(None)` means the user has not scrobbled anything yet (or, when
    /// now-playing entries are skipped, nothing has finished playing).
    async fn get_recent_track(&self) -> Result<Option<Track>>;

    /// Find the Spotify link embedded in a Last.fm track page.
    async fn find_spotify_link(&self, track_url: &str) -> Result<Option<String>>;

    /// Find the Apple Music catalog id of an album through its Last.fm buy links.
    async fn find_apple_music_album_id(&self, artist: &str, album: &str)
        -> Result<Option<String>>;

    /// Find the Apple Music URL of the track titled `title` on an album.
    async fn find_apple_music_track_link(
        &self,
        album_id: &str,
        title: &str,
    ) -> Result<Option<String>>;

    /// Resolve one streaming URL into links on every platform song.link knows.
    async fn get_streaming_links(&self, song_url: &str) -> Result<StreamingLinkSet>;
}
