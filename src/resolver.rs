//! The resolution pipeline: latest scrobble to enriched [`Song`].
//!
//! ```text
//! Start -> TrackFetched -> NoTrack
//!                       -> LinkCandidateSearch -> DirectLinkFound ---------------> Aggregated | AggregationSkipped -> Assembled
//!                                              -> FallbackSearch -> FallbackLinkFound
//!                                                                -> FallbackExhausted
//! ```
//!
//! Failures on the direct path propagate. Failures anywhere on the fallback
//! path (album buy links, Apple Music, or the song.link call that follows)
//! are logged and dropped so the record is still emitted with its Last.fm
//! link.

use crate::song::{LinkSource, Song};
use crate::{Result, SongLinkClient, Track};

/// Runs the resolution pipeline against a [`SongLinkClient`].
///
/// # Examples
///
/// ```rust,no_run
/// use scrobble_links::{Config, SongLinkClientImpl, SongResolver};
///
/// # tokio_test::block_on(async {
/// let config = Config::from_env()?;
/// let http_client = http_client::native::NativeClient::new();
/// let resolver = SongResolver::new(SongLinkClientImpl::new(Box::new(http_client), config));
///
/// match resolver.resolve().await? {
///     Some(song) => println!("{} - {}: {:?}", song.artist, song.title, song.links),
///     None => println!("no track scrobbled yet"),
/// }
/// # Ok::<(), scrobble_links::SongLinkError>(())
/// # });
/// ```
pub struct SongResolver<C> {
    client: C,
}

impl<C: SongLinkClient> SongResolver<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetch the most recent track and resolve it.
    ///
    /// Returns `Ok(None)` when there is no track; no further requests are
    /// made in that case.
    pub async fn resolve(&self) -> Result<Option<Song>> {
        let Some(track) = self.client.get_recent_track().await? else {
            log::info!("No track scrobbled yet");
            return Ok(None);
        };

        log::debug!(
            "Track fetched: '{}' by '{}' (now playing: {})",
            track.name,
            track.artist,
            track.now_playing
        );

        self.resolve_track(&track).await.map(Some)
    }

    /// Enrich an already fetched track with streaming links and artwork.
    pub async fn resolve_track(&self, track: &Track) -> Result<Song> {
        let mut song = Song::from_track(track);

        log::debug!("Searching track page for a Spotify link");
        if let Some(spotify_link) = self.client.find_spotify_link(&track.url).await? {
            log::info!("Direct link found: {spotify_link}");
            let streaming = self.client.get_streaming_links(&spotify_link).await?;
            song.merge_streaming_links(&streaming, LinkSource::Spotify);
            log::debug!("Aggregated {} platform links", streaming.links_by_platform.len());
            return Ok(song);
        }

        log::debug!("No Spotify link on track page, trying album fallback");
        match self.resolve_fallback(track, &mut song).await {
            Ok(true) => log::debug!("Aggregated links through Apple Music"),
            Ok(false) => log::debug!("Fallback exhausted, aggregation skipped"),
            Err(e) => log::debug!("Album fallback failed, aggregation skipped: {e}"),
        }

        Ok(song)
    }

    /// Apple Music path. `Ok(false)` when some lookup came back empty.
    async fn resolve_fallback(&self, track: &Track, song: &mut Song) -> Result<bool> {
        if track.album.trim().is_empty() {
            log::debug!("Track has no album, skipping buy-link lookup");
            return Ok(false);
        }

        let Some(album_id) = self
            .client
            .find_apple_music_album_id(&track.artist, &track.album)
            .await?
        else {
            return Ok(false);
        };
        log::debug!("Apple Music album id: {album_id}");

        let Some(track_link) = self
            .client
            .find_apple_music_track_link(&album_id, &track.name)
            .await?
        else {
            log::debug!("'{}' not listed on Apple Music album {album_id}", track.name);
            return Ok(false);
        };
        log::info!("Fallback link found: {track_link}");

        let streaming = self.client.get_streaming_links(&track_link).await?;
        song.merge_streaming_links(&streaming, LinkSource::AppleMusic);
        Ok(true)
    }
}
