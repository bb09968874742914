use crate::api::{parse_api_recent_tracks_response, select_recent_track, ApiErrorResponse};
use crate::headers;
use crate::parsing::SongLinkParser;
use crate::streaming::parse_streaming_links_response;
use crate::{Config, Result, SongLinkClient, SongLinkError, StreamingLinkSet, Track};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, StatusCode, Url};
use scraper::Html;
use std::sync::Arc;

const MAX_REDIRECTS: u32 = 5;

/// Kind of resource requested, which decides the request headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Page,
    Api,
}

/// HTTP implementation of [`SongLinkClient`].
///
/// Talks to the Last.fm API, the Last.fm and Apple Music websites and the
/// song.link API through any [`HttpClient`].
///
/// # Examples
///
/// ```rust,no_run
/// use scrobble_links::{Config, SongLinkClient, SongLinkClientImpl};
///
/// # tokio_test::block_on(async {
/// let config = Config::new("api-key", "someone")?;
/// let http_client = http_client::native::NativeClient::new();
/// let client = SongLinkClientImpl::new(Box::new(http_client), config);
///
/// if let Some(track) = client.get_recent_track().await? {
///     println!("{} - {}", track.artist, track.name);
/// }
/// # Ok::<(), scrobble_links::SongLinkError>(())
/// # });
/// ```
#[derive(Clone)]
pub struct SongLinkClientImpl {
    client: Arc<dyn HttpClient + Send + Sync>,
    config: Config,
    parser: SongLinkParser,
}

impl SongLinkClientImpl {
    pub fn new(client: Box<dyn HttpClient + Send + Sync>, config: Config) -> Self {
        Self {
            client: Arc::from(client),
            config,
            parser: SongLinkParser::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn recent_tracks_url(&self) -> Result<Url> {
        let mut url = parse_url(&self.config.endpoints.lastfm_api)?;
        url.query_pairs_mut()
            .append_pair("method", "user.getrecenttracks")
            .append_pair("format", "json")
            .append_pair("api_key", &self.config.api_key)
            .append_pair("limit", &self.config.selection.request_limit().to_string())
            .append_pair("user", &self.config.user);
        Ok(url)
    }

    fn buylinks_url(&self, artist: &str, album: &str) -> Result<Url> {
        parse_url(&format!(
            "{}/music/{}/{}/+partial/buylinks",
            self.config.endpoints.lastfm_web.trim_end_matches('/'),
            urlencoding::encode(artist),
            urlencoding::encode(album)
        ))
    }

    fn apple_music_album_url(&self, album_id: &str) -> Result<Url> {
        let country = self
            .config
            .country
            .as_deref()
            .map(|c| format!("/{c}"))
            .unwrap_or_default();
        parse_url(&format!(
            "{}{country}/album/some-album/{}",
            self.config.endpoints.apple_music.trim_end_matches('/'),
            urlencoding::encode(album_id)
        ))
    }

    fn streaming_links_url(&self, song_url: &str) -> Result<Url> {
        let mut url = parse_url(&format!(
            "{}/v1-alpha.1/links",
            self.config.endpoints.songlink_api.trim_end_matches('/')
        ))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("url", song_url);
            if let Some(country) = &self.config.country {
                query.append_pair("userCountry", &country.to_ascii_uppercase());
            }
        }
        Ok(url)
    }

    /// GET a URL, following redirects, and return the final status and body.
    async fn get(&self, url: Url, kind: RequestKind) -> Result<(StatusCode, String)> {
        let mut url = url;

        for _ in 0..=MAX_REDIRECTS {
            log::debug!("GET {}", self.redact(&url));

            let mut request = Request::new(Method::Get, url.clone());
            match kind {
                RequestKind::Page => headers::add_page_headers(&mut request),
                RequestKind::Api => headers::add_api_headers(&mut request),
            }

            let mut response = self
                .client
                .send(request)
                .await
                .map_err(|e| SongLinkError::Http(e.to_string()))?;

            let status = response.status();
            if status.is_redirection() {
                if let Some(location) = response.header("location").and_then(|h| h.get(0)) {
                    let next = url.join(location.as_str()).map_err(|e| {
                        SongLinkError::Parse(format!("redirect location '{location}': {e}"))
                    })?;
                    log::debug!("Following redirect to {}", self.redact(&next));
                    url = next;
                    continue;
                }
            }

            let body = response
                .body_string()
                .await
                .map_err(|e| SongLinkError::Http(e.to_string()))?;

            log::debug!("Response: {} status, {} chars", status, body.len());
            return Ok((status, body));
        }

        Err(SongLinkError::Http("Too many redirects".to_string()))
    }

    /// GET a URL and fail on any non-success status.
    async fn get_ok(&self, url: Url, kind: RequestKind) -> Result<String> {
        let (status, body) = self.get(url.clone(), kind).await?;
        if !status.is_success() {
            return Err(SongLinkError::Http(format!(
                "{} returned status {}",
                self.redact(&url),
                status
            )));
        }
        Ok(body)
    }

    fn redact(&self, url: &Url) -> String {
        url.as_str().replace(&self.config.api_key, "<api_key>")
    }
}

#[async_trait(?Send)]
impl SongLinkClient for SongLinkClientImpl {
    async fn get_recent_track(&self) -> Result<Option<Track>> {
        let (status, body) = self
            .get(self.recent_tracks_url()?, RequestKind::Api)
            .await?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(SongLinkError::Api {
                    code: error.error,
                    message: error.message,
                });
            }
            return Err(SongLinkError::Http(format!(
                "Last.fm API returned status {status}"
            )));
        }

        let tracks = parse_api_recent_tracks_response(&body)?;
        log::debug!("Last.fm returned {} recent tracks", tracks.len());

        Ok(select_recent_track(tracks, self.config.selection))
    }

    async fn find_spotify_link(&self, track_url: &str) -> Result<Option<String>> {
        let body = self.get_ok(parse_url(track_url)?, RequestKind::Page).await?;
        let document = Html::parse_document(&body);
        Ok(self.parser.parse_spotify_link(&document))
    }

    async fn find_apple_music_album_id(
        &self,
        artist: &str,
        album: &str,
    ) -> Result<Option<String>> {
        let body = self
            .get_ok(self.buylinks_url(artist, album)?, RequestKind::Page)
            .await?;
        let document = Html::parse_fragment(&body);

        let Some(link) = self.parser.parse_itunes_buy_link(&document) else {
            log::debug!("No iTunes buy link for '{album}' by '{artist}'");
            return Ok(None);
        };

        Ok(self.parser.parse_apple_music_album_id(&link))
    }

    async fn find_apple_music_track_link(
        &self,
        album_id: &str,
        title: &str,
    ) -> Result<Option<String>> {
        let body = self
            .get_ok(self.apple_music_album_url(album_id)?, RequestKind::Page)
            .await?;
        let document = Html::parse_document(&body);
        self.parser.parse_apple_music_track_link(&document, title)
    }

    async fn get_streaming_links(&self, song_url: &str) -> Result<StreamingLinkSet> {
        let body = self
            .get_ok(self.streaming_links_url(song_url)?, RequestKind::Api)
            .await?;
        parse_streaming_links_response(&body)
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| SongLinkError::Parse(format!("invalid URL '{url}': {e}")))
}
