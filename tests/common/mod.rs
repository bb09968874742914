#![allow(dead_code)]
use async_trait::async_trait;
use http_client::{Error, HttpClient, Request, Response};
use http_types::{StatusCode, Url};
use scrobble_links::{Config, Endpoints, SongLinkClientImpl};
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};

pub const LASTFM_API: &str = "http://ws.lastfm.test/2.0/";
pub const LASTFM_WEB: &str = "http://www.lastfm.test";
pub const APPLE_MUSIC: &str = "http://music.apple.test";
pub const SONGLINK_API: &str = "http://api.songlink.test";

pub const TRACK_PAGE: &str = "http://www.lastfm.test/music/grouptherapy.+&+Jadagrace/_/Brand+New";
pub const BUYLINKS_PAGE: &str = "http://www.lastfm.test/music/grouptherapy.%20%26%20Jadagrace/Brand%20New%20-%20Single/+partial/buylinks";
pub const APPLE_MUSIC_ALBUM_PAGE: &str = "http://music.apple.test/album/some-album/1667893410";
pub const SONGLINK_LINKS: &str = "http://api.songlink.test/v1-alpha.1/links";

/// Read a file from `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{name}"))
        .unwrap_or_else(|e| panic!("Could not read test fixture {name}: {e}"))
}

#[derive(Debug, Clone)]
struct ScriptedResponse {
    status: u16,
    body: String,
    location: Option<String>,
}

/// In-memory [`HttpClient`] answering from a URL → response script.
///
/// Routes match on the URL without its query string. Unknown URLs get a 404.
/// Every requested URL, query included, is recorded in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHttpClient {
    routes: Arc<Mutex<HashMap<String, ScriptedResponse>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, url: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes.lock().unwrap().insert(
            route_key(&Url::parse(url).unwrap()),
            ScriptedResponse {
                status,
                body: body.into(),
                location: None,
            },
        );
        self
    }

    pub fn redirect(self, url: &str, location: &str) -> Self {
        self.routes.lock().unwrap().insert(
            route_key(&Url::parse(url).unwrap()),
            ScriptedResponse {
                status: 301,
                body: String::new(),
                location: Some(location.to_string()),
            },
        );
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests whose URL, query excluded, equals `url`.
    pub fn requests_to(&self, url: &str) -> Vec<Url> {
        let key = route_key(&Url::parse(url).unwrap());
        self.requests()
            .iter()
            .map(|r| Url::parse(r).unwrap())
            .filter(|r| route_key(r) == key)
            .collect()
    }
}

fn route_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn send(&self, req: Request) -> Result<Response, Error> {
        self.requests.lock().unwrap().push(req.url().to_string());

        let scripted = self
            .routes
            .lock()
            .unwrap()
            .get(&route_key(req.url()))
            .cloned();

        let Some(scripted) = scripted else {
            let mut response = Response::new(StatusCode::NotFound);
            response.set_body("not found");
            return Ok(response);
        };

        let mut response = Response::new(scripted.status);
        if let Some(location) = scripted.location {
            response.insert_header("location", location);
        }
        response.set_body(scripted.body);
        Ok(response)
    }
}

pub fn test_config() -> Config {
    Config::new("test-api-key", "someone")
        .unwrap()
        .with_endpoints(Endpoints {
            lastfm_api: LASTFM_API.to_string(),
            lastfm_web: LASTFM_WEB.to_string(),
            apple_music: APPLE_MUSIC.to_string(),
            songlink_api: SONGLINK_API.to_string(),
        })
}

pub fn create_test_client(http: &ScriptedHttpClient) -> SongLinkClientImpl {
    SongLinkClientImpl::new(Box::new(http.clone()), test_config())
}
