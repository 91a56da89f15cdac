/// External API clients module
use crate::config::AppConfig;
use crate::domain::{Camera, MediaFilter, Rover};
use crate::errors::{UpstreamError, UpstreamResult};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// HTTP client wrapper with common configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> UpstreamResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("nasa-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// NASA APIs client (APOD, Mars rover photos, NeoWs, EPIC, image library)
#[derive(Clone)]
pub struct NasaClient {
    http_client: HttpClient,
    base_url: String,
    images_url: String,
    api_key: String,
}

impl NasaClient {
    pub fn new(config: &AppConfig) -> UpstreamResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url: config.nasa_base_url.clone(),
            images_url: config.nasa_images_url.clone(),
            api_key: config.nasa_api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Issue a single GET and decode the JSON body, failing on non-success status
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> UpstreamResult<Value> {
        debug!(%url, "requesting upstream");
        let resp = self
            .http_client
            .get_client()
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(redact)?;

        if !resp.status().is_success() {
            return Err(UpstreamError::status(resp.status()));
        }

        let json = resp.json().await.map_err(redact)?;
        Ok(json)
    }

    fn keyed<'a>(&self, mut query: Vec<(&'a str, String)>) -> Vec<(&'a str, String)> {
        query.push(("api_key", self.api_key.clone()));
        query
    }

    /// Fetch Astronomy Picture of the Day
    pub async fn fetch_apod(&self) -> UpstreamResult<Value> {
        let url = format!("{}/planetary/apod", self.base_url);
        let query = self.keyed(vec![("thumbs", "true".to_string())]);
        self.get_json(&url, &query).await
    }

    /// Fetch rover photos for a sol, optionally narrowed to one camera
    pub async fn fetch_mars_photos(
        &self,
        rover: Rover,
        sol: u32,
        camera: Camera,
    ) -> UpstreamResult<Value> {
        let url = format!(
            "{}/mars-photos/api/v1/rovers/{}/photos",
            self.base_url,
            rover.as_str()
        );
        let mut query = vec![("sol", sol.to_string())];
        if let Some(camera) = camera.filter() {
            query.push(("camera", camera.to_string()));
        }
        self.get_json(&url, &self.keyed(query)).await
    }

    /// Fetch Near Earth Objects feed for an inclusive date window
    pub async fn fetch_neo_feed(&self, start_date: &str, end_date: &str) -> UpstreamResult<Value> {
        let url = format!("{}/neo/rest/v1/feed", self.base_url);
        let query = self.keyed(vec![
            ("start_date", start_date.to_string()),
            ("end_date", end_date.to_string()),
        ]);
        self.get_json(&url, &query).await
    }

    /// Fetch EPIC natural-color images; `date_path` is `YYYY/MM/DD`
    pub async fn fetch_epic_images(&self, date_path: Option<&str>) -> UpstreamResult<Value> {
        let url = match date_path {
            Some(path) => format!("{}/EPIC/api/natural/date/{}", self.base_url, path),
            None => format!("{}/EPIC/api/natural", self.base_url),
        };
        self.get_json(&url, &self.keyed(Vec::new())).await
    }

    /// Search the image and video library. This host takes no credential.
    pub async fn search_library(
        &self,
        query: &str,
        media_type: MediaFilter,
        page: u32,
        page_size: u32,
    ) -> UpstreamResult<Value> {
        let url = format!("{}/search", self.images_url);
        let mut params = vec![
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];
        if let Some(media) = media_type.filter() {
            params.push(("media_type", media.to_string()));
        }
        self.get_json(&url, &params).await
    }
}

/// Drop the request URL from transport errors; it carries the credential.
fn redact(err: reqwest::Error) -> UpstreamError {
    UpstreamError::Transport(err.without_url())
}
