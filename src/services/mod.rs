/// Request shaping layer: per-endpoint post-processing of upstream payloads
use crate::clients::NasaClient;
use crate::domain::{Camera, MediaFilter, Rover};
use crate::errors::{UpstreamError, UpstreamResult};
use crate::utils::{date_to_path, default_neo_window, format_date};
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use tracing::info;

/// Upper bound on rover photos relayed per request
pub const MAX_ROVER_PHOTOS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarsPhotosQuery {
    pub rover: Rover,
    pub sol: u32,
    pub camera: Camera,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeoWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl NeoWindow {
    /// Explicit bounds are used verbatim; if either is missing the window is
    /// today..today+7.
    pub fn resolve(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => Self { start, end },
            _ => {
                let (start, end) = default_neo_window(today);
                Self { start, end }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub media_type: MediaFilter,
    pub page: u32,
    pub page_size: u32,
}

/// NASA data service
pub struct NasaService {
    client: NasaClient,
}

impl NasaService {
    pub fn new(client: NasaClient) -> Self {
        Self { client }
    }

    /// Astronomy Picture of the Day, relayed as-is
    pub async fn apod(&self) -> UpstreamResult<Value> {
        self.client.fetch_apod().await
    }

    pub async fn mars_photos(&self, query: MarsPhotosQuery) -> UpstreamResult<Value> {
        let payload = self
            .client
            .fetch_mars_photos(query.rover, query.sol, query.camera)
            .await?;
        truncate_photos(payload, MAX_ROVER_PHOTOS)
    }

    pub async fn neo_feed(&self, window: NeoWindow) -> UpstreamResult<Value> {
        let start = format_date(window.start);
        let end = format_date(window.end);
        info!(%start, %end, "fetching NEO feed");
        self.client.fetch_neo_feed(&start, &end).await
    }

    /// Resolve the window against the current UTC date, then fetch
    pub async fn neo_feed_from(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> UpstreamResult<Value> {
        let today = Utc::now().date_naive();
        self.neo_feed(NeoWindow::resolve(start, end, today)).await
    }

    pub async fn epic_images(&self, date: Option<&str>) -> UpstreamResult<Value> {
        let date_path = date.map(date_to_path);
        let payload = self.client.fetch_epic_images(date_path.as_deref()).await?;
        attach_epic_urls(payload, self.client.base_url(), self.client.api_key())
    }

    pub async fn search(&self, query: &SearchQuery) -> UpstreamResult<Value> {
        self.client
            .search_library(&query.text, query.media_type, query.page, query.page_size)
            .await
    }
}

/// Keep the first `limit` entries of `photos`, leaving every other field untouched
pub fn truncate_photos(mut payload: Value, limit: usize) -> UpstreamResult<Value> {
    let photos = payload
        .get_mut("photos")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| UpstreamError::UnexpectedShape("missing photos array".into()))?;
    photos.truncate(limit);
    Ok(payload)
}

/// Display URL for one EPIC record, derived from its capture date and image name
pub fn epic_image_url(base_url: &str, api_key: &str, date: &str, image: &str) -> String {
    let day = date.split(' ').next().unwrap_or(date);
    format!(
        "{}/EPIC/archive/natural/{}/png/{}.png?api_key={}",
        base_url,
        date_to_path(day),
        image,
        api_key
    )
}

/// Add an `imageUrl` to every EPIC record
pub fn attach_epic_urls(mut payload: Value, base_url: &str, api_key: &str) -> UpstreamResult<Value> {
    let records = payload
        .as_array_mut()
        .ok_or_else(|| UpstreamError::UnexpectedShape("expected an array of EPIC images".into()))?;

    for record in records.iter_mut() {
        let date = record.get("date").and_then(Value::as_str);
        let image = record.get("image").and_then(Value::as_str);
        let url = match (date, image) {
            (Some(date), Some(image)) => epic_image_url(base_url, api_key, date, image),
            _ => {
                return Err(UpstreamError::UnexpectedShape(
                    "EPIC record without date or image".into(),
                ))
            }
        };
        if let Some(obj) = record.as_object_mut() {
            obj.insert("imageUrl".to_string(), Value::String(url));
        }
    }

    Ok(payload)
}
