//! Client-side data hooks over the HTTP facade.
//!
//! A [`Hook`] owns the last fetched value, a loading flag and an error message.
//! Every fetch takes a generation [`Ticket`]; only the newest ticket may write
//! its result, so slow responses to superseded parameters are dropped.
use crate::domain::{
    ApodRecord, EpicImage, Health, MarsPhotosPage, MarsPhoto, NeoFeed, SearchCollection,
    SearchResponse,
};
use crate::errors::ErrorResponse;
use crate::services::{MarsPhotosQuery, SearchQuery};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("No EPIC images available for date {0}")]
    NoImages(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Typed caller of the `/api` routes
#[derive(Clone)]
pub struct FacadeClient {
    client: Client,
    base_url: String,
}

impl FacadeClient {
    /// `base_url` points at the API root, e.g. `http://localhost:3001/api`
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        fallback: &str,
    ) -> ClientResult<T> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorResponse>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| fallback.to_string());
            warn!(status = status.as_u16(), %message, "facade request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    pub async fn health(&self) -> ClientResult<Health> {
        self.get("/health", &[], "Backend is not responding").await
    }

    pub async fn apod(&self) -> ClientResult<ApodRecord> {
        self.get("/nasa/apod", &[], "Failed to fetch APOD data").await
    }

    pub async fn mars_photos(&self, query: &MarsPhotosQuery) -> ClientResult<Vec<MarsPhoto>> {
        let path = format!("/nasa/mars/{}/photos", query.rover.as_str());
        let mut params = vec![("sol", query.sol.to_string())];
        if let Some(camera) = query.camera.filter() {
            params.push(("camera", camera.to_string()));
        }
        let page: MarsPhotosPage = self
            .get(&path, &params, "Failed to fetch Mars photos")
            .await?;
        Ok(page.photos)
    }

    pub async fn neo_feed(&self) -> ClientResult<NeoFeed> {
        self.get("/nasa/neo", &[], "Failed to fetch NEO data").await
    }

    /// Latest EPIC images, or those for `date`. An empty result is an error.
    pub async fn epic_images(&self, date: Option<&str>) -> ClientResult<Vec<EpicImage>> {
        let params: Vec<(&str, String)> = date.map(|d| ("date", d.to_string())).into_iter().collect();
        let images: Vec<EpicImage> = self
            .get("/nasa/epic/images", &params, "Failed to fetch EPIC images")
            .await?;
        if images.is_empty() {
            return Err(ClientError::NoImages(date.unwrap_or("latest").to_string()));
        }
        Ok(images)
    }

    /// Library search; a blank query is not sent and yields `None`
    pub async fn search(&self, query: &SearchQuery) -> ClientResult<Option<SearchCollection>> {
        if query.text.trim().is_empty() {
            return Ok(None);
        }
        let mut params = vec![
            ("q", query.text.clone()),
            ("page", query.page.to_string()),
            ("page_size", query.page_size.to_string()),
        ];
        if let Some(media) = query.media_type.filter() {
            params.push(("media_type", media.to_string()));
        }
        let resp: SearchResponse = self
            .get("/nasa/search", &params, "Failed to search NASA library")
            .await?;
        Ok(Some(resp.collection))
    }
}

/// Snapshot of a hook's state
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Generation of a single fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

struct Slot<T> {
    state: FetchState<T>,
    generation: u64,
}

/// Fetch state addressed by request generation
pub struct Resource<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Resource<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                state: FetchState::default(),
                generation: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Start a fetch: bumps the generation, sets loading, clears the error
    pub fn begin(&self) -> Ticket {
        let mut slot = self.lock();
        slot.generation += 1;
        slot.state.loading = true;
        slot.state.error = None;
        Ticket(slot.generation)
    }

    /// Apply a result if `ticket` is still the newest. Returns whether it was applied.
    pub fn settle(&self, ticket: Ticket, result: ClientResult<T>) -> bool {
        let mut slot = self.lock();
        if ticket.0 != slot.generation {
            return false;
        }
        match result {
            Ok(data) => slot.state.data = Some(data),
            Err(e) => slot.state.error = Some(e.to_string()),
        }
        slot.state.loading = false;
        true
    }

    pub fn snapshot(&self) -> FetchState<T>
    where
        T: Clone,
    {
        self.lock().state.clone()
    }
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = ClientResult<T>> + Send>>;
type Fetcher<P, T> = Arc<dyn Fn(FacadeClient, P) -> BoxFuture<T> + Send + Sync>;

/// A resource bound to a tracked parameter value and a fetch function
pub struct Hook<P, T> {
    client: FacadeClient,
    params: Mutex<P>,
    resource: Resource<T>,
    fetcher: Fetcher<P, T>,
    should_fetch: fn(&P) -> bool,
}

impl<P, T> Hook<P, T>
where
    P: Clone + PartialEq + Send + 'static,
    T: Send + 'static,
{
    pub fn new<F, Fut>(client: FacadeClient, params: P, fetcher: F) -> Self
    where
        F: Fn(FacadeClient, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        Self {
            client,
            params: Mutex::new(params),
            resource: Resource::new(),
            fetcher: Arc::new(move |client, params| -> BoxFuture<T> {
                Box::pin(fetcher(client, params))
            }),
            should_fetch: |_| true,
        }
    }

    /// Skip fetching for parameters the guard rejects. Current state is left as is.
    pub fn with_guard(mut self, should_fetch: fn(&P) -> bool) -> Self {
        self.should_fetch = should_fetch;
        self
    }

    fn lock_params(&self) -> MutexGuard<'_, P> {
        self.params
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Initial fetch
    pub async fn mount(&self) -> bool {
        self.refetch().await
    }

    /// Fetch again with the current parameters
    pub async fn refetch(&self) -> bool {
        let (params, ticket) = {
            let params = self.lock_params();
            if !(self.should_fetch)(&*params) {
                return false;
            }
            (params.clone(), self.resource.begin())
        };
        self.run(params, ticket).await
    }

    /// Replace the tracked parameters; fetches only when they changed
    pub async fn set_params(&self, next: P) -> bool {
        let (params, ticket) = {
            let mut params = self.lock_params();
            if *params == next {
                return false;
            }
            *params = next;
            if !(self.should_fetch)(&*params) {
                return false;
            }
            (params.clone(), self.resource.begin())
        };
        self.run(params, ticket).await
    }

    async fn run(&self, params: P, ticket: Ticket) -> bool {
        let result = (self.fetcher)(self.client.clone(), params).await;
        self.resource.settle(ticket, result)
    }

    pub fn params(&self) -> P {
        self.lock_params().clone()
    }

    pub fn state(&self) -> FetchState<T>
    where
        T: Clone,
    {
        self.resource.snapshot()
    }
}

pub fn health_hook(client: FacadeClient) -> Hook<(), Health> {
    Hook::new(client, (), |client, ()| async move { client.health().await })
}

pub fn apod_hook(client: FacadeClient) -> Hook<(), ApodRecord> {
    Hook::new(client, (), |client, ()| async move { client.apod().await })
}

pub fn mars_photos_hook(
    client: FacadeClient,
    query: MarsPhotosQuery,
) -> Hook<MarsPhotosQuery, Vec<MarsPhoto>> {
    Hook::new(client, query, |client, query| async move {
        client.mars_photos(&query).await
    })
}

pub fn neo_hook(client: FacadeClient) -> Hook<(), NeoFeed> {
    Hook::new(client, (), |client, ()| async move { client.neo_feed().await })
}

pub fn epic_hook(
    client: FacadeClient,
    date: Option<String>,
) -> Hook<Option<String>, Vec<EpicImage>> {
    Hook::new(client, date, |client, date| async move {
        client.epic_images(date.as_deref()).await
    })
}

pub fn search_hook(
    client: FacadeClient,
    query: SearchQuery,
) -> Hook<SearchQuery, Option<SearchCollection>> {
    Hook::new(client, query, |client, query| async move {
        client.search(&query).await
    })
    .with_guard(|query| !query.text.trim().is_empty())
}
