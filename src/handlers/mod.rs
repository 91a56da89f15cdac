/// HTTP request handlers
use crate::domain::{Camera, Health, MediaFilter, Rover};
use crate::errors::{ApiError, ApiResult};
use crate::services::{MarsPhotosQuery, NasaService, SearchQuery};
use crate::utils::{non_blank, parse_date, parse_sol};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub nasa_service: Arc<NasaService>,
    pub environment: Arc<str>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(nasa_service: NasaService, environment: &str) -> Self {
        Self {
            nasa_service: Arc::new(nasa_service),
            environment: Arc::from(environment),
            started_at: Instant::now(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MarsParams {
    pub sol: Option<String>,
    pub camera: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NeoParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EpicParams {
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub media_type: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "OK".to_string(),
        timestamp: Utc::now(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        environment: state.environment.to_string(),
    })
}

/// Astronomy Picture of the Day
pub async fn get_apod(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let data = state
        .nasa_service
        .apod()
        .await
        .map_err(ApiError::failed("Failed to fetch APOD data"))?;
    Ok(Json(data))
}

/// Mars rover photos for a sol
pub async fn get_mars_photos(
    Path(rover): Path<String>,
    Query(params): Query<MarsParams>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    let query = validate_mars(&rover, params)?;
    let data = state
        .nasa_service
        .mars_photos(query)
        .await
        .map_err(ApiError::failed("Failed to fetch Mars photos"))?;
    Ok(Json(data))
}

/// Near-earth object feed
pub async fn get_neo(
    Query(params): Query<NeoParams>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    let (start, end) = validate_neo(params)?;
    let data = state
        .nasa_service
        .neo_feed_from(start, end)
        .await
        .map_err(ApiError::failed("Failed to fetch NEO data"))?;
    Ok(Json(data))
}

/// EPIC earth imagery, latest or for a given date
pub async fn get_epic_images(
    Query(params): Query<EpicParams>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    let date = match non_blank(params.date) {
        Some(date) => {
            parse_date(&date).ok_or_else(|| ApiError::invalid("date must be in YYYY-MM-DD format"))?;
            Some(date)
        }
        None => None,
    };
    let data = state
        .nasa_service
        .epic_images(date.as_deref())
        .await
        .map_err(ApiError::failed("Failed to fetch EPIC images"))?;
    Ok(Json(data))
}

/// Image and video library search
pub async fn search_library(
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    let query = validate_search(params)?;
    let data = state
        .nasa_service
        .search(&query)
        .await
        .map_err(ApiError::failed("Failed to search NASA library"))?;
    Ok(Json(data))
}

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn validate_mars(rover: &str, params: MarsParams) -> ApiResult<MarsPhotosQuery> {
    let sol = match non_blank(params.sol) {
        Some(sol) if !rover.trim().is_empty() => sol,
        _ => return Err(ApiError::missing("Rover and sol parameters are required")),
    };
    let rover: Rover = rover
        .parse()
        .map_err(|e: crate::domain::UnknownVariant| ApiError::invalid(e.to_string()))?;
    let sol =
        parse_sol(&sol).ok_or_else(|| ApiError::invalid("sol must be a non-negative integer"))?;
    let camera = match non_blank(params.camera) {
        Some(camera) => camera
            .parse::<Camera>()
            .map_err(|e| ApiError::invalid(e.to_string()))?,
        None => Camera::All,
    };
    Ok(MarsPhotosQuery { rover, sol, camera })
}

fn validate_neo(params: NeoParams) -> ApiResult<(Option<NaiveDate>, Option<NaiveDate>)> {
    let parse = |value: Option<String>, name: &str| -> ApiResult<Option<NaiveDate>> {
        match non_blank(value) {
            Some(raw) => parse_date(&raw)
                .map(Some)
                .ok_or_else(|| ApiError::invalid(format!("{name} must be in YYYY-MM-DD format"))),
            None => Ok(None),
        }
    };
    let start = parse(params.start_date, "start_date")?;
    let end = parse(params.end_date, "end_date")?;
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(ApiError::invalid("start_date must not be after end_date"));
        }
    }
    Ok((start, end))
}

fn validate_search(params: SearchParams) -> ApiResult<SearchQuery> {
    let text = non_blank(params.q).ok_or_else(|| ApiError::missing("Query parameter is required"))?;
    let media_type = match non_blank(params.media_type) {
        Some(media) => media
            .parse::<MediaFilter>()
            .map_err(|e| ApiError::invalid(e.to_string()))?,
        None => MediaFilter::All,
    };
    let page = positive(params.page, "page", 1)?;
    let page_size = positive(params.page_size, "page_size", DEFAULT_PAGE_SIZE)?;
    Ok(SearchQuery {
        text,
        media_type,
        page,
        page_size,
    })
}

fn positive(value: Option<String>, name: &str, default: u32) -> ApiResult<u32> {
    match non_blank(value) {
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| ApiError::invalid(format!("{name} must be a positive integer"))),
        None => Ok(default),
    }
}
