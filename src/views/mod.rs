//! View models derived from hook state. Nothing here fetches or mutates data.
use crate::domain::{
    Camera, Coordinates, LibraryItem, NearEarthObject, NeoFeed, Position, Rover,
};
use crate::hooks::FetchState;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
pub const NEO_HIGHLIGHTS: usize = 10;
const PAGE_WINDOW: u32 = 5;

/// What a section should render for its current fetch state
#[derive(Debug, PartialEq)]
pub enum ViewState<'a, T> {
    Loading,
    Failed { message: &'a str },
    Ready(&'a T),
    Empty,
}

impl<'a, T> ViewState<'a, T> {
    pub fn of(state: &'a FetchState<T>) -> Self {
        if state.loading {
            return ViewState::Loading;
        }
        if let Some(message) = state.error.as_deref() {
            return ViewState::Failed { message };
        }
        match &state.data {
            Some(data) => ViewState::Ready(data),
            None => ViewState::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub date: String,
    pub count: usize,
    pub hazardous: usize,
}

/// Aggregates for the near-earth object dashboard
#[derive(Debug, Clone)]
pub struct NeoSummary<'a> {
    pub total: usize,
    pub hazardous: usize,
    pub safe: usize,
    pub daily: Vec<DailyCount>,
    pub highlights: Vec<&'a NearEarthObject>,
}

impl<'a> NeoSummary<'a> {
    pub fn from_feed(feed: &'a NeoFeed) -> Self {
        let all: Vec<&NearEarthObject> = feed.near_earth_objects.values().flatten().collect();
        let hazardous = all
            .iter()
            .filter(|neo| neo.is_potentially_hazardous_asteroid)
            .count();

        let daily = feed
            .near_earth_objects
            .iter()
            .map(|(date, neos)| DailyCount {
                date: date.clone(),
                count: neos.len(),
                hazardous: neos
                    .iter()
                    .filter(|neo| neo.is_potentially_hazardous_asteroid)
                    .count(),
            })
            .collect();

        Self {
            total: all.len(),
            hazardous,
            safe: all.len() - hazardous,
            daily,
            highlights: all.into_iter().take(NEO_HIGHLIGHTS).collect(),
        }
    }
}

/// `12.34°, -56.78°`, or `N/A` when the record has no centroid
pub fn centroid_label(coords: Option<&Coordinates>) -> String {
    match coords {
        Some(c) => format!("{:.2}°, {:.2}°", c.lat, c.lon),
        None => "N/A".to_string(),
    }
}

/// Spacecraft distance from the J2000 position vector, whole kilometres
pub fn distance_km(position: &Position) -> f64 {
    (position.x.powi(2) + position.y.powi(2) + position.z.powi(2))
        .sqrt()
        .round()
}

/// Client-side pagination cursor for library search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub current: u32,
    pub page_size: u32,
    pub total_hits: u64,
}

impl Pager {
    pub fn new(page_size: u32) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
            total_hits: 0,
        }
    }

    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        u32::try_from(self.total_hits.div_ceil(size)).unwrap_or(u32::MAX)
    }

    /// Up to five page numbers centred on the current page
    pub fn visible_pages(&self) -> Vec<u32> {
        let total = self.total_pages();
        if total == 0 {
            return Vec::new();
        }
        let count = total.min(PAGE_WINDOW);
        let first = self
            .current
            .saturating_sub(2)
            .min(total.saturating_sub(PAGE_WINDOW - 1))
            .max(1);
        (first..first + count).collect()
    }

    /// Move to `page`, clamped to at least 1
    pub fn go_to(&mut self, page: u32) {
        self.current = page.max(1);
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }
}

/// First preview link of a library item, or the placeholder image
pub fn preview_href(item: &LibraryItem) -> &str {
    item.links
        .iter()
        .find(|link| link.rel.as_deref() == Some("preview"))
        .map(|link| link.href.as_str())
        .unwrap_or(PLACEHOLDER_IMAGE)
}

/// Options for the rover picker
pub fn rover_options() -> Vec<(&'static str, &'static str)> {
    Rover::ALL.iter().map(|r| (r.as_str(), r.label())).collect()
}

/// Options for the camera picker
pub fn camera_options() -> Vec<(&'static str, &'static str)> {
    Camera::ALL.iter().map(|c| (c.as_str(), c.label())).collect()
}

/// Local selection for a detail modal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection(Option<usize>);

impl Selection {
    pub fn select(&mut self, index: usize) {
        self.0 = Some(index);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn selected<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        self.0.and_then(|i| items.get(i))
    }
}
