/// Domain models for the application
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime: f64,
    pub environment: String,
}

/// Mars rovers served by the photo endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rover {
    Curiosity,
    Opportunity,
    Spirit,
    Perseverance,
}

impl Rover {
    pub const ALL: [Rover; 4] = [
        Rover::Curiosity,
        Rover::Opportunity,
        Rover::Spirit,
        Rover::Perseverance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rover::Curiosity => "curiosity",
            Rover::Opportunity => "opportunity",
            Rover::Spirit => "spirit",
            Rover::Perseverance => "perseverance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rover::Curiosity => "Curiosity",
            Rover::Opportunity => "Opportunity",
            Rover::Spirit => "Spirit",
            Rover::Perseverance => "Perseverance",
        }
    }
}

/// Rover camera filter; `All` leaves the request unfiltered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Camera {
    All,
    Fhaz,
    Rhaz,
    Mast,
    Chemcam,
    Mahli,
    Mardi,
    Navcam,
    Pancam,
    Minites,
}

impl Camera {
    pub const ALL: [Camera; 10] = [
        Camera::All,
        Camera::Fhaz,
        Camera::Rhaz,
        Camera::Mast,
        Camera::Chemcam,
        Camera::Mahli,
        Camera::Mardi,
        Camera::Navcam,
        Camera::Pancam,
        Camera::Minites,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Camera::All => "all",
            Camera::Fhaz => "fhaz",
            Camera::Rhaz => "rhaz",
            Camera::Mast => "mast",
            Camera::Chemcam => "chemcam",
            Camera::Mahli => "mahli",
            Camera::Mardi => "mardi",
            Camera::Navcam => "navcam",
            Camera::Pancam => "pancam",
            Camera::Minites => "minites",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Camera::All => "All Cameras",
            Camera::Fhaz => "Front Hazard Avoidance Camera",
            Camera::Rhaz => "Rear Hazard Avoidance Camera",
            Camera::Mast => "Mast Camera",
            Camera::Chemcam => "Chemistry and Camera Complex",
            Camera::Mahli => "Mars Hand Lens Imager",
            Camera::Mardi => "Mars Descent Imager",
            Camera::Navcam => "Navigation Camera",
            Camera::Pancam => "Panoramic Camera",
            Camera::Minites => "Miniature Thermal Emission Spectrometer",
        }
    }

    /// The value to forward upstream, if any
    pub fn filter(self) -> Option<&'static str> {
        match self {
            Camera::All => None,
            other => Some(other.as_str()),
        }
    }
}

/// Library search media filter; `All` leaves the request unfiltered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaFilter {
    #[default]
    All,
    Image,
    Video,
    Audio,
}

impl MediaFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaFilter::All => "all",
            MediaFilter::Image => "image",
            MediaFilter::Video => "video",
            MediaFilter::Audio => "audio",
        }
    }

    pub fn filter(self) -> Option<&'static str> {
        match self {
            MediaFilter::All => None,
            other => Some(other.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! impl_from_str {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                <$ty>::variants()
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl Rover {
    fn variants() -> &'static [Rover] {
        &Rover::ALL
    }
}

impl Camera {
    fn variants() -> &'static [Camera] {
        &Camera::ALL
    }
}

impl MediaFilter {
    fn variants() -> &'static [MediaFilter] {
        &[
            MediaFilter::All,
            MediaFilter::Image,
            MediaFilter::Video,
            MediaFilter::Audio,
        ]
    }
}

impl_from_str!(Rover, "rover");
impl_from_str!(Camera, "camera");
impl_from_str!(MediaFilter, "media type");

/// Astronomy Picture of the Day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApodRecord {
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub hdurl: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    pub media_type: ApodMediaType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApodMediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarsPhotosPage {
    pub photos: Vec<MarsPhoto>,
}

/// Single rover photo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarsPhoto {
    pub id: u64,
    pub sol: u32,
    pub img_src: String,
    #[serde(default)]
    pub earth_date: Option<String>,
    pub camera: CameraInfo,
    pub rover: RoverInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraInfo {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoverInfo {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub landing_date: Option<String>,
    #[serde(default)]
    pub launch_date: Option<String>,
}

/// Near-earth object feed keyed by calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoFeed {
    #[serde(default)]
    pub element_count: u64,
    pub near_earth_objects: BTreeMap<String, Vec<NearEarthObject>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearEarthObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub absolute_magnitude_h: Option<f64>,
    pub estimated_diameter: EstimatedDiameter,
    pub is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
    #[serde(default)]
    pub meters: Option<DiameterRange>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseApproach {
    pub close_approach_date: String,
    #[serde(default)]
    pub relative_velocity: Option<RelativeVelocity>,
    #[serde(default)]
    pub miss_distance: Option<MissDistance>,
    #[serde(default)]
    pub orbiting_body: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_hour: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissDistance {
    pub kilometers: String,
}

/// EPIC earth imagery record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpicImage {
    pub identifier: String,
    #[serde(default)]
    pub caption: String,
    pub image: String,
    pub date: String,
    #[serde(default)]
    pub centroid_coordinates: Option<Coordinates>,
    #[serde(default)]
    pub dscovr_j2000_position: Option<Position>,
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Image and video library search page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub collection: SearchCollection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCollection {
    #[serde(default)]
    pub items: Vec<LibraryItem>,
    pub metadata: SearchMetadata,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub total_hits: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryItem {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub data: Vec<LibraryMedia>,
    #[serde(default)]
    pub links: Vec<LibraryLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryMedia {
    #[serde(default)]
    pub nasa_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub center: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryLink {
    pub href: String,
    #[serde(default)]
    pub rel: Option<String>,
    #[serde(default)]
    pub render: Option<String>,
}
