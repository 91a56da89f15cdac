/// Application configuration module
use std::env;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_NASA_BASE_URL: &str = "https://api.nasa.gov";
pub const DEFAULT_NASA_IMAGES_URL: &str = "https://images-api.nasa.gov";
pub const DEMO_API_KEY: &str = "DEMO_KEY";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub nasa_base_url: String,
    pub nasa_images_url: String,
    pub nasa_api_key: String,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    pub rate_limit: RateLimitConfig,
}

#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {raw:?}"))?,
            None => 3001,
        };

        let nasa_base_url = lookup("NASA_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_NASA_BASE_URL.to_string());

        let nasa_images_url = lookup("NASA_IMAGES_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_NASA_IMAGES_URL.to_string());

        let nasa_api_key = match lookup("NASA_API_KEY").filter(|k| !k.trim().is_empty()) {
            Some(key) => key,
            None => {
                warn!("NASA_API_KEY not set, falling back to {DEMO_API_KEY}");
                DEMO_API_KEY.to_string()
            }
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let environment = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());

        let defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            max_requests: parse_or(&lookup, "RATE_LIMIT_MAX", defaults.max_requests),
            window: Duration::from_secs(parse_or(
                &lookup,
                "RATE_LIMIT_WINDOW_SECS",
                defaults.window.as_secs(),
            )),
        };

        Ok(Self {
            port,
            nasa_base_url,
            nasa_images_url,
            nasa_api_key,
            allowed_origins,
            environment,
            rate_limit,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
