//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable consulted when `places.api_key` is unset.
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
/// Environment variable consulted when `routing.api_key` is unset.
pub const ORS_API_KEY_ENV: &str = "OPEN_ROUTE_SERVICE_API_KEY";
/// Environment variable consulted when `scraper.listing_url` is unset.
pub const LISTING_URL_ENV: &str = "DELIVEROO_BASE_URL";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub scraper: ScraperConfig,

    #[serde(default)]
    pub places: PlacesConfig,

    #[serde(default)]
    pub area: AreaConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

fn dublin_centre() -> LatLng {
    LatLng {
        lat: 53.3478,
        lng: -6.2597,
    }
}

/// Browser connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default)]
    pub headless: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<PathBuf>,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: false,
            profile_dir: None,
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    720
}

/// Listing scraper settings. Durations are in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_url: Option<String>,

    #[serde(default = "default_name_selector")]
    pub name_selector: String,

    #[serde(default = "default_reveal_scrolls")]
    pub reveal_scrolls: u32,

    #[serde(default = "default_post_click_scrolls")]
    pub post_click_scrolls: u32,

    #[serde(default = "default_max_scrolls")]
    pub max_scrolls: u32,

    #[serde(default = "default_stable_cycles")]
    pub stable_cycles: u32,

    #[serde(default = "default_scroll_fraction")]
    pub scroll_fraction: f64,

    #[serde(default = "default_reveal_settle_ms")]
    pub reveal_settle_ms: u64,

    #[serde(default = "default_scroll_settle_ms")]
    pub scroll_settle_ms: u64,

    #[serde(default = "default_network_idle_timeout_ms")]
    pub network_idle_timeout_ms: u64,

    #[serde(default = "default_click_settle_ms")]
    pub click_settle_ms: u64,

    #[serde(default = "default_node_read_timeout_ms")]
    pub node_read_timeout_ms: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            listing_url: None,
            name_selector: default_name_selector(),
            reveal_scrolls: default_reveal_scrolls(),
            post_click_scrolls: default_post_click_scrolls(),
            max_scrolls: default_max_scrolls(),
            stable_cycles: default_stable_cycles(),
            scroll_fraction: default_scroll_fraction(),
            reveal_settle_ms: default_reveal_settle_ms(),
            scroll_settle_ms: default_scroll_settle_ms(),
            network_idle_timeout_ms: default_network_idle_timeout_ms(),
            click_settle_ms: default_click_settle_ms(),
            node_read_timeout_ms: default_node_read_timeout_ms(),
        }
    }
}

impl ScraperConfig {
    /// Configured listing URL, or the `DELIVEROO_BASE_URL` environment variable.
    pub fn resolved_listing_url(&self) -> Option<String> {
        self.listing_url
            .clone()
            .or_else(|| std::env::var(LISTING_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
    }
}

fn default_name_selector() -> String {
    ".css-11vv3pc".to_string()
}

fn default_reveal_scrolls() -> u32 {
    8
}

fn default_post_click_scrolls() -> u32 {
    6
}

fn default_max_scrolls() -> u32 {
    120
}

fn default_stable_cycles() -> u32 {
    3
}

fn default_scroll_fraction() -> f64 {
    0.95
}

fn default_reveal_settle_ms() -> u64 {
    200
}

fn default_scroll_settle_ms() -> u64 {
    350
}

fn default_network_idle_timeout_ms() -> u64 {
    10_000
}

fn default_click_settle_ms() -> u64 {
    800
}

fn default_node_read_timeout_ms() -> u64 {
    1500
}

/// Places API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_places_base_url")]
    pub base_url: String,

    #[serde(default = "default_region_code")]
    pub region_code: String,

    #[serde(default = "default_included_type")]
    pub included_type: String,

    #[serde(default = "default_language_code")]
    pub language_code: String,

    #[serde(default = "dublin_centre")]
    pub bias_center: LatLng,

    #[serde(default = "default_bias_radius_m")]
    pub bias_radius_m: f64,

    #[serde(default = "default_places_pause_ms")]
    pub pause_ms: u64,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_places_base_url(),
            region_code: default_region_code(),
            included_type: default_included_type(),
            language_code: default_language_code(),
            bias_center: dublin_centre(),
            bias_radius_m: default_bias_radius_m(),
            pause_ms: default_places_pause_ms(),
        }
    }
}

impl PlacesConfig {
    /// Configured key, or the `GOOGLE_MAPS_API_KEY` environment variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(GOOGLE_API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

fn default_places_base_url() -> String {
    "https://places.googleapis.com".to_string()
}

fn default_region_code() -> String {
    "IE".to_string()
}

fn default_included_type() -> String {
    "restaurant".to_string()
}

fn default_language_code() -> String {
    "en".to_string()
}

fn default_bias_radius_m() -> f64 {
    5000.0
}

fn default_places_pause_ms() -> u64 {
    150
}

/// Area filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaConfig {
    #[serde(default = "dublin_centre")]
    pub center: LatLng,

    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,

    #[serde(default = "default_address_keyword")]
    pub address_keyword: String,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            center: dublin_centre(),
            max_distance_km: default_max_distance_km(),
            address_keyword: default_address_keyword(),
        }
    }
}

fn default_max_distance_km() -> f64 {
    12.0
}

fn default_address_keyword() -> String {
    "dublin".to_string()
}

/// Routing service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_profile")]
    pub profile: String,

    #[serde(default = "default_tile_size")]
    pub tile_size: usize,

    #[serde(default = "default_routing_pause_ms")]
    pub pause_ms: u64,

    #[serde(default = "default_routing_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_base_url(),
            api_key: None,
            profile: default_profile(),
            tile_size: default_tile_size(),
            pause_ms: default_routing_pause_ms(),
            timeout_secs: default_routing_timeout_secs(),
        }
    }
}

impl RoutingConfig {
    /// Configured key, or the `OPEN_ROUTE_SERVICE_API_KEY` environment variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(ORS_API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

fn default_routing_base_url() -> String {
    "http://localhost:8080/ors/v2".to_string()
}

fn default_profile() -> String {
    "driving-car".to_string()
}

fn default_tile_size() -> usize {
    50
}

fn default_routing_pause_ms() -> u64 {
    300
}

fn default_routing_timeout_secs() -> u64 {
    120
}

/// Output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default = "default_matrix_csv")]
    pub matrix_csv: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            matrix_csv: default_matrix_csv(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/index.json")
}

fn default_matrix_csv() -> PathBuf {
    PathBuf::from("data/exports/matrix.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_constants() {
        let config = Config::default();
        assert_eq!(config.scraper.reveal_scrolls, 8);
        assert_eq!(config.scraper.max_scrolls, 120);
        assert_eq!(config.scraper.scroll_fraction, 0.95);
        assert_eq!(config.places.region_code, "IE");
        assert_eq!(config.places.bias_radius_m, 5000.0);
        assert_eq!(config.area.center, dublin_centre());
        assert_eq!(config.routing.profile, "driving-car");
        assert_eq!(config.storage.matrix_csv, PathBuf::from("data/exports/matrix.csv"));
    }

    #[test]
    fn test_configured_key_wins_over_env() {
        let places = PlacesConfig {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(places.resolved_api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn test_blank_key_is_none() {
        let routing = RoutingConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        // A blank configured key still short-circuits the env fallback.
        assert!(routing.resolved_api_key().is_none());
    }

    #[test]
    fn test_config_serializes_to_toml() {
        let toml = toml::to_string(&Config::default()).unwrap();
        assert!(toml.contains("[routing]"));
        assert!(toml.contains("tile_size = 50"));
    }
}
