use std::net::SocketAddr;

use crate::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub overpass_base_url: String,
    pub opendata_base_url: String,
    pub geoapify_base_url: String,
    pub geoapify_api_key: String,
    /// Named Overpass area the spatial queries are scoped to.
    pub search_area: String,
    /// Center of the Geoapify circle filter. Fixed per deployment: the
    /// user position only drives the distance filter, not the upstream
    /// search window.
    pub search_center: Coordinate,
    pub search_radius_m: u32,
    /// Per-source record limit; each provider returns at most one page.
    pub source_limit: u32,
    pub http_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("overpass_base_url", &self.overpass_base_url)
            .field("opendata_base_url", &self.opendata_base_url)
            .field("geoapify_base_url", &self.geoapify_base_url)
            .field("geoapify_api_key", &"[redacted]")
            .field("search_area", &self.search_area)
            .field("search_center", &self.search_center)
            .field("search_radius_m", &self.search_radius_m)
            .field("source_limit", &self.source_limit)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
