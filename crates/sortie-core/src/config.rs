use crate::app_config::{AppConfig, Environment};
use crate::geo::Coordinate;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let geoapify_api_key = require("GEOAPIFY_API_KEY")?;

    let env = parse_environment(&or_default("SORTIE_ENV", "development"));
    let bind_addr = parse_addr("SORTIE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SORTIE_LOG_LEVEL", "info");

    let overpass_base_url = or_default(
        "SORTIE_OVERPASS_URL",
        "https://overpass-api.de/api/interpreter",
    );
    let opendata_base_url = or_default("SORTIE_OPENDATA_URL", "https://opendata.paris.fr");
    let geoapify_base_url = or_default("SORTIE_GEOAPIFY_URL", "https://api.geoapify.com");

    let search_area = or_default("SORTIE_SEARCH_AREA", "Paris");
    let search_center = Coordinate {
        lat: parse_f64("SORTIE_SEARCH_CENTER_LAT", "48.8566")?,
        lng: parse_f64("SORTIE_SEARCH_CENTER_LNG", "2.3522")?,
    };
    let search_radius_m = parse_u32("SORTIE_SEARCH_RADIUS_M", "5000")?;
    let source_limit = parse_u32("SORTIE_SOURCE_LIMIT", "10")?;

    let http_timeout_secs = parse_u64("SORTIE_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SORTIE_USER_AGENT", "sortie/0.1 (places-aggregation)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        overpass_base_url,
        opendata_base_url,
        geoapify_base_url,
        geoapify_api_key,
        search_area,
        search_center,
        search_radius_m,
        source_limit,
        http_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
