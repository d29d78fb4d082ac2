pub mod app_config;
pub mod category;
mod config;
pub mod geo;
pub mod place;
pub mod source;

pub use app_config::{AppConfig, Environment};
pub use category::Category;
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_meters, is_near_duplicate, Coordinate, DUPLICATE_TOLERANCE_DEG};
pub use place::Place;
pub use source::SourceKind;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
