mod app_config;
pub mod catalog;
mod categories;
mod config;
mod products;
mod stats;

pub use app_config::{AppConfig, Environment};
pub use categories::{AdminUser, Category, ADMIN_ROLE};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::Product;
pub use stats::{CatalogStats, CategoryShare};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
