mod app_config;
mod config;
pub mod store;

pub use app_config::{AppConfig, AppiumCapabilities};
pub use config::{load_app_config, load_app_config_from_env};
pub use store::{ExportPayload, ExportRecord, StoreReading};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
