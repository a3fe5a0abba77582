use crate::app_config::{AppConfig, AppiumCapabilities};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; an unset variable falls back to the defaults
/// for the stock emulator and app build.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        reqwest::Url::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        Ok(raw)
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

    let defaults = AppiumCapabilities::default();

    let appium_url = parse_url("STORETALLY_APPIUM_URL", "http://localhost:4723/wd/hub")?;
    let export_url = parse_url(
        "STORETALLY_EXPORT_URL",
        "https://sample.amazonaws.com/v1/uber",
    )?;

    let capabilities = AppiumCapabilities {
        platform_version: or_default("STORETALLY_PLATFORM_VERSION", &defaults.platform_version),
        device_name: or_default("STORETALLY_DEVICE_NAME", &defaults.device_name),
        app_package: or_default("STORETALLY_APP_PACKAGE", &defaults.app_package),
        app_activity: or_default("STORETALLY_APP_ACTIVITY", &defaults.app_activity),
        ..defaults
    };

    let log_level = or_default("STORETALLY_LOG_LEVEL", "info");
    let implicit_wait_secs = parse_u64("STORETALLY_IMPLICIT_WAIT_SECS", "120")?;
    let request_timeout_secs = parse_u64("STORETALLY_REQUEST_TIMEOUT_SECS", "180")?;
    let cycle_delay_secs = parse_u64("STORETALLY_CYCLE_DELAY_SECS", "10")?;
    let bottom_bar_dp = parse_u32("STORETALLY_BOTTOM_BAR_DP", "100")?;

    // A driver call may legitimately block for the whole implicit wait.
    if request_timeout_secs <= implicit_wait_secs {
        return Err(ConfigError::InvalidEnvVar {
            var: "STORETALLY_REQUEST_TIMEOUT_SECS".to_string(),
            reason: format!(
                "must exceed STORETALLY_IMPLICIT_WAIT_SECS ({implicit_wait_secs}), got {request_timeout_secs}"
            ),
        });
    }

    Ok(AppConfig {
        appium_url,
        export_url,
        capabilities,
        log_level,
        implicit_wait_secs,
        request_timeout_secs,
        cycle_delay_secs,
        bottom_bar_dp,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
