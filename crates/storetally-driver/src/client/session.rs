//! New-session request and response shapes.

use serde_json::{json, Value};
use storetally_core::AppiumCapabilities;

use crate::error::DriverError;

/// Builds the new-session body.
///
/// W3C servers read `capabilities.alwaysMatch`, where everything except
/// `platformName` needs the `appium:` vendor prefix. Older servers read the
/// unprefixed `desiredCapabilities`.
pub(super) fn new_session_body(caps: &AppiumCapabilities) -> Value {
    json!({
        "capabilities": {
            "alwaysMatch": {
                "platformName": caps.platform_name,
                "appium:platformVersion": caps.platform_version,
                "appium:automationName": caps.automation_name,
                "appium:deviceName": caps.device_name,
                "appium:appPackage": caps.app_package,
                "appium:appActivity": caps.app_activity,
                "appium:noReset": caps.no_reset,
            },
            "firstMatch": [{}],
        },
        "desiredCapabilities": {
            "platformName": caps.platform_name,
            "platformVersion": caps.platform_version,
            "automationName": caps.automation_name,
            "deviceName": caps.device_name,
            "appPackage": caps.app_package,
            "appActivity": caps.app_activity,
            "noReset": caps.no_reset,
        },
    })
}

/// Pulls the session id out of a new-session response.
///
/// W3C puts it at `value.sessionId`; the legacy JSON wire protocol puts it at
/// the top level.
pub(super) fn extract_session_id(body: &Value) -> Result<String, DriverError> {
    body.pointer("/value/sessionId")
        .or_else(|| body.get("sessionId"))
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| DriverError::MalformedResponse {
            context: "new session".to_string(),
            reason: "response has no sessionId".to_string(),
        })
}
