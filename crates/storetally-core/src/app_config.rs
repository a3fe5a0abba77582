use std::time::Duration;

/// Fixed capability set sent when opening an Appium session.
///
/// `platform_name` and `automation_name` are not configurable: the harvester's
/// locators only make sense against Android's `UiAutomator2` view hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppiumCapabilities {
    pub platform_name: String,
    pub platform_version: String,
    pub automation_name: String,
    pub device_name: String,
    pub app_package: String,
    pub app_activity: String,
    pub no_reset: bool,
}

impl Default for AppiumCapabilities {
    fn default() -> Self {
        Self {
            platform_name: "Android".to_string(),
            platform_version: "11.0".to_string(),
            automation_name: "UiAutomator2".to_string(),
            device_name: "emulator-5554".to_string(),
            app_package: "com.uber.restaurantmanager".to_string(),
            app_activity: "com.uber.restaurantmanager.RootActivity".to_string(),
            no_reset: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub appium_url: String,
    pub export_url: String,
    pub capabilities: AppiumCapabilities,
    pub log_level: String,
    /// Implicit wait applied while the app loads the Stores tab.
    pub implicit_wait_secs: u64,
    /// HTTP timeout for every driver and export request. Always larger than
    /// `implicit_wait_secs`.
    pub request_timeout_secs: u64,
    pub cycle_delay_secs: u64,
    /// Height of the bottom navigation area in density-independent pixels.
    pub bottom_bar_dp: u32,
}

impl AppConfig {
    #[must_use]
    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_secs)
    }

    #[must_use]
    pub fn cycle_delay(&self) -> Duration {
        Duration::from_secs(self.cycle_delay_secs)
    }
}
