//! Upward swipe that reveals the next part of the store list.
//!
//! Android only exposes rows inside the viewport, so the harvester has to move
//! the list itself. The swipe starts just above the bottom navigation bar and
//! travels two thirds of the usable height.

use std::time::Duration;

use storetally_driver::{Point, Swipe, UiDriver};

use crate::error::ScrapeError;

/// Density that Android's density-independent pixels are defined against.
pub const BASELINE_DPI: u32 = 160;

/// Press duration before the drag starts (a long press, so the list does not fling).
pub const SWIPE_HOLD: Duration = Duration::from_millis(1000);

pub const SWIPE_TRAVEL: Duration = Duration::from_millis(500);

/// Usable window height: raw height minus the bottom bar scaled to the
/// device's density. Saturates at zero.
#[must_use]
pub fn effective_viewport_height(window_height: u32, density_dpi: u32, bottom_bar_dp: u32) -> u32 {
    let bottom_bar_px =
        u64::from(bottom_bar_dp) * u64::from(density_dpi) / u64::from(BASELINE_DPI);
    window_height.saturating_sub(u32::try_from(bottom_bar_px).unwrap_or(u32::MAX))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPlan {
    pub start: Point,
    pub end: Point,
    /// Upward travel in pixels, `floor(2E/3)`, never more than `E`.
    pub delta: u32,
}

impl ScrollPlan {
    #[must_use]
    pub fn swipe(&self) -> Swipe {
        Swipe {
            from: self.start,
            to: self.end,
            hold: SWIPE_HOLD,
            travel: SWIPE_TRAVEL,
        }
    }
}

/// Plans a swipe from the bottom of the usable area upward by two thirds of it.
#[must_use]
pub fn scroll_plan(effective_height: u32) -> ScrollPlan {
    let two_thirds = u64::from(effective_height) * 2 / 3;
    let delta = u32::try_from(two_thirds)
        .unwrap_or(effective_height)
        .min(effective_height);
    ScrollPlan {
        start: Point::new(0, effective_height),
        end: Point::new(0, effective_height - delta),
        delta,
    }
}

/// Measures the screen and performs one upward swipe.
///
/// # Errors
///
/// Returns [`ScrapeError::Driver`] if the window size, density, or gesture
/// request fails.
pub async fn scroll_down<D: UiDriver>(
    driver: &D,
    bottom_bar_dp: u32,
) -> Result<ScrollPlan, ScrapeError> {
    let rect = driver.window_rect().await?;
    let density = driver.display_density().await?;
    let height = effective_viewport_height(rect.height, density, bottom_bar_dp);
    let plan = scroll_plan(height);

    tracing::debug!(
        window_height = rect.height,
        density,
        effective_height = height,
        start_y = plan.start.y,
        end_y = plan.end.y,
        "scrolling store list"
    );
    driver.swipe(&plan.swipe()).await?;
    Ok(plan)
}
