//! Scroll-and-read loop over the Stores tab.
//!
//! Android renders only the rows inside the viewport, so the list is read in
//! passes: read what is visible, scroll, read again, merging by store name.
//! The loop ends when the tally reaches the total shown above the list, or
//! when a pass adds no new names. The second condition also ends the loop
//! when the displayed total overstates the list or two stores share a name;
//! in both cases fewer stores than the total are exported.

use std::time::Duration;

use chrono::Local;
use storetally_core::AppConfig;
use storetally_driver::UiDriver;

use crate::error::ScrapeError;
use crate::screen;
use crate::scroll::scroll_down;
use crate::tally::StoreTally;

/// Upper bound on scrolls per harvest.
pub const MAX_SCROLLS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSettings {
    /// Implicit wait while the Stores tab and its first rows load.
    pub implicit_wait: Duration,
    pub bottom_bar_dp: u32,
    pub max_scrolls: usize,
}

impl HarvestSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            implicit_wait: config.implicit_wait(),
            bottom_bar_dp: config.bottom_bar_dp,
            max_scrolls: MAX_SCROLLS,
        }
    }
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            implicit_wait: Duration::from_secs(120),
            bottom_bar_dp: 100,
            max_scrolls: MAX_SCROLLS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
    pub tally: StoreTally,
    /// Total read from the label above the list.
    pub expected_total: usize,
    /// Read passes, the initial one included.
    pub iterations: usize,
    /// `true` when the loop ended because a pass found no new stores.
    pub stalled: bool,
}

/// Integer-floor percentage of `current` over `total`; an empty list is complete.
#[must_use]
pub fn progress_percent(current: usize, total: usize) -> usize {
    if total == 0 {
        100
    } else {
        current.saturating_mul(100) / total
    }
}

fn report_progress(current: usize, total: usize) {
    let percent = progress_percent(current, total);
    tracing::info!(
        at = %Local::now().format("%H:%M:%S"),
        current,
        total,
        percent,
        "{current}/{total} ({percent}%)"
    );
}

/// Opens the Stores tab and reads every store it lists.
///
/// # Errors
///
/// - [`ScrapeError::Driver`] if navigation, a lookup, or a gesture fails.
/// - [`ScrapeError::TotalCountMissing`] if the total label has no number.
/// - [`ScrapeError::ScrollLimit`] if new stores keep appearing after
///   `settings.max_scrolls` scrolls.
pub async fn harvest<D: UiDriver>(
    driver: &D,
    settings: &HarvestSettings,
) -> Result<HarvestReport, ScrapeError> {
    // The top page and the Stores tab can take a long time to load.
    driver.set_implicit_wait(settings.implicit_wait).await?;

    let tab = driver.find_element(&screen::stores_tab()).await?;
    driver.click(&tab).await?;

    let expected_total = screen::read_total_count(driver).await?;
    tracing::info!(expected_total, "reading store list");

    let mut tally = StoreTally::new();

    // The first row of the initial capture is the list header.
    let rows = driver.find_elements(&screen::store_rows()).await?;
    for reading in screen::read_rows(driver, rows.get(1..).unwrap_or_default()).await? {
        tally.merge(reading);
    }
    let mut iterations = 1;
    report_progress(tally.len(), expected_total);

    driver.set_implicit_wait(Duration::ZERO).await?;

    let mut previous = tally.len();
    let mut stalled = false;
    let mut scrolls = 0usize;

    while tally.len() < expected_total {
        if scrolls >= settings.max_scrolls {
            return Err(ScrapeError::ScrollLimit {
                max_scrolls: settings.max_scrolls,
            });
        }
        scrolls += 1;

        screen::dismiss_dialog_if_present(driver).await;
        scroll_down(driver, settings.bottom_bar_dp).await?;

        let rows = driver.find_elements(&screen::store_rows()).await?;
        for reading in screen::read_rows(driver, &rows).await? {
            tally.merge(reading);
        }
        iterations += 1;

        if tally.len() == previous {
            tracing::info!(
                found = tally.len(),
                expected_total,
                "no new stores after scrolling; treating list as fully read"
            );
            stalled = true;
            break;
        }

        previous = tally.len();
        report_progress(previous, expected_total);
    }

    Ok(HarvestReport {
        tally,
        expected_total,
        iterations,
        stalled,
    })
}
