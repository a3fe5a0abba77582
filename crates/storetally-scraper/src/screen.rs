//! Locators and per-element reads for the restaurant-manager app's Stores tab.
//!
//! The XPaths are absolute paths through the app's React Native view tree and
//! break whenever the app's layout changes.

use storetally_core::StoreReading;
use storetally_driver::{ElementRef, Locator, UiDriver};

use crate::error::ScrapeError;
use crate::parse::parse_total_count;

/// Bottom tab that opens the store list.
pub const STORES_TAB: &str = "Stores, tab, 2 of 3";

/// "Wait" button of the system "isn't responding" dialog.
pub const ANR_WAIT_BUTTON: &str = "android:id/aerr_wait";

pub const TEXT_VIEW_CLASS: &str = "android.widget.TextView";

/// Fewer labels than this means the row is cut off at the viewport edge.
pub const MIN_ROW_LABELS: usize = 6;

const STORE_LIST_ROOT: &str = "/hierarchy/android.widget.FrameLayout/android.widget.LinearLayout/android.widget.FrameLayout/android.widget.LinearLayout/android.widget.FrameLayout/android.view.ViewGroup/android.widget.LinearLayout/android.widget.LinearLayout/android.widget.FrameLayout/android.widget.FrameLayout/android.view.ViewGroup/android.view.ViewGroup/android.view.ViewGroup/android.view.ViewGroup/android.view.ViewGroup[2]/android.view.ViewGroup/android.view.ViewGroup/android.view.ViewGroup/android.view.ViewGroup/android.view.ViewGroup[2]/android.view.ViewGroup/android.view.ViewGroup/android.view.ViewGroup";

#[must_use]
pub fn stores_tab() -> Locator {
    Locator::accessibility_id(STORES_TAB)
}

#[must_use]
pub fn anr_wait_button() -> Locator {
    Locator::id(ANR_WAIT_BUTTON)
}

/// Label reading e.g. `"12 stores"` above the list.
#[must_use]
pub fn total_count_label() -> Locator {
    Locator::xpath(format!(
        "{STORE_LIST_ROOT}/android.view.ViewGroup[1]/android.view.ViewGroup[1]/android.view.ViewGroup/android.widget.TextView"
    ))
}

/// Every list row currently rendered, header row included.
#[must_use]
pub fn store_rows() -> Locator {
    Locator::xpath(format!(
        "{STORE_LIST_ROOT}/android.view.ViewGroup[2]/android.widget.ScrollView/android.view.ViewGroup/android.view.ViewGroup/android.view.ViewGroup/android.view.ViewGroup"
    ))
}

/// Clicks "Wait" on the system "isn't responding" dialog if it is showing.
///
/// The dialog can pop up at any moment and swallow touch input. Its absence is
/// the normal case; any failure while probing for it is logged and ignored.
pub async fn dismiss_dialog_if_present<D: UiDriver>(driver: &D) {
    match driver.find_optional(&anr_wait_button()).await {
        Ok(Some(button)) => match driver.click(&button).await {
            Ok(()) => tracing::info!("dismissed system not-responding dialog"),
            Err(e) => tracing::debug!(error = %e, "failed to click not-responding dialog"),
        },
        Ok(None) => {}
        Err(e) => tracing::debug!(error = %e, "not-responding dialog lookup failed"),
    }
}

/// Reads and parses the expected number of stores.
///
/// # Errors
///
/// Returns [`ScrapeError::Driver`] if the label cannot be read and
/// [`ScrapeError::TotalCountMissing`] if it has no digits.
pub async fn read_total_count<D: UiDriver>(driver: &D) -> Result<usize, ScrapeError> {
    let label = driver.find_element(&total_count_label()).await?;
    let text = driver.text(&label).await?;
    parse_total_count(&text)
}

/// Reads one store row.
///
/// Returns `Ok(None)` for rows with fewer than [`MIN_ROW_LABELS`] labels. For
/// a complete row the name is the first label, sales the second-to-last, and
/// the order count the last.
///
/// # Errors
///
/// Returns [`ScrapeError::Driver`] if a lookup or text read fails.
pub async fn extract_store_reading<D: UiDriver>(
    driver: &D,
    row: &ElementRef,
) -> Result<Option<StoreReading>, ScrapeError> {
    let labels = driver
        .find_child_elements(row, &Locator::class_name(TEXT_VIEW_CLASS))
        .await?;
    if labels.len() < MIN_ROW_LABELS {
        tracing::debug!(labels = labels.len(), "skipping partially rendered store row");
        return Ok(None);
    }

    let [first, .., second_last, last] = labels.as_slice() else {
        return Ok(None);
    };

    Ok(Some(StoreReading {
        name: driver.text(first).await?,
        sales: driver.text(second_last).await?,
        order_count: driver.text(last).await?,
    }))
}

/// Reads every complete row in `rows`.
///
/// # Errors
///
/// Propagates the first [`ScrapeError`] from [`extract_store_reading`].
pub async fn read_rows<D: UiDriver>(
    driver: &D,
    rows: &[ElementRef],
) -> Result<Vec<StoreReading>, ScrapeError> {
    let mut readings = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(reading) = extract_store_reading(driver, row).await? {
            readings.push(reading);
        }
    }
    Ok(readings)
}
