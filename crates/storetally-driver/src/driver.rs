//! The seam between the harvester and whatever drives the device.

use std::time::Duration;

use crate::error::DriverError;
use crate::locator::Locator;
use crate::types::{ElementRef, Swipe, WindowRect};

/// Operations the harvester needs from a live automation session.
///
/// [`crate::AppiumClient`] implements this over HTTP; tests implement it with
/// scripted screens.
#[allow(async_fn_in_trait)]
pub trait UiDriver {
    /// Finds one element, failing with [`DriverError::NoSuchElement`] when the
    /// implicit wait expires without a match.
    async fn find_element(&self, locator: &Locator) -> Result<ElementRef, DriverError>;

    /// Finds every matching element. No match is an empty `Vec`, not an error.
    async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError>;

    async fn find_child_elements(
        &self,
        parent: &ElementRef,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, DriverError>;

    async fn click(&self, element: &ElementRef) -> Result<(), DriverError>;

    async fn text(&self, element: &ElementRef) -> Result<String, DriverError>;

    async fn window_rect(&self) -> Result<WindowRect, DriverError>;

    /// Screen density in dots per inch.
    async fn display_density(&self) -> Result<u32, DriverError>;

    async fn swipe(&self, swipe: &Swipe) -> Result<(), DriverError>;

    async fn set_implicit_wait(&self, wait: Duration) -> Result<(), DriverError>;

    /// Sends the app under test to the background and stops it.
    async fn close_app(&self) -> Result<(), DriverError>;

    /// Ends the session. Consumes the driver so it cannot be used afterwards.
    async fn quit(self) -> Result<(), DriverError>
    where
        Self: Sized;

    /// Like [`UiDriver::find_element`], but a missing element is `Ok(None)`.
    async fn find_optional(&self, locator: &Locator) -> Result<Option<ElementRef>, DriverError> {
        match self.find_element(locator).await {
            Ok(element) => Ok(Some(element)),
            Err(err) if err.is_no_such_element() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
