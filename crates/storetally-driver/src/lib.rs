pub mod client;
pub mod driver;
pub mod error;
pub mod locator;
pub mod types;

pub use client::AppiumClient;
pub use driver::UiDriver;
pub use error::DriverError;
pub use locator::Locator;
pub use types::{ElementRef, Point, Swipe, WindowRect};
