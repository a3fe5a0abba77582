use storetally_driver::DriverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("total store count label has no digits: \"{text}\"")]
    TotalCountMissing { text: String },

    #[error("invalid sales value for {store}: \"{raw}\"")]
    InvalidSales { store: String, raw: String },

    #[error("invalid order count for {store}: \"{raw}\"")]
    InvalidOrderCount { store: String, raw: String },

    #[error("store {store} has sales but no order count")]
    MissingOrderCount { store: String },

    #[error("scroll limit reached: still finding new stores after {max_scrolls} scrolls")]
    ScrollLimit { max_scrolls: usize },
}
