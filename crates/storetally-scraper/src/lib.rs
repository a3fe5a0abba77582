pub mod error;
pub mod export;
pub mod harvest;
pub mod parse;
pub mod screen;
pub mod scroll;
pub mod supervisor;
pub mod tally;

pub use error::ScrapeError;
pub use export::{ExportReceipt, Exporter};
pub use harvest::{harvest, HarvestReport, HarvestSettings};
pub use supervisor::{
    AppiumSessions, CycleReport, RunSummary, SessionFactory, Sleeper, Supervisor, TokioSleeper,
};
pub use tally::StoreTally;
