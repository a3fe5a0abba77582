//! The outer loop: open a session, harvest, export, close, sleep, repeat.
//!
//! A cycle either completes or is abandoned as a whole. Whatever happens
//! after a session opens, it is quit before the cycle returns.

use std::time::{Duration, Instant};

use chrono::Local;
use storetally_core::{AppConfig, AppiumCapabilities};
use storetally_driver::{AppiumClient, DriverError, UiDriver};

use crate::error::ScrapeError;
use crate::export::Exporter;
use crate::harvest::{harvest, HarvestSettings};
use crate::screen;

/// Waits between cycles. Tests substitute an implementation that returns at once.
#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Opens a fresh automation session for each cycle.
#[allow(async_fn_in_trait)]
pub trait SessionFactory {
    type Driver: UiDriver;

    async fn open(&self) -> Result<Self::Driver, DriverError>;
}

/// Opens real Appium sessions.
#[derive(Debug, Clone)]
pub struct AppiumSessions {
    url: String,
    capabilities: AppiumCapabilities,
    timeout_secs: u64,
}

impl AppiumSessions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            url: config.appium_url.clone(),
            capabilities: config.capabilities.clone(),
            timeout_secs: config.request_timeout_secs,
        }
    }
}

impl SessionFactory for AppiumSessions {
    type Driver = AppiumClient;

    async fn open(&self) -> Result<AppiumClient, DriverError> {
        AppiumClient::connect(&self.url, &self.capabilities, self.timeout_secs).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub expected_total: usize,
    pub exported: usize,
    pub stalled: bool,
    /// Time from cycle start to the end of harvesting.
    pub harvest_elapsed: Duration,
    pub export_status: u16,
}

/// Counts of finished cycles, returned by bounded runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: u64,
    pub failed: u64,
}

pub struct Supervisor<F, S> {
    sessions: F,
    exporter: Exporter,
    sleeper: S,
    settings: HarvestSettings,
    cycle_delay: Duration,
}

impl<F: SessionFactory, S: Sleeper> Supervisor<F, S> {
    pub fn new(
        sessions: F,
        exporter: Exporter,
        sleeper: S,
        settings: HarvestSettings,
        cycle_delay: Duration,
    ) -> Self {
        Self {
            sessions,
            exporter,
            sleeper,
            settings,
            cycle_delay,
        }
    }

    /// Runs one full cycle.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScrapeError`] from connecting, harvesting,
    /// exporting, or closing the app. The session is quit either way.
    pub async fn run_cycle(&self) -> Result<CycleReport, ScrapeError> {
        let started = Instant::now();
        tracing::info!(start = %Local::now().format("%H:%M:%S"), "cycle starting");

        let driver = self.sessions.open().await?;
        let outcome = self.drive(&driver, started).await;

        if let Err(e) = driver.quit().await {
            tracing::warn!(error = %e, "failed to quit automation session");
        }
        outcome
    }

    async fn drive(&self, driver: &F::Driver, started: Instant) -> Result<CycleReport, ScrapeError> {
        screen::dismiss_dialog_if_present(driver).await;

        let report = harvest(driver, &self.settings).await?;
        let harvest_elapsed = started.elapsed();
        tracing::info!(
            elapsed_secs = harvest_elapsed.as_secs_f64(),
            stores = report.tally.len(),
            expected_total = report.expected_total,
            stalled = report.stalled,
            "harvest finished"
        );

        let records = report.tally.to_export_records()?;
        let exported = records.len();
        let receipt = self.exporter.submit(records).await?;

        driver.close_app().await?;

        Ok(CycleReport {
            expected_total: report.expected_total,
            exported,
            stalled: report.stalled,
            harvest_elapsed,
            export_status: receipt.status,
        })
    }

    /// Runs cycles back to back, sleeping the cycle delay after each one.
    ///
    /// A failed cycle is logged and dropped; the next one starts from scratch.
    /// With `max_cycles = None` this never returns.
    pub async fn run(&self, max_cycles: Option<u64>) -> RunSummary {
        let mut summary = RunSummary::default();

        while max_cycles.is_none_or(|max| summary.succeeded + summary.failed < max) {
            match self.run_cycle().await {
                Ok(report) => {
                    summary.succeeded += 1;
                    tracing::info!(
                        exported = report.exported,
                        export_status = report.export_status,
                        "cycle complete"
                    );
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!(error = %e, "cycle failed");
                }
            }

            self.sleeper.sleep(self.cycle_delay).await;
        }

        summary
    }
}
