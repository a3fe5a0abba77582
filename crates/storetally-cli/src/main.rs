use clap::{Parser, Subcommand};
use storetally_scraper::{AppiumSessions, Exporter, HarvestSettings, Supervisor, TokioSleeper};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storetally")]
#[command(about = "Scrape per-store sales from the restaurant manager app and export them")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run collection cycles forever (the default).
    Run {
        /// Stop after this many cycles.
        #[arg(long, env = "STORETALLY_MAX_CYCLES")]
        max_cycles: Option<u64>,
    },
    /// Run a single cycle and exit.
    Once,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = storetally_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(?config, "configuration loaded");

    let exporter = Exporter::new(&config.export_url, config.request_timeout_secs)?;
    let supervisor = Supervisor::new(
        AppiumSessions::from_config(&config),
        exporter,
        TokioSleeper,
        HarvestSettings::from_config(&config),
        config.cycle_delay(),
    );

    match cli.command {
        Some(Commands::Once) => {
            let report = supervisor.run_cycle().await?;
            tracing::info!(
                exported = report.exported,
                expected_total = report.expected_total,
                export_status = report.export_status,
                "cycle complete"
            );
        }
        Some(Commands::Run { max_cycles }) => {
            let summary = supervisor.run(max_cycles).await;
            tracing::info!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                "stopped after requested cycles"
            );
        }
        None => {
            supervisor.run(None).await;
        }
    }

    Ok(())
}
