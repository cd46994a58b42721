use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bowling_scrape::fetch::HttpFetcher;
use bowling_scrape::output::FileWriter;
use bowling_scrape::robots::RobotsGate;
use bowling_scrape::{run, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bowling_scrape=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    tracing::info!(index = %config.index_url, "Starting bowling scrape");

    let http = HttpFetcher::from_config(&config).context("Failed to create HTTP client")?;
    let mut writer = FileWriter::new(&config.output_dir, config.format);

    let summary = if config.respect_robots {
        let gated = RobotsGate::new(http, config.user_agent.clone());
        run(&config, &gated, &mut writer).await
    } else {
        run(&config, &http, &mut writer).await
    }
    .context("Scrape failed")?;

    tracing::info!(
        path = %summary.path.display(),
        records = summary.records,
        skipped = summary.report.skipped.len(),
        "Done"
    );
    Ok(())
}
