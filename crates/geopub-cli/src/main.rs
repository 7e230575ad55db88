use anyhow::Context;
use clap::Parser;
use std::path::Path;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use geopub::{load_configuration, Cli};
use geopub_client::GeoServerClient;
use geopub_core::{LayerPublisher, CONFIG_FILENAME};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the progress report
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    let _cli = Cli::parse();

    let config = load_configuration(Path::new(CONFIG_FILENAME))?;

    let client = GeoServerClient::new(&config.geoserver).context("Invalid GeoServer settings")?;
    let publisher = LayerPublisher::new(&client, &config);

    let stdout = std::io::stdout();
    let report = publisher.run(&mut stdout.lock()).await?;

    info!(
        "Run complete: {} published, {} failed, {} workspace(s) skipped, {} store(s) scanned",
        report.published_count(),
        report.failed_count(),
        report.skipped_workspaces.len(),
        report.stores_scanned
    );

    Ok(())
}
