//! Walks workspaces, datastores and unassigned layers, publishing each layer.
//!
//! Progress goes to the supplied writer in the line format operators know
//! from the console; the structured outcome comes back as a [`RunReport`].

use crate::api::GeoServerApi;
use crate::config::Config;
use crate::error::AppError;
use crate::models::PublishResponse;
use std::io::Write;
use tracing::{info, warn};

/// Outcome of publishing a single layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// GeoServer answered 201
    Published,
    /// Any other status
    Failed,
}

impl PublishOutcome {
    pub fn from_response(response: &PublishResponse) -> Self {
        if response.is_created() {
            PublishOutcome::Published
        } else {
            PublishOutcome::Failed
        }
    }

    /// Console label for the outcome.
    pub fn label(&self) -> &'static str {
        match self {
            PublishOutcome::Published => "OK",
            PublishOutcome::Failed => "FAIL",
        }
    }
}

/// Result of one publish attempt.
#[derive(Debug, Clone)]
pub struct LayerResult {
    pub workspace: String,
    pub store: String,
    pub layer: String,
    pub title: String,
    pub status: u16,
    pub outcome: PublishOutcome,
}

/// Everything that happened during a run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Publish attempts, in processing order.
    pub layers: Vec<LayerResult>,
    /// Workspaces whose datastore listing failed.
    pub skipped_workspaces: Vec<String>,
    /// Number of datastores inspected.
    pub stores_scanned: usize,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|l| l.outcome == PublishOutcome::Published)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|l| l.outcome == PublishOutcome::Failed)
            .count()
    }

    pub fn total_layers(&self) -> usize {
        self.layers.len()
    }
}

/// Publishes every unassigned layer in the configured workspaces.
///
/// # Examples
///
/// ```no_run
/// use geopub_core::{GeoServerApi, LayerPublisher, load_config};
/// use std::path::Path;
///
/// # async fn example(api: &impl GeoServerApi) -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.json"))?;
/// let publisher = LayerPublisher::new(api, &config);
/// let report = publisher.run(&mut std::io::stdout()).await?;
/// println!("{} published", report.published_count());
/// # Ok(())
/// # }
/// ```
pub struct LayerPublisher<'a, A: GeoServerApi> {
    api: &'a A,
    config: &'a Config,
}

impl<'a, A: GeoServerApi> LayerPublisher<'a, A> {
    pub fn new(api: &'a A, config: &'a Config) -> Self {
        Self { api, config }
    }

    /// Runs the full scan.
    ///
    /// A workspace whose datastores cannot be listed is reported and skipped.
    /// A publish answered with anything but 201 is reported as `FAIL` and the
    /// run goes on. Every other error aborts the run.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunReport, AppError> {
        let mut report = RunReport::new();

        info!(
            "Scanning {} workspace(s) on {}",
            self.config.workspaces.len(),
            self.config.geoserver.host
        );
        writeln!(
            out,
            "Checking stores for workspaces: {}",
            self.config.workspaces.join(", ")
        )?;
        writeln!(out, "----------------------------------")?;

        for workspace in &self.config.workspaces {
            let stores = match self.api.list_data_stores(workspace).await {
                Ok(stores) => stores,
                Err(e) => {
                    warn!("Listing datastores of {} failed: {}", workspace, e);
                    writeln!(out, "No stores found for workspace {}", workspace)?;
                    report.skipped_workspaces.push(workspace.clone());
                    continue;
                }
            };

            for store in stores {
                report.stores_scanned += 1;
                let layers = self
                    .api
                    .list_unassigned_layers(workspace, &store.name)
                    .await?;

                writeln!(
                    out,
                    "Store {} in {} has {} unassigned layers",
                    store.name,
                    workspace,
                    layers.len()
                )?;
                if !layers.is_empty() {
                    writeln!(out, "Publishing them all now...")?;
                }

                for layer in layers {
                    write!(out, "{}...", layer)?;
                    out.flush()?;

                    let title = self.config.resolve_title(&layer);
                    let response = self
                        .api
                        .publish_layer(workspace, &store.name, &layer, title)
                        .await?;
                    let outcome = PublishOutcome::from_response(&response);

                    writeln!(out, "{}", outcome.label())?;
                    out.flush()?;

                    report.layers.push(LayerResult {
                        workspace: workspace.clone(),
                        store: store.name.clone(),
                        title: title.to_string(),
                        layer,
                        status: response.status,
                        outcome,
                    });
                }
            }
        }

        Ok(report)
    }
}
