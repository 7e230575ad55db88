//! The operations the publisher needs from a GeoServer instance.

use crate::error::AppError;
use crate::models::{DataStore, FeatureTypeDefinition, PublishResponse};
use async_trait::async_trait;

/// Discovery and publish calls against the GeoServer REST API.
///
/// `geopub_client::GeoServerClient` is the HTTP implementation; tests drive
/// the orchestrator with in-memory fakes.
#[async_trait]
pub trait GeoServerApi: Send + Sync {
    /// Lists the datastores of a workspace, in server order.
    async fn list_data_stores(&self, workspace: &str) -> Result<Vec<DataStore>, AppError>;

    /// Lists the tables/views of a datastore that are not yet published.
    async fn list_unassigned_layers(
        &self,
        workspace: &str,
        store: &str,
    ) -> Result<Vec<String>, AppError>;

    /// Registers a feature type with the datastore.
    ///
    /// A non-201 answer is not an error: it comes back as a
    /// [`PublishResponse`] for the caller to judge.
    async fn publish_feature_type(
        &self,
        workspace: &str,
        store: &str,
        definition: &FeatureTypeDefinition,
    ) -> Result<PublishResponse, AppError>;

    /// Publishes a layer under its own table name with the given title.
    async fn publish_layer(
        &self,
        workspace: &str,
        store: &str,
        layer_name: &str,
        title: &str,
    ) -> Result<PublishResponse, AppError> {
        let definition = FeatureTypeDefinition::new(layer_name, title, None);
        self.publish_feature_type(workspace, store, &definition)
            .await
    }
}
