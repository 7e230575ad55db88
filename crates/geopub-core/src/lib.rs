//! Geopub Core - Configuration, domain types, error handling and the publish run.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod publish;

pub use api::GeoServerApi;
pub use config::{load_config, Config, GeoServerConfig, CONFIG_FILENAME};
pub use error::AppError;
pub use models::{
    AvailableFeatureTypes, DataStore, DataStoresResponse, FeatureTypeDefinition, PublishResponse,
};
pub use publish::{LayerPublisher, LayerResult, PublishOutcome, RunReport};
