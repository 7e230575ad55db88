//! Geopub CLI - Command-line entry point for the GeoServer layer publisher.

pub mod config;

pub use config::{load_configuration, Cli};
