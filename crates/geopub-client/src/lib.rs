//! Geopub Client - HTTP client for the GeoServer REST API
//!
//! [`GeoServerClient`] sends authenticated JSON requests to
//! `https://{host}{prefix}{path}` and implements
//! [`geopub_core::GeoServerApi`] on top of them.

pub mod geoserver;

pub use geoserver::{ApiResponse, GeoServerClient, RequestMethod};
