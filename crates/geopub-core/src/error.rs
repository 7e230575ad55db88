use thiserror::Error;

/// Application-wide error types.
///
/// This enum represents every failure the publisher can hit, from reading
/// `config.json` to talking to the GeoServer REST API. It uses the `thiserror`
/// crate for ergonomic error handling.
///
/// # Error Conversion
///
/// `serde_json::Error` converts into `AppError::SerializationError` through
/// the `#[from]` attribute. Config and response decoding failures use their
/// own variants so the message can name the file or the request path.
///
/// # Examples
///
/// ```no_run
/// use geopub_core::error::AppError;
///
/// fn example() -> Result<(), AppError> {
///     Err(AppError::Generic("Something went wrong".to_string()))
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// The configuration file does not exist or cannot be read.
    #[error("Cannot read config file {path}: {source}")]
    ConfigNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON or lacks a required field.
    ///
    /// The wrapped serde_json error carries the line and column of the failure.
    #[error("Invalid config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP client request failed.
    ///
    /// This error occurs when the request cannot be built or sent, or the
    /// response body cannot be read.
    #[error("API Client error: {0}")]
    ClientError(String),

    /// A GET response body was not JSON.
    ///
    /// GeoServer answers unknown workspaces and similar mistakes with plain
    /// text, so the raw body is kept for the diagnostic.
    #[error("Response (code {status}) was not JSON: {body}")]
    NonJsonResponse { status: u16, body: String },

    /// A JSON response did not have the structure the caller expected.
    #[error("Unexpected response shape from {path}: {source}")]
    UnexpectedShape {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Request method other than GET or POST.
    #[error("Invalid request type: {0}")]
    InvalidMethod(String),

    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// URL parsing failed.
    ///
    /// This error occurs when host, prefix and path do not combine into a
    /// valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Writing the progress report failed.
    #[error("Output error: {0}")]
    OutputError(#[from] std::io::Error),

    /// Network or connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Generic application error for cases not covered by specific variants.
    #[error("Error: {0}")]
    Generic(String),
}

impl AppError {
    /// Returns a user-friendly error message suitable for CLI output.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ConfigNotFound { path, source } => {
                format!(
                    "Cannot read {}: {}\n   Create it in the working directory with geoserver, workspaces and name_title_map.",
                    path, source
                )
            }
            AppError::ConfigParse { path, source } => {
                format!("{} is malformed: {}", path, source)
            }
            AppError::NonJsonResponse { status, .. } if *status == 401 || *status == 403 => {
                "GeoServer rejected the credentials.\n   Check geoserver.auth in config.json."
                    .to_string()
            }
            AppError::NetworkError(msg) => {
                format!(
                    "Network error: {}\n   Check geoserver.host and your internet connection.",
                    msg
                )
            }
            AppError::InvalidUrl(url) => {
                format!(
                    "Invalid URL: {}\n   Example host: geoserver.hel.fi, prefix: /geoserver/rest",
                    url
                )
            }
            _ => self.to_string(),
        }
    }
}
