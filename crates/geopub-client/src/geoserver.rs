use async_trait::async_trait;
use geopub_core::error::AppError;
use geopub_core::models::{
    AvailableFeatureTypes, DataStore, DataStoresResponse, FeatureTypeDefinition, PublishResponse,
};
use geopub_core::{GeoServerApi, GeoServerConfig};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Request, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

/// HTTP methods the GeoServer client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl FromStr for RequestMethod {
    type Err = AppError;

    /// Parses a method name case-insensitively; only GET and POST are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(RequestMethod::Get),
            "post" => Ok(RequestMethod::Post),
            _ => Err(AppError::InvalidMethod(s.to_string())),
        }
    }
}

impl RequestMethod {
    fn as_http(self) -> Method {
        match self {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
        }
    }
}

/// Query of the unassigned feature type listing.
const AVAILABLE_PARAMS: &[(&str, &str)] = &[("list", "available")];

/// Result of a dispatched request.
///
/// GET bodies are parsed; POST responses are handed back untouched so the
/// caller can look at the status code.
#[derive(Debug)]
pub enum ApiResponse {
    Json(Value),
    Raw(reqwest::Response),
}

impl ApiResponse {
    pub fn into_json(self) -> Result<Value, AppError> {
        match self {
            ApiResponse::Json(value) => Ok(value),
            ApiResponse::Raw(resp) => Err(AppError::Generic(format!(
                "Expected a JSON body, got an unparsed HTTP {} response",
                resp.status().as_u16()
            ))),
        }
    }

    pub fn into_raw(self) -> Result<reqwest::Response, AppError> {
        match self {
            ApiResponse::Raw(resp) => Ok(resp),
            ApiResponse::Json(_) => Err(AppError::Generic(
                "Expected a raw response, got a parsed JSON body".to_string(),
            )),
        }
    }
}

/// HTTP client for the GeoServer REST API.
///
/// Every request carries `Accept: application/json`,
/// `Content-Type: application/json` and the configured `Authorization`
/// value verbatim. There are no retries and no timeout.
///
/// # Examples
///
/// ```no_run
/// use geopub_client::GeoServerClient;
/// use geopub_core::{load_config, GeoServerApi};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.json"))?;
/// let client = GeoServerClient::new(&config.geoserver)?;
/// let stores = client.list_data_stores("ltj-dev").await?;
/// println!("Found {} datastores", stores.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GeoServerClient {
    client: Client,
    base_url: String,
}

impl GeoServerClient {
    /// Creates a client for `https://{host}{prefix}`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidUrl` if host and prefix do not form a URL.
    /// Returns `AppError::Generic` if the auth value is not a valid header.
    /// Returns `AppError::ClientError` if the HTTP client cannot be built.
    pub fn new(config: &GeoServerConfig) -> Result<Self, AppError> {
        let base_url = format!("https://{}{}", config.host, config.prefix);
        Url::parse(&base_url).map_err(|e| AppError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder()
            .user_agent("geopub/0.1")
            .default_headers(default_headers(&config.auth)?)
            .build()
            .map_err(|e| AppError::ClientError(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Full URL for an API path such as `/workspaces/ltj-dev/datastores`.
    pub fn url(&self, path: &str) -> Result<Url, AppError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| AppError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Builds a request without sending it.
    ///
    /// The static headers are added by the underlying client when the
    /// request is executed.
    pub fn build(
        &self,
        method: RequestMethod,
        path: &str,
        params: Option<&[(&str, &str)]>,
        body: Option<String>,
    ) -> Result<Request, AppError> {
        let mut req = self.client.request(method.as_http(), self.url(path)?);
        if let Some(params) = params {
            req = req.query(params);
        }
        if let Some(body) = body {
            req = req.body(body);
        }
        req.build().map_err(|e| AppError::ClientError(e.to_string()))
    }

    /// Sends a request by method name.
    ///
    /// This is the untyped entry point: the method string is checked before
    /// anything touches the network, and values other than GET/POST (any
    /// case) fail with `AppError::InvalidMethod`. The discovery and publish
    /// calls build their requests directly and share [`Self::execute`].
    pub async fn request(
        &self,
        path: &str,
        method: &str,
        params: Option<&[(&str, &str)]>,
        body: Option<String>,
    ) -> Result<ApiResponse, AppError> {
        let method = method.parse::<RequestMethod>()?;
        let req = self.build(method, path, params, body)?;
        self.execute(method, req).await
    }

    /// Sends a built request.
    ///
    /// GET bodies are parsed as JSON regardless of status; a body that is not
    /// JSON yields `AppError::NonJsonResponse` with the status and raw text.
    /// POST responses are returned without inspection.
    pub async fn execute(
        &self,
        method: RequestMethod,
        req: Request,
    ) -> Result<ApiResponse, AppError> {
        let url = req.url().clone();
        debug!("{} {}", req.method(), url);

        let resp = self.client.execute(req).await.map_err(send_error)?;
        let status = resp.status().as_u16();
        debug!("{} -> {}", url, status);

        match method {
            RequestMethod::Get => {
                let text = resp
                    .text()
                    .await
                    .map_err(|e| AppError::ClientError(e.to_string()))?;
                parse_json_body(status, text).map(ApiResponse::Json)
            }
            RequestMethod::Post => Ok(ApiResponse::Raw(resp)),
        }
    }

    fn list_data_stores_request(&self, workspace: &str) -> Result<Request, AppError> {
        self.build(RequestMethod::Get, &data_stores_path(workspace), None, None)
    }

    fn unassigned_layers_request(
        &self,
        workspace: &str,
        store: &str,
    ) -> Result<Request, AppError> {
        self.build(
            RequestMethod::Get,
            &feature_types_path(workspace, store),
            Some(AVAILABLE_PARAMS),
            None,
        )
    }

    fn publish_request(
        &self,
        workspace: &str,
        store: &str,
        definition: &FeatureTypeDefinition,
    ) -> Result<Request, AppError> {
        self.build(
            RequestMethod::Post,
            &feature_types_path(workspace, store),
            None,
            Some(definition.to_request_body()?),
        )
    }
}

#[async_trait]
impl GeoServerApi for GeoServerClient {
    async fn list_data_stores(&self, workspace: &str) -> Result<Vec<DataStore>, AppError> {
        let req = self.list_data_stores_request(workspace)?;
        let value = self.execute(RequestMethod::Get, req).await?.into_json()?;
        let resp: DataStoresResponse = decode(&data_stores_path(workspace), value)?;
        Ok(resp.into_stores())
    }

    async fn list_unassigned_layers(
        &self,
        workspace: &str,
        store: &str,
    ) -> Result<Vec<String>, AppError> {
        let req = self.unassigned_layers_request(workspace, store)?;
        let value = self.execute(RequestMethod::Get, req).await?.into_json()?;
        let resp: AvailableFeatureTypes = decode(&feature_types_path(workspace, store), value)?;
        Ok(resp.into_names())
    }

    async fn publish_feature_type(
        &self,
        workspace: &str,
        store: &str,
        definition: &FeatureTypeDefinition,
    ) -> Result<PublishResponse, AppError> {
        let req = self.publish_request(workspace, store, definition)?;
        let resp = self.execute(RequestMethod::Post, req).await?.into_raw()?;

        let status = resp.status().as_u16();
        // Only the status decides the outcome; the body is kept for logs.
        let body = resp.text().await.unwrap_or_default();
        if status != 201 {
            debug!(
                "Publishing {} in {}/{} answered {}: {}",
                definition.name, workspace, store, status, body
            );
        }

        Ok(PublishResponse { status, body })
    }
}

fn data_stores_path(workspace: &str) -> String {
    format!("/workspaces/{}/datastores", workspace)
}

fn feature_types_path(workspace: &str, store: &str) -> String {
    format!("/workspaces/{}/datastores/{}/featuretypes", workspace, store)
}

/// Static headers sent with every request.
fn default_headers(auth: &str) -> Result<HeaderMap, AppError> {
    let mut auth = HeaderValue::from_str(auth).map_err(|_| {
        AppError::Generic("geoserver.auth is not a valid Authorization header value".to_string())
    })?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(AUTHORIZATION, auth);
    Ok(headers)
}

fn send_error(e: reqwest::Error) -> AppError {
    if e.is_connect() {
        AppError::NetworkError(format!("Connection failed: {}", e))
    } else {
        AppError::ClientError(e.to_string())
    }
}

fn parse_json_body(status: u16, text: String) -> Result<Value, AppError> {
    serde_json::from_str(&text).map_err(|_| AppError::NonJsonResponse { status, body: text })
}

/// Decodes a parsed body into the shape expected for `path`.
fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|source| AppError::UnexpectedShape {
        path: path.to_string(),
        source,
    })
}
