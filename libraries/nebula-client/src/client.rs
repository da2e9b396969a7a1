//! Main Nebula service client.

use crate::catalog::CatalogClient;
use crate::error::{ClientError, Result};
use crate::likes::LikesClient;
use crate::streams::StreamClient;
use crate::types::ClientConfig;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// Main client for the Nebula backend.
///
/// Holds one pooled HTTP client and hands out borrowing sub-clients for the
/// stream, like, and catalog endpoints.
///
/// # Example
///
/// ```ignore
/// use nebula_client::{ClientConfig, NebulaClient};
///
/// let client = NebulaClient::new(ClientConfig::new("http://127.0.0.1:8000"))?;
/// let liked = client.likes().get_all().await?;
/// println!("{} liked tracks", liked.len());
/// ```
#[derive(Debug, Clone)]
pub struct NebulaClient {
    http: Client,
    config: ClientConfig,
}

impl NebulaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("Nebula/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            config: ClientConfig { url, ..config },
        })
    }

    /// Get the backend URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Stream resolution endpoints.
    pub fn streams(&self) -> StreamClient<'_> {
        StreamClient::new(&self.http, &self.config)
    }

    /// Liked track endpoints.
    pub fn likes(&self) -> LikesClient<'_> {
        LikesClient::new(&self.http, &self.config.url)
    }

    /// Search, track details, and autoplay endpoints.
    pub fn catalog(&self) -> CatalogClient<'_> {
        CatalogClient::new(&self.http, &self.config.url)
    }
}

/// Map a transport failure, separating "server down" from other errors.
pub(crate) fn send_error(err: reqwest::Error) -> ClientError {
    if err.is_connect() || err.is_timeout() {
        ClientError::ServerUnreachable(err.to_string())
    } else {
        ClientError::Request(err)
    }
}

/// Decode a JSON body, or turn a non-success status into `ServerError`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
        })
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(ClientError::ServerError {
            status: status.as_u16(),
            message: error_text,
        })
    }
}
