use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::warn;

use crate::core::providers::provider_registry::ProviderDescriptor;
use crate::core::providers::unified_provider::ProviderError;
use crate::core::providers::{AuthScheme, ProviderKind};
use crate::utils::{sanitize_for_logging, truncate_string};

/// Connection pool settings
pub struct PoolConfig;
impl PoolConfig {
    /// Outer bound; per-call deadlines are applied by the executor
    pub const TIMEOUT_SECS: u64 = 600;
    pub const POOL_SIZE: usize = 80;
    pub const KEEPALIVE_SECS: u64 = 90;
    pub const USER_AGENT: &'static str = concat!("universal-ai/", env!("CARGO_PKG_VERSION"));
    pub const ANTHROPIC_VERSION: &'static str = "2023-06-01";
}

/// Shared reqwest client used by every provider module
#[derive(Debug, Clone)]
pub struct ConnectionPool {
    client: Client,
}

impl ConnectionPool {
    /// Create a new connection pool with optimized settings
    pub fn new() -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(PoolConfig::TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(PoolConfig::KEEPALIVE_SECS))
            .pool_max_idle_per_host(PoolConfig::POOL_SIZE)
            .user_agent(PoolConfig::USER_AGENT)
            .build()
            .map_err(|e| {
                ProviderError::configuration("http", format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Get the underlying reqwest client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// GET `{base_url}{path}` with the provider's credential attached
    pub fn get(&self, provider: &ProviderDescriptor, path: &str) -> RequestBuilder {
        authorize(self.client.get(endpoint(provider, path)), provider)
    }

    /// POST `{base_url}{path}` with the provider's credential attached
    pub fn post(&self, provider: &ProviderDescriptor, path: &str) -> RequestBuilder {
        authorize(self.client.post(endpoint(provider, path)), provider)
    }

    /// Send and decode a JSON response, mapping failures to [`ProviderError`]
    pub async fn send_json(
        &self,
        kind: ProviderKind,
        request: RequestBuilder,
    ) -> Result<Value, ProviderError> {
        let response = send(kind, request).await?;
        let body = read_success_text(kind, response).await?;
        serde_json::from_str(&body).map_err(|e| {
            ProviderError::response_parsing(kind.as_str(), format!("Failed to parse JSON: {}", e))
        })
    }

    /// Send and return the raw body along with its content type
    pub async fn send_bytes(
        &self,
        kind: ProviderKind,
        request: RequestBuilder,
    ) -> Result<(Vec<u8>, Option<String>), ProviderError> {
        let response = send(kind, request).await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(kind, status, &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| network_error(kind, &e))?;
        Ok((bytes.to_vec(), content_type))
    }
}

fn endpoint(provider: &ProviderDescriptor, path: &str) -> String {
    if path.is_empty() {
        provider.base_url.clone()
    } else {
        format!("{}{}", provider.base_url, path)
    }
}

fn authorize(request: RequestBuilder, provider: &ProviderDescriptor) -> RequestBuilder {
    let Some(api_key) = provider.api_key() else {
        return request;
    };

    let request = match provider.kind.auth_scheme() {
        AuthScheme::Bearer => request.bearer_auth(api_key),
        AuthScheme::Header(name) => request.header(name, api_key),
        AuthScheme::Query => request.query(&[("key", api_key)]),
    };

    if provider.kind == ProviderKind::Anthropic {
        let version = provider
            .api_version
            .as_deref()
            .unwrap_or(PoolConfig::ANTHROPIC_VERSION);
        request.header("anthropic-version", version)
    } else {
        request
    }
}

async fn send(kind: ProviderKind, request: RequestBuilder) -> Result<Response, ProviderError> {
    request.send().await.map_err(|e| network_error(kind, &e))
}

async fn read_success_text(kind: ProviderKind, response: Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| network_error(kind, &e))?;

    if !status.is_success() {
        return Err(map_http_error(kind, status.as_u16(), &body));
    }
    Ok(body)
}

fn network_error(kind: ProviderKind, error: &reqwest::Error) -> ProviderError {
    let message = sanitize_for_logging(&error.to_string());
    if error.is_timeout() {
        ProviderError::timeout(kind.as_str(), message)
    } else {
        ProviderError::network(kind.as_str(), message)
    }
}

/// Map a non-2xx response to an error, logging a sanitized excerpt of the body
pub fn map_http_error(kind: ProviderKind, status: u16, body: &str) -> ProviderError {
    warn!(
        provider = kind.as_str(),
        status,
        "Upstream returned error: {}",
        truncate_string(&sanitize_for_logging(body), 300)
    );
    ProviderError::from_status(kind.as_str(), status, body)
}
