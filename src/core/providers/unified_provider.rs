//! Unified Provider Error Handling
//!
//! Single error type for every upstream call the executor makes.
//!
//! | Variant | Purpose | HTTP Status | Retryable |
//! |------|------|------------|--------|
//! | Authentication | Credential rejected | 401 | No |
//! | Configuration | Credential or endpoint missing | 400 | No |
//! | RateLimit | Rate limit exceeded | 429 | Yes (after delay) |
//! | InvalidRequest | Request rejected before sending | 400 | No |
//! | Network | Transport failure | 503 | Yes |
//! | Timeout | Deadline elapsed | 503 | Yes |
//! | ApiError | Non-2xx response | status | 429 / 5xx |
//! | ResponseParsing | Malformed response body | 502 | No |
//! | NotSupported | Capability not offered by provider | 405 | No |
//!
//! ```rust,ignore
//! use universal_ai::ProviderError;
//!
//! let err = ProviderError::rate_limit("openai", Some(60));
//! if err.is_retryable() {
//!     println!("retry after {:?}", err.retry_delay());
//! }
//! ```

/// Unified provider error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("Authentication failed for {provider}: {message}")]
    Authentication {
        provider: &'static str,
        message: String,
    },

    #[error("Configuration error for {provider}: {message}")]
    Configuration {
        provider: &'static str,
        message: String,
    },

    #[error("Rate limit exceeded for {provider}: {message}")]
    RateLimit {
        provider: &'static str,
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Invalid request for {provider}: {message}")]
    InvalidRequest {
        provider: &'static str,
        message: String,
    },

    #[error("Network error for {provider}: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    #[error("Timeout for {provider}: {message}")]
    Timeout {
        provider: &'static str,
        message: String,
    },

    #[error("API error for {provider} (status {status}): {message}")]
    ApiError {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("Response parsing error for {provider}: {message}")]
    ResponseParsing {
        provider: &'static str,
        message: String,
    },

    #[error("Feature '{feature}' not supported by {provider}")]
    NotSupported {
        provider: &'static str,
        feature: String,
    },
}

impl ProviderError {
    pub fn authentication(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider,
            message: message.into(),
        }
    }

    pub fn configuration(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            provider,
            message: message.into(),
        }
    }

    pub fn rate_limit(provider: &'static str, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            provider,
            message: match retry_after {
                Some(secs) => format!("Rate limit exceeded, retry after {}s", secs),
                None => "Rate limit exceeded".to_string(),
            },
            retry_after,
        }
    }

    pub fn invalid_request(provider: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            provider,
            message: message.into(),
        }
    }

    pub fn network(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Network {
            provider,
            message: message.into(),
        }
    }

    pub fn timeout(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Timeout {
            provider,
            message: message.into(),
        }
    }

    pub fn api_error(provider: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider,
            status,
            message: message.into(),
        }
    }

    pub fn response_parsing(provider: &'static str, message: impl Into<String>) -> Self {
        Self::ResponseParsing {
            provider,
            message: message.into(),
        }
    }

    pub fn not_supported(provider: &'static str, feature: impl Into<String>) -> Self {
        Self::NotSupported {
            provider,
            feature: feature.into(),
        }
    }

    /// Map a non-success HTTP status and body to an error
    pub fn from_status(provider: &'static str, status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::authentication(provider, format!("HTTP {}: {}", status, body)),
            429 => Self::rate_limit(provider, extract_retry_after(body)),
            _ => Self::api_error(provider, status, body),
        }
    }

    /// Get the provider kind that caused this error
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Authentication { provider, .. }
            | Self::Configuration { provider, .. }
            | Self::RateLimit { provider, .. }
            | Self::InvalidRequest { provider, .. }
            | Self::Network { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ApiError { provider, .. }
            | Self::ResponseParsing { provider, .. }
            | Self::NotSupported { provider, .. } => provider,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } | Self::RateLimit { .. } => true,
            Self::ApiError { status, .. } => matches!(*status, 429 | 500..=599),
            Self::Authentication { .. }
            | Self::Configuration { .. }
            | Self::InvalidRequest { .. }
            | Self::ResponseParsing { .. }
            | Self::NotSupported { .. } => false,
        }
    }

    /// Get retry delay in seconds
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after, .. } => *retry_after,
            Self::Network { .. } | Self::Timeout { .. } => Some(1),
            Self::ApiError { status, .. } => match *status {
                429 => Some(60),
                500..=599 => Some(3),
                _ => None,
            },
            _ => None,
        }
    }

    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Authentication { .. } => 401,
            Self::RateLimit { .. } => 429,
            Self::InvalidRequest { .. } | Self::Configuration { .. } => 400,
            Self::NotSupported { .. } => 405,
            Self::Network { .. } | Self::Timeout { .. } => 503,
            Self::ApiError { status, .. } => *status,
            Self::ResponseParsing { .. } => 502,
        }
    }
}

/// Pull a `retry_after` hint out of a JSON error body
fn extract_retry_after(body: &str) -> Option<u64> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.get("retry_after")
        .or_else(|| json.get("error").and_then(|e| e.get("retry_after")))
        .and_then(|v| v.as_u64())
}
