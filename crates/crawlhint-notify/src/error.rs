//! Error types for search-engine notification.

/// Error while preparing a signed authorization assertion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// Service-account JSON is malformed or lacks required fields.
    #[error("invalid service account key: {0}")]
    ServiceAccount(#[source] serde_json::Error),

    /// Private key could not be loaded.
    #[error("invalid private key")]
    InvalidKey(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Signing the assertion failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Header or claims could not be encoded.
    #[error("JSON encoding error")]
    Encoding(#[source] serde_json::Error),
}

/// RSA key loading/parsing error.
#[cfg(feature = "rs256")]
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RsaKeyError {
    /// PKCS#1 key parsing error.
    #[error("PKCS#1 key error")]
    Pkcs1(#[from] rsa::pkcs1::Error),

    /// PKCS#8 key parsing error (returned when both formats fail).
    #[error("PKCS#8 key error")]
    Pkcs8(#[from] rsa::pkcs8::Error),
}

/// Error from a single notification call.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned a non-success status).
    #[error("{status}: {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response lacked a required field.
    #[error("missing field in response: {0}")]
    MissingField(&'static str),

    /// Assertion could not be built or signed.
    #[error("authorization error: {0}")]
    Auth(#[from] AuthError),
}

#[cfg(feature = "rs256")]
impl From<RsaKeyError> for AuthError {
    fn from(err: RsaKeyError) -> Self {
        Self::InvalidKey(Box::new(err))
    }
}
