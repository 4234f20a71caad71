//! Notifier credentials supplied through the environment.

/// Environment variable holding the Google service-account JSON key.
pub const GOOGLE_SERVICE_ACCOUNT_KEY_VAR: &str = "GOOGLE_SERVICE_ACCOUNT_KEY";

/// Environment variable holding the `IndexNow` shared key.
pub const INDEXNOW_KEY_VAR: &str = "INDEXNOW_KEY";

/// Optional credentials, one per notifier that needs one.
///
/// `WebSub` needs no credential and has no field here. Empty values are
/// treated the same as unset ones.
#[derive(Clone, Default)]
pub struct Credentials {
    /// Raw service-account JSON for the Google Indexing API.
    pub google_service_account_key: Option<String>,
    /// `IndexNow` key, sent verbatim in the request body.
    pub indexnow_key: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|value| !value.is_empty());
        Self {
            google_service_account_key: read(GOOGLE_SERVICE_ACCOUNT_KEY_VAR),
            indexnow_key: read(INDEXNOW_KEY_VAR),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field(
                "google_service_account_key",
                &redact(&self.google_service_account_key),
            )
            .field("indexnow_key", &redact(&self.indexnow_key))
            .finish()
    }
}
