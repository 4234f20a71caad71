//! OAuth2 JWT-bearer token exchange.

use serde::Deserialize;
use tracing::info;
use ureq::Agent;

use super::assertion::{JwtClaims, build_assertion};
use super::signer::AssertionSigner;
use crate::client::read_response;
use crate::error::{AuthError, NotifyError};

/// Grant type for exchanging a signed assertion (RFC 7523).
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Fields of a Google service-account key file used here.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    /// Issuer identity.
    pub client_email: String,
    /// PEM-encoded private key.
    pub private_key: String,
}

impl ServiceAccount {
    /// Parse a service-account JSON key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ServiceAccount`] if the JSON is malformed or lacks
    /// `client_email` or `private_key`.
    pub fn from_json(json: &str) -> Result<Self, AuthError> {
        serde_json::from_str(json).map_err(AuthError::ServiceAccount)
    }
}

impl std::fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Short-lived access token.
#[derive(Clone)]
pub struct BearerToken {
    secret: String,
    expires_in: Option<u64>,
}

impl BearerToken {
    /// Token value for the `Authorization` header.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Lifetime in seconds reported by the token endpoint.
    #[must_use]
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerToken")
            .field("secret", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

/// Exchanges signed assertions for access tokens.
pub struct TokenClient {
    agent: Agent,
    token_url: String,
}

impl TokenClient {
    /// Create a client for the given token endpoint.
    pub fn new(agent: Agent, token_url: &str) -> Self {
        Self {
            agent,
            token_url: token_url.to_owned(),
        }
    }

    /// Token endpoint, also used as the assertion audience.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Sign an assertion for `account` and exchange it for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails, the request fails, the endpoint
    /// answers with a non-success status, or the response has no
    /// `access_token`.
    pub fn mint(
        &self,
        account: &ServiceAccount,
        signer: &dyn AssertionSigner,
        issued_at: u64,
    ) -> Result<BearerToken, NotifyError> {
        let claims = JwtClaims::indexing(&account.client_email, &self.token_url, issued_at);
        let assertion = build_assertion(&claims, signer)?;
        self.exchange(&assertion)
    }

    /// Exchange a signed assertion for a bearer token.
    ///
    /// # Errors
    ///
    /// See [`TokenClient::mint`].
    pub fn exchange(&self, assertion: &str) -> Result<BearerToken, NotifyError> {
        info!("Requesting access token from {}", self.token_url);

        let response = self
            .agent
            .post(&self.token_url)
            .send_form([("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])?;

        let (_, body) = read_response(response)?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        let secret = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(NotifyError::MissingField("access_token"))?;

        Ok(BearerToken {
            secret,
            expires_in: token.expires_in,
        })
    }
}
