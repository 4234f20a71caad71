//! Google service-account authorization.
//!
//! Builds an RS256-signed JWT-bearer assertion from a service-account key
//! and exchanges it for a short-lived access token:
//!
//! 1. Probe for a signer able to use the key ([`probe_signer`])
//! 2. Sign `header.claims` with it ([`build_assertion`])
//! 3. Exchange the assertion at the token endpoint ([`TokenClient`])

pub(crate) mod assertion;
mod signer;
mod token;

pub use assertion::{
    ASSERTION_LIFETIME_SECS, INDEXING_SCOPE, JwtClaims, JwtHeader, build_assertion,
    decode_segment, encode_segment,
};
pub use signer::{AssertionSigner, SigningCapability, probe_signer};
pub use token::{BearerToken, ServiceAccount, TokenClient};
