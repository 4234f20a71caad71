//! JWT-bearer assertion construction (RFC 7519, RFC 7523).

use base64::Engine;
use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::signer::AssertionSigner;
use crate::error::AuthError;

/// OAuth scope for the Google Indexing API.
pub const INDEXING_SCOPE: &str = "https://www.googleapis.com/auth/indexing";

/// Assertion lifetime in seconds.
pub const ASSERTION_LIFETIME_SECS: u64 = 3600;

/// JOSE header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

impl JwtHeader {
    /// Header for the given signing algorithm.
    #[must_use]
    pub fn new(alg: &str) -> Self {
        Self {
            alg: alg.to_owned(),
            typ: "JWT".to_owned(),
        }
    }
}

/// Claims of a service-account assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: u64,
    pub exp: u64,
}

impl JwtClaims {
    /// Claims for the indexing scope, valid for one hour from `issued_at`.
    #[must_use]
    pub fn indexing(issuer: &str, audience: &str, issued_at: u64) -> Self {
        Self {
            iss: issuer.to_owned(),
            scope: INDEXING_SCOPE.to_owned(),
            aud: audience.to_owned(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        }
    }
}

/// Encode a value as compact JSON, then unpadded base64url.
pub fn encode_segment<T: Serialize>(value: &T) -> Result<String, AuthError> {
    let json = serde_json::to_vec(value).map_err(AuthError::Encoding)?;
    Ok(BASE64_URL_SAFE_NO_PAD.encode(json))
}

/// Decode an unpadded base64url JSON segment.
///
/// Returns `None` if the segment is not valid base64url or JSON for `T`.
pub fn decode_segment<T: DeserializeOwned>(segment: &str) -> Option<T> {
    let bytes = BASE64_URL_SAFE_NO_PAD.decode(segment).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Build and sign `base64url(header).base64url(claims).base64url(signature)`.
pub fn build_assertion(
    claims: &JwtClaims,
    signer: &dyn AssertionSigner,
) -> Result<String, AuthError> {
    let header = JwtHeader::new(signer.algorithm());
    let signing_input = format!("{}.{}", encode_segment(&header)?, encode_segment(claims)?);
    let signature = signer.sign(signing_input.as_bytes())?;
    Ok(format!(
        "{signing_input}.{}",
        BASE64_URL_SAFE_NO_PAD.encode(signature)
    ))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Signer returning a fixed signature, for tests that never verify it.
    pub(crate) struct FixedSigner;

    impl AssertionSigner for FixedSigner {
        fn algorithm(&self) -> &'static str {
            "RS256"
        }

        fn sign(&self, _message: &[u8]) -> Result<Vec<u8>, AuthError> {
            Ok(vec![0xfb, 0xff, 0x01])
        }
    }

    #[test]
    fn test_claims_expire_after_an_hour() {
        let claims = JwtClaims::indexing(
            "svc@project.iam.gserviceaccount.com",
            "https://oauth2.googleapis.com/token",
            1_700_000_000,
        );
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.scope, INDEXING_SCOPE);
    }

    #[test]
    fn test_segments_round_trip() {
        let header = JwtHeader::new("RS256");
        let claims = JwtClaims::indexing("svc@example.com", "https://token.example", 42);

        let header_segment = encode_segment(&header).unwrap();
        let claims_segment = encode_segment(&claims).unwrap();
        assert!(!header_segment.contains('='));
        assert!(!claims_segment.contains('='));

        assert_eq!(decode_segment::<JwtHeader>(&header_segment), Some(header));
        assert_eq!(decode_segment::<JwtClaims>(&claims_segment), Some(claims));
    }

    #[test]
    fn test_header_json_layout() {
        let segment = encode_segment(&JwtHeader::new("RS256")).unwrap();
        let json = BASE64_URL_SAFE_NO_PAD.decode(segment).unwrap();
        assert_eq!(
            String::from_utf8(json).unwrap(),
            r#"{"alg":"RS256","typ":"JWT"}"#
        );
    }

    #[test]
    fn test_assertion_shape() {
        let claims = JwtClaims::indexing("svc@example.com", "https://token.example", 42);
        let assertion = build_assertion(&claims, &FixedSigner).unwrap();

        let parts: Vec<&str> = assertion.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(
            decode_segment::<JwtHeader>(parts[0]).unwrap().alg,
            "RS256"
        );
        assert_eq!(decode_segment::<JwtClaims>(parts[1]), Some(claims));
        // 0xfb 0xff uses both url-safe characters
        assert_eq!(parts[2], "-_8B");
    }

    #[test]
    fn test_decode_rejects_padding_and_garbage() {
        assert_eq!(decode_segment::<JwtHeader>("e30="), None);
        assert_eq!(decode_segment::<JwtHeader>("not base64!"), None);
    }
}
