//! Token container and signed-string encoding.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Serialize;

use crate::algorithm::SigningMethod;
use crate::error::JwtError;
use crate::key::SigningKey;

/// Header parameter naming the signing algorithm.
pub const HEADER_ALG: &str = "alg";
/// Header parameter naming the token type.
pub const HEADER_TYP: &str = "typ";
/// Header parameter naming the signing key id.
pub const HEADER_KID: &str = "kid";

pub(crate) fn b64_encode(data: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

pub(crate) fn b64_decode(segment: &str) -> Result<Vec<u8>, JwtError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| JwtError::malformed(format!("invalid base64url segment: {e}")))
}

/// A JWT bound to a signing method.
///
/// A token is either built with [`Token::new`] and consumed via
/// [`Token::signed_string`], or produced by the parser with header, claims
/// and signature populated from the wire bytes. The signature is only
/// populated after parsing, never before signing.
#[derive(Clone)]
pub struct Token<T> {
    /// Protected header parameters. Always carries `alg`; `typ` and `kid`
    /// are optional.
    pub header: BTreeMap<String, String>,

    /// The claims payload.
    pub claims: T,

    /// Raw signature bytes; empty until the token has been parsed.
    pub signature: Vec<u8>,

    method: Arc<dyn SigningMethod>,
}

impl<T> Token<T> {
    /// Creates an unsigned token for the given method and claims.
    ///
    /// The header is pre-filled with `typ: "JWT"` and the method's `alg`.
    #[must_use]
    pub fn new(method: Arc<dyn SigningMethod>, claims: T) -> Self {
        let mut header = BTreeMap::new();
        header.insert(HEADER_TYP.to_string(), "JWT".to_string());
        header.insert(HEADER_ALG.to_string(), method.alg().to_string());
        Self {
            header,
            claims,
            signature: Vec::new(),
            method,
        }
    }

    pub(crate) fn from_parts(
        header: BTreeMap<String, String>,
        claims: T,
        signature: Vec<u8>,
        method: Arc<dyn SigningMethod>,
    ) -> Self {
        Self {
            header,
            claims,
            signature,
            method,
        }
    }

    /// Returns the bound algorithm name.
    #[must_use]
    pub fn algorithm(&self) -> &'static str {
        self.method.alg()
    }

    /// Returns a header parameter by name.
    #[must_use]
    pub fn header_param(&self, name: &str) -> Option<&str> {
        self.header.get(name).map(String::as_str)
    }

    /// Sets the `kid` header parameter.
    pub fn set_kid(&mut self, kid: impl Into<String>) {
        self.header.insert(HEADER_KID.to_string(), kid.into());
    }
}

impl<T: Serialize> Token<T> {
    /// Produces the signing input: `base64url(header) "." base64url(claims)`.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Encoding`] if header or claims fail to serialize.
    pub fn signing_string(&self) -> Result<String, JwtError> {
        let header = serde_json::to_vec(&self.header)
            .map_err(|e| JwtError::encoding(format!("header: {e}")))?;
        let claims = serde_json::to_vec(&self.claims)
            .map_err(|e| JwtError::encoding(format!("claims: {e}")))?;
        Ok(format!("{}.{}", b64_encode(header), b64_encode(claims)))
    }

    /// Signs the token and returns the three-segment wire form.
    ///
    /// # Errors
    ///
    /// Propagates serialization errors and any error from the bound
    /// signing method (wrong key type, signing failure).
    pub fn signed_string(&self, key: &SigningKey) -> Result<String, JwtError> {
        let signing_input = self.signing_string()?;
        let signature = self.method.sign(signing_input.as_bytes(), key)?;
        Ok(format!("{signing_input}.{}", b64_encode(signature)))
    }
}

impl<T: fmt::Debug> fmt::Debug for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("header", &self.header)
            .field("claims", &self.claims)
            .field("signature_len", &self.signature.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::algorithm::HmacAlgorithm;
    use crate::claims::RegisteredClaims;

    fn hs256_token() -> Token<RegisteredClaims> {
        Token::new(
            Arc::new(HmacAlgorithm::hs256()),
            RegisteredClaims {
                subject: "s".to_string(),
                expires_at: Some(1_900_000_000),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_new_prefills_header() {
        let token = hs256_token();
        assert_eq!(token.header_param(HEADER_ALG), Some("HS256"));
        assert_eq!(token.header_param(HEADER_TYP), Some("JWT"));
        assert_eq!(token.header_param(HEADER_KID), None);
        assert!(token.signature.is_empty());
        assert_eq!(token.algorithm(), "HS256");
    }

    #[test]
    fn test_set_kid() {
        let mut token = hs256_token();
        token.set_kid("key-1");
        assert_eq!(token.header_param(HEADER_KID), Some("key-1"));
    }

    #[test]
    fn test_signed_string_has_three_segments() {
        let token = hs256_token();
        let signed = token.signed_string(&SigningKey::hmac(b"secret")).unwrap();

        let parts: Vec<&str> = signed.split('.').collect();
        assert_eq!(parts.len(), 3);

        let header: Value = serde_json::from_slice(&b64_decode(parts[0]).unwrap()).unwrap();
        assert_eq!(header, json!({"alg": "HS256", "typ": "JWT"}));

        let payload: Value = serde_json::from_slice(&b64_decode(parts[1]).unwrap()).unwrap();
        assert_eq!(payload, json!({"sub": "s", "exp": 1_900_000_000_i64}));

        // HS256 signature is 32 bytes
        assert_eq!(b64_decode(parts[2]).unwrap().len(), 32);
    }

    #[test]
    fn test_signing_is_deterministic() {
        let token = hs256_token();
        let key = SigningKey::hmac(b"secret");
        assert_eq!(
            token.signed_string(&key).unwrap(),
            token.signed_string(&key).unwrap()
        );
    }

    #[test]
    fn test_wrong_key_type_propagates() {
        let token = hs256_token();
        let private_key = rsa::RsaPrivateKey::new(&mut rand::rngs::OsRng, 2048).unwrap();
        let result = token.signed_string(&SigningKey::Rsa(private_key));
        assert!(matches!(result, Err(JwtError::InvalidKeyType { .. })));
    }

    #[test]
    fn test_base64_is_unpadded_urlsafe() {
        let encoded = b64_encode([0xfb, 0xff, 0xfe]);
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert_eq!(b64_decode(&encoded).unwrap(), vec![0xfb, 0xff, 0xfe]);
    }
}
