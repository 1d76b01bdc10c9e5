//! JSON Web Key wire types (RFC 7517 subset).

use base64::{Engine, engine::general_purpose::STANDARD};
use rsa::RsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use serde::{Deserialize, Serialize};
use x509_cert::Certificate;
use x509_cert::der::{Decode, Encode};

use crate::error::JwtError;

/// A JSON Web Key as published by a JWKS endpoint.
///
/// Only the fields this crate consumes are modeled; unknown members are
/// ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key ID.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kid: String,

    /// Key type ("RSA", "EC", "oct").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kty: String,

    /// Key use ("sig" or "enc").
    #[serde(rename = "use", default, skip_serializing_if = "String::is_empty")]
    pub use_: String,

    /// RSA modulus, base64url.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub n: String,

    /// RSA exponent, base64url.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub e: String,

    /// Algorithm the key is intended for.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alg: String,

    /// X.509 certificate chain, standard-base64 DER per entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub x5c: Vec<String>,

    /// X.509 certificate SHA-1 thumbprint.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub x5t: String,
}

impl Jwk {
    /// Returns `true` if this key is usable for RSA signature verification:
    /// `use` is "sig", `kty` is "RSA", a key id is present, and the entry
    /// carries at least one certificate.
    #[must_use]
    pub fn is_signing_key(&self) -> bool {
        self.use_ == "sig" && self.kty == "RSA" && !self.kid.is_empty() && !self.x5c.is_empty()
    }

    /// Extracts the RSA public key from the first `x5c` certificate.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidKey`] if there is no certificate, or the
    /// entry is not valid base64 DER, or the certificate does not carry an
    /// RSA public key.
    pub fn rsa_public_key(&self) -> Result<RsaPublicKey, JwtError> {
        let first = self
            .x5c
            .first()
            .ok_or_else(|| JwtError::invalid_key("JWK carries no x5c certificate"))?;
        let der = STANDARD
            .decode(first)
            .map_err(|e| JwtError::invalid_key(format!("x5c is not valid base64: {e}")))?;
        let certificate = Certificate::from_der(&der)
            .map_err(|e| JwtError::invalid_key(format!("x5c is not a valid certificate: {e}")))?;
        let spki = certificate
            .tbs_certificate
            .subject_public_key_info
            .to_der()
            .map_err(|e| JwtError::invalid_key(e.to_string()))?;
        RsaPublicKey::from_public_key_der(&spki)
            .map_err(|e| JwtError::invalid_key(format!("certificate key is not RSA: {e}")))
    }
}

/// A JSON Web Key Set: `{"keys": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    /// The keys in this set, in publication order.
    #[serde(default)]
    pub keys: Vec<Jwk>,
}

#[cfg(test)]
mod tests {
    use rsa::RsaPublicKey;
    use rsa::pkcs8::DecodePublicKey;
    use serde_json::json;

    use super::*;
    use crate::test_fixtures::{RSA_CERT_B64, RSA_PUBLIC_PEM};

    fn signing_jwk() -> Jwk {
        Jwk {
            kid: "key-1".to_string(),
            kty: "RSA".to_string(),
            use_: "sig".to_string(),
            alg: "RS256".to_string(),
            x5c: vec![RSA_CERT_B64.to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_jwks_deserialization() {
        let jwks: JwkSet = serde_json::from_value(json!({
            "keys": [
                {"kid": "key-1", "kty": "RSA", "use": "sig", "n": "abc", "e": "AQAB",
                 "x5c": ["Zm9v"], "x5t": "thumb", "alg": "RS256"},
                {"kid": "key-2", "kty": "EC", "use": "sig"}
            ]
        }))
        .unwrap();

        assert_eq!(jwks.keys.len(), 2);
        assert_eq!(jwks.keys[0].kid, "key-1");
        assert_eq!(jwks.keys[0].use_, "sig");
        assert_eq!(jwks.keys[0].x5c, vec!["Zm9v".to_string()]);
        assert_eq!(jwks.keys[1].kty, "EC");
        assert!(jwks.keys[1].x5c.is_empty());
    }

    #[test]
    fn test_empty_set() {
        let jwks: JwkSet = serde_json::from_value(json!({"keys": []})).unwrap();
        assert!(jwks.keys.is_empty());
    }

    #[test]
    fn test_is_signing_key_filters() {
        assert!(signing_jwk().is_signing_key());

        let enc = Jwk {
            use_: "enc".to_string(),
            ..signing_jwk()
        };
        assert!(!enc.is_signing_key());

        let ec = Jwk {
            kty: "EC".to_string(),
            ..signing_jwk()
        };
        assert!(!ec.is_signing_key());

        let no_kid = Jwk {
            kid: String::new(),
            ..signing_jwk()
        };
        assert!(!no_kid.is_signing_key());

        let no_cert = Jwk {
            x5c: Vec::new(),
            ..signing_jwk()
        };
        assert!(!no_cert.is_signing_key());
    }

    #[test]
    fn test_rsa_public_key_from_certificate() {
        let extracted = signing_jwk().rsa_public_key().unwrap();
        let expected = RsaPublicKey::from_public_key_pem(RSA_PUBLIC_PEM).unwrap();
        assert_eq!(extracted, expected);
    }

    #[test]
    fn test_rsa_public_key_failures() {
        let empty = Jwk {
            x5c: Vec::new(),
            ..signing_jwk()
        };
        assert!(matches!(
            empty.rsa_public_key(),
            Err(JwtError::InvalidKey { .. })
        ));

        let bad_base64 = Jwk {
            x5c: vec!["!!!".to_string()],
            ..signing_jwk()
        };
        assert!(matches!(
            bad_base64.rsa_public_key(),
            Err(JwtError::InvalidKey { .. })
        ));

        let not_a_cert = Jwk {
            x5c: vec!["Zm9vYmFy".to_string()],
            ..signing_jwk()
        };
        assert!(matches!(
            not_a_cert.rsa_public_key(),
            Err(JwtError::InvalidKey { .. })
        ));
    }
}
