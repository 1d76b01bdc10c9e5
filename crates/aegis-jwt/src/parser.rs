//! Token string parsing and signature verification.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use time::OffsetDateTime;

use crate::algorithm::AlgorithmRegistry;
use crate::claims::Claims;
use crate::error::JwtError;
use crate::key::VerifyingKey;
use crate::token::{HEADER_ALG, HEADER_KID, Token, b64_decode};

/// Injected time source.
///
/// Defaults to [`OffsetDateTime::now_utc`]; tests swap in a fixed clock via
/// [`Parser::with_clock`]. Kept as an explicit constructor option rather
/// than a process-wide mutable hook.
pub type Clock = Arc<dyn Fn() -> OffsetDateTime + Send + Sync>;

/// Decodes and verifies JWT strings.
///
/// The parser is algorithm- and claims-type-agnostic: algorithms come from
/// the injected [`AlgorithmRegistry`], the verification key from a per-call
/// lookup callback keyed by the header `kid`, and claim-level validity from
/// the claims type itself. Holds no mutable state after construction.
#[derive(Clone)]
pub struct Parser<T> {
    registry: AlgorithmRegistry,
    clock: Clock,
    _claims: PhantomData<fn() -> T>,
}

impl<T> Parser<T>
where
    T: Claims + DeserializeOwned,
{
    /// Creates a parser over the given algorithm registry, using the system
    /// clock.
    #[must_use]
    pub fn new(registry: AlgorithmRegistry) -> Self {
        Self {
            registry,
            clock: Arc::new(OffsetDateTime::now_utc),
            _claims: PhantomData,
        }
    }

    /// Replaces the time source used for claim validation.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Parses a token string, verifying its signature and claims.
    ///
    /// `key_fn` resolves the verification key for the header `kid` (which
    /// may be empty); its error is propagated unchanged, which is how
    /// callers inject JWKS-backed or static key lookup.
    ///
    /// # Errors
    ///
    /// - [`JwtError::Malformed`] for wrong segment count or decode failures
    /// - [`JwtError::InvalidToken`] if the header has no `alg`
    /// - [`JwtError::SigningMethodNotSupported`] for an unregistered `alg`
    /// - [`JwtError::InvalidSignature`] if verification fails, regardless of
    ///   the underlying cause
    /// - whatever the claims type returns from its validity check
    pub fn parse<F>(&self, token: &str, mut key_fn: F) -> Result<Token<T>, JwtError>
    where
        F: FnMut(&str) -> Result<VerifyingKey, JwtError>,
    {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(JwtError::malformed(format!(
                "expected 3 segments, got {}",
                segments.len()
            )));
        }

        let header_bytes = b64_decode(segments[0])?;
        let header: BTreeMap<String, String> = serde_json::from_slice(&header_bytes)
            .map_err(|e| JwtError::malformed(format!("invalid header: {e}")))?;

        let claims_bytes = b64_decode(segments[1])?;
        let claims: T = serde_json::from_slice(&claims_bytes)
            .map_err(|e| JwtError::malformed(format!("invalid payload: {e}")))?;

        let signature = b64_decode(segments[2])?;

        let alg = header
            .get(HEADER_ALG)
            .ok_or_else(|| JwtError::invalid_token("missing alg header parameter"))?;
        let method = self
            .registry
            .get(alg)
            .ok_or_else(|| JwtError::unsupported_algorithm(alg))?;

        let kid = header.get(HEADER_KID).map(String::as_str).unwrap_or("");
        let key = key_fn(kid)?;

        // Verify over the first two segments exactly as transmitted.
        let signing_input = &token[..segments[0].len() + 1 + segments[1].len()];
        method
            .verify(signing_input.as_bytes(), &signature, &key)
            .map_err(|_| JwtError::InvalidSignature)?;

        claims.validate((self.clock)())?;

        Ok(Token::from_parts(header, claims, signature, method))
    }
}

#[cfg(test)]
mod tests {
    use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
    use rsa::{RsaPrivateKey, RsaPublicKey};
    use serde_json::json;

    use super::*;
    use crate::algorithm::{HmacAlgorithm, RsaAlgorithm, SigningMethod};
    use crate::claims::{ClaimStrings, RegisteredClaims};
    use crate::key::SigningKey;
    use crate::test_fixtures::{RSA_PRIVATE_PEM, RSA_PUBLIC_PEM};
    use crate::token::b64_encode;

    fn fixed_clock(unix: i64) -> Clock {
        Arc::new(move || OffsetDateTime::from_unix_timestamp(unix).unwrap())
    }

    fn parser_at(unix: i64) -> Parser<RegisteredClaims> {
        Parser::new(AlgorithmRegistry::with_defaults()).with_clock(fixed_clock(unix))
    }

    fn sample_claims() -> RegisteredClaims {
        RegisteredClaims {
            issuer: "https://issuer.example.com".to_string(),
            subject: "s".to_string(),
            audience: ClaimStrings::from(["api"]),
            issued_at: Some(1_700_000_000),
            expires_at: Some(1_700_003_600),
            jti: "id-1".to_string(),
            ..Default::default()
        }
    }

    fn hmac_key_fn(_kid: &str) -> Result<VerifyingKey, JwtError> {
        Ok(VerifyingKey::hmac(b"secret"))
    }

    #[test]
    fn test_hmac_round_trip() {
        // Sign with HS256 and "secret", parse halfway through the lifetime.
        let token = Token::new(Arc::new(HmacAlgorithm::hs256()), sample_claims());
        let signed = token.signed_string(&SigningKey::hmac(b"secret")).unwrap();

        let parsed = parser_at(1_700_001_800).parse(&signed, hmac_key_fn).unwrap();
        assert_eq!(parsed.claims, sample_claims());
        assert_eq!(parsed.header_param("alg"), Some("HS256"));
        assert!(!parsed.signature.is_empty());
    }

    #[test]
    fn test_round_trip_all_algorithms() {
        let private = RsaPrivateKey::from_pkcs8_pem(RSA_PRIVATE_PEM).unwrap();
        let public = RsaPublicKey::from_public_key_pem(RSA_PUBLIC_PEM).unwrap();

        let methods: Vec<(Arc<dyn SigningMethod>, SigningKey, VerifyingKey)> = vec![
            (
                Arc::new(HmacAlgorithm::hs256()),
                SigningKey::hmac(b"k"),
                VerifyingKey::hmac(b"k"),
            ),
            (
                Arc::new(HmacAlgorithm::hs384()),
                SigningKey::hmac(b"k"),
                VerifyingKey::hmac(b"k"),
            ),
            (
                Arc::new(HmacAlgorithm::hs512()),
                SigningKey::hmac(b"k"),
                VerifyingKey::hmac(b"k"),
            ),
            (
                Arc::new(RsaAlgorithm::rs256()),
                SigningKey::Rsa(private.clone()),
                VerifyingKey::Rsa(public.clone()),
            ),
            (
                Arc::new(RsaAlgorithm::rs384()),
                SigningKey::Rsa(private.clone()),
                VerifyingKey::Rsa(public.clone()),
            ),
            (
                Arc::new(RsaAlgorithm::rs512()),
                SigningKey::Rsa(private),
                VerifyingKey::Rsa(public),
            ),
        ];

        for (method, signing_key, verifying_key) in methods {
            let alg = method.alg();
            let signed = Token::new(method, sample_claims())
                .signed_string(&signing_key)
                .unwrap();
            let parsed = parser_at(1_700_000_000)
                .parse(&signed, |_| Ok(verifying_key.clone()))
                .unwrap_or_else(|e| panic!("{alg}: {e}"));
            assert_eq!(parsed.claims, sample_claims(), "{alg}");
        }
    }

    #[test]
    fn test_malformed_segment_counts() {
        let parser = parser_at(1_700_000_000);
        for input in ["", "one", "one.two", "a.b.c.d"] {
            let result = parser.parse(input, hmac_key_fn);
            assert!(
                matches!(result, Err(JwtError::Malformed { .. })),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_garbage_segments_are_malformed() {
        let parser = parser_at(1_700_000_000);
        // not base64url
        let result = parser.parse("a!b.c.d", hmac_key_fn);
        assert!(matches!(result, Err(JwtError::Malformed { .. })));
        // valid base64, invalid JSON header
        let result = parser.parse(&format!("{}.e30.c2ln", b64_encode(b"not json")), hmac_key_fn);
        assert!(matches!(result, Err(JwtError::Malformed { .. })));
    }

    #[test]
    fn test_missing_alg_header() {
        let header = b64_encode(serde_json::to_vec(&json!({"typ": "JWT"})).unwrap());
        let payload = b64_encode(serde_json::to_vec(&json!({"exp": 1_700_003_600})).unwrap());
        let token = format!("{header}.{payload}.c2ln");

        let result = parser_at(1_700_000_000).parse(&token, hmac_key_fn);
        assert!(matches!(result, Err(JwtError::InvalidToken { .. })));
    }

    #[test]
    fn test_unregistered_algorithm() {
        let header = b64_encode(serde_json::to_vec(&json!({"alg": "ES256"})).unwrap());
        let payload = b64_encode(serde_json::to_vec(&json!({"exp": 1_700_003_600})).unwrap());
        let token = format!("{header}.{payload}.c2ln");

        let result = parser_at(1_700_000_000).parse(&token, hmac_key_fn);
        assert!(matches!(
            result,
            Err(JwtError::SigningMethodNotSupported { ref alg }) if alg == "ES256"
        ));
    }

    #[test]
    fn test_key_fn_error_propagates() {
        let token = Token::new(Arc::new(HmacAlgorithm::hs256()), sample_claims());
        let signed = token.signed_string(&SigningKey::hmac(b"secret")).unwrap();

        let result = parser_at(1_700_000_000).parse(&signed, |kid| {
            Err(JwtError::invalid_token(format!("unknown key id: {kid:?}")))
        });
        assert!(matches!(result, Err(JwtError::InvalidToken { .. })));
    }

    #[test]
    fn test_key_fn_receives_kid() {
        let mut token = Token::new(Arc::new(HmacAlgorithm::hs256()), sample_claims());
        token.set_kid("key-7");
        let signed = token.signed_string(&SigningKey::hmac(b"secret")).unwrap();

        let mut seen = String::new();
        parser_at(1_700_000_000)
            .parse(&signed, |kid| {
                seen = kid.to_string();
                hmac_key_fn(kid)
            })
            .unwrap();
        assert_eq!(seen, "key-7");
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let token = Token::new(Arc::new(HmacAlgorithm::hs256()), sample_claims());
        let signed = token.signed_string(&SigningKey::hmac(b"secret")).unwrap();

        // Flip a bit in the signature segment.
        let (body, sig) = signed.rsplit_once('.').unwrap();
        let mut sig_bytes = b64_decode(sig).unwrap();
        sig_bytes[0] ^= 0x01;
        let tampered = format!("{body}.{}", b64_encode(sig_bytes));

        let result = parser_at(1_700_000_000).parse(&tampered, hmac_key_fn);
        assert!(matches!(result, Err(JwtError::InvalidSignature)));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = Token::new(Arc::new(HmacAlgorithm::hs256()), sample_claims());
        let signed = token.signed_string(&SigningKey::hmac(b"secret")).unwrap();

        let parts: Vec<&str> = signed.split('.').collect();
        let altered = b64_encode(
            serde_json::to_vec(&json!({"sub": "attacker", "exp": 1_700_003_600})).unwrap(),
        );
        let tampered = format!("{}.{altered}.{}", parts[0], parts[2]);

        let result = parser_at(1_700_000_000).parse(&tampered, hmac_key_fn);
        assert!(matches!(result, Err(JwtError::InvalidSignature)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = Token::new(Arc::new(HmacAlgorithm::hs256()), sample_claims());
        let signed = token.signed_string(&SigningKey::hmac(b"secret")).unwrap();

        // Signature is fine, but the clock is past exp.
        let result = parser_at(1_700_003_601).parse(&signed, hmac_key_fn);
        assert!(matches!(result, Err(JwtError::Expired)));

        // Exactly at exp is still valid.
        parser_at(1_700_003_600).parse(&signed, hmac_key_fn).unwrap();
    }
}
