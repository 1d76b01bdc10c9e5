//! HMAC signing methods (HS256, HS384, HS512).

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use super::{ShaVariant, SigningMethod};
use crate::error::JwtError;
use crate::key::{SigningKey, VerifyingKey};

/// HMAC-SHA2 signing method.
///
/// Requires a raw symmetric secret ([`SigningKey::Hmac`] /
/// [`VerifyingKey::Hmac`]). Verification is constant-time.
#[derive(Debug, Clone, Copy)]
pub struct HmacAlgorithm {
    name: &'static str,
    hash: ShaVariant,
}

impl HmacAlgorithm {
    /// HMAC with SHA-256.
    #[must_use]
    pub fn hs256() -> Self {
        Self {
            name: "HS256",
            hash: ShaVariant::Sha256,
        }
    }

    /// HMAC with SHA-384.
    #[must_use]
    pub fn hs384() -> Self {
        Self {
            name: "HS384",
            hash: ShaVariant::Sha384,
        }
    }

    /// HMAC with SHA-512.
    #[must_use]
    pub fn hs512() -> Self {
        Self {
            name: "HS512",
            hash: ShaVariant::Sha512,
        }
    }

    fn compute(&self, signing_input: &[u8], secret: &[u8]) -> Result<Vec<u8>, JwtError> {
        macro_rules! mac {
            ($hash:ty) => {{
                let mut mac = Hmac::<$hash>::new_from_slice(secret)
                    .map_err(|e| JwtError::invalid_key(e.to_string()))?;
                mac.update(signing_input);
                Ok(mac.finalize().into_bytes().to_vec())
            }};
        }

        match self.hash {
            ShaVariant::Sha256 => mac!(Sha256),
            ShaVariant::Sha384 => mac!(Sha384),
            ShaVariant::Sha512 => mac!(Sha512),
        }
    }

    fn check(&self, signing_input: &[u8], signature: &[u8], secret: &[u8]) -> Result<(), JwtError> {
        macro_rules! check {
            ($hash:ty) => {{
                let mut mac = Hmac::<$hash>::new_from_slice(secret)
                    .map_err(|e| JwtError::invalid_key(e.to_string()))?;
                mac.update(signing_input);
                // verify_slice compares in constant time
                mac.verify_slice(signature)
                    .map_err(|_| JwtError::InvalidSignature)
            }};
        }

        match self.hash {
            ShaVariant::Sha256 => check!(Sha256),
            ShaVariant::Sha384 => check!(Sha384),
            ShaVariant::Sha512 => check!(Sha512),
        }
    }
}

impl SigningMethod for HmacAlgorithm {
    fn alg(&self) -> &'static str {
        self.name
    }

    fn sign(&self, signing_input: &[u8], key: &SigningKey) -> Result<Vec<u8>, JwtError> {
        let SigningKey::Hmac(secret) = key else {
            return Err(JwtError::invalid_key_type(format!(
                "{} requires an HMAC secret, got {}",
                self.name,
                key.kind()
            )));
        };
        self.compute(signing_input, secret)
    }

    fn verify(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: &VerifyingKey,
    ) -> Result<(), JwtError> {
        let VerifyingKey::Hmac(secret) = key else {
            return Err(JwtError::invalid_key_type(format!(
                "{} requires an HMAC secret, got {}",
                self.name,
                key.kind()
            )));
        };
        self.check(signing_input, signature, secret)
    }
}
