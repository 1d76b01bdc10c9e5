//! RSA PKCS#1 v1.5 signing methods (RS256, RS384, RS512).

use rsa::Pkcs1v15Sign;
use sha2::{Digest, Sha256, Sha384, Sha512};

use super::{ShaVariant, SigningMethod};
use crate::error::JwtError;
use crate::key::{SigningKey, VerifyingKey};

/// RSASSA-PKCS1-v1_5 signing method.
///
/// The signing input is hashed first; the digest is then signed or verified
/// against the RSA key. Requires [`SigningKey::Rsa`] for signing and
/// [`VerifyingKey::Rsa`] for verification.
#[derive(Debug, Clone, Copy)]
pub struct RsaAlgorithm {
    name: &'static str,
    hash: ShaVariant,
}

impl RsaAlgorithm {
    /// RSA PKCS#1 v1.5 with SHA-256.
    #[must_use]
    pub fn rs256() -> Self {
        Self {
            name: "RS256",
            hash: ShaVariant::Sha256,
        }
    }

    /// RSA PKCS#1 v1.5 with SHA-384.
    #[must_use]
    pub fn rs384() -> Self {
        Self {
            name: "RS384",
            hash: ShaVariant::Sha384,
        }
    }

    /// RSA PKCS#1 v1.5 with SHA-512.
    #[must_use]
    pub fn rs512() -> Self {
        Self {
            name: "RS512",
            hash: ShaVariant::Sha512,
        }
    }

    fn digest(&self, signing_input: &[u8]) -> Vec<u8> {
        match self.hash {
            ShaVariant::Sha256 => Sha256::digest(signing_input).to_vec(),
            ShaVariant::Sha384 => Sha384::digest(signing_input).to_vec(),
            ShaVariant::Sha512 => Sha512::digest(signing_input).to_vec(),
        }
    }

    fn padding(&self) -> Pkcs1v15Sign {
        match self.hash {
            ShaVariant::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
            ShaVariant::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
            ShaVariant::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
        }
    }
}

impl SigningMethod for RsaAlgorithm {
    fn alg(&self) -> &'static str {
        self.name
    }

    fn sign(&self, signing_input: &[u8], key: &SigningKey) -> Result<Vec<u8>, JwtError> {
        let SigningKey::Rsa(private_key) = key else {
            return Err(JwtError::invalid_key_type(format!(
                "{} requires an RSA private key, got {}",
                self.name,
                key.kind()
            )));
        };
        let digest = self.digest(signing_input);
        private_key
            .sign(self.padding(), &digest)
            .map_err(|e| JwtError::invalid_key(e.to_string()))
    }

    fn verify(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: &VerifyingKey,
    ) -> Result<(), JwtError> {
        let VerifyingKey::Rsa(public_key) = key else {
            return Err(JwtError::invalid_key_type(format!(
                "{} requires an RSA public key, got {}",
                self.name,
                key.kind()
            )));
        };
        let digest = self.digest(signing_input);
        public_key
            .verify(self.padding(), &digest, signature)
            .map_err(|_| JwtError::InvalidSignature)
    }
}
