//! Signing method implementations.
//!
//! A [`SigningMethod`] is a stateless algorithm object: it signs and
//! verifies a prepared signing input and reports its JWA name. Methods are
//! collected into an [`AlgorithmRegistry`] that the parser resolves header
//! `alg` values against, keeping the parser itself algorithm-agnostic.

mod hmac;
mod registry;
mod rsa;

pub use hmac::HmacAlgorithm;
pub use registry::AlgorithmRegistry;
pub use rsa::RsaAlgorithm;

use crate::error::JwtError;
use crate::key::{SigningKey, VerifyingKey};

/// A JWS signing algorithm.
///
/// Implementations hold no mutable state and are safe to share across
/// threads behind an `Arc`.
pub trait SigningMethod: Send + Sync {
    /// Returns the JWA algorithm name carried in the token header.
    fn alg(&self) -> &'static str;

    /// Signs the signing input (`base64url(header) "." base64url(payload)`).
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidKeyType`] if the key variant does not
    /// match this method, or a key error if signing fails.
    fn sign(&self, signing_input: &[u8], key: &SigningKey) -> Result<Vec<u8>, JwtError>;

    /// Verifies a signature over the signing input.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidKeyType`] if the key variant does not
    /// match this method, or [`JwtError::InvalidSignature`] on mismatch.
    fn verify(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: &VerifyingKey,
    ) -> Result<(), JwtError>;
}

/// SHA-2 digest width shared by the HMAC and RSA method families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShaVariant {
    Sha256,
    Sha384,
    Sha512,
}
