//! Key material for signing and verification.
//!
//! Keys are closed enums rather than an open trait: each signing method
//! checks that it received the variant it can work with and fails with
//! [`JwtError::InvalidKeyType`](crate::JwtError::InvalidKeyType) otherwise.

use rsa::{RsaPrivateKey, RsaPublicKey};

/// Key material used to produce a signature.
#[derive(Clone)]
pub enum SigningKey {
    /// Raw symmetric secret for HMAC methods.
    Hmac(Vec<u8>),
    /// RSA private key for RS* methods.
    Rsa(RsaPrivateKey),
}

impl SigningKey {
    /// Creates an HMAC signing key from a raw secret.
    #[must_use]
    pub fn hmac(secret: impl AsRef<[u8]>) -> Self {
        Self::Hmac(secret.as_ref().to_vec())
    }

    /// Returns a short description of the key kind, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hmac(_) => "HMAC secret",
            Self::Rsa(_) => "RSA private key",
        }
    }
}

impl From<RsaPrivateKey> for SigningKey {
    fn from(key: RsaPrivateKey) -> Self {
        Self::Rsa(key)
    }
}

/// Key material used to verify a signature.
#[derive(Clone)]
pub enum VerifyingKey {
    /// Raw symmetric secret for HMAC methods.
    Hmac(Vec<u8>),
    /// RSA public key for RS* methods.
    Rsa(RsaPublicKey),
}

impl VerifyingKey {
    /// Creates an HMAC verification key from a raw secret.
    #[must_use]
    pub fn hmac(secret: impl AsRef<[u8]>) -> Self {
        Self::Hmac(secret.as_ref().to_vec())
    }

    /// Returns a short description of the key kind, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hmac(_) => "HMAC secret",
            Self::Rsa(_) => "RSA public key",
        }
    }
}

impl From<RsaPublicKey> for VerifyingKey {
    fn from(key: RsaPublicKey) -> Self {
        Self::Rsa(key)
    }
}
