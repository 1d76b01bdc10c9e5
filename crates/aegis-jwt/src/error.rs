//! Error types for JWT operations.
//!
//! Every fallible operation in this crate surfaces one of the [`JwtError`]
//! variants. Callers are expected to match on variants (they act as
//! sentinels); the embedded messages exist for logging and debugging only.

/// Errors that can occur while signing, parsing or validating a JWT.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// The key material does not match what the signing method requires.
    #[error("Invalid key type: {message}")]
    InvalidKeyType {
        /// Description of the expected key material.
        message: String,
    },

    /// The hash algorithm backing a signing method is not available.
    #[error("Hash algorithm unavailable: {algorithm}")]
    HashUnavailable {
        /// Name of the unavailable hash algorithm.
        algorithm: String,
    },

    /// The token signature does not verify against the key.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The token string is not structurally a JWT (segment count, base64 or
    /// JSON decoding).
    #[error("Malformed token: {message}")]
    Malformed {
        /// Description of the structural problem.
        message: String,
    },

    /// The token decoded cleanly but a header parameter or semantic claim
    /// is missing or invalid.
    #[error("Invalid token: {message}")]
    InvalidToken {
        /// Description of why the token is invalid.
        message: String,
    },

    /// The header `alg` names an algorithm that is not registered.
    #[error("Signing method not supported: {alg}")]
    SigningMethodNotSupported {
        /// The unsupported algorithm name.
        alg: String,
    },

    /// A claim required for validation is absent.
    #[error("Missing required claim: {claim}")]
    MissingRequiredClaim {
        /// Name of the missing claim.
        claim: String,
    },

    /// The token has expired.
    #[error("Token expired")]
    Expired,

    /// The token is used before its `iat` timestamp.
    #[error("Token used before issued")]
    UsedBeforeIssued,

    /// The token is used before its `nbf` timestamp.
    #[error("Token not valid yet")]
    NotValidYet,

    /// Key material could not be decoded or constructed.
    #[error("Invalid key: {message}")]
    InvalidKey {
        /// Description of why the key is invalid.
        message: String,
    },

    /// Header or claims could not be serialized to JSON.
    #[error("Failed to encode token: {message}")]
    Encoding {
        /// Description of the encoding error.
        message: String,
    },
}

impl JwtError {
    /// Creates a new `InvalidKeyType` error.
    #[must_use]
    pub fn invalid_key_type(message: impl Into<String>) -> Self {
        Self::InvalidKeyType {
            message: message.into(),
        }
    }

    /// Creates a new `Malformed` error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidToken` error.
    #[must_use]
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Creates a new `SigningMethodNotSupported` error.
    #[must_use]
    pub fn unsupported_algorithm(alg: impl Into<String>) -> Self {
        Self::SigningMethodNotSupported { alg: alg.into() }
    }

    /// Creates a new `MissingRequiredClaim` error.
    #[must_use]
    pub fn missing_claim(claim: impl Into<String>) -> Self {
        Self::MissingRequiredClaim {
            claim: claim.into(),
        }
    }

    /// Creates a new `InvalidKey` error.
    #[must_use]
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey {
            message: message.into(),
        }
    }

    /// Creates a new `Encoding` error.
    #[must_use]
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Returns `true` if this error came from claim validity checks.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::Expired
                | Self::UsedBeforeIssued
                | Self::NotValidYet
                | Self::MissingRequiredClaim { .. }
        )
    }

    /// Returns `true` if this is a key-related error.
    #[must_use]
    pub fn is_key_error(&self) -> bool {
        matches!(self, Self::InvalidKeyType { .. } | Self::InvalidKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            JwtError::malformed("expected 3 segments, got 2").to_string(),
            "Malformed token: expected 3 segments, got 2"
        );
        assert_eq!(
            JwtError::unsupported_algorithm("ES256").to_string(),
            "Signing method not supported: ES256"
        );
        assert_eq!(
            JwtError::missing_claim("exp").to_string(),
            "Missing required claim: exp"
        );
        assert_eq!(JwtError::Expired.to_string(), "Token expired");
        assert_eq!(JwtError::InvalidSignature.to_string(), "Invalid signature");
    }

    #[test]
    fn test_error_predicates() {
        assert!(JwtError::Expired.is_validation_error());
        assert!(JwtError::UsedBeforeIssued.is_validation_error());
        assert!(JwtError::NotValidYet.is_validation_error());
        assert!(JwtError::missing_claim("exp").is_validation_error());
        assert!(!JwtError::InvalidSignature.is_validation_error());

        assert!(JwtError::invalid_key_type("HMAC secret required").is_key_error());
        assert!(JwtError::invalid_key("bad PEM").is_key_error());
        assert!(!JwtError::Expired.is_key_error());
    }
}
