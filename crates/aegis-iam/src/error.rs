//! Authentication and authorization error types.

use aegis_jwt::JwtError;

/// Errors that can occur during validator construction, token validation
/// and policy enforcement.
///
/// Token-level failures keep their [`JwtError`] sentinel identity through
/// the transparent `Jwt` variant; the remaining variants cover the JWKS
/// fetch at construction time and the enforcement boundary.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A token-level error from the JWT core.
    #[error(transparent)]
    Jwt(#[from] JwtError),

    /// The JWKS URI could not be built from the issuer.
    #[error("Invalid JWKS URI: {message}")]
    InvalidJwksUri {
        /// Description of the URI problem.
        message: String,
    },

    /// A network error occurred while fetching the JWKS.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error.
        message: String,
    },

    /// The JWKS endpoint returned a non-success status code.
    #[error("HTTP error: status {status}")]
    HttpStatus {
        /// The status code returned.
        status: u16,
    },

    /// The JWKS response could not be parsed.
    #[error("Failed to parse JWKS: {message}")]
    JwksParse {
        /// Description of the parse error.
        message: String,
    },

    /// The JWKS contained no usable signing keys.
    #[error("No signing keys found in JWKS")]
    NoSigningKeys,

    /// The policy engine denied the action.
    #[error("Action is not allowed: {subject} may not {action} {object}")]
    ActionNotAllowed {
        /// The acting subject.
        subject: String,
        /// The target object.
        object: String,
        /// The denied action.
        action: String,
    },
}

impl AuthError {
    /// Creates a new `InvalidJwksUri` error.
    #[must_use]
    pub fn invalid_jwks_uri(message: impl Into<String>) -> Self {
        Self::InvalidJwksUri {
            message: message.into(),
        }
    }

    /// Creates a new `Network` error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a new `JwksParse` error.
    #[must_use]
    pub fn jwks_parse(message: impl Into<String>) -> Self {
        Self::JwksParse {
            message: message.into(),
        }
    }

    /// Creates a new `ActionNotAllowed` error.
    #[must_use]
    pub fn action_not_allowed(
        subject: impl Into<String>,
        object: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self::ActionNotAllowed {
            subject: subject.into(),
            object: object.into(),
            action: action.into(),
        }
    }
}
