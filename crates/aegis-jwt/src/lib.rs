//! # aegis-jwt
//!
//! JSON Web Token (RFC 7519) signing, parsing and verification.
//!
//! This crate implements the JWT wire format from scratch: base64url segment
//! encoding, pluggable signing algorithms, and claim validation. It is the
//! protocol core underneath the `aegis-iam` access-token layer.
//!
//! ## Supported Algorithms
//!
//! - **HS256 / HS384 / HS512**: HMAC with SHA-2 (symmetric)
//! - **RS256 / RS384 / RS512**: RSA PKCS#1 v1.5 with SHA-2
//!
//! ECDSA signing and token encryption (JWE) are not supported.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use aegis_jwt::{AlgorithmRegistry, HmacAlgorithm, Parser, RegisteredClaims, SigningKey, Token, VerifyingKey};
//!
//! let claims = RegisteredClaims {
//!     subject: "service-a".to_string(),
//!     expires_at: Some(1_900_000_000),
//!     ..Default::default()
//! };
//!
//! let token = Token::new(Arc::new(HmacAlgorithm::hs256()), claims);
//! let signed = token.signed_string(&SigningKey::hmac(b"secret"))?;
//!
//! let parser: Parser<RegisteredClaims> = Parser::new(AlgorithmRegistry::with_defaults());
//! let parsed = parser.parse(&signed, |_kid| Ok(VerifyingKey::hmac(b"secret")))?;
//! ```
//!
//! ## Modules
//!
//! - [`algorithm`] - Signing method implementations and the algorithm registry
//! - [`claims`] - Registered claims, the `Claims` trait, and claim scalars
//! - [`error`] - Error types for all JWT operations
//! - [`jwk`] - JSON Web Key (RFC 7517 subset) wire types
//! - [`key`] - Signing and verification key material
//! - [`parser`] - Token string parsing and signature verification
//! - [`token`] - Token container and signed-string encoding

pub mod algorithm;
pub mod claims;
pub mod error;
pub mod jwk;
pub mod key;
pub mod parser;
pub mod token;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use algorithm::{AlgorithmRegistry, HmacAlgorithm, RsaAlgorithm, SigningMethod};
pub use claims::{ClaimStrings, Claims, RegisteredClaims};
pub use error::JwtError;
pub use jwk::{Jwk, JwkSet};
pub use key::{SigningKey, VerifyingKey};
pub use parser::{Clock, Parser};
pub use token::Token;

/// Type alias for JWT operation results.
pub type JwtResult<T> = Result<T, JwtError>;
