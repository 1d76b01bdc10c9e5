//! # aegis-iam
//!
//! RFC 9068 access-token validation and identity profiles on top of
//! [`aegis_jwt`].
//!
//! This crate provides:
//! - The composite access-token claim set (registered claims plus a
//!   free-form extra-claims bag)
//! - An RFC 9068 validator that resolves verification keys from the
//!   issuer's JWKS endpoint
//! - Machine-to-machine and user identity profiles derived from validated
//!   claims
//! - Request-context helpers through which profiles reach the HTTP
//!   middleware layer
//! - The policy-enforcement boundary trait consumed by guard middleware
//!
//! ## Validation flow
//!
//! [`AccessTokenValidator::new`] fetches the issuer's JWKS once and builds
//! an immutable `kid` to public-key map. Every
//! [`AccessTokenValidator::validate`] call then parses the token, verifies
//! its signature against that map, and runs the RFC 9068 semantic checks.
//! There is no automatic key refresh; construct a new validator to pick up
//! rotated keys.
//!
//! ## Modules
//!
//! - [`claims`] - Composite access-token claims with extra-claim handling
//! - [`context`] - Profile injection into request extensions
//! - [`enforcer`] - Policy-enforcement boundary trait
//! - [`error`] - Error types for validation and enforcement
//! - [`http`] - Injectable HTTP client boundary for the JWKS fetch
//! - [`profile`] - M2M and user identity profiles
//! - [`validator`] - The RFC 9068 validator

pub mod claims;
pub mod context;
pub mod enforcer;
pub mod error;
pub mod http;
pub mod profile;
pub mod validator;

pub use claims::AccessClaims;
pub use context::{
    m2m_profile, set_m2m_profile, set_user_profile, user_profile,
};
pub use enforcer::Enforcer;
pub use error::AuthError;
pub use http::HttpClient;
pub use profile::{M2mProfile, UserProfile, extract_m2m_profile, extract_user_profile};
pub use validator::{AccessTokenValidator, ValidatorConfig, WELL_KNOWN_JWKS_PATH};

/// Type alias for authentication/authorization results.
pub type AuthResult<T> = Result<T, AuthError>;
