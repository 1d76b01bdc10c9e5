//! Identity profiles derived from validated access-token claims.
//!
//! Profiles are immutable value objects built once from claims; everything
//! after construction is a pure read accessor. The guard middleware builds
//! a profile right after validation and stashes it in the request context
//! (see [`crate::context`]).

use std::collections::HashSet;

use serde_json::Value;

use aegis_jwt::JwtError;
use aegis_jwt::claims::value_to_string;

use crate::claims::AccessClaims;

// =============================================================================
// M2M Profile
// =============================================================================

/// Machine-to-machine identity: a client and the scopes it was granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct M2mProfile {
    id: String,
    scopes: HashSet<String>,
}

impl M2mProfile {
    /// Returns the identity (the token's `sub`).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the granted scopes.
    #[must_use]
    pub fn scopes(&self) -> &HashSet<String> {
        &self.scopes
    }

    /// Returns `true` if the given scope was granted.
    #[must_use]
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Returns `true` if any of the given scopes was granted.
    #[must_use]
    pub fn has_any_scope<'a>(&self, scopes: impl IntoIterator<Item = &'a str>) -> bool {
        scopes.into_iter().any(|scope| self.has_scope(scope))
    }
}

/// Builds an [`M2mProfile`] from the `sub` claim and the space-delimited
/// `scope` extra claim.
///
/// A non-string `scope` value is stringified before splitting.
///
/// # Errors
///
/// Returns [`JwtError::MissingRequiredClaim`] if the claims carry no
/// `scope`.
pub fn extract_m2m_profile(claims: &AccessClaims) -> Result<M2mProfile, JwtError> {
    let scope = claims
        .extra_claim("scope")
        .ok_or_else(|| JwtError::missing_claim("scope"))?;
    let scopes = value_to_string(scope)
        .split_whitespace()
        .map(str::to_string)
        .collect();

    Ok(M2mProfile {
        id: claims.registered.subject.clone(),
        scopes,
    })
}

// =============================================================================
// User Profile
// =============================================================================

/// End-user identity: a subject with assigned roles and permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    id: String,
    roles: Vec<String>,
    permissions: Vec<String>,
}

impl UserProfile {
    /// Returns the identity (the token's `sub`).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the assigned roles in claim order.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Returns the roles joined with commas, for enforcement backends that
    /// take a single subject string.
    #[must_use]
    pub fn role_string(&self) -> String {
        self.roles.join(",")
    }

    /// Returns `true` if the user has the given role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Returns the assigned permissions.
    #[must_use]
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }
}

/// Builds a [`UserProfile`] from the `sub` claim and the `roles` extra
/// claim.
///
/// `roles` may be a comma-separated string, an array of strings, or a
/// mixed array (non-string elements are stringified). An optional
/// `permissions` claim is read with the same shape rules.
///
/// # Errors
///
/// Returns [`JwtError::MissingRequiredClaim`] if `roles` is absent, or
/// [`JwtError::InvalidToken`] if it has an unsupported shape.
pub fn extract_user_profile(claims: &AccessClaims) -> Result<UserProfile, JwtError> {
    let roles_value = claims
        .extra_claim("roles")
        .ok_or_else(|| JwtError::missing_claim("roles"))?;
    let roles = string_list(roles_value, "roles")?;

    let permissions = match claims.extra_claim("permissions") {
        Some(value) => string_list(value, "permissions")?,
        None => Vec::new(),
    };

    Ok(UserProfile {
        id: claims.registered.subject.clone(),
        roles,
        permissions,
    })
}

fn string_list(value: &Value, claim: &str) -> Result<Vec<String>, JwtError> {
    match value {
        Value::String(joined) => Ok(joined.split(',').map(str::to_string).collect()),
        Value::Array(items) => Ok(items.iter().map(value_to_string).collect()),
        _ => Err(JwtError::invalid_token(format!(
            "{claim} claim must be a string or an array"
        ))),
    }
}
