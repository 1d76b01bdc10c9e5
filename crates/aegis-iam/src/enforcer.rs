//! Policy-enforcement boundary.

use async_trait::async_trait;

use crate::error::AuthError;

/// Decides whether a subject may perform an action on an object.
///
/// Guard middleware calls this after authentication with the profile's
/// subject (for users, typically [`UserProfile::role_string`]); the policy
/// backend behind it is out of scope for this crate.
///
/// [`UserProfile::role_string`]: crate::profile::UserProfile::role_string
#[async_trait]
pub trait Enforcer: Send + Sync {
    /// Returns `Ok(())` if the action is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ActionNotAllowed`] when the policy denies the
    /// action; other variants for backend failures.
    async fn enforce(&self, subject: &str, object: &str, action: &str) -> Result<(), AuthError>;
}
