//! Request-context profile storage.
//!
//! Guard middleware validates the bearer token, builds a profile and
//! stores it in the request's [`http::Extensions`]; handlers downstream
//! read it back with the typed getters. Each profile type occupies its own
//! extension slot, so an M2M profile never shadows a user profile.

use http::Extensions;

use crate::profile::{M2mProfile, UserProfile};

/// Stores an M2M profile in the request extensions.
pub fn set_m2m_profile(extensions: &mut Extensions, profile: M2mProfile) {
    extensions.insert(profile);
}

/// Returns the M2M profile stored in the request extensions, if any.
#[must_use]
pub fn m2m_profile(extensions: &Extensions) -> Option<&M2mProfile> {
    extensions.get()
}

/// Stores a user profile in the request extensions.
pub fn set_user_profile(extensions: &mut Extensions, profile: UserProfile) {
    extensions.insert(profile);
}

/// Returns the user profile stored in the request extensions, if any.
#[must_use]
pub fn user_profile(extensions: &Extensions) -> Option<&UserProfile> {
    extensions.get()
}
