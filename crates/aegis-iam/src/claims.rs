//! Composite access-token claims.
//!
//! An access token carries the registered JWT claims plus arbitrary
//! issuer-specific members (`scope`, `roles`, tenant ids, ...). On the wire
//! everything lives in one flat JSON object; in memory the registered
//! fields are typed and the remainder is kept as a free-form bag.

use serde::de::Error as _;
use serde::ser::{Serialize, Serializer};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use aegis_jwt::claims::{value_to_string, value_to_unix_seconds};
use aegis_jwt::{ClaimStrings, Claims, JwtError, RegisteredClaims};

/// Claim names consumed into [`RegisteredClaims`] during deserialization;
/// everything else lands in the extra-claims bag.
const REGISTERED_NAMES: [&str; 8] = ["iss", "sub", "aud", "iat", "exp", "nbf", "jti", "client_id"];

/// Access-token claims: the registered set plus free-form extras.
///
/// Serialization writes one flat object: registered fields first under
/// their canonical short names (absent fields skipped entirely, never
/// `null`), then the extra claims overlaid. An extra claim named like a
/// registered key is undefined input; as implemented the extra value wins
/// on serialization, while deserialization always consumes registered keys
/// into the typed struct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessClaims {
    /// The standard claim set.
    pub registered: RegisteredClaims,

    /// Issuer-specific claims; `None` when the token carries none.
    pub extra: Option<Map<String, Value>>,
}

impl AccessClaims {
    /// Creates claims with no extras.
    #[must_use]
    pub fn new(registered: RegisteredClaims) -> Self {
        Self {
            registered,
            extra: None,
        }
    }

    /// Adds an extra claim.
    #[must_use]
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Returns an extra claim by name.
    #[must_use]
    pub fn extra_claim(&self, name: &str) -> Option<&Value> {
        self.extra.as_ref()?.get(name)
    }
}

impl Claims for AccessClaims {
    fn validate(&self, now: OffsetDateTime) -> Result<(), JwtError> {
        self.registered.validate(now)
    }
}

impl Serialize for AccessClaims {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let c = &self.registered;
        let mut object = Map::new();

        if !c.issuer.is_empty() {
            object.insert("iss".to_string(), Value::String(c.issuer.clone()));
        }
        if !c.subject.is_empty() {
            object.insert("sub".to_string(), Value::String(c.subject.clone()));
        }
        if !c.audience.is_empty() {
            let audience = c
                .audience
                .iter()
                .map(|s| Value::String(s.to_string()))
                .collect();
            object.insert("aud".to_string(), Value::Array(audience));
        }
        for (name, value) in [
            ("iat", c.issued_at),
            ("exp", c.expires_at),
            ("nbf", c.not_before),
        ] {
            if let Some(seconds) = value {
                object.insert(name.to_string(), Value::from(seconds));
            }
        }
        if !c.jti.is_empty() {
            object.insert("jti".to_string(), Value::String(c.jti.clone()));
        }
        if !c.client_id.is_empty() {
            object.insert("client_id".to_string(), Value::String(c.client_id.clone()));
        }

        if let Some(extra) = &self.extra {
            for (name, value) in extra {
                object.insert(name.clone(), value.clone());
            }
        }

        object.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AccessClaims {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut object = Map::<String, Value>::deserialize(deserializer)?;
        let mut registered = RegisteredClaims::default();

        if let Some(value) = object.remove("iss")
            && let Value::String(issuer) = value
        {
            registered.issuer = issuer;
        }
        if let Some(value) = object.remove("sub")
            && let Value::String(subject) = value
        {
            registered.subject = subject;
        }
        if let Some(value) = object.remove("aud") {
            registered.audience =
                serde_json::from_value::<ClaimStrings>(value).map_err(D::Error::custom)?;
        }
        if let Some(value) = object.remove("iat") {
            registered.issued_at = value_to_unix_seconds(&value);
        }
        if let Some(value) = object.remove("exp") {
            registered.expires_at = value_to_unix_seconds(&value);
        }
        if let Some(value) = object.remove("nbf") {
            registered.not_before = value_to_unix_seconds(&value);
        }
        if let Some(value) = object.remove("jti")
            && let Value::String(jti) = value
        {
            registered.jti = jti;
        }
        if let Some(value) = object.remove("client_id") {
            registered.client_id = value_to_string(&value);
        }

        let extra = if object.is_empty() { None } else { Some(object) };

        Ok(Self { registered, extra })
    }
}

/// Returns `true` if `name` is one of the registered claim names.
#[must_use]
pub fn is_registered_claim(name: &str) -> bool {
    REGISTERED_NAMES.contains(&name)
}
