//! Registered JWT claims (RFC 7519) and claim validation.
//!
//! The [`Claims`] trait is the single capability the parser requires of a
//! claims type: validate yourself against a point in time. Token and parser
//! are generic over it, so custom claim sets plug in without touching the
//! protocol plumbing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::error::JwtError;

/// A claims payload that can validate itself.
///
/// The current time is passed in by the caller (the parser injects its
/// clock), so implementations stay pure and deterministic under test.
pub trait Claims {
    /// Validates the claims at the given instant.
    ///
    /// # Errors
    ///
    /// Returns the first failing validity check.
    fn validate(&self, now: OffsetDateTime) -> Result<(), JwtError>;
}

// ============================================================================
// ClaimStrings
// ============================================================================

/// The `aud` claim scalar: one or more strings.
///
/// RFC 7519 allows `aud` to be either a single JSON string or an array.
/// Deserialization accepts both, coercing non-string array elements to
/// their JSON text; serialization always emits an array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClaimStrings(Vec<String>);

impl ClaimStrings {
    /// Creates an empty value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the value holds no strings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the value contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.0.iter().any(|s| s == needle)
    }

    /// Iterates over the contained strings in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for ClaimStrings {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[&str; N]> for ClaimStrings {
    fn from(values: [&str; N]) -> Self {
        Self(values.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<'de> Deserialize<'de> for ClaimStrings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(vec![s])),
            Value::Array(items) => Ok(Self(items.iter().map(value_to_string).collect())),
            other => Err(serde::de::Error::custom(format!(
                "audience must be a string or an array, got {other}"
            ))),
        }
    }
}

/// Renders a JSON value as a plain string.
///
/// Strings are returned verbatim (without quotes); everything else uses its
/// JSON text representation.
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerces a JSON value to unix seconds.
///
/// Accepts integers, floats (truncated) and numeric strings; anything else
/// yields `None`.
#[must_use]
pub fn value_to_unix_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| u as i64))
            .or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s
            .parse::<i64>()
            .ok()
            .or_else(|| s.parse::<f64>().ok().map(|f| f as i64)),
        _ => None,
    }
}

pub(crate) mod numeric_date {
    //! Serde adapter for nullable unix-seconds claims.

    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::value_to_unix_seconds;

    pub fn serialize<S>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(seconds) => serializer.serialize_i64(*seconds),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value_to_unix_seconds(&value).map(Some).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid numeric date: {value}"))
            }),
        }
    }
}

// ============================================================================
// RegisteredClaims
// ============================================================================

/// The standard JWT claim set (RFC 7519 §4.1, plus OAuth `client_id`).
///
/// Empty strings and `None` timestamps mean "not present" and are skipped
/// during serialization; no `null` values are ever emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredClaims {
    /// Issuer - who issued the token.
    #[serde(rename = "iss", default, skip_serializing_if = "String::is_empty")]
    pub issuer: String,

    /// Subject - whom the token is about.
    #[serde(rename = "sub", default, skip_serializing_if = "String::is_empty")]
    pub subject: String,

    /// Audience - intended recipients.
    #[serde(rename = "aud", default, skip_serializing_if = "ClaimStrings::is_empty")]
    pub audience: ClaimStrings,

    /// Issued-at, unix seconds.
    #[serde(
        rename = "iat",
        default,
        skip_serializing_if = "Option::is_none",
        with = "numeric_date"
    )]
    pub issued_at: Option<i64>,

    /// Expiration, unix seconds. Required for a token to validate.
    #[serde(
        rename = "exp",
        default,
        skip_serializing_if = "Option::is_none",
        with = "numeric_date"
    )]
    pub expires_at: Option<i64>,

    /// Not-before, unix seconds.
    #[serde(
        rename = "nbf",
        default,
        skip_serializing_if = "Option::is_none",
        with = "numeric_date"
    )]
    pub not_before: Option<i64>,

    /// JWT ID - unique token identifier.
    #[serde(rename = "jti", default, skip_serializing_if = "String::is_empty")]
    pub jti: String,

    /// OAuth client the token was issued to.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_id: String,
}

impl Claims for RegisteredClaims {
    fn validate(&self, now: OffsetDateTime) -> Result<(), JwtError> {
        let Some(expires_at) = self.expires_at else {
            return Err(JwtError::missing_claim("exp"));
        };

        let now = now.unix_timestamp();

        // A token expiring exactly now is still valid.
        if now > expires_at {
            return Err(JwtError::Expired);
        }
        if let Some(issued_at) = self.issued_at
            && now < issued_at
        {
            return Err(JwtError::UsedBeforeIssued);
        }
        if let Some(not_before) = self.not_before
            && now < not_before
        {
            return Err(JwtError::NotValidYet);
        }

        Ok(())
    }
}
