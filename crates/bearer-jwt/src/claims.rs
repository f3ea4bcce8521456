//! Claim set
//!
//! An ordered map of claim name to JSON value. The registered claims of
//! RFC 7519 §4.1 get typed accessors; `iat`, `nbf` and `exp` are the only
//! names the codec interprets, everything else passes through untouched.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{JwtError, Result};

/// Issued-at claim name
pub const ISSUED_AT: &str = "iat";
/// Not-before claim name
pub const NOT_BEFORE: &str = "nbf";
/// Expiration claim name
pub const EXPIRATION: &str = "exp";

/// JWT payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a claim
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a claim in place, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Set `iss`
    pub fn with_issuer(self, issuer: impl Into<String>) -> Self {
        self.with_claim("iss", issuer.into())
    }

    /// Set `sub`
    pub fn with_subject(self, subject: impl Into<String>) -> Self {
        self.with_claim("sub", subject.into())
    }

    /// Set `aud` to a single audience
    pub fn with_audience(self, audience: impl Into<String>) -> Self {
        self.with_claim("aud", audience.into())
    }

    /// Set `exp` (epoch seconds)
    pub fn with_expiration(self, exp: i64) -> Self {
        self.with_claim(EXPIRATION, exp)
    }

    /// Set `nbf` (epoch seconds)
    pub fn with_not_before(self, nbf: i64) -> Self {
        self.with_claim(NOT_BEFORE, nbf)
    }

    /// Set `iat` (epoch seconds)
    pub fn with_issued_at(self, iat: i64) -> Self {
        self.with_claim(ISSUED_AT, iat)
    }

    /// Set `jti`
    pub fn with_jwt_id(self, jti: impl Into<String>) -> Self {
        self.with_claim("jti", jti.into())
    }

    /// Raw claim value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Whether `name` is present
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no claims are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Claims in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the underlying map
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    fn str_claim(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// `iss` as a string
    pub fn iss(&self) -> Option<&str> {
        self.str_claim("iss")
    }

    /// `sub` as a string
    pub fn sub(&self) -> Option<&str> {
        self.str_claim("sub")
    }

    /// `jti` as a string
    pub fn jti(&self) -> Option<&str> {
        self.str_claim("jti")
    }

    /// `aud` as a list, whether encoded as a string or an array of strings
    pub fn audiences(&self) -> Vec<&str> {
        match self.0.get("aud") {
            Some(Value::String(aud)) => vec![aud.as_str()],
            Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// `exp` as integer epoch seconds
    pub fn exp(&self) -> Option<i64> {
        self.0.get(EXPIRATION).and_then(Value::as_i64)
    }

    /// `nbf` as integer epoch seconds
    pub fn nbf(&self) -> Option<i64> {
        self.0.get(NOT_BEFORE).and_then(Value::as_i64)
    }

    /// `iat` as integer epoch seconds
    pub fn iat(&self) -> Option<i64> {
        self.0.get(ISSUED_AT).and_then(Value::as_i64)
    }

    /// A temporal claim as a number, for window checks
    ///
    /// Absent and `null` are both "not set". Any other non-number is a
    /// malformed token: the claim is reserved and must be a NumericDate.
    pub(crate) fn numeric_date(&self, name: &str) -> Result<Option<f64>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| JwtError::malformed(format!("claim '{name}' is out of range"))),
            Some(_) => Err(JwtError::malformed(format!(
                "claim '{name}' is not a numeric date"
            ))),
        }
    }

    /// Deserialize the claim set into an application type
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the claims do not fit `T`.
    pub fn to_typed<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Claims {
    type Error = JwtError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(JwtError::malformed(format!(
                "claims must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
