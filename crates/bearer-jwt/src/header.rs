//! JOSE header
//!
//! Serialized as `{"typ":"JWT","alg":...,"kid":...}` in that order, with
//! `kid` omitted when absent. On decode `typ`, `alg` and `kid` are kept as raw
//! JSON: a header of the wrong shape is still a valid JSON object, so an
//! unknown or non-string `alg` surfaces as [`JwtError::UnsupportedAlgorithm`]
//! rather than a parse failure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::algorithm::{self, Algorithm};
use crate::{JWT_TYPE, JwtError, Result};

/// Token header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Token type, `"JWT"` for tokens built here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<Value>,

    /// Signing algorithm name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<Value>,

    /// Key identifier used to select a verification key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<Value>,

    /// Any other header parameters, preserved for inspection
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Header {
    /// Header for a token signed with `alg`
    pub fn new(alg: Algorithm, kid: Option<&str>) -> Self {
        Self {
            typ: Some(Value::from(JWT_TYPE)),
            alg: Some(Value::from(alg.as_str())),
            kid: kid.map(Value::from),
            extra: Map::new(),
        }
    }

    /// `typ` when it is a string
    pub fn typ(&self) -> Option<&str> {
        self.typ.as_ref().and_then(Value::as_str)
    }

    /// `kid` when it is a string
    pub fn kid(&self) -> Option<&str> {
        self.kid.as_ref().and_then(Value::as_str)
    }

    /// Resolve `alg` against the registry
    ///
    /// # Errors
    ///
    /// [`JwtError::MissingAlgorithm`] for an absent, `null` or empty `alg`,
    /// [`JwtError::UnsupportedAlgorithm`] for anything not in the registry,
    /// non-string values included.
    pub fn algorithm(&self) -> Result<Algorithm> {
        match &self.alg {
            None => Err(JwtError::MissingAlgorithm),
            Some(Value::String(name)) if name.is_empty() => Err(JwtError::MissingAlgorithm),
            Some(Value::String(name)) => algorithm::lookup(name)
                .map(|spec| spec.algorithm)
                .ok_or_else(|| JwtError::UnsupportedAlgorithm {
                    algorithm: name.clone(),
                }),
            Some(other) => Err(JwtError::UnsupportedAlgorithm {
                algorithm: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_in_wire_order() {
        let header = Header::new(Algorithm::HS256, None);
        assert_eq!(
            serde_json::to_string(&header).unwrap(),
            r#"{"typ":"JWT","alg":"HS256"}"#
        );
    }

    #[test]
    fn test_serializes_kid_last() {
        let header = Header::new(Algorithm::RS256, Some("k1"));
        assert_eq!(
            serde_json::to_string(&header).unwrap(),
            r#"{"typ":"JWT","alg":"RS256","kid":"k1"}"#
        );
    }

    #[test]
    fn test_missing_and_empty_alg() {
        let header: Header = serde_json::from_str(r#"{"typ":"JWT"}"#).unwrap();
        assert_eq!(header.algorithm().unwrap_err(), JwtError::MissingAlgorithm);

        let header: Header = serde_json::from_str(r#"{"alg":""}"#).unwrap();
        assert_eq!(header.algorithm().unwrap_err(), JwtError::MissingAlgorithm);

        let header: Header = serde_json::from_str(r#"{"alg":null}"#).unwrap();
        assert_eq!(header.algorithm().unwrap_err(), JwtError::MissingAlgorithm);
    }

    #[test]
    fn test_unknown_alg_is_unsupported() {
        let header: Header = serde_json::from_str(r#"{"alg":"none"}"#).unwrap();
        assert_eq!(
            header.algorithm().unwrap_err(),
            JwtError::UnsupportedAlgorithm {
                algorithm: "none".to_string()
            }
        );
    }

    #[test]
    fn test_non_string_alg_is_unsupported() {
        let header: Header = serde_json::from_str(r#"{"alg":123}"#).unwrap();
        assert_eq!(
            header.algorithm().unwrap_err(),
            JwtError::UnsupportedAlgorithm {
                algorithm: "123".to_string()
            }
        );

        let header: Header = serde_json::from_str(r#"{"alg":["HS256"]}"#).unwrap();
        assert!(matches!(
            header.algorithm(),
            Err(JwtError::UnsupportedAlgorithm { .. })
        ));
    }

    #[test]
    fn test_non_string_kid_and_typ_parse() {
        let header: Header =
            serde_json::from_str(r#"{"typ":1,"alg":"HS256","kid":7}"#).unwrap();
        assert_eq!(header.kid(), None);
        assert_eq!(header.typ(), None);
        assert_eq!(header.kid, Some(Value::from(7)));
        assert_eq!(header.algorithm().unwrap(), Algorithm::HS256);
    }

    #[test]
    fn test_extra_parameters_preserved() {
        let header: Header =
            serde_json::from_str(r#"{"alg":"HS256","cty":"JWT","x5t":"abc"}"#).unwrap();
        assert_eq!(header.algorithm().unwrap(), Algorithm::HS256);
        assert_eq!(header.extra["cty"], "JWT");
        assert_eq!(header.extra["x5t"], "abc");
    }
}
