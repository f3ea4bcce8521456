//! OAuth 2.0 JWT-bearer client assertions (RFC 7523)
//!
//! A client proves possession of its secret by posting a short-lived signed
//! token to the authorization server's token endpoint:
//!
//! ```text
//! grant_type=urn:ietf:params:oauth:grant-type:jwt-bearer&assertion=<jwt>
//! ```
//!
//! The assertion claims are `{iss, aud, exp, iat}`, where `iss` is the client
//! key, `aud` the token endpoint and `exp - iat` at most ten minutes. This
//! module builds those assertions and interprets the endpoint's JSON answer;
//! the HTTP exchange itself is left to the caller.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::algorithm::Algorithm;
use crate::claims::Claims;
use crate::codec::encode;
use crate::key::Key;
use crate::validation::{Clock, duration_secs};
use crate::JwtError;

/// `grant_type` value for JWT-bearer authorization grants
pub const GRANT_TYPE_JWT_BEARER: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Longest assertion lifetime accepted by token endpoints
pub const MAX_ASSERTION_LIFETIME: Duration = Duration::from_secs(600);

/// Lifetime used when none is configured
pub const DEFAULT_ASSERTION_LIFETIME: Duration = MAX_ASSERTION_LIFETIME;

/// Path fragments recognised as token endpoints
pub const DEFAULT_ENDPOINT_PATTERNS: &[&str] = &["/oauth2/token", "/oauth/token"];

/// Assertion failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    /// The token endpoint is empty or does not look like a token endpoint
    #[error("invalid token endpoint '{endpoint}'")]
    InvalidEndpoint {
        /// Endpoint as configured (trimmed)
        endpoint: String,
    },

    /// The issuer (client key) is empty
    #[error("assertion issuer is empty")]
    MissingIssuer,

    /// The token endpoint answered with an OAuth error
    #[error("token endpoint returned {error}{}", description_suffix(.description))]
    TokenEndpoint {
        /// OAuth `error` code
        error: String,
        /// OAuth `error_description`, when present
        description: Option<String>,
    },

    /// The response carried neither `access_token` nor `error`
    #[error("unexpected token endpoint response: {reason}")]
    UnexpectedResponse {
        /// What was wrong with the body
        reason: String,
    },

    /// Encoding the assertion failed
    #[error(transparent)]
    Jwt(#[from] JwtError),
}

fn description_suffix(description: &Option<String>) -> String {
    description
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

/// Client identity and token endpoint for assertions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionConfig {
    issuer: String,
    audience: String,
    #[serde(default = "default_lifetime", with = "duration_secs")]
    lifetime: Duration,
    #[serde(default = "default_algorithm")]
    algorithm: Algorithm,
}

fn default_lifetime() -> Duration {
    DEFAULT_ASSERTION_LIFETIME
}

fn default_algorithm() -> Algorithm {
    Algorithm::HS256
}

impl AssertionConfig {
    /// Assertions issued by `issuer` (the client key) for the token endpoint
    /// `audience`
    ///
    /// Surrounding whitespace is stripped from the endpoint.
    pub fn new(issuer: impl Into<String>, audience: impl AsRef<str>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.as_ref().trim().to_string(),
            lifetime: DEFAULT_ASSERTION_LIFETIME,
            algorithm: default_algorithm(),
        }
    }

    /// Set the assertion lifetime, clamped to [`MAX_ASSERTION_LIFETIME`]
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime.min(MAX_ASSERTION_LIFETIME);
        self
    }

    /// Sign with `algorithm` instead of HS256
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Client key placed in `iss`
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Token endpoint placed in `aud`
    pub fn audience(&self) -> &str {
        self.audience.trim()
    }

    /// Effective lifetime
    ///
    /// Also clamped here so deserialized configs obey the same ceiling.
    pub fn lifetime(&self) -> Duration {
        self.lifetime.min(MAX_ASSERTION_LIFETIME)
    }

    /// Signing algorithm
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Check that the endpoint contains one of `patterns`
    ///
    /// # Errors
    ///
    /// [`AssertionError::InvalidEndpoint`] when the endpoint is empty or
    /// matches none of the patterns.
    pub fn validate_endpoint(&self, patterns: &[&str]) -> Result<(), AssertionError> {
        let endpoint = self.audience();
        if endpoint.is_empty() || !patterns.iter().any(|pattern| endpoint.contains(pattern)) {
            return Err(AssertionError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for signed JWT-bearer assertions
#[derive(Debug, Clone)]
pub struct JwtBearerAssertion {
    config: AssertionConfig,
    clock: Clock,
}

impl JwtBearerAssertion {
    /// Assertions for `config`, timed by the system clock
    pub fn new(config: AssertionConfig) -> Self {
        Self {
            config,
            clock: Clock::System,
        }
    }

    /// Take `iat` from `clock` instead of the system time
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Configuration the assertions are built from
    pub fn config(&self) -> &AssertionConfig {
        &self.config
    }

    /// Claim set for an assertion issued at `now`
    pub fn claims(&self, now: i64) -> Claims {
        let lifetime = i64::try_from(self.config.lifetime().as_secs()).unwrap_or(i64::MAX);
        Claims::new()
            .with_issuer(self.config.issuer())
            .with_audience(self.config.audience())
            .with_expiration(now.saturating_add(lifetime))
            .with_issued_at(now)
    }

    /// Signed assertion token
    ///
    /// # Errors
    ///
    /// [`AssertionError::MissingIssuer`] for an empty client key, or the
    /// wrapped [`JwtError`] if signing fails.
    pub fn sign(&self, key: &Key) -> Result<String, AssertionError> {
        if self.config.issuer().is_empty() {
            return Err(AssertionError::MissingIssuer);
        }

        let now = self.clock.now();
        let token = encode(&self.claims(now), key, self.config.algorithm(), None)?;
        debug!(
            alg = %self.config.algorithm(),
            iat = now,
            lifetime_secs = self.config.lifetime().as_secs(),
            "built jwt-bearer assertion"
        );
        Ok(token)
    }

    /// Form parameters for the token request
    ///
    /// Validates the endpoint against [`DEFAULT_ENDPOINT_PATTERNS`] first.
    ///
    /// # Errors
    ///
    /// [`AssertionError::InvalidEndpoint`], or any error from [`Self::sign`].
    pub fn grant_params(&self, key: &Key) -> Result<Vec<(&'static str, String)>, AssertionError> {
        self.grant_params_for(key, DEFAULT_ENDPOINT_PATTERNS)
    }

    /// [`Self::grant_params`] with caller-supplied endpoint patterns
    ///
    /// # Errors
    ///
    /// As for [`Self::grant_params`].
    pub fn grant_params_for(
        &self,
        key: &Key,
        patterns: &[&str],
    ) -> Result<Vec<(&'static str, String)>, AssertionError> {
        self.config.validate_endpoint(patterns)?;
        Ok(vec![
            ("grant_type", GRANT_TYPE_JWT_BEARER.to_string()),
            ("assertion", self.sign(key)?),
        ])
    }
}

/// Extract the access token from a token endpoint response body
///
/// # Errors
///
/// [`AssertionError::TokenEndpoint`] when the body carries an OAuth `error`,
/// [`AssertionError::UnexpectedResponse`] for anything else without an
/// `access_token`, invalid JSON included.
pub fn parse_token_response(body: &str) -> Result<String, AssertionError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| AssertionError::UnexpectedResponse {
            reason: format!("invalid JSON: {e}"),
        })?;

    if let Some(token) = value.get("access_token").and_then(Value::as_str) {
        return Ok(token.to_string());
    }

    if let Some(error) = value.get("error").and_then(Value::as_str) {
        let description = value
            .get("error_description")
            .and_then(Value::as_str)
            .map(str::to_string);
        warn!(error, "token endpoint rejected assertion");
        return Err(AssertionError::TokenEndpoint {
            error: error.to_string(),
            description,
        });
    }

    Err(AssertionError::UnexpectedResponse {
        reason: "no access_token or error field".to_string(),
    })
}
