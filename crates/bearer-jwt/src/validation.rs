//! Decode-time configuration
//!
//! [`Validation`] carries the caller's algorithm allow-list, an optional
//! clock-skew leeway and the clock used for the validity window.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::claims::{Claims, EXPIRATION, ISSUED_AT, NOT_BEFORE};
use crate::{JwtError, Result};

/// Source of "now" for `nbf`/`iat`/`exp` checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clock {
    /// Wall-clock UTC time
    #[default]
    System,
    /// A fixed instant in epoch seconds
    Fixed(i64),
}

impl Clock {
    /// Current instant in epoch seconds
    pub fn now(self) -> i64 {
        match self {
            Self::System => Utc::now().timestamp(),
            Self::Fixed(at) => at,
        }
    }
}

/// Decode policy
///
/// # Example
///
/// ```rust
/// use bearer_jwt::{Algorithm, Clock, Validation};
/// use std::time::Duration;
///
/// let validation = Validation::new(&[Algorithm::RS256])
///     .with_leeway(Duration::from_secs(30))
///     .with_clock(Clock::Fixed(1_700_000_000));
///
/// assert!(validation.allows(Algorithm::RS256));
/// assert!(!validation.allows(Algorithm::HS256));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    allowed_algorithms: Vec<Algorithm>,
    #[serde(default, with = "duration_secs")]
    leeway: Duration,
    #[serde(default)]
    clock: Clock,
}

impl Validation {
    /// Allow exactly `allowed`, no leeway, system clock
    ///
    /// An empty allow-list rejects every token that is checked against a key.
    ///
    /// A [`crate::Key`] carries no algorithm family, so an allow-list used
    /// with one key must not mix HMAC and RSA algorithms. With
    /// `[HS256, RS256]` and an RSA public PEM, a token HMAC-signed using that
    /// public PEM as the secret verifies.
    pub fn new(allowed: &[Algorithm]) -> Self {
        Self {
            allowed_algorithms: allowed.to_vec(),
            leeway: Duration::ZERO,
            clock: Clock::System,
        }
    }

    /// Tolerate this much clock skew on every temporal comparison
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Evaluate the validity window against `clock`
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Allowed algorithms
    pub fn allowed_algorithms(&self) -> &[Algorithm] {
        &self.allowed_algorithms
    }

    /// Configured leeway
    pub fn leeway(&self) -> Duration {
        self.leeway
    }

    /// Configured clock
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Whether the allow-list contains `alg`
    pub fn allows(&self, alg: Algorithm) -> bool {
        self.allowed_algorithms.contains(&alg)
    }

    /// Enforce `nbf`, `iat` and `exp`
    ///
    /// # Errors
    ///
    /// [`JwtError::TokenNotYetValid`] when `nbf` or `iat` is after now,
    /// [`JwtError::TokenExpired`] when now has reached `exp`, and
    /// [`JwtError::MalformedToken`] when one of them is not a number.
    pub(crate) fn check_validity_window(&self, claims: &Claims) -> Result<()> {
        let now = self.clock.now() as f64;
        let leeway = self.leeway.as_secs() as f64;

        for name in [NOT_BEFORE, ISSUED_AT] {
            if let Some(valid_from) = claims.numeric_date(name)?
                && valid_from > now + leeway
            {
                return Err(JwtError::TokenNotYetValid {
                    valid_from: valid_from as i64,
                });
            }
        }

        if let Some(expires_at) = claims.numeric_date(EXPIRATION)?
            && now - leeway >= expires_at
        {
            return Err(JwtError::TokenExpired {
                expired_at: expires_at as i64,
            });
        }

        Ok(())
    }
}

/// `Duration` as whole seconds
pub(crate) mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
