//! Timestamp parsing and tolerance enforcement.
//!
//! Signing only needs the parse rule. Verification applies the parse rule to
//! the `webhook-timestamp` header and then the bounds rule, both before any
//! HMAC work is done.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::{SigningError, VerificationError};

/// Default tolerance window around the current time.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(5 * 60);

/// Whole seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from seconds since the epoch.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Seconds since the epoch.
    pub const fn as_secs(self) -> u64 {
        self.0
    }

    /// The current time, truncated to whole seconds.
    pub fn now() -> Self {
        Self(u64::try_from(Utc::now().timestamp()).unwrap_or(0))
    }

    /// Parse a wire timestamp: one or more ASCII digits and nothing else.
    ///
    /// Signs, whitespace, fractions and exponents are all rejected, so
    /// `"161426533.0"` and `"-161426533"` fail just like `"abc"`.
    pub fn parse(value: &str) -> Result<Self, SigningError> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SigningError::InvalidTimestamp(value.to_string()));
        }
        value
            .parse::<u64>()
            .map(Self)
            .map_err(|_| SigningError::InvalidTimestamp(value.to_string()))
    }
}

impl FromStr for Timestamp {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Values accepted as a signing timestamp.
///
/// Integers and strings are accepted when they denote a whole, non-negative
/// number of seconds. Floats do not implement it.
pub trait TimestampInput {
    /// Convert to a [`Timestamp`], applying the parse rule.
    fn to_timestamp(&self) -> Result<Timestamp, SigningError>;
}

impl TimestampInput for Timestamp {
    fn to_timestamp(&self) -> Result<Timestamp, SigningError> {
        Ok(*self)
    }
}

impl TimestampInput for str {
    fn to_timestamp(&self) -> Result<Timestamp, SigningError> {
        Timestamp::parse(self)
    }
}

impl TimestampInput for String {
    fn to_timestamp(&self) -> Result<Timestamp, SigningError> {
        Timestamp::parse(self)
    }
}

impl TimestampInput for DateTime<Utc> {
    fn to_timestamp(&self) -> Result<Timestamp, SigningError> {
        u64::try_from(self.timestamp())
            .map(Timestamp)
            .map_err(|_| SigningError::InvalidTimestamp(self.to_rfc3339()))
    }
}

impl<T: TimestampInput + ?Sized> TimestampInput for &T {
    fn to_timestamp(&self) -> Result<Timestamp, SigningError> {
        (**self).to_timestamp()
    }
}

macro_rules! unsigned_input {
    ($($ty:ty),*) => {$(
        impl TimestampInput for $ty {
            fn to_timestamp(&self) -> Result<Timestamp, SigningError> {
                Ok(Timestamp(u64::from(*self)))
            }
        }
    )*};
}

macro_rules! signed_input {
    ($($ty:ty),*) => {$(
        impl TimestampInput for $ty {
            fn to_timestamp(&self) -> Result<Timestamp, SigningError> {
                u64::try_from(*self)
                    .map(Timestamp)
                    .map_err(|_| SigningError::InvalidTimestamp(self.to_string()))
            }
        }
    )*};
}

unsigned_input!(u32, u64);
signed_input!(i32, i64);

/// Parses and bounds-checks message timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampGuard {
    tolerance: Duration,
}

impl Default for TimestampGuard {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl TimestampGuard {
    /// Create a guard with the given tolerance window.
    pub const fn new(tolerance: Duration) -> Self {
        Self { tolerance }
    }

    /// The tolerance window.
    pub const fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// Parse a timestamp header value.
    pub fn parse(value: &str) -> Result<Timestamp, VerificationError> {
        Timestamp::parse(value).map_err(|_| VerificationError::InvalidHeaders)
    }

    /// Check `timestamp` against the current time.
    pub fn check(&self, timestamp: Timestamp) -> Result<(), VerificationError> {
        self.check_at(timestamp, Timestamp::now())
    }

    /// Check `timestamp` against an explicit `now`.
    ///
    /// Both edges of the window are inclusive.
    pub fn check_at(&self, timestamp: Timestamp, now: Timestamp) -> Result<(), VerificationError> {
        let tolerance = self.tolerance.as_secs();
        let ts = timestamp.as_secs();
        let now = now.as_secs();

        if ts < now.saturating_sub(tolerance) {
            return Err(VerificationError::TimestampTooOld);
        }
        if ts > now.saturating_add(tolerance) {
            return Err(VerificationError::TimestampTooNew);
        }
        Ok(())
    }

    /// Parse a header value and check it against the current time.
    pub fn validate(&self, value: &str) -> Result<Timestamp, VerificationError> {
        let timestamp = Self::parse(value)?;
        self.check(timestamp)?;
        Ok(timestamp)
    }
}
