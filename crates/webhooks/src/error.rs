//! Error types for webhook signing and verification.

use thiserror::Error;

/// Result type alias for webhook operations.
pub type Result<T> = std::result::Result<T, WebhookError>;

/// Errors that can occur while constructing, signing or verifying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// The configured secret or key could not be decoded
    #[error("Invalid secret: {0}")]
    InvalidSecret(String),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Signing failed
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// Verification failed
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl WebhookError {
    /// The verification reason, if this is a verification failure.
    pub fn verification_reason(&self) -> Option<VerificationError> {
        match self {
            Self::Verification(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Reasons `sign` can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    /// Timestamp is not a whole, non-negative number of seconds
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Asymmetric webhook was built from a public key only
    #[error("Missing signing key")]
    MissingSigningKey,
}

/// Reasons `verify` can reject a message.
///
/// The `Display` strings are shared with the other Standard Webhooks
/// libraries, so receivers can report them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum VerificationError {
    /// One of the id, signature or timestamp headers is absent or empty
    #[error("Missing required headers")]
    MissingHeaders,

    /// Timestamp header is not a whole, non-negative number
    #[error("Invalid Signature Headers")]
    InvalidHeaders,

    /// Timestamp is older than the tolerance window
    #[error("Message timestamp too old")]
    TimestampTooOld,

    /// Timestamp is further in the future than the tolerance window
    #[error("Message timestamp too new")]
    TimestampTooNew,

    /// No candidate signature matched
    #[error("No matching signature found")]
    NoMatchingSignature,

    /// Signature matched but the payload is not a JSON object
    #[error("Invalid payload")]
    InvalidPayload,
}
