//! Standard Webhooks signing and verification.
//!
//! This crate provides:
//! - HMAC-SHA256 (`v1`) signing and verification with a shared secret
//! - Ed25519 (`v1a`) signing and verification with a key pair
//! - Timestamp tolerance checks against replayed messages
//! - Constant-time signature comparison
//!
//! Signatures are byte-for-byte compatible with the other Standard Webhooks
//! libraries: the signed message is `{msg_id}.{timestamp}.{payload}` and the
//! `webhook-signature` header carries space-separated `version,base64` tokens.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use standardwebhooks::{VerificationError, Webhook, WebhookError};
//!
//! let wh = Webhook::new("whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw")?;
//! let headers: HashMap<String, String> = HashMap::new();
//!
//! let err = wh.verify(b"{}", &headers).unwrap_err();
//! assert_eq!(err, WebhookError::Verification(VerificationError::MissingHeaders));
//! # Ok::<(), WebhookError>(())
//! ```

#![warn(missing_docs)]

mod asymmetric;
mod config;
mod error;
mod headers;
mod secret;
mod signature;
mod signer;
mod timestamp;
mod timing;
mod webhook;

#[cfg(feature = "wasm")]
mod wasm;

pub use asymmetric::{
    WebhookAsymmetric, ASYMMETRIC_SIGNATURE_VERSION, PRIVATE_KEY_PREFIX, PUBLIC_KEY_PREFIX,
};
pub use config::WebhookConfig;
pub use error::{Result, SigningError, VerificationError, WebhookError};
pub use headers::{HeaderNames, HeaderSource, WebhookHeaders, ALIAS_HEADERS, CANONICAL_HEADERS};
pub use secret::{decode_secret, SECRET_PREFIX};
pub use signature::{any_signature_matches, parse_signature_header, SignatureToken};
pub use signer::{canonical_message, hmac_sha256, versioned, SIGNATURE_VERSION};
pub use timestamp::{Timestamp, TimestampGuard, TimestampInput, DEFAULT_TOLERANCE};
pub use timing::constant_time_compare;
pub use webhook::Webhook;
