//! Secret decoding.
//!
//! Secrets are exchanged as standard base64, optionally branded with a
//! `whsec_` prefix. The decoded bytes are used directly as the HMAC key.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;

use crate::{Result, WebhookError};

/// Prefix carried by symmetric signing secrets.
pub const SECRET_PREFIX: &str = "whsec_";

/// Decode a symmetric secret, stripping the optional `whsec_` prefix.
pub fn decode_secret(secret: &str) -> Result<Vec<u8>> {
    decode_prefixed(secret, SECRET_PREFIX)
}

/// Strip `prefix` if present and decode the rest as standard base64.
pub(crate) fn decode_prefixed(value: &str, prefix: &str) -> Result<Vec<u8>> {
    if value.is_empty() {
        return Err(WebhookError::InvalidSecret("secret can't be empty".into()));
    }

    let encoded = value.strip_prefix(prefix).unwrap_or(value);
    STANDARD
        .decode(encoded)
        .map_err(|e| WebhookError::InvalidSecret(e.to_string()))
}

/// Decoded key material. `Debug` never prints the bytes.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct SecretKey(Vec<u8>);

impl SecretKey {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([REDACTED; {}])", self.0.len())
    }
}
