//! Canonical message construction and HMAC-SHA256 signing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::Timestamp;

type HmacSha256 = Hmac<Sha256>;

/// Version tag of HMAC-SHA256 signatures.
pub const SIGNATURE_VERSION: &str = "v1";

/// Build the bytes that get signed: `{msg_id}.{timestamp}.{payload}`.
///
/// The payload is appended verbatim; it does not need to be UTF-8.
pub fn canonical_message(msg_id: &str, timestamp: Timestamp, payload: &[u8]) -> Vec<u8> {
    let timestamp = timestamp.to_string();
    let mut message = Vec::with_capacity(msg_id.len() + timestamp.len() + payload.len() + 2);
    message.extend_from_slice(msg_id.as_bytes());
    message.push(b'.');
    message.extend_from_slice(timestamp.as_bytes());
    message.push(b'.');
    message.extend_from_slice(payload);
    message
}

/// Generate an HMAC-SHA256 digest.
///
/// # Arguments
/// * `key` - Secret key bytes
/// * `message` - Message to sign
///
/// # Returns
/// The raw 32-byte digest
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key)
        .expect("HMAC can take key of any size");
    mac.update(message);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}

/// Join a version tag and an encoded signature into a header token.
pub fn versioned(version: &str, encoded: &str) -> String {
    format!("{version},{encoded}")
}

/// Base64 of the HMAC over the canonical message, without the version tag.
pub(crate) fn expected_signature(key: &[u8], msg_id: &str, timestamp: Timestamp, payload: &[u8]) -> String {
    let message = canonical_message(msg_id, timestamp, payload);
    STANDARD.encode(hmac_sha256(key, &message))
}

/// Full `v1,<base64>` signature.
pub(crate) fn sign_v1(key: &[u8], msg_id: &str, timestamp: Timestamp, payload: &[u8]) -> String {
    versioned(
        SIGNATURE_VERSION,
        &expected_signature(key, msg_id, timestamp, payload),
    )
}
