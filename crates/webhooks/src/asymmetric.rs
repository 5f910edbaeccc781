//! Asymmetric (Ed25519) webhook signing and verification.
//!
//! Signatures are tagged `v1a` and computed over the same canonical message
//! as the symmetric scheme. Receivers only need the public key.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde_json::{Map, Value};
use std::fmt;

use crate::headers::HeaderSource;
use crate::secret::decode_prefixed;
use crate::signature::any_signature_matches;
use crate::signer::{canonical_message, versioned};
use crate::webhook::{checked_headers, parse_payload};
use crate::{Result, SigningError, TimestampInput, VerificationError, WebhookConfig, WebhookError};

/// Prefix carried by Ed25519 public keys.
pub const PUBLIC_KEY_PREFIX: &str = "whpk_";

/// Prefix carried by Ed25519 private keys (32-byte seeds).
pub const PRIVATE_KEY_PREFIX: &str = "whsk_";

/// Version tag of Ed25519 signatures.
pub const ASYMMETRIC_SIGNATURE_VERSION: &str = "v1a";

/// Signs and verifies webhooks with an Ed25519 key pair.
#[derive(Clone)]
pub struct WebhookAsymmetric {
    verifying_key: VerifyingKey,
    signing_key: Option<SigningKey>,
    config: WebhookConfig,
}

impl fmt::Debug for WebhookAsymmetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookAsymmetric")
            .field("public_key", &STANDARD.encode(self.verifying_key.as_bytes()))
            .field("can_sign", &self.signing_key.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl WebhookAsymmetric {
    /// Create from a public key, a private key, or both.
    ///
    /// Keys are standard base64, optionally prefixed with `whpk_` / `whsk_`.
    /// With only a private key the public key is derived from it.
    pub fn new(public_key: Option<&str>, private_key: Option<&str>) -> Result<Self> {
        let signing_key = private_key
            .map(|key| decode_key(key, PRIVATE_KEY_PREFIX).map(|seed| SigningKey::from_bytes(&seed)))
            .transpose()?;

        let verifying_key = match (public_key, &signing_key) {
            (Some(key), _) => {
                let bytes = decode_key(key, PUBLIC_KEY_PREFIX)?;
                VerifyingKey::from_bytes(&bytes)
                    .map_err(|e| WebhookError::InvalidSecret(format!("invalid public key: {e}")))?
            }
            (None, Some(signing_key)) => signing_key.verifying_key(),
            (None, None) => return Err(WebhookError::InvalidSecret("missing keys".into())),
        };

        Ok(Self {
            verifying_key,
            signing_key,
            config: WebhookConfig::default(),
        })
    }

    /// Create from a private key only.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        Self::new(None, Some(private_key))
    }

    /// Create from a public key only. Such a webhook can verify but not sign.
    pub fn from_public_key(public_key: &str) -> Result<Self> {
        Self::new(Some(public_key), None)
    }

    /// Use custom settings.
    pub fn with_config(mut self, config: WebhookConfig) -> Self {
        self.config = config;
        self
    }

    /// The public key, `whpk_`-prefixed.
    pub fn public_key(&self) -> String {
        format!("{PUBLIC_KEY_PREFIX}{}", STANDARD.encode(self.verifying_key.as_bytes()))
    }

    /// Sign a payload, returning `v1a,<base64>`.
    pub fn sign(&self, msg_id: &str, timestamp: impl TimestampInput, payload: &[u8]) -> Result<String> {
        let signing_key = self.signing_key.as_ref().ok_or(SigningError::MissingSigningKey)?;
        let timestamp = timestamp.to_timestamp()?;
        tracing::trace!(msg_id, timestamp = timestamp.as_secs(), "signing webhook (ed25519)");

        let message = canonical_message(msg_id, timestamp, payload);
        let signature = signing_key.sign(&message);
        Ok(versioned(
            ASYMMETRIC_SIGNATURE_VERSION,
            &STANDARD.encode(signature.to_bytes()),
        ))
    }

    /// Verify headers and payload, returning the payload as a JSON object.
    pub fn verify<H>(&self, payload: &[u8], headers: &H) -> Result<Map<String, Value>>
    where
        H: HeaderSource + ?Sized,
    {
        self.verify_signature_inner(payload, headers, true)?;
        parse_payload(payload)
    }

    /// Like [`verify`](Self::verify) but without the tolerance window.
    pub fn verify_ignoring_timestamp<H>(&self, payload: &[u8], headers: &H) -> Result<Map<String, Value>>
    where
        H: HeaderSource + ?Sized,
    {
        self.verify_signature_inner(payload, headers, false)?;
        parse_payload(payload)
    }

    fn verify_signature_inner<H>(&self, payload: &[u8], headers: &H, enforce_tolerance: bool) -> Result<()>
    where
        H: HeaderSource + ?Sized,
    {
        let (fields, timestamp) = checked_headers(headers, &self.config, enforce_tolerance)?;
        let message = canonical_message(fields.id, timestamp, payload);

        let matched = any_signature_matches(fields.signature, ASYMMETRIC_SIGNATURE_VERSION, |candidate| {
            STANDARD
                .decode(candidate)
                .ok()
                .and_then(|bytes| Signature::from_slice(&bytes).ok())
                .is_some_and(|signature| self.verifying_key.verify(&message, &signature).is_ok())
        });

        if matched {
            tracing::debug!(msg_id = fields.id, "webhook signature matched (ed25519)");
            Ok(())
        } else {
            tracing::debug!(
                msg_id = fields.id,
                reason = %VerificationError::NoMatchingSignature,
                "webhook verification failed"
            );
            Err(VerificationError::NoMatchingSignature.into())
        }
    }
}

fn decode_key(key: &str, prefix: &str) -> Result<[u8; 32]> {
    let bytes = decode_prefixed(key, prefix)?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| WebhookError::InvalidSecret(format!("key must be 32 bytes, got {}", bytes.len())))
}
