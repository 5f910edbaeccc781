//! Symmetric (HMAC-SHA256) webhook signing and verification.

use serde_json::{Map, Value};

use crate::headers::{HeaderSource, WebhookHeaders};
use crate::secret::{decode_secret, SecretKey};
use crate::signature::any_signature_matches;
use crate::signer::{self, SIGNATURE_VERSION};
use crate::timing::constant_time_compare;
use crate::{
    Result, Timestamp, TimestampGuard, TimestampInput, VerificationError, WebhookConfig,
    WebhookError,
};

/// Signs and verifies webhooks with one shared secret.
///
/// Build it once per secret and reuse it; it holds only the decoded key and
/// its config, so it can be shared freely across threads.
///
/// # Example
///
/// ```
/// use standardwebhooks::{Timestamp, Webhook};
///
/// let wh = Webhook::new("whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw")?;
/// let payload = br#"{"type":"invoice.paid"}"#;
/// let now = Timestamp::now();
/// let signature = wh.sign("msg_1", now, payload)?;
///
/// let headers = [
///     ("webhook-id", "msg_1".to_string()),
///     ("webhook-timestamp", now.to_string()),
///     ("webhook-signature", signature),
/// ];
/// let event = wh.verify(payload, &headers)?;
/// assert_eq!(event["type"], "invoice.paid");
/// # Ok::<(), standardwebhooks::WebhookError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Webhook {
    key: SecretKey,
    config: WebhookConfig,
}

impl Webhook {
    /// Create from a base64 secret, with or without the `whsec_` prefix.
    pub fn new(secret: &str) -> Result<Self> {
        Self::with_config(secret, WebhookConfig::default())
    }

    /// Create from a base64 secret with custom settings.
    pub fn with_config(secret: &str, config: WebhookConfig) -> Result<Self> {
        let key = decode_secret(secret)?;
        Ok(Self {
            key: SecretKey::new(key),
            config,
        })
    }

    /// Create from the base64 secret given as bytes instead of a string.
    pub fn from_base64_bytes(secret: &[u8]) -> Result<Self> {
        let secret = std::str::from_utf8(secret)
            .map_err(|_| WebhookError::InvalidSecret("secret is not valid UTF-8".into()))?;
        Self::new(secret)
    }

    /// Create from an already-decoded key.
    pub fn from_raw_key(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: SecretKey::new(key.into()),
            config: WebhookConfig::default(),
        }
    }

    /// Mutable access to the settings.
    pub fn config_mut(&mut self) -> &mut WebhookConfig {
        &mut self.config
    }

    /// Current settings.
    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Sign a payload, returning `v1,<base64>`.
    ///
    /// The timestamp only has to parse; it is not compared with the clock.
    pub fn sign(&self, msg_id: &str, timestamp: impl TimestampInput, payload: &[u8]) -> Result<String> {
        let timestamp = timestamp.to_timestamp()?;
        tracing::trace!(msg_id, timestamp = timestamp.as_secs(), "signing webhook");
        Ok(signer::sign_v1(self.key.as_bytes(), msg_id, timestamp, payload))
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
    ///
    /// The timestamp must still parse. Only use this when replay protection
    /// is handled elsewhere.
    pub fn verify_ignoring_timestamp<H>(&self, payload: &[u8], headers: &H) -> Result<Map<String, Value>>
    where
        H: HeaderSource + ?Sized,
    {
        self.verify_signature_inner(payload, headers, false)?;
        parse_payload(payload)
    }

    /// Verify headers and payload without interpreting the payload.
    pub fn verify_signature<H>(&self, payload: &[u8], headers: &H) -> Result<()>
    where
        H: HeaderSource + ?Sized,
    {
        self.verify_signature_inner(payload, headers, true)
    }

    fn verify_signature_inner<H>(&self, payload: &[u8], headers: &H, enforce_tolerance: bool) -> Result<()>
    where
        H: HeaderSource + ?Sized,
    {
        let (fields, timestamp) = checked_headers(headers, &self.config, enforce_tolerance)?;

        let expected = signer::expected_signature(self.key.as_bytes(), fields.id, timestamp, payload);
        let matched = any_signature_matches(fields.signature, SIGNATURE_VERSION, |candidate| {
            constant_time_compare(candidate.as_bytes(), expected.as_bytes())
        });

        if matched {
            tracing::debug!(msg_id = fields.id, "webhook signature matched");
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

/// Pull the signed fields out of `headers` and validate the timestamp.
///
/// Runs before any signature work, so malformed or stale messages never
/// touch key material.
pub(crate) fn checked_headers<'a, H>(
    headers: &'a H,
    config: &WebhookConfig,
    enforce_tolerance: bool,
) -> std::result::Result<(WebhookHeaders<'a>, Timestamp), VerificationError>
where
    H: HeaderSource + ?Sized,
{
    let fields = WebhookHeaders::extract(headers, config.accept_alias_headers).inspect_err(|err| {
        tracing::debug!(reason = %err, "webhook verification failed");
    })?;

    let guard = TimestampGuard::new(config.tolerance());
    let checked = if enforce_tolerance {
        guard.validate(fields.timestamp)
    } else {
        TimestampGuard::parse(fields.timestamp)
    };

    let timestamp = checked.inspect_err(|err| {
        tracing::debug!(msg_id = fields.id, reason = %err, "webhook verification failed");
    })?;

    Ok((fields, timestamp))
}

/// Parse a verified payload as a JSON object.
pub(crate) fn parse_payload(payload: &[u8]) -> Result<Map<String, Value>> {
    match serde_json::from_slice::<Value>(payload) {
        Ok(Value::Object(map)) => Ok(map),
        _ => {
            tracing::debug!(reason = %VerificationError::InvalidPayload, "webhook verification failed");
            Err(VerificationError::InvalidPayload.into())
        }
    }
}
