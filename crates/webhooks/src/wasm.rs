//! WASM bindings for webhook signing and verification.
//!
//! These bindings allow the crate to be used from JavaScript/TypeScript
//! in both browser and Deno environments.

use std::collections::HashMap;
use wasm_bindgen::prelude::*;

use crate::Webhook;

/// Sign a webhook payload.
///
/// # Arguments
/// * `secret` - Base64 secret, optionally `whsec_`-prefixed
/// * `msg_id` - Message id
/// * `timestamp` - Unix seconds as a decimal string
/// * `payload` - Raw payload
///
/// # Returns
/// The `v1,<base64>` signature
#[wasm_bindgen]
pub fn sign_webhook(secret: &str, msg_id: &str, timestamp: &str, payload: &[u8]) -> Result<String, JsValue> {
    let webhook = Webhook::new(secret).map_err(to_js)?;
    webhook.sign(msg_id, timestamp, payload).map_err(to_js)
}

/// Verify a webhook payload.
///
/// # Arguments
/// * `secret` - Base64 secret, optionally `whsec_`-prefixed
/// * `payload` - Raw payload
/// * `headers_json` - JSON object of header name to value
///
/// # Returns
/// The verified payload re-serialized as a JSON string
#[wasm_bindgen]
pub fn verify_webhook(secret: &str, payload: &[u8], headers_json: &str) -> Result<String, JsValue> {
    let headers: HashMap<String, String> = serde_json::from_str(headers_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;

    let webhook = Webhook::new(secret).map_err(to_js)?;
    let event = webhook.verify(payload, &headers).map_err(to_js)?;

    serde_json::to_string(&event)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

fn to_js(err: crate::WebhookError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
