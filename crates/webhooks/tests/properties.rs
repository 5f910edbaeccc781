//! Property tests for sign/verify.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use proptest::prelude::*;
use std::collections::BTreeMap;

use standardwebhooks::{Timestamp, VerificationError, Webhook, WebhookError};

const EMPTY: &[u8] = b"{}";

fn key() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..64)
}

fn msg_id() -> impl Strategy<Value = String> {
    "msg_[A-Za-z0-9]{1,32}"
}

fn json_payload() -> impl Strategy<Value = BTreeMap<String, i64>> {
    prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..6)
}

fn headers(id: &str, ts: Timestamp, signature: &str) -> Vec<(String, String)> {
    vec![
        ("webhook-id".into(), id.into()),
        ("webhook-timestamp".into(), ts.to_string()),
        ("webhook-signature".into(), signature.into()),
    ]
}

proptest! {
    #[test]
    fn verify_accepts_what_sign_produces(key in key(), id in msg_id(), body in json_payload()) {
        let wh = Webhook::from_raw_key(key);
        let payload = serde_json::to_vec(&body).unwrap();
        let now = Timestamp::now();

        let signature = wh.sign(&id, now, &payload).unwrap();
        let event = wh.verify(&payload, &headers(&id, now, &signature)).unwrap();

        let expected = serde_json::to_value(&body).unwrap();
        prop_assert_eq!(serde_json::Value::Object(event), expected);
    }

    #[test]
    fn prefix_does_not_change_signature(key in key(), id in msg_id(), ts in 0u64..4_000_000_000) {
        let encoded = STANDARD.encode(&key);
        let bare = Webhook::new(&encoded).unwrap();
        let prefixed = Webhook::new(&format!("whsec_{encoded}")).unwrap();

        prop_assert_eq!(
            bare.sign(&id, ts, EMPTY).unwrap(),
            prefixed.sign(&id, ts, EMPTY).unwrap()
        );
    }

    #[test]
    fn integer_and_string_timestamps_agree(ts in any::<u64>()) {
        let wh = Webhook::from_raw_key(b"key".to_vec());
        prop_assert_eq!(
            wh.sign("msg", ts, EMPTY).unwrap(),
            wh.sign("msg", ts.to_string(), EMPTY).unwrap()
        );
    }

    #[test]
    fn fractional_timestamps_never_sign(whole in any::<u32>(), frac in 0u32..1000) {
        let wh = Webhook::from_raw_key(b"key".to_vec());
        let ts = format!("{whole}.{frac}");
        prop_assert!(wh.sign("msg", ts.as_str(), EMPTY).is_err());
    }

    #[test]
    fn another_key_never_verifies(
        a in prop::array::uniform32(any::<u8>()),
        b in prop::array::uniform32(any::<u8>()),
        id in msg_id()
    ) {
        prop_assume!(a != b);
        let signer = Webhook::from_raw_key(a.to_vec());
        let receiver = Webhook::from_raw_key(b.to_vec());
        let now = Timestamp::now();

        let signature = signer.sign(&id, now, EMPTY).unwrap();
        let err = receiver.verify(EMPTY, &headers(&id, now, &signature)).unwrap_err();
        prop_assert_eq!(err, WebhookError::Verification(VerificationError::NoMatchingSignature));
    }
}
