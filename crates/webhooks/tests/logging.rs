//! Log output must identify messages without leaking key material.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use standardwebhooks::{Timestamp, Webhook};
use tracing_subscriber::fmt::MakeWriter;

const SECRET: &str = "MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn verification_logs_reason_but_not_secrets() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(capture.clone())
        .finish();

    let wh = Webhook::new(SECRET).unwrap();
    let now = Timestamp::now();
    let signature = wh.sign("msg_logging", now, b"{}").unwrap();
    let encoded = signature.split_once(',').unwrap().1.to_string();

    tracing::subscriber::with_default(subscriber, || {
        let good = [
            ("webhook-id", "msg_logging".to_string()),
            ("webhook-timestamp", now.to_string()),
            ("webhook-signature", signature.clone()),
        ];
        assert!(wh.verify(b"{}", &good).is_ok());

        let bad = [
            ("webhook-id", "msg_logging".to_string()),
            ("webhook-timestamp", now.to_string()),
            ("webhook-signature", "v1,AAAA".to_string()),
        ];
        assert!(wh.verify(b"{}", &bad).is_err());
    });

    let logs = capture.contents();
    assert!(logs.contains("msg_logging"));
    assert!(logs.contains("webhook signature matched"));
    assert!(logs.contains("No matching signature found"));
    assert!(!logs.contains(SECRET));
    assert!(!logs.contains(&encoded));
}

#[test]
fn non_object_payload_is_logged_as_a_failure() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(capture.clone())
        .finish();

    let wh = Webhook::new(SECRET).unwrap();
    let now = Timestamp::now();
    let payload: &[u8] = b"[1,2,3]";
    let signature = wh.sign("msg_array", now, payload).unwrap();
    let headers = [
        ("webhook-id", "msg_array".to_string()),
        ("webhook-timestamp", now.to_string()),
        ("webhook-signature", signature),
    ];

    tracing::subscriber::with_default(subscriber, || {
        assert!(wh.verify(payload, &headers).is_err());
    });

    let logs = capture.contents();
    assert!(logs.contains("webhook signature matched"));
    assert!(logs.contains("Invalid payload"));
    assert!(!logs.contains("verified"));
}
