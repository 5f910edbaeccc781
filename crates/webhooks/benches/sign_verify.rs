//! Benchmarks for webhook signing and verification.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use standardwebhooks::{Timestamp, Webhook, WebhookAsymmetric};

const SECRET: &str = "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";
const PRIVATE_KEY: &str = "whsk_VEVTVFNJR05JTkdLRVlET05PVFVTRVRISVNGT1JBTlk=";

fn generate_payload(size: usize) -> Vec<u8> {
    // JSON object padded with a string field
    let filler = "x".repeat(size.saturating_sub(16));
    format!(r#"{{"data":"{filler}"}}"#).into_bytes()
}

fn bench_sign_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("webhooks");
    let wh = Webhook::new(SECRET).expect("valid secret");
    let asym = WebhookAsymmetric::from_private_key(PRIVATE_KEY).expect("valid key");

    for size in [256, 4096, 65536].iter() {
        let payload = generate_payload(*size);
        let now = Timestamp::now();
        let signature = wh.sign("msg_bench", now, &payload).expect("sign");
        let headers = [
            ("webhook-id", "msg_bench".to_string()),
            ("webhook-timestamp", now.to_string()),
            ("webhook-signature", signature),
        ];

        group.bench_with_input(BenchmarkId::new("sign_v1", size), &payload, |b, payload| {
            b.iter(|| wh.sign(black_box("msg_bench"), now, black_box(payload)))
        });

        group.bench_with_input(BenchmarkId::new("verify_v1", size), &payload, |b, payload| {
            b.iter(|| wh.verify_signature(black_box(payload), &headers))
        });

        group.bench_with_input(BenchmarkId::new("sign_v1a", size), &payload, |b, payload| {
            b.iter(|| asym.sign(black_box("msg_bench"), now, black_box(payload)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sign_verify);
criterion_main!(benches);
