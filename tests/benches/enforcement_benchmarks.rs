//! # Sentinel Enforcement Benchmarks
//!
//! Per-decision cost of the hot paths:
//!
//! | Module | Operation | Target |
//! |--------|-----------|--------|
//! | sg-03 Abuse Mitigation | `is_allowed` | < 10µs |
//! | sg-04 Input Sanitizer | `validate`, `sanitize` | < 20µs |
//! | sg-05 Crypto Envelope | `sign`, `verify`, `encrypt` | < 20µs per KiB |
//! | sg-01 Access Control | `check_access` | < 5µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use security_runtime::{SecurityConfig, SecurityFacade};
use sg_02_mfa_authentication::{PasswordHasher, Sha256PasswordHasher};
use sg_05_crypto_envelope::Cipher;
use shared_bus::{EventSink, PublishError, SecurityEvent};
use shared_types::{ClientId, Identity, ManualTimeSource, Role};
use std::sync::Arc;
use std::time::Duration;

/// Drops every event so long runs do not accumulate memory.
struct DiscardSink;

impl EventSink for DiscardSink {
    fn publish(&self, _event: SecurityEvent) -> Result<usize, PublishError> {
        Ok(0)
    }
}

fn facade(config: SecurityConfig) -> (SecurityFacade, Arc<ManualTimeSource>) {
    let clock = Arc::new(ManualTimeSource::new(1_700_000_000_000));
    let facade = SecurityFacade::builder(config, Arc::new(DiscardSink))
        .time_source(clock.clone())
        .build()
        .expect("default configuration is valid");
    (facade, clock)
}

// ============================================================================
// SG-03: Abuse Mitigation
// ============================================================================

fn bench_limiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("sg-03-abuse-mitigation");
    group.measurement_time(Duration::from_secs(5));

    let mut config = SecurityConfig::default();
    config.abuse.max_requests = usize::MAX;
    config.abuse.min_history = usize::MAX;
    let (limiter_facade, clock) = facade(config);

    let mut rng = rand::thread_rng();
    for clients in [1, 100, 10_000] {
        let ids: Vec<ClientId> = (0..clients)
            .map(|_| ClientId::new(format!("10.{}.{}.{}", rng.gen::<u8>(), rng.gen::<u8>(), rng.gen::<u8>())))
            .collect();

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("is_allowed", clients), &ids, |b, ids| {
            let mut next = 0usize;
            b.iter(|| {
                clock.advance(1);
                let client = &ids[next % ids.len()];
                next = next.wrapping_add(1);
                black_box(limiter_facade.is_allowed(client))
            })
        });
    }

    let mut config = SecurityConfig::default();
    config.abuse.min_history = usize::MAX;
    let (blocked, _) = facade(config);
    let attacker = ClientId::new("203.0.113.66");
    for _ in 0..101 {
        blocked.is_allowed(&attacker);
    }
    group.bench_function("is_allowed_blacklisted", |b| {
        b.iter(|| black_box(blocked.is_allowed(&attacker)))
    });

    group.finish();
}

// ============================================================================
// SG-04: Input Sanitizer
// ============================================================================

fn bench_sanitizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("sg-04-input-sanitizer");
    let (facade, _) = facade(SecurityConfig::default());

    let inputs = [
        ("benign", "Maple Street 12, apartment 4"),
        ("quote", "admin' OR '1'='1"),
        ("union", "1 UNION ALL SELECT password FROM users"),
        ("long_benign", "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod tempor"),
    ];

    for (name, input) in inputs {
        group.bench_with_input(BenchmarkId::new("validate", name), input, |b, input| {
            b.iter(|| black_box(facade.validate(input)))
        });
        group.bench_with_input(BenchmarkId::new("sanitize", name), input, |b, input| {
            b.iter(|| black_box(facade.sanitize(input)))
        });
    }

    group.finish();
}

// ============================================================================
// SG-05: Crypto Envelope
// ============================================================================

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("sg-05-crypto-envelope");

    let (xor, _) = facade(SecurityConfig::default());
    let mut config = SecurityConfig::default();
    config.envelope.cipher = Cipher::XChaCha20Poly1305;
    let (aead, _) = facade(config);

    let key = xor.derive_key(b"benchmark-secret");
    for size in [64usize, 1024, 16 * 1024] {
        let mut message = vec![0u8; size];
        rand::thread_rng().fill(message.as_mut_slice());
        let signature = xor.sign(&message, &key);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("sign", size), &message, |b, m| {
            b.iter(|| black_box(xor.sign(m, &key)))
        });
        group.bench_with_input(BenchmarkId::new("verify", size), &message, |b, m| {
            b.iter(|| black_box(xor.verify(m, &signature, &key)))
        });
        group.bench_with_input(BenchmarkId::new("encrypt_xor", size), &message, |b, m| {
            b.iter(|| black_box(xor.encrypt(m, &key)))
        });
        group.bench_with_input(BenchmarkId::new("encrypt_xchacha", size), &message, |b, m| {
            b.iter(|| black_box(aead.encrypt(m, &key)))
        });
    }

    group.finish();
}

// ============================================================================
// SG-01: Access Control
// ============================================================================

fn bench_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("sg-01-access-control");
    let (facade, _) = facade(SecurityConfig::default());
    let hash = Sha256PasswordHasher::new("bench").hash("pw");
    let resident = Identity::new(1, "carol", hash, Role::Resident);

    group.bench_function("check_access_granted", |b| {
        b.iter(|| black_box(facade.check_access(&resident, "process_payment")))
    });
    group.bench_function("check_access_denied", |b| {
        b.iter(|| black_box(facade.check_access(&resident, "system_admin")))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_limiter,
    bench_sanitizer,
    bench_envelope,
    bench_access,
);

criterion_main!(benches);
