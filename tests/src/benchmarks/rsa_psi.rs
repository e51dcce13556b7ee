//! # RSA-PSI Benchmarks
//!
//! - Signing, CRT against plain exponentiation
//! - Client blinding for a batch
//! - A full orchestrated run at 1024-bit keys

use std::time::Duration;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use num_bigint::BigUint;
use psi_protocol::{to_elements, ProtocolOrchestrator, PsiConfigBuilder};
use psi_rsa::{keygen, RsaClient, RsaPrivateKey, RsaServer, DEFAULT_PUBLIC_EXPONENT};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn server(bits: usize, seed: u64) -> RsaServer {
    let mut rng = StdRng::seed_from_u64(seed);
    match RsaServer::generate(bits, DEFAULT_PUBLIC_EXPONENT, &mut rng) {
        Ok(server) => server,
        Err(err) => panic!("benchmark key generation: {err}"),
    }
}

pub fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("rsa-sign");
    group.measurement_time(Duration::from_secs(10));

    for bits in [1024usize, 2048] {
        let crt = server(bits, 1);
        let (_, private_key) = crt.keys();
        let plain = match RsaPrivateKey::new(
            private_key.n().clone(),
            private_key.e().clone(),
            private_key.d().clone(),
        ) {
            Ok(key) => RsaServer::from_private_key(key),
            Err(err) => panic!("benchmark key import: {err}"),
        };
        let x = BigUint::from(123_456_789u64);

        group.bench_with_input(BenchmarkId::new("crt", bits), &x, |b, x| {
            b.iter(|| black_box(crt.sign(x)))
        });
        group.bench_with_input(BenchmarkId::new("plain", bits), &x, |b, x| {
            b.iter(|| black_box(plain.sign(x)))
        });
    }

    group.finish();
}

pub fn bench_blind(c: &mut Criterion) {
    let mut group = c.benchmark_group("rsa-blind");
    let server = server(2048, 2);
    let client = RsaClient::new(server.public_key().clone());
    let set = to_elements(0u64..1_000);
    let mut rng = StdRng::seed_from_u64(3);
    let factors = match client.random_factors(set.len(), &mut rng) {
        Ok(factors) => factors,
        Err(err) => panic!("benchmark factors: {err}"),
    };

    group.throughput(Throughput::Elements(set.len() as u64));
    group.bench_function("blind_set_1000", |b| {
        b.iter(|| black_box(client.blind_set(&set, &factors)))
    });
    group.bench_function("random_factors_1000", |b| {
        b.iter(|| black_box(client.random_factors(1_000, &mut rng)))
    });

    group.finish();
}

pub fn bench_keygen(c: &mut Criterion) {
    let mut group = c.benchmark_group("rsa-keygen");
    group.sample_size(10);

    group.bench_function("keygen_1024", |b| {
        let mut rng = StdRng::seed_from_u64(4);
        b.iter(|| black_box(keygen(1024, DEFAULT_PUBLIC_EXPONENT, &mut rng)))
    });

    group.finish();
}

pub fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("psi-run");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20));

    let config = match PsiConfigBuilder::new().key_size_bits(1024).build() {
        Ok(config) => config,
        Err(err) => panic!("benchmark config: {err}"),
    };

    group.bench_function("run_1024_vs_205", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(5);
            let mut run = match ProtocolOrchestrator::generate(
                config.clone(),
                to_elements(0u64..1024),
                to_elements((0u64..=1020).step_by(5)),
                &mut rng,
            ) {
                Ok(run) => run,
                Err(err) => panic!("benchmark run: {err}"),
            };
            black_box(run.run(&mut rng))
        })
    });

    group.finish();
}
