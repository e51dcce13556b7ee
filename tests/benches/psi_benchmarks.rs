//! # PSI Benchmarks
//!
//! | Area | Measured |
//! |------|----------|
//! | Bloom filter | batch insert, checks, record round trip |
//! | RSA | CRT vs plain signing, blinding, key generation |
//! | Protocol | full orchestrated run |

use criterion::{criterion_group, criterion_main};
use psi_tests::benchmarks::{bloom_filter, rsa_psi};

criterion_group!(
    benches,
    bloom_filter::bench_insert,
    bloom_filter::bench_check,
    bloom_filter::bench_record,
    rsa_psi::bench_sign,
    rsa_psi::bench_blind,
    rsa_psi::bench_keygen,
    rsa_psi::bench_full_run,
);

criterion_main!(benches);
