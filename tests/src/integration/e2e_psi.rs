//! # End-to-End PSI Runs
//!
//! Full SETUP → ONLINE → INTERSECT runs through the orchestrator with
//! 512-bit keys.
//!
//! ## Test Categories
//!
//! 1. **Reference scenario**: multiples of five against `0..1024`
//! 2. **Partial overlap**: false positives stay near `fp_prob`
//! 3. **Degenerate sets**: empty client or server set
//! 4. **Imported keys**: plain and CRT private keys agree

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use num_bigint::BigUint;
    use psi_protocol::{to_elements, Phase, ProtocolOrchestrator, PsiServer};
    use psi_rsa::RsaPrivateKey;

    use crate::support::{init_tracing, seeded_rng, test_config};

    #[test]
    fn test_multiples_of_five_against_full_range() {
        init_tracing();
        let mut rng = seeded_rng(1);
        let client_set = to_elements((0u64..=1020).step_by(5));
        let server_set = to_elements(0u64..1024);

        let mut run =
            ProtocolOrchestrator::generate(test_config(), server_set, client_set.clone(), &mut rng)
                .unwrap();
        let result = run.run(&mut rng).unwrap();

        // Every client element is in the server set, so nothing may be missing
        assert_eq!(result.len(), 205);
        assert_eq!(result, client_set, "Result should keep client order");
        assert_eq!(run.phase(), Phase::Intersected);
    }

    #[test]
    fn test_partial_overlap_bounded_false_positives() {
        init_tracing();
        let mut rng = seeded_rng(2);
        let server_set = to_elements(0u64..1024);
        let client_set = to_elements(512u64..1536);

        let mut run =
            ProtocolOrchestrator::generate(test_config(), server_set, client_set, &mut rng)
                .unwrap();
        let result: HashSet<BigUint> = run.run(&mut rng).unwrap().into_iter().collect();

        for x in 512u64..1024 {
            assert!(
                result.contains(&BigUint::from(x)),
                "True member {x} missing from the result"
            );
        }

        // 512 non-members at fp_prob 0.001: about half a false positive expected
        let false_positives = (1024u64..1536)
            .filter(|x| result.contains(&BigUint::from(*x)))
            .count();
        assert!(
            false_positives <= 10,
            "Too many false positives: {false_positives}"
        );
    }

    #[test]
    fn test_empty_server_set_matches_nothing() {
        let mut rng = seeded_rng(3);
        let mut run = ProtocolOrchestrator::generate(
            test_config(),
            vec![],
            to_elements(0u64..50),
            &mut rng,
        )
        .unwrap();

        assert!(run.run(&mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_empty_client_set_completes() {
        let mut rng = seeded_rng(4);
        let mut run = ProtocolOrchestrator::generate(
            test_config(),
            to_elements(0u64..50),
            vec![],
            &mut rng,
        )
        .unwrap();

        assert!(run.run(&mut rng).unwrap().is_empty());
        assert_eq!(run.phase(), Phase::Intersected);
    }

    #[test]
    fn test_duplicates_in_client_set_are_kept() {
        let mut rng = seeded_rng(5);
        let client_set = to_elements([7u64, 7, 3000, 9, 7]);
        let mut run = ProtocolOrchestrator::generate(
            test_config(),
            to_elements(0u64..100),
            client_set,
            &mut rng,
        )
        .unwrap();

        let result = run.run(&mut rng).unwrap();
        let sevens = result.iter().filter(|x| **x == BigUint::from(7u8)).count();
        assert_eq!(sevens, 3);
        assert!(result.contains(&BigUint::from(9u8)));
    }

    #[test]
    fn test_imported_plain_key_matches_generated_key() {
        let mut rng = seeded_rng(6);
        let generated = PsiServer::generate(&test_config(), &mut rng).unwrap();
        let PsiServer::Rsa(ref rsa) = generated;
        let (_, private_key) = rsa.keys();

        // Same key without CRT parameters
        let plain = RsaPrivateKey::new(
            private_key.n().clone(),
            private_key.e().clone(),
            private_key.d().clone(),
        )
        .unwrap();
        assert!(plain.primes().is_none());
        let imported = PsiServer::from_rsa_key(plain);

        let server_set = to_elements(0u64..64);
        let client_set = to_elements((0u64..128).step_by(2));

        let mut crt_run = ProtocolOrchestrator::new(
            test_config(),
            generated,
            server_set.clone(),
            client_set.clone(),
        )
        .unwrap();
        let mut plain_run =
            ProtocolOrchestrator::new(test_config(), imported, server_set, client_set).unwrap();

        let crt_result = crt_run.run(&mut seeded_rng(60)).unwrap();
        let plain_result = plain_run.run(&mut seeded_rng(60)).unwrap();
        assert_eq!(crt_result, plain_result);
        assert!(crt_result.len() >= 32);
    }

    #[test]
    fn test_dedicated_worker_pool() {
        let mut rng = seeded_rng(7);
        let mut config = test_config();
        config.worker_threads = Some(3);

        let mut run = ProtocolOrchestrator::generate(
            config,
            to_elements(0u64..200),
            to_elements(100u64..150),
            &mut rng,
        )
        .unwrap();

        assert_eq!(run.run(&mut rng).unwrap(), to_elements(100u64..150));
    }
}
