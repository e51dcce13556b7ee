//! # Protocol Properties
//!
//! Randomized checks of the end-to-end guarantees against one shared
//! 512-bit server key.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::OnceLock;

    use num_bigint::BigUint;
    use proptest::prelude::*;
    use psi_protocol::{to_elements, PsiClient, PsiClientApi, PsiServer, PsiServerApi};

    use crate::support::{seeded_rng, test_config};

    fn shared_server() -> &'static PsiServer {
        static SERVER: OnceLock<PsiServer> = OnceLock::new();
        SERVER.get_or_init(|| {
            PsiServer::generate(&test_config(), &mut seeded_rng(99)).expect("test key generation")
        })
    }

    fn intersect(server_set: &[u64], client_set: &[u64], seed: u64) -> Vec<BigUint> {
        let server = shared_server();
        let client = PsiClient::from_public_key_message(&server.public_key_message()).unwrap();
        let client_elements = to_elements(client_set.iter().copied());

        let filter = server
            .setup(&to_elements(server_set.iter().copied()), 0.001)
            .unwrap()
            .to_filter()
            .unwrap();
        let factors = client
            .random_factors(client_elements.len(), &mut seeded_rng(seed))
            .unwrap();
        let blinded = client.blind_batch(&client_elements, &factors).unwrap();
        let signed = server.sign_batch(&blinded).unwrap();

        client
            .intersect(&client_elements, &signed, &factors, &filter)
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_result_contains_true_intersection(
            server_set in prop::collection::btree_set(0u64..400, 0..60),
            client_set in prop::collection::vec(0u64..400, 0..40),
            seed in any::<u64>(),
        ) {
            let server_list: Vec<u64> = server_set.iter().copied().collect();
            let result: BTreeSet<BigUint> =
                intersect(&server_list, &client_set, seed).into_iter().collect();

            for y in client_set.iter().filter(|y| server_set.contains(*y)) {
                prop_assert!(result.contains(&BigUint::from(*y)), "missing {}", y);
            }
        }

        #[test]
        fn prop_result_is_ordered_subsequence_of_client_set(
            server_set in prop::collection::btree_set(0u64..100, 1..50),
            client_set in prop::collection::vec(0u64..100, 0..30),
            seed in any::<u64>(),
        ) {
            let server_list: Vec<u64> = server_set.into_iter().collect();
            let result = intersect(&server_list, &client_set, seed);
            let client_elements = to_elements(client_set);

            // Every result element appears in client order
            let mut remaining = client_elements.iter();
            for r in &result {
                prop_assert!(remaining.any(|y| y == r));
            }
        }
    }
}
