//! Property tests for the Bloom filter invariants

use bloom_filter::{compute_parameters, BloomFilter, FilterError};
use proptest::collection::{hash_set, vec};
use proptest::prelude::*;

fn filter_for(capacity: u64, seed: u64) -> BloomFilter {
    BloomFilter::with_seed(compute_parameters(0.01, capacity).unwrap(), seed).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn no_false_negatives(
        values in vec(vec(any::<u8>(), 1..64), 1..200),
        seed in any::<u64>(),
    ) {
        let mut filter = filter_for(200, seed);

        for value in &values {
            filter.add(value).unwrap();
        }

        for value in &values {
            prop_assert!(filter.contains(value).unwrap());
        }
    }

    #[test]
    fn second_add_leaves_bits_unchanged(
        values in vec(vec(any::<u8>(), 1..32), 1..50),
        seed in any::<u64>(),
    ) {
        let mut once = filter_for(100, seed);
        let mut twice = filter_for(100, seed);

        for value in &values {
            once.add(value).unwrap();
            twice.add(value).unwrap();
            let repeat = twice.add(value).unwrap();
            prop_assert!(repeat.already_present);
        }

        prop_assert_eq!(once.as_bytes(), twice.as_bytes());
    }

    #[test]
    fn bits_are_never_cleared(
        values in vec(vec(any::<u8>(), 0..16), 1..100),
        seed in any::<u64>(),
    ) {
        let mut filter = filter_for(50, seed);
        let mut previous = filter.as_bytes().to_vec();

        for value in &values {
            // Mix lookups and adds, including rejected empty values
            let _ = filter.contains(value);
            let _ = filter.add(value);

            for (old, new) in previous.iter().zip(filter.as_bytes()) {
                prop_assert_eq!(old & !new, 0, "a set bit was cleared");
            }
            previous = filter.as_bytes().to_vec();
        }
    }

    #[test]
    fn empty_value_never_mutates(
        values in hash_set("[a-z0-9]{1,12}", 0..30),
        seed in any::<u64>(),
    ) {
        let mut filter = filter_for(30, seed);
        for value in &values {
            filter.add(value.as_bytes()).unwrap();
        }
        let before = filter.as_bytes().to_vec();

        prop_assert_eq!(filter.add(b""), Err(FilterError::EmptyValue));
        prop_assert_eq!(filter.contains(b""), Err(FilterError::EmptyValue));
        prop_assert_eq!(filter.as_bytes(), before.as_slice());
    }

    #[test]
    fn sizing_is_deterministic(
        error_rate in 0.0001f64..0.5,
        capacity in 1u64..1_000_000,
    ) {
        let a = BloomFilter::with_rate(error_rate, capacity).unwrap();
        let b = BloomFilter::with_rate(error_rate, capacity).unwrap();

        prop_assert_eq!(a.info(), b.info());
        prop_assert!(a.info().hash_count >= 1);
        prop_assert!(a.info().buffer_bytes as u64 * 8 >= a.info().total_bits);
    }
}

#[test]
fn invalid_parameters_are_rejected() {
    for (error_rate, capacity) in [(0.0, 100), (1.0, 100), (-0.5, 100), (0.01, 0)] {
        let result = BloomFilter::with_rate(error_rate, capacity);
        assert!(
            matches!(result, Err(FilterError::InvalidParameter(_))),
            "({}, {}) should be rejected",
            error_rate,
            capacity
        );
    }
}
