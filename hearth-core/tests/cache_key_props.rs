use hearth_core::CacheKey;
use proptest::prelude::*;

proptest! {
    #[test]
    fn key_is_order_independent(
        params in proptest::collection::btree_map("[a-z]{1,8}", proptest::option::of("[a-z0-9]{0,6}"), 0..8),
        seed in any::<u64>(),
    ) {
        let forward: Vec<_> = params.iter().collect();
        let mut shuffled = forward.clone();
        // deterministic rotation stands in for a shuffle
        if !shuffled.is_empty() {
            let n = shuffled.len();
            shuffled.rotate_left((seed as usize) % n);
            shuffled.reverse();
        }

        let a = forward
            .iter()
            .fold(CacheKey::new("resources"), |k, (name, v)| k.param(name, v.as_deref()))
            .build();
        let b = shuffled
            .iter()
            .fold(CacheKey::new("resources"), |k, (name, v)| k.param(name, v.as_deref()))
            .build();
        prop_assert_eq!(&a, &b);

        if params.values().all(Option::is_none) {
            prop_assert_eq!(a, "resources");
        } else {
            prop_assert!(a.starts_with("resources?"));
        }
    }
}
