use std::collections::HashSet;

use musicbingo::bingo::{SeededRng, seeded_random};

#[test]
fn test_seeded_random_is_pure() {
    for index in 0..50 {
        assert_eq!(seeded_random("abc", index), seeded_random("abc", index));
    }

    // order of evaluation does not matter
    let rng = SeededRng::new("abc");
    let forward: Vec<f64> = (0..20).map(|i| rng.value(i)).collect();
    let backward: Vec<f64> = (0..20).rev().map(|i| rng.value(i)).collect();
    assert_eq!(forward, backward.into_iter().rev().collect::<Vec<_>>());
}

#[test]
fn test_seeded_random_range() {
    for seed in ["", "abc", "a much longer seed with spaces", "🎵"] {
        for index in 0..1000 {
            let v = seeded_random(seed, index);
            assert!((0.0..1.0).contains(&v), "{} out of range", v);
        }
    }
}

#[test]
fn test_seeds_produce_different_sequences() {
    let a: Vec<f64> = (0..10).map(|i| seeded_random("abc", i)).collect();
    let b: Vec<f64> = (0..10).map(|i| seeded_random("abd", i)).collect();
    assert_ne!(a, b);
}

#[test]
fn test_values_are_spread() {
    let rng = SeededRng::new("spread");
    let buckets: HashSet<usize> = (0..500).map(|i| rng.index_below(i, 10)).collect();
    assert_eq!(buckets.len(), 10);
}

#[test]
fn test_index_below_bounds() {
    let rng = SeededRng::new("bounds");
    for i in 0..200 {
        assert!(rng.index_below(i, 7) < 7);
        assert_eq!(rng.index_below(i, 1), 0);
    }
    assert_eq!(rng.index_below(3, 0), 0);
}

#[test]
fn test_shuffle_is_a_permutation() {
    let mut items: Vec<usize> = (0..50).collect();
    SeededRng::new("perm").shuffle(&mut items);

    let mut sorted = items.clone();
    sorted.sort();
    assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    assert_ne!(items, (0..50).collect::<Vec<_>>());
}

#[test]
fn test_shuffle_is_deterministic() {
    let mut a: Vec<usize> = (0..30).collect();
    let mut b: Vec<usize> = (0..30).collect();
    SeededRng::new("same").shuffle(&mut a);
    SeededRng::new("same").shuffle(&mut b);
    assert_eq!(a, b);
}

#[test]
fn test_shuffle_small_slices() {
    let mut empty: Vec<u8> = Vec::new();
    SeededRng::new("x").shuffle(&mut empty);
    assert!(empty.is_empty());

    let mut one = vec![42];
    SeededRng::new("x").shuffle(&mut one);
    assert_eq!(one, vec![42]);
}
