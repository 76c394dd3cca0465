//! Behaviour of both the secure path and the forced fallback path.

use std::sync::{Arc, Mutex};

use sfrand::{
    pool, DegradationEvent, DiagnosticSink, DisabledEntropy, Operation, PoolKind, Randomizer,
    Randomness,
};

const SAMPLES: usize = 100_000;

#[derive(Default)]
struct Recorder(Mutex<Vec<DegradationEvent>>);

impl Recorder {
    fn events(&self) -> Vec<DegradationEvent> {
        self.0.lock().unwrap().clone()
    }
}

impl DiagnosticSink for Recorder {
    fn degraded(&self, event: &DegradationEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

fn secure() -> Randomizer {
    Randomizer::new()
}

fn fallback(seed: u64) -> Randomizer {
    Randomizer::builder()
        .entropy(DisabledEntropy::new("test"))
        .seed(seed)
        .build()
}

fn both() -> Vec<(&'static str, Randomizer)> {
    vec![("secure", secure()), ("fallback", fallback(12345))]
}

#[test]
fn test_int_stays_in_range() {
    for (path, randomizer) in both() {
        for (min, max) in [(0, 1), (1, 6), (-50, 50), (-3, -1), (1_000_000, 1_000_010)] {
            for _ in 0..SAMPLES / 5 {
                let value = randomizer.int(min, max);
                assert!(
                    (min..=max).contains(&value),
                    "{} path: {} out of [{}, {}]",
                    path,
                    value,
                    min,
                    max
                );
            }
        }
    }
}

#[test]
fn test_int_hits_both_bounds() {
    for (path, randomizer) in both() {
        let mut seen = [false; 6];
        for _ in 0..10_000 {
            seen[(randomizer.int(1, 6) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "{} path missed a face: {:?}", path, seen);
    }
}

#[test]
fn test_int_is_uniform_over_two_values() {
    for (path, randomizer) in both() {
        let ones = (0..SAMPLES).filter(|_| randomizer.int(0, 1) == 1).count();
        let ratio = ones as f64 / SAMPLES as f64;
        // ~6 standard deviations at n = 100_000
        assert!((ratio - 0.5).abs() < 0.01, "{} path ratio {}", path, ratio);
    }
}

#[test]
fn test_int_is_uniform_over_small_range() {
    for (path, randomizer) in both() {
        let mut counts = [0usize; 10];
        for _ in 0..SAMPLES {
            counts[randomizer.int(0, 9) as usize] += 1;
        }
        for (value, count) in counts.iter().enumerate() {
            let ratio = *count as f64 / SAMPLES as f64;
            assert!(
                (ratio - 0.1).abs() < 0.01,
                "{} path: {} drawn with frequency {}",
                path,
                value,
                ratio
            );
        }
    }
}

#[test]
fn test_bytes_length() {
    for (path, randomizer) in both() {
        for n in [0, 1, 16, 1024] {
            assert_eq!(randomizer.bytes(n).len(), n, "{} path, n = {}", path, n);
        }
        assert!(randomizer.bytes(1024).iter().any(|b| *b != 0));
    }
}

#[test]
fn test_bool_is_not_constant() {
    for (path, randomizer) in both() {
        let draws: Vec<bool> = (0..200).map(|_| randomizer.bool()).collect();
        assert!(draws.contains(&true), "{} path never drew true", path);
        assert!(draws.contains(&false), "{} path never drew false", path);
    }
}

#[test]
fn test_rune_is_member_of_every_pool() {
    for (path, randomizer) in both() {
        for kind in PoolKind::ALL {
            let pool = kind.chars();
            for _ in 0..1_000 {
                let rune = randomizer.rune(&pool);
                assert!(pool.contains(&rune), "{} path: {:?} not in {}", path, rune, kind);
            }
        }
    }
}

#[test]
fn test_string_length_and_membership() {
    for (path, randomizer) in both() {
        for kind in PoolKind::ALL {
            let pool = kind.chars();
            for length in [0, 1, 8, 64] {
                let value = randomizer.string(length, &pool);
                assert_eq!(value.chars().count(), length, "{} path", path);
                assert!(value.chars().all(|c| pool.contains(&c)), "{} path", path);
            }
        }
        assert_eq!(randomizer.string(0, &pool::numeric_pool()), "");
    }
}

#[test]
fn test_string_samples_with_replacement() {
    let randomizer = secure();
    let value = randomizer.string(50, &['x', 'y']);
    assert_eq!(value.len(), 50);
    assert!(value.contains('x') && value.contains('y'));
}

#[test]
fn test_fallback_is_deterministic_for_a_seed() {
    let a = fallback(99);
    let b = fallback(99);

    let ints_a: Vec<i64> = (0..100).map(|_| a.int(-1000, 1000)).collect();
    let ints_b: Vec<i64> = (0..100).map(|_| b.int(-1000, 1000)).collect();
    assert_eq!(ints_a, ints_b);

    assert_eq!(a.bytes(64), b.bytes(64));
    assert_eq!(
        a.string(32, &pool::token_pool()),
        b.string(32, &pool::token_pool())
    );
}

#[test]
fn test_fallback_differs_across_seeds() {
    let a = fallback(1);
    let b = fallback(2);
    assert_ne!(a.bytes(32), b.bytes(32));
}

#[test]
fn test_secure_instances_do_not_repeat() {
    assert_ne!(secure().bytes(32), secure().bytes(32));
}

#[test]
fn test_degradation_events_name_the_operation() {
    let recorder = Arc::new(Recorder::default());
    let randomizer = Randomizer::builder()
        .entropy(DisabledEntropy::new("entropy pool closed"))
        .sink(recorder.clone())
        .build();

    randomizer.int(2, 8);
    randomizer.bytes(16);
    randomizer.rune(&pool::numeric_pool());

    let events = recorder.events();
    assert_eq!(
        events.iter().map(|e| e.operation).collect::<Vec<_>>(),
        vec![
            Operation::Seed,
            Operation::Int { min: 2, max: 8 },
            Operation::Bytes { len: 16 },
            Operation::Int { min: 0, max: 9 },
        ]
    );
    assert!(events
        .iter()
        .all(|e| e.cause == "entropy source disabled: entropy pool closed"));
}

#[test]
fn test_construction_without_entropy_still_produces_values() {
    let randomizer = Randomizer::builder()
        .entropy(DisabledEntropy::default())
        .build();
    assert!((10..=20).contains(&randomizer.int(10, 20)));
}

#[test]
fn test_shared_through_trait_object() {
    let randomizer: Box<dyn Randomness> = Box::new(secure());
    assert!((0..=1).contains(&randomizer.int(0, 1)));
    assert!(randomizer.try_int(5, 4).is_err());
}
