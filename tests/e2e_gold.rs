//! E2E tests for Gold sequence combination
//!
//! Checks the combiner against independently stepped registers and the
//! bounded cross-correlation of a preferred-pair family.

use seqgen::analysis::correlation::binary_cross_correlation;
use seqgen::{GoldBuilder, Lfsr, SequenceError, TapConvention};

const INIT_5: [u8; 5] = [0, 0, 0, 0, 1];
const POLY_A: [usize; 3] = [5, 2, 0];
const POLY_B: [usize; 5] = [5, 4, 3, 2, 0];

fn mls(polynomial: &[usize]) -> Vec<u8> {
    Lfsr::builder(polynomial, &INIT_5)
        .convention(TapConvention::Matlab)
        .build()
        .unwrap()
        .step()
}

fn gold(shift: i64) -> Vec<u8> {
    GoldBuilder::new(&POLY_A, &INIT_5, &POLY_B, &INIT_5)
        .convention(TapConvention::Matlab)
        .cyclic_shift(shift)
        .build()
        .unwrap()
        .step()
}

/// Test that shift 0 is the plain XOR of the two m-sequences
#[test]
fn test_zero_shift_is_xor() {
    let u = mls(&POLY_A);
    let v = mls(&POLY_B);
    let g = gold(0);

    for i in 0..31 {
        assert_eq!(g[i], u[i] ^ v[i], "bit {}", i);
    }
}

/// Test that shift k reads the second sequence k positions ahead
#[test]
fn test_rotation() {
    let u = mls(&POLY_A);
    let v = mls(&POLY_B);

    for k in [1usize, 5, 17, 30] {
        let g = gold(k as i64);
        for i in 0..31 {
            assert_eq!(g[i], u[i] ^ v[(i + k) % 31], "shift {} bit {}", k, i);
        }
    }
}

/// Test that all family members are binary and distinct
#[test]
fn test_family_members_distinct() {
    let members: Vec<Vec<u8>> = (0..31).map(gold).collect();
    for member in &members {
        assert!(member.iter().all(|&b| b <= 1));
    }
    for a in 0..members.len() {
        for b in a + 1..members.len() {
            assert_ne!(members[a], members[b], "shifts {} and {} collide", a, b);
        }
    }
}

/// Test the three-valued cross-correlation {-9, -1, 7} of the n = 5 family
#[test]
fn test_bounded_cross_correlation() {
    let a = gold(0);
    let b = gold(7);
    let r = binary_cross_correlation(&a, &b).unwrap();

    for &value in &r {
        let nearest = value.round();
        assert!((value - nearest).abs() < 1e-6);
        assert!(
            [-9.0, -1.0, 7.0].contains(&nearest),
            "unexpected correlation value {}",
            value
        );
    }
}

/// Test that mismatched register lengths are rejected
#[test]
fn test_mismatched_lengths() {
    let err = GoldBuilder::new(&POLY_A, &INIT_5, &[4, 1, 0], &[0, 0, 0, 1])
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        SequenceError::MismatchedRegisters {
            first: 5,
            second: 4
        }
    );
}

/// Test the reset and cycle-flag carry-over of the combiner
#[test]
fn test_reset_carries_cycle_flag() {
    let mut gold = GoldBuilder::new(&POLY_A, &INIT_5, &POLY_B, &INIT_5)
        .convention(TapConvention::Matlab)
        .cyclic_shift(2)
        .debug(true)
        .build()
        .unwrap();

    let first = gold.step();
    assert!(gold.has_cycled());
    gold.reset();
    assert!(gold.has_cycled());
    assert_eq!(gold.step(), first);
}
