//! Zadoff-Chu sequence generation
//!
//! Zadoff-Chu sequences have constant amplitude and ideal periodic
//! autocorrelation, which makes them the synchronization and reference
//! signal of choice in LTE and 5G NR (PSS, PRACH, SRS).
//!
//! For a length `N_zc`, root index `u` and cyclic shift `q`:
//!
//! ```text
//! x[n] = exp(-j * pi * u * n * (n + c_f + 2q) / N_zc),   c_f = N_zc mod 2
//! ```

use crate::error::{Result, SequenceError};
use rustfft::num_complex::Complex;
use std::f64::consts::PI;
use tracing::debug;

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Zadoff-Chu sequence parameters, validated at construction
///
/// Holds no mutable state, so a single instance can be shared freely
/// between threads.
///
/// # Example
/// ```
/// use seqgen_core::ZadoffChu;
///
/// let zc = ZadoffChu::with_shift(1353, 7, 1).unwrap();
/// let seq = zc.generate();
/// assert_eq!(seq.len(), 1353);
/// assert!(seq.iter().all(|x| (x.norm() - 1.0).abs() < 1e-9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZadoffChu {
    n_zc: usize,
    u: i64,
    q: i64,
    cyclic_factor: usize,
}

impl ZadoffChu {
    /// Sequence of length `n_zc` with root index `u` and no cyclic shift
    pub fn new(n_zc: usize, u: i64) -> Result<Self> {
        Self::with_shift(n_zc, u, 0)
    }

    /// Sequence of length `n_zc`, root index `u` and cyclic shift `q`
    ///
    /// # Errors
    /// - [`SequenceError::InvalidRootIndex`] if `u` lies outside `0..=n_zc`
    /// - [`SequenceError::NotCoprime`] if `gcd(n_zc, u) != 1`
    pub fn with_shift(n_zc: usize, u: i64, q: i64) -> Result<Self> {
        if u < 0 || u as u128 > n_zc as u128 {
            return Err(SequenceError::InvalidRootIndex { u, n_zc });
        }

        let divisor = gcd(n_zc as u64, u as u64);
        if divisor != 1 {
            return Err(SequenceError::NotCoprime {
                n_zc,
                u,
                gcd: divisor,
            });
        }

        let cyclic_factor = n_zc % 2;
        debug!(n_zc, u, q, cyclic_factor, "Zadoff-Chu generator constructed");

        Ok(Self {
            n_zc,
            u,
            q,
            cyclic_factor,
        })
    }

    /// Generate the full sequence of `n_zc` unit-magnitude samples
    ///
    /// The integer phase numerator is reduced modulo `2 * n_zc` before the
    /// conversion to floating point, so long sequences keep full precision
    /// and no intermediate product overflows.
    pub fn generate(&self) -> Vec<Complex<f64>> {
        let n_zc = self.n_zc as i128;
        let period = 2 * n_zc;
        let u = self.u as i128;
        let offset = self.cyclic_factor as i128 + 2 * self.q as i128;

        (0..n_zc)
            .map(|n| {
                let numerator = ((u * n).rem_euclid(period) * (n + offset).rem_euclid(period))
                    .rem_euclid(period);
                let phase = -PI * numerator as f64 / self.n_zc as f64;
                Complex::from_polar(1.0, phase)
            })
            .collect()
    }

    pub fn sequence_length(&self) -> usize {
        self.n_zc
    }

    pub fn root_index(&self) -> i64 {
        self.u
    }

    pub fn q(&self) -> i64 {
        self.q
    }

    /// `n_zc mod 2`: selects the odd-length form of the phase term
    pub fn cyclic_factor(&self) -> usize {
        self.cyclic_factor
    }
}
