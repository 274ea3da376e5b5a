//! Periodic correlation via FFT
//!
//! Computes circular cross-correlation in the frequency domain:
//! `r[k] = IFFT(FFT(received) * conj(FFT(reference)))[k] / N`, which equals
//! `sum_n received[(n + k) mod N] * conj(reference[n])`.

use crate::error::{Result, SequenceError};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Map bits to bipolar levels (0 -> -1.0, 1 -> +1.0)
pub fn to_bipolar(bits: &[u8]) -> Vec<f64> {
    bits.iter()
        .map(|&b| if b == 0 { -1.0 } else { 1.0 })
        .collect()
}

fn to_complex(values: &[f64]) -> Vec<Complex<f64>> {
    values.iter().map(|&x| Complex::new(x, 0.0)).collect()
}

/// Periodic correlator against a fixed reference sequence
///
/// The reference spectrum is computed once, so correlating many received
/// frames of the same length costs one forward and one inverse FFT each.
pub struct Correlator {
    /// Pre-computed conjugate FFT of the reference
    reference_fft: Vec<Complex<f64>>,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl Correlator {
    /// Create a correlator for the given reference sequence
    ///
    /// # Errors
    /// [`SequenceError::EmptySequence`] if the reference is empty.
    pub fn new(reference: &[Complex<f64>]) -> Result<Self> {
        if reference.is_empty() {
            return Err(SequenceError::EmptySequence);
        }

        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(reference.len());
        let inverse = planner.plan_fft_inverse(reference.len());

        let mut reference_fft = reference.to_vec();
        forward.process(&mut reference_fft);

        // Conjugate for correlation
        for c in &mut reference_fft {
            c.im = -c.im;
        }

        Ok(Self {
            reference_fft,
            forward,
            inverse,
        })
    }

    /// Create a correlator for a binary reference in bipolar form
    pub fn from_bits(reference: &[u8]) -> Result<Self> {
        Self::new(&to_complex(&to_bipolar(reference)))
    }

    /// Reference length `N`
    pub fn len(&self) -> usize {
        self.reference_fft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference_fft.is_empty()
    }

    /// Circular correlation of `received` against the reference, one value per lag
    ///
    /// # Errors
    /// [`SequenceError::LengthMismatch`] if `received` is not `N` samples long.
    pub fn correlate(&self, received: &[Complex<f64>]) -> Result<Vec<Complex<f64>>> {
        if received.len() != self.len() {
            return Err(SequenceError::LengthMismatch {
                left: self.len(),
                right: received.len(),
            });
        }

        let mut spectrum = received.to_vec();
        self.forward.process(&mut spectrum);

        for (r, ref_c) in spectrum.iter_mut().zip(&self.reference_fft) {
            *r *= *ref_c;
        }

        self.inverse.process(&mut spectrum);

        // rustfft does not normalise the inverse transform
        let scale = 1.0 / self.len() as f64;
        for c in &mut spectrum {
            *c *= scale;
        }
        Ok(spectrum)
    }

    /// Lag and magnitude of the strongest correlation
    ///
    /// For a received copy of the reference rotated right by `d` samples the
    /// peak lies at lag `d`.
    pub fn peak(&self, received: &[Complex<f64>]) -> Result<(usize, f64)> {
        let correlation = self.correlate(received)?;
        Ok(correlation
            .iter()
            .map(|c| c.norm())
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (lag, magnitude)| {
                if magnitude > best.1 {
                    (lag, magnitude)
                } else {
                    best
                }
            }))
    }
}

/// Periodic cross-correlation `r[k] = sum_n b[(n + k) mod N] * conj(a[n])`
///
/// # Errors
/// [`SequenceError::EmptySequence`] for empty input,
/// [`SequenceError::LengthMismatch`] if the lengths differ.
pub fn periodic_cross_correlation(
    a: &[Complex<f64>],
    b: &[Complex<f64>],
) -> Result<Vec<Complex<f64>>> {
    if a.len() != b.len() {
        return Err(SequenceError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Correlator::new(a)?.correlate(b)
}

pub fn periodic_autocorrelation(a: &[Complex<f64>]) -> Result<Vec<Complex<f64>>> {
    periodic_cross_correlation(a, a)
}

/// Periodic cross-correlation of two bit sequences in bipolar form
///
/// `r[k] = sum_n a[n] * b[(n + k) mod N]` with bits mapped to -1/+1, so
/// values are integers in `-N..=N`.
pub fn binary_cross_correlation(a: &[u8], b: &[u8]) -> Result<Vec<f64>> {
    let a = to_complex(&to_bipolar(a));
    let b = to_complex(&to_bipolar(b));
    Ok(periodic_cross_correlation(&a, &b)?
        .into_iter()
        .map(|c| c.re)
        .collect())
}

/// Largest magnitude outside lag 0
pub fn peak_sidelobe(values: &[f64]) -> f64 {
    values
        .iter()
        .skip(1)
        .map(|v| v.abs())
        .fold(0.0, f64::max)
}
