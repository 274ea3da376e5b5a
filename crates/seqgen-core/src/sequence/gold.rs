//! Gold sequence combiner
//!
//! XORs the frames of two LFSRs after cyclically rotating the second one.
//! With a preferred pair of primitive polynomials, each rotation selects one
//! member of a family whose periodic cross-correlation is bounded, which is
//! what CDMA receivers rely on to separate users.

use super::lfsr::{Lfsr, TapConvention};
use super::FrameSource;
use crate::error::{Result, SequenceError};
use tracing::debug;

/// Builder for [`GoldSequence`]
///
/// Both constituent registers share the tap convention and frame length.
///
/// # Example
/// ```
/// use seqgen_core::{GoldBuilder, TapConvention};
///
/// let init = [0, 0, 0, 0, 0, 0, 0, 1];
/// let mut gold = GoldBuilder::new(&[8, 6, 5, 3, 0], &init, &[8, 6, 5, 2, 0], &init)
///     .convention(TapConvention::Matlab)
///     .cyclic_shift(3)
///     .build()
///     .unwrap();
/// assert_eq!(gold.step().len(), 255);
/// ```
#[derive(Debug, Clone)]
pub struct GoldBuilder {
    first_polynomial: Vec<usize>,
    first_initial: Vec<u8>,
    second_polynomial: Vec<usize>,
    second_initial: Vec<u8>,
    samples_per_frame: Option<usize>,
    cyclic_shift: i64,
    convention: TapConvention,
    debug: bool,
}

impl GoldBuilder {
    pub fn new(
        first_polynomial: &[usize],
        first_initial: &[u8],
        second_polynomial: &[usize],
        second_initial: &[u8],
    ) -> Self {
        Self {
            first_polynomial: first_polynomial.to_vec(),
            first_initial: first_initial.to_vec(),
            second_polynomial: second_polynomial.to_vec(),
            second_initial: second_initial.to_vec(),
            samples_per_frame: None,
            cyclic_shift: 0,
            convention: TapConvention::default(),
            debug: false,
        }
    }

    /// Left rotation applied to the second register's frame (negative rotates right)
    pub fn cyclic_shift(mut self, shift: i64) -> Self {
        self.cyclic_shift = shift;
        self
    }

    pub fn samples_per_frame(mut self, samples: usize) -> Self {
        self.samples_per_frame = Some(samples);
        self
    }

    pub fn maybe_samples_per_frame(mut self, samples: Option<usize>) -> Self {
        self.samples_per_frame = samples;
        self
    }

    pub fn convention(mut self, convention: TapConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Log every frame's `u`, `v` and `g` at debug level
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Construct both registers and the combiner
    ///
    /// # Errors
    /// Any error raised by [`Lfsr`] construction, unchanged, or
    /// [`SequenceError::MismatchedRegisters`] if the two registers differ in
    /// length.
    pub fn build(self) -> Result<GoldSequence> {
        let mls1 = Lfsr::builder(&self.first_polynomial, &self.first_initial)
            .maybe_samples_per_frame(self.samples_per_frame)
            .convention(self.convention)
            .build()?;
        let mls2 = Lfsr::builder(&self.second_polynomial, &self.second_initial)
            .maybe_samples_per_frame(self.samples_per_frame)
            .convention(self.convention)
            .build()?;

        if mls1.register_length() != mls2.register_length() {
            return Err(SequenceError::MismatchedRegisters {
                first: mls1.register_length(),
                second: mls2.register_length(),
            });
        }

        debug!(
            length = mls1.register_length(),
            samples_per_frame = mls1.samples_per_frame(),
            cyclic_shift = self.cyclic_shift,
            "Gold combiner constructed"
        );

        Ok(GoldSequence {
            mls1,
            mls2,
            cyclic_shift: self.cyclic_shift,
            has_cycled: false,
            debug: self.debug,
        })
    }
}

/// Gold sequence generator built from two LFSRs advanced in lockstep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldSequence {
    mls1: Lfsr,
    mls2: Lfsr,
    cyclic_shift: i64,
    has_cycled: bool,
    debug: bool,
}

impl GoldSequence {
    /// Two standard-convention registers with full-period frames and no shift
    pub fn new(
        first_polynomial: &[usize],
        first_initial: &[u8],
        second_polynomial: &[usize],
        second_initial: &[u8],
    ) -> Result<Self> {
        GoldBuilder::new(
            first_polynomial,
            first_initial,
            second_polynomial,
            second_initial,
        )
        .build()
    }

    /// Produce the next Gold frame `g[i] = u[i] ^ v[(i + shift) mod N]`
    pub fn step(&mut self) -> Vec<u8> {
        let u = self.mls1.step();
        let mut v = self.mls2.step();

        if !v.is_empty() {
            let rotation = self.cyclic_shift.rem_euclid(v.len() as i64) as usize;
            v.rotate_left(rotation);
        }

        let g: Vec<u8> = u.iter().zip(&v).map(|(a, b)| a ^ b).collect();

        if self.debug {
            debug!(?u, ?v, ?g, "Gold frame");
        }

        if self.mls1.has_cycled() || self.mls2.has_cycled() {
            self.has_cycled = true;
        }
        g
    }

    /// Reset both registers; the cycle flag is kept
    pub fn reset(&mut self) {
        self.mls1.reset();
        self.mls2.reset();
    }

    /// Whether either register has completed a cycle, as of the last frame
    pub fn has_cycled(&self) -> bool {
        self.has_cycled
    }

    pub fn cyclic_shift(&self) -> i64 {
        self.cyclic_shift
    }

    /// Select another member of the family for subsequent frames
    pub fn set_cyclic_shift(&mut self, shift: i64) {
        self.cyclic_shift = shift;
    }

    pub fn samples_per_frame(&self) -> usize {
        self.mls1.samples_per_frame()
    }

    pub fn first(&self) -> &Lfsr {
        &self.mls1
    }

    pub fn second(&self) -> &Lfsr {
        &self.mls2
    }
}

impl FrameSource for GoldSequence {
    fn step(&mut self) -> Vec<u8> {
        GoldSequence::step(self)
    }

    fn reset(&mut self) {
        GoldSequence::reset(self)
    }

    fn has_cycled(&self) -> bool {
        self.has_cycled
    }

    fn samples_per_frame(&self) -> usize {
        GoldSequence::samples_per_frame(self)
    }
}
