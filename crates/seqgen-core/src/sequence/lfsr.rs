//! Binary linear-feedback shift register (Fibonacci form)
//!
//! Generates maximal-length sequences (m-sequences) from a feedback
//! polynomial over GF(2). With a primitive polynomial of degree `L` and a
//! non-zero initial register, the output repeats every 2^L - 1 bits.
//!
//! Register stages are numbered from 1 (the stage nearest the feedback
//! input) to `L` (the last stage). Each clock shifts every stage one place
//! towards `L` and loads the XOR of the feedback taps into stage 1.

use super::FrameSource;
use crate::error::{Result, SequenceError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Interpretation of the tap degrees in a feedback polynomial
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapConvention {
    /// Polynomial degrees are used directly as feedback stages
    #[default]
    Standard,
    /// Degrees are mirrored (`t -> L - t`), the indexing used by MATLAB's
    /// `comm.PNSequence` and `comm.GoldSequence`
    Matlab,
}

impl TapConvention {
    /// Convert a descending polynomial (ending in the constant term) into
    /// the 1-based feedback stages, dropping the constant term
    fn feedback_taps(self, polynomial: &[usize]) -> Result<Vec<usize>> {
        let Some((&degree, rest)) = polynomial.split_first() else {
            return Err(invalid("polynomial has no terms"));
        };

        match self {
            Self::Standard => Ok(polynomial[..polynomial.len() - 1].to_vec()),
            Self::Matlab => rest
                .iter()
                .rev()
                .map(|&tap| {
                    degree.checked_sub(tap).ok_or_else(|| {
                        invalid(format!("tap degree {tap} exceeds leading degree {degree}"))
                    })
                })
                .collect(),
        }
    }
}

fn invalid(reason: impl Into<String>) -> SequenceError {
    SequenceError::InvalidPolynomial {
        reason: reason.into(),
    }
}

/// XOR of the register values at the given 1-based stages
fn xor_stages(register: &[u8], stages: &[usize]) -> u8 {
    stages.iter().fold(0, |acc, &stage| acc ^ register[stage - 1])
}

/// Builder for [`Lfsr`]
///
/// # Example
/// ```
/// use seqgen_core::{LfsrBuilder, TapConvention};
///
/// let mut lfsr = LfsrBuilder::new(&[4, 1, 0], &[0, 0, 0, 1])
///     .convention(TapConvention::Matlab)
///     .build()
///     .unwrap();
/// let frame = lfsr.step();
/// assert_eq!(frame.len(), 15);
/// assert!(lfsr.has_cycled());
/// ```
#[derive(Debug, Clone)]
pub struct LfsrBuilder {
    polynomial: Vec<usize>,
    initial: Vec<u8>,
    output_taps: Option<Vec<usize>>,
    samples_per_frame: Option<usize>,
    convention: TapConvention,
}

impl LfsrBuilder {
    /// Start a builder from a descending tap-degree list ending in 0 and the
    /// initial register contents (stage 1 first)
    pub fn new(polynomial: &[usize], initial: &[u8]) -> Self {
        Self {
            polynomial: polynomial.to_vec(),
            initial: initial.to_vec(),
            output_taps: None,
            samples_per_frame: None,
            convention: TapConvention::default(),
        }
    }

    /// Stages XORed together to form the output bit (default: the last stage)
    ///
    /// An empty list also selects the default.
    pub fn output_taps(mut self, taps: &[usize]) -> Self {
        self.output_taps = (!taps.is_empty()).then(|| taps.to_vec());
        self
    }

    /// Bits produced per [`Lfsr::step`] call (default: 2^L - 1)
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

    /// Validate the parameters and construct the register
    ///
    /// # Errors
    /// - [`SequenceError::InvalidPolynomial`] if the constant term is missing,
    ///   the leading degree differs from the register length, or a feedback
    ///   tap falls outside the register
    /// - [`SequenceError::InvalidOutputTap`] if an output tap is outside `1..=L`
    /// - [`SequenceError::InvalidRegister`] if the register holds a non-bit
    pub fn build(self) -> Result<Lfsr> {
        let length = self.initial.len();

        match (self.polynomial.first(), self.polynomial.last()) {
            (None, _) | (_, None) => return Err(invalid("polynomial has no terms")),
            (_, Some(&constant)) if constant != 0 => {
                return Err(invalid("the first and last taps must be connected"))
            }
            (Some(&degree), _) if degree != length => {
                return Err(invalid(format!(
                    "leading degree {degree} does not match register length {length}"
                )))
            }
            _ => {}
        }

        let output_taps = self.output_taps.unwrap_or_else(|| vec![length]);
        if let Some(&tap) = output_taps.iter().find(|&&t| t < 1 || t > length) {
            return Err(SequenceError::InvalidOutputTap { tap, length });
        }

        if let Some((index, &value)) = self.initial.iter().enumerate().find(|&(_, &b)| b > 1) {
            return Err(SequenceError::InvalidRegister { index, value });
        }

        let taps = self.convention.feedback_taps(&self.polynomial)?;
        if let Some(&tap) = taps.iter().find(|&&t| t < 1 || t > length) {
            return Err(invalid(format!(
                "feedback tap {tap} lies outside stages 1..={length}"
            )));
        }

        let samples_per_frame = match self.samples_per_frame {
            Some(samples) => samples,
            None => 1usize
                .checked_shl(length as u32)
                .filter(|_| length < usize::BITS as usize)
                .map(|period| period - 1)
                .ok_or_else(|| {
                    invalid(format!(
                        "a {length}-stage period does not fit a frame, set samples_per_frame"
                    ))
                })?,
        };

        debug!(
            length,
            ?taps,
            ?output_taps,
            samples_per_frame,
            convention = ?self.convention,
            "LFSR constructed"
        );

        Ok(Lfsr {
            register: self.initial.clone(),
            initial: self.initial,
            taps,
            output_taps,
            samples_per_frame,
            has_cycled: false,
        })
    }
}

/// Binary LFSR producing one output bit per clock
///
/// The register is exclusively owned and shifted in place; independent
/// instances can run on separate threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lfsr {
    /// Current stage values, stage 1 at index 0
    register: Vec<u8>,
    /// Snapshot taken at construction, used for reset and cycle detection
    initial: Vec<u8>,
    /// 1-based feedback stages
    taps: Vec<usize>,
    /// 1-based stages XORed into the output bit
    output_taps: Vec<usize>,
    samples_per_frame: usize,
    has_cycled: bool,
}

impl Lfsr {
    /// Construct a register with the standard tap convention, the last stage
    /// as output and a full-period frame
    pub fn new(polynomial: &[usize], initial: &[u8]) -> Result<Self> {
        LfsrBuilder::new(polynomial, initial).build()
    }

    /// Start a [`LfsrBuilder`]
    pub fn builder(polynomial: &[usize], initial: &[u8]) -> LfsrBuilder {
        LfsrBuilder::new(polynomial, initial)
    }

    /// Clock the register once and return the output bit
    ///
    /// The output is read before the shift. After the shift the register is
    /// compared with its initial value to detect a completed cycle.
    pub fn shift(&mut self) -> u8 {
        let out = xor_stages(&self.register, &self.output_taps);
        let feedback = xor_stages(&self.register, &self.taps);

        self.register.rotate_right(1);
        self.register[0] = feedback;

        if self.register == self.initial {
            self.has_cycled = true;
        }
        out
    }

    /// Produce `samples_per_frame` output bits, continuing from the current state
    pub fn step(&mut self) -> Vec<u8> {
        (0..self.samples_per_frame).map(|_| self.shift()).collect()
    }

    /// Restore the initial register value
    ///
    /// The cycle flag is left untouched: once a cycle was observed it stays
    /// observed for the lifetime of the instance.
    pub fn reset(&mut self) {
        self.register.copy_from_slice(&self.initial);
    }

    /// Whether the register has returned to its initial value after a shift
    pub fn has_cycled(&self) -> bool {
        self.has_cycled
    }

    /// Number of register stages (`L`)
    pub fn register_length(&self) -> usize {
        self.initial.len()
    }

    pub fn samples_per_frame(&self) -> usize {
        self.samples_per_frame
    }

    pub fn register(&self) -> &[u8] {
        &self.register
    }

    pub fn initial_register(&self) -> &[u8] {
        &self.initial
    }

    /// Feedback stages after applying the tap convention
    pub fn taps(&self) -> &[usize] {
        &self.taps
    }

    pub fn output_taps(&self) -> &[usize] {
        &self.output_taps
    }
}

impl FrameSource for Lfsr {
    fn step(&mut self) -> Vec<u8> {
        Lfsr::step(self)
    }

    fn reset(&mut self) {
        Lfsr::reset(self)
    }

    fn has_cycled(&self) -> bool {
        self.has_cycled
    }

    fn samples_per_frame(&self) -> usize {
        self.samples_per_frame
    }
}
