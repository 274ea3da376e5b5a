//! Error taxonomy for sequence construction and analysis
//!
//! Every variant is raised synchronously by a constructor or an analysis
//! entry point. Once a generator exists, stepping it cannot fail.

use thiserror::Error;

/// Errors that can occur while configuring a sequence generator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Invalid feedback polynomial: {reason}")]
    InvalidPolynomial { reason: String },

    #[error("Output tap {tap} does not exist in a {length}-stage register")]
    InvalidOutputTap { tap: usize, length: usize },

    #[error("Register stage {index} holds {value}, expected 0 or 1")]
    InvalidRegister { index: usize, value: u8 },

    #[error("Gold constituents differ in register length: {first} vs {second}")]
    MismatchedRegisters { first: usize, second: usize },

    #[error("Root index {u} must lie in the range 0..={n_zc}")]
    InvalidRootIndex { u: i64, n_zc: usize },

    #[error("Root index {u} and length {n_zc} are not coprime (gcd = {gcd})")]
    NotCoprime { n_zc: usize, u: i64, gcd: u64 },

    #[error("Sequence lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Cannot correlate empty sequences")]
    EmptySequence,
}

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, SequenceError>;
