//! Sequence analysis
//!
//! FFT-based periodic correlation used to verify and exploit the
//! correlation properties of the generated sequences ([`correlation`]).

pub mod correlation;
