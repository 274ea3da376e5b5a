//! Sequence generators
//!
//! This module contains the three sequence families:
//! - Binary LFSR m-sequences ([`lfsr`])
//! - Gold sequences combined from two LFSRs ([`gold`])
//! - Complex Zadoff-Chu sequences ([`zadoff_chu`])

pub mod gold;
pub mod lfsr;
pub mod zadoff_chu;

/// Frame-oriented binary sequence source
///
/// Implemented by the register-based generators. Each call to [`step`]
/// continues from the state left by the previous call, so consecutive
/// frames stream without an implicit reset.
///
/// [`step`]: FrameSource::step
pub trait FrameSource: Send {
    /// Produce the next frame of `samples_per_frame()` bits (each 0 or 1)
    fn step(&mut self) -> Vec<u8>;

    /// Restore the register state captured at construction
    fn reset(&mut self);

    /// Whether a full register cycle has been observed since construction
    fn has_cycled(&self) -> bool;

    /// Number of bits produced per frame
    fn samples_per_frame(&self) -> usize;
}
