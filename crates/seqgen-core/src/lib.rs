//! Seqgen Core - Sequence engine and correlation analysis
//!
//! This library generates the deterministic pseudorandom and pseudo-orthogonal
//! sequences used for synchronization in digital communication systems:
//! maximal-length sequences from binary LFSRs, Gold sequences built from two
//! m-sequences, and complex Zadoff-Chu sequences.

pub mod analysis;
pub mod error;
pub mod output;
pub mod sequence;

pub use analysis::correlation::Correlator;
pub use error::{Result, SequenceError};
pub use output::writer::BitMapping;
pub use sequence::{
    gold::{GoldBuilder, GoldSequence},
    lfsr::{Lfsr, LfsrBuilder, TapConvention},
    zadoff_chu::ZadoffChu,
    FrameSource,
};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
