//! Seqgen - synchronization sequence generator
//!
//! This library re-exports the sequence engine, correlation analysis and
//! writer from `seqgen-core`, and adds the job configuration and runner
//! used by the `seqgen` binary.

pub mod config;
pub mod job;

pub use seqgen_core::analysis;
pub use seqgen_core::output;
pub use seqgen_core::sequence;

pub use seqgen_core::{
    BitMapping, Correlator, FrameSource, GoldBuilder, GoldSequence, Lfsr, LfsrBuilder, Result,
    SequenceError, TapConvention, ZadoffChu,
};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date stamped by build.rs
pub const BUILD_DATE: &str = env!("BUILD_DATE");
