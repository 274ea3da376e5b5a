//! Sequence output
//!
//! Line-oriented text serialisation of generated sequences ([`writer`]).

pub mod writer;
