//! Core data models for league standings.

mod match_record;
mod stats;

pub use match_record::*;
pub use stats::*;
