//! # League Table
//!
//! Ligue 1 standings and head-to-head records computed from a CSV of match
//! results, served over a small HTTP API.
//!
//! ## Architecture
//!
//! - **models**: Match records and statistics accumulators
//! - **normalize**: Canonical team names and comparison keys
//! - **parse**: CSV parsing and row filtering
//! - **source**: Data file discovery and loading
//! - **cache**: TTL-bound snapshot of parsed matches
//! - **calculate**: Aggregation and ranking
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod cache;
pub mod calculate;
pub mod config;
pub mod models;
pub mod normalize;
pub mod parse;
pub mod source;

pub use models::*;
