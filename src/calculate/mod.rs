//! Statistics calculation engine.
//!
//! Computes league tables from parsed match records:
//! - Overall and home/away standings
//! - Head-to-head records of one team against each opponent
//!
//! Everything here is a pure function of the match list. Aggregation is
//! re-run per request over the cached matches.

pub mod aggregate;
pub mod rank;

pub use aggregate::{aggregate_standings, head_to_head};
pub use rank::{
    compare_standing, rank_by, rank_head_to_head, rank_standings, HeadToHeadRow, Ranked,
    StandingRow, HOME_AWAY_COLUMNS, OVERALL_COLUMNS,
};

use crate::models::MatchRecord;

/// Ranked league table for a set of matches.
pub fn standings(matches: &[MatchRecord]) -> Vec<StandingRow> {
    rank_standings(aggregate_standings(matches))
}

/// Ranked head-to-head rows for the team matching `team`.
///
/// An empty or unmatched query yields no rows.
pub fn head_to_head_table(matches: &[MatchRecord], team: &str) -> Vec<HeadToHeadRow> {
    rank_head_to_head(head_to_head(matches, team))
}
