//! Table ordering and rank assignment.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::models::{TeamAggregate, TeamStats};
use crate::normalize::comparison_key;

/// League ordering between two teams' totals.
///
/// Points, then goal difference, then goals scored (all descending), then
/// the name's comparison key ascending. Names with equal keys fall back to
/// plain string order so the result never depends on input order.
pub fn compare_standing(
    a_key: &str,
    a_name: &str,
    a: &TeamStats,
    b_key: &str,
    b_name: &str,
    b: &TeamStats,
) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a_key.cmp(b_key))
        .then_with(|| a_name.cmp(b_name))
}

/// An entry after ordering, with its 1-based position.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub rank: u32,
    pub name: String,
    pub value: T,
}

/// Sort entries with [`compare_standing`] and number them from 1.
///
/// `stats` selects which totals drive the ordering.
pub fn rank_by<T, F>(entries: HashMap<String, T>, stats: F) -> Vec<Ranked<T>>
where
    F: Fn(&T) -> &TeamStats,
{
    let mut keyed: Vec<(String, String, T)> = entries
        .into_iter()
        .map(|(name, value)| (comparison_key(&name), name, value))
        .collect();

    keyed.sort_by(|(a_key, a_name, a), (b_key, b_name, b)| {
        compare_standing(a_key, a_name, stats(a), b_key, b_name, stats(b))
    });

    keyed
        .into_iter()
        .zip(1u32..)
        .map(|((_, name, value), rank)| Ranked { rank, name, value })
        .collect()
}

/// Column headers of the overall table.
pub const OVERALL_COLUMNS: [&str; 11] = [
    "Rk", "Squad", "MP", "W", "D", "L", "GF", "GA", "GD", "Pts", "Pts/MP",
];

/// Column headers of the home/away split table.
pub const HOME_AWAY_COLUMNS: [&str; 18] = [
    "Rk", "Squad", "Home MP", "Home W", "Home D", "Home L", "Home GF", "Home GA", "Home GD",
    "Home Pts", "Away MP", "Away W", "Away D", "Away L", "Away GF", "Away GA", "Away GD",
    "Away Pts",
];

fn split_cells(stats: &TeamStats) -> [String; 8] {
    [
        stats.played.to_string(),
        stats.wins.to_string(),
        stats.draws.to_string(),
        stats.losses.to_string(),
        stats.goals_for.to_string(),
        stats.goals_against.to_string(),
        stats.goal_difference().to_string(),
        stats.points.to_string(),
    ]
}

/// One team's line in the standings, ordered by overall totals.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingRow {
    pub rank: u32,
    pub team: String,
    pub stats: TeamAggregate,
}

impl StandingRow {
    /// Cell values matching [`OVERALL_COLUMNS`].
    pub fn overall_cells(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(OVERALL_COLUMNS.len());
        cells.push(self.rank.to_string());
        cells.push(self.team.clone());
        cells.extend(split_cells(&self.stats.overall));
        cells.push(self.stats.overall.points_per_match_display());
        cells
    }

    /// Cell values matching [`HOME_AWAY_COLUMNS`].
    pub fn home_away_cells(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(HOME_AWAY_COLUMNS.len());
        cells.push(self.rank.to_string());
        cells.push(self.team.clone());
        cells.extend(split_cells(&self.stats.home));
        cells.extend(split_cells(&self.stats.away));
        cells
    }
}

/// Rank teams by their overall totals.
pub fn rank_standings(by_team: HashMap<String, TeamAggregate>) -> Vec<StandingRow> {
    rank_by(by_team, |agg| &agg.overall)
        .into_iter()
        .map(|r| StandingRow {
            rank: r.rank,
            team: r.name,
            stats: r.value,
        })
        .collect()
}

/// One opponent's line in a head-to-head table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadToHeadRow {
    pub opponent: String,
    #[serde(rename = "mp")]
    pub played: u32,
    #[serde(rename = "w")]
    pub won: u32,
    #[serde(rename = "d")]
    pub drawn: u32,
    #[serde(rename = "l")]
    pub lost: u32,
    #[serde(rename = "gf")]
    pub goals_for: u32,
    #[serde(rename = "ga")]
    pub goals_against: u32,
    #[serde(rename = "gd")]
    pub goal_diff: i64,
    #[serde(rename = "pts")]
    pub points: u32,
}

impl HeadToHeadRow {
    fn new(opponent: String, stats: &TeamStats) -> Self {
        Self {
            opponent,
            played: stats.played,
            won: stats.wins,
            drawn: stats.draws,
            lost: stats.losses,
            goals_for: stats.goals_for,
            goals_against: stats.goals_against,
            goal_diff: stats.goal_difference(),
            points: stats.points,
        }
    }
}

/// Order opponents with the same rules as the league table.
pub fn rank_head_to_head(by_opponent: HashMap<String, TeamStats>) -> Vec<HeadToHeadRow> {
    rank_by(by_opponent, |stats| stats)
        .into_iter()
        .map(|r| HeadToHeadRow::new(r.name, &r.value))
        .collect()
}
