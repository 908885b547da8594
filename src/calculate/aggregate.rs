//! Folding match records into per-team and per-opponent totals.

use std::collections::HashMap;

use crate::models::{MatchRecord, TeamAggregate, TeamStats, Venue};
use crate::normalize::{comparison_key, teams_match};

/// Per-team overall/home/away totals, keyed by canonical team name.
///
/// Each match updates the home side's `overall` and `home` splits and the
/// away side's `overall` and `away` splits.
pub fn aggregate_standings(matches: &[MatchRecord]) -> HashMap<String, TeamAggregate> {
    let mut by_team: HashMap<String, TeamAggregate> = HashMap::new();

    for m in matches {
        let (home_for, home_against) = m.goals_for(Venue::Home);
        let home = by_team.entry(m.home_team.clone()).or_default();
        home.overall.apply(home_for, home_against);
        home.home.apply(home_for, home_against);

        let (away_for, away_against) = m.goals_for(Venue::Away);
        let away = by_team.entry(m.away_team.clone()).or_default();
        away.overall.apply(away_for, away_against);
        away.away.apply(away_for, away_against);
    }

    by_team
}

/// Totals for one queried team against each opponent it has faced.
///
/// The query is matched loosely (see [`teams_match`]). When both sides of a
/// record match, the queried team is taken to be the home side. Opponents
/// are keyed by their own canonical name.
pub fn head_to_head(matches: &[MatchRecord], team: &str) -> HashMap<String, TeamStats> {
    let wanted = comparison_key(team);
    let mut by_opponent: HashMap<String, TeamStats> = HashMap::new();

    if wanted.is_empty() {
        return by_opponent;
    }

    for m in matches {
        let venue = if teams_match(&wanted, &m.home_team) {
            Venue::Home
        } else if teams_match(&wanted, &m.away_team) {
            Venue::Away
        } else {
            continue;
        };

        let (goals_for, goals_against) = m.goals_for(venue);
        by_opponent
            .entry(m.team(venue.opposite()).to_string())
            .or_default()
            .apply(goals_for, goals_against);
    }

    by_opponent
}
