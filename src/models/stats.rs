//! Derived statistics models.

use serde::{Deserialize, Serialize};

/// Result of a match from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Classify a result from goals scored and conceded.
    pub fn from_goals(goals_for: u32, goals_against: u32) -> Self {
        if goals_for > goals_against {
            Outcome::Win
        } else if goals_for == goals_against {
            Outcome::Draw
        } else {
            Outcome::Loss
        }
    }

    /// League points awarded for this outcome.
    pub fn points(self) -> u32 {
        match self {
            Outcome::Win => 3,
            Outcome::Draw => 1,
            Outcome::Loss => 0,
        }
    }
}

/// Running totals for one team in one split.
///
/// Only [`TeamStats::apply`] mutates the counters, which keeps
/// `played == wins + draws + losses` and `points == 3 * wins + draws`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl TeamStats {
    /// Fold one match into the totals. Goal totals saturate at `u32::MAX`.
    pub fn apply(&mut self, goals_for: u32, goals_against: u32) -> Outcome {
        let outcome = Outcome::from_goals(goals_for, goals_against);

        self.played += 1;
        self.goals_for = self.goals_for.saturating_add(goals_for);
        self.goals_against = self.goals_against.saturating_add(goals_against);
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.points += outcome.points();

        outcome
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Points per match rounded half-up to two decimals; empty when unplayed.
    pub fn points_per_match_display(&self) -> String {
        if self.played == 0 {
            return String::new();
        }
        let played = u64::from(self.played);
        let hundredths = (u64::from(self.points) * 200 + played) / (2 * played);
        format!("{}.{:02}", hundredths / 100, hundredths % 100)
    }
}

/// Overall, home-only and away-only totals for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAggregate {
    pub overall: TeamStats,
    pub home: TeamStats,
    pub away: TeamStats,
}
