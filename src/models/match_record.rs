//! Match record model — one completed league fixture.

use serde::{Deserialize, Serialize};

/// A completed match between two canonically named teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Canonical name of the home side
    pub home_team: String,

    /// Canonical name of the away side
    pub away_team: String,

    /// Full-time goals scored by the home side
    pub home_goals: u32,

    /// Full-time goals scored by the away side
    pub away_goals: u32,
}

impl MatchRecord {
    pub fn new(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_goals: u32,
        away_goals: u32,
    ) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_goals,
            away_goals,
        }
    }

    /// Goals (for, against) from the point of view of one venue.
    pub fn goals_for(&self, venue: Venue) -> (u32, u32) {
        match venue {
            Venue::Home => (self.home_goals, self.away_goals),
            Venue::Away => (self.away_goals, self.home_goals),
        }
    }

    /// The team playing at the given venue.
    pub fn team(&self, venue: Venue) -> &str {
        match venue {
            Venue::Home => &self.home_team,
            Venue::Away => &self.away_team,
        }
    }
}

/// Which side of a fixture a team played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    pub fn opposite(self) -> Self {
        match self {
            Venue::Home => Venue::Away,
            Venue::Away => Venue::Home,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goals_for_perspective() {
        let m = MatchRecord::new("Lens", "Nice", 2, 1);
        assert_eq!(m.goals_for(Venue::Home), (2, 1));
        assert_eq!(m.goals_for(Venue::Away), (1, 2));
    }

    #[test]
    fn test_team_by_venue() {
        let m = MatchRecord::new("Lens", "Nice", 0, 0);
        assert_eq!(m.team(Venue::Home), "Lens");
        assert_eq!(m.team(Venue::Away), "Nice");
        assert_eq!(Venue::Home.opposite(), Venue::Away);
    }
}
