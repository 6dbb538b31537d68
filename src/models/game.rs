//! Match, Outcome, and Pairing for a single ladder game.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a match, increasing within a tournament.
pub type MatchId = u32;

/// How a match was decided.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Team1Win,
    Team2Win,
    /// Team 1 had no opponent and takes the win.
    Bye,
}

/// A pairing produced by the pairing engine, before it gets an id and round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub team_1: TeamId,
    /// None for a bye.
    pub team_2: Option<TeamId>,
    pub is_bo1: bool,
}

impl Pairing {
    pub fn versus(team_1: TeamId, team_2: TeamId, is_bo1: bool) -> Self {
        Self {
            team_1,
            team_2: Some(team_2),
            is_bo1,
        }
    }

    pub fn bye(team: TeamId) -> Self {
        Self {
            team_1: team,
            team_2: None,
            is_bo1: false,
        }
    }
}

/// A single match in the ladder.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub round: u32,
    pub team_1: TeamId,
    /// None if this is a bye.
    pub team_2: Option<TeamId>,
    /// None if not yet played. Set once.
    pub outcome: Option<Outcome>,
    /// Accepted score (team 1, team 2); None for byes and unplayed matches.
    pub score: Option<(u32, u32)>,
    /// Single-game scoring rules apply (bracket rounds).
    pub is_bo1: bool,
}

impl GameMatch {
    pub fn new(id: MatchId, round: u32, pairing: Pairing) -> Self {
        Self {
            id,
            round,
            team_1: pairing.team_1,
            team_2: pairing.team_2,
            outcome: None,
            score: None,
            is_bo1: pairing.is_bo1,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.team_2.is_none()
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    /// Decided by play (not a bye, not pending).
    pub fn is_decisive(&self) -> bool {
        matches!(self.outcome, Some(Outcome::Team1Win | Outcome::Team2Win))
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.team_1 == team || self.team_2 == Some(team)
    }

    /// True if this match is between `a` and `b`, in either slot order.
    pub fn is_between(&self, a: TeamId, b: TeamId) -> bool {
        (self.team_1 == a && self.team_2 == Some(b)) || (self.team_1 == b && self.team_2 == Some(a))
    }

    pub fn opponent_of(&self, team: TeamId) -> Option<TeamId> {
        if self.team_1 == team {
            self.team_2
        } else if self.team_2 == Some(team) {
            Some(self.team_1)
        } else {
            None
        }
    }

    pub fn winner(&self) -> Option<TeamId> {
        match self.outcome? {
            Outcome::Team1Win | Outcome::Bye => Some(self.team_1),
            Outcome::Team2Win => self.team_2,
        }
    }

    pub fn loser(&self) -> Option<TeamId> {
        match self.outcome? {
            Outcome::Team1Win => self.team_2,
            Outcome::Team2Win => Some(self.team_1),
            Outcome::Bye => None,
        }
    }
}
