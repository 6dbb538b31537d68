//! Team record and TeamStatus.

use crate::models::tournament::{MAX_LOSSES, MAX_WINS};
use serde::{Deserialize, Serialize};

/// Identifier for a team: its original seed (1..=16), assigned at registration.
pub type TeamId = u32;

/// Whether a team still plays in the ladder.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamStatus {
    #[default]
    Active,
    Promoted,
    Eliminated,
}

impl TeamStatus {
    /// Status for a win/loss record. Promotion is checked first, so a record that
    /// satisfies both thresholds counts as promoted.
    pub fn from_record(wins: u32, losses: u32) -> Self {
        if wins >= MAX_WINS {
            TeamStatus::Promoted
        } else if losses >= MAX_LOSSES {
            TeamStatus::Eliminated
        } else {
            TeamStatus::Active
        }
    }
}

/// A team in the ladder.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub original_seed: TeamId,
    /// Seed shown in standings; rewritten by the round 2 reseed.
    pub current_seed: u32,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    /// Derived tiebreak, only meaningful right after `compute_buchholz`.
    pub buchholz: i32,
    pub status: TeamStatus,
}

impl Team {
    /// Create a team with the given seed and name. Record starts at 0-0.
    pub fn new(seed: TeamId, name: impl Into<String>) -> Self {
        Self {
            original_seed: seed,
            current_seed: seed,
            name: name.into(),
            wins: 0,
            losses: 0,
            buchholz: 0,
            status: TeamStatus::Active,
        }
    }

    pub fn id(&self) -> TeamId {
        self.original_seed
    }

    /// Record a win and refresh the status.
    pub fn add_win(&mut self) {
        self.wins += 1;
        self.refresh_status();
    }

    /// Record a loss and refresh the status.
    pub fn add_loss(&mut self) {
        self.losses += 1;
        self.refresh_status();
    }

    pub fn refresh_status(&mut self) {
        self.status = TeamStatus::from_record(self.wins, self.losses);
    }

    pub fn is_active(&self) -> bool {
        self.status == TeamStatus::Active
    }

    /// Net record (wins - losses), the amount this team contributes to its opponents' Buchholz.
    pub fn differential(&self) -> i32 {
        self.wins as i32 - self.losses as i32
    }
}
