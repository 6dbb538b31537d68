//! Tournament, TournamentState, and the error/warning types.

use crate::models::game::{GameMatch, MatchId};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Teams in a ladder.
pub const TOTAL_TEAMS: usize = 16;
/// Rounds played as a seeded bracket before the Swiss stage.
pub const INITIAL_ROUNDS: u32 = 2;
/// Last round of the ladder.
pub const TOTAL_ROUNDS: u32 = 5;
/// Wins needed for promotion.
pub const MAX_WINS: u32 = 3;
/// Losses that eliminate a team.
pub const MAX_LOSSES: u32 = 3;

/// Errors that can occur during tournament operations. None of them change state.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Registration needs exactly 16 non-empty names.
    #[error("Exactly {expected} non-empty team names are required (got {actual})")]
    WrongTeamCount { expected: usize, actual: usize },
    #[error("Match {0} not found")]
    MatchNotFound(MatchId),
    #[error("Match {0} already has a result")]
    AlreadyResolved(MatchId),
    #[error("Please enter valid scores for both teams")]
    InvalidScore,
    #[error(
        "Invalid scores for BO1 match ({score_1}-{score_2}): a team must reach at least 7 rounds to win, \
         or be the first to 8 rounds if the score reaches 6-6"
    )]
    InvalidBo1Score { score_1: u32, score_2: u32 },
    #[error("Scores cannot be tied")]
    TiedScore,
    #[error("Round {0} still has matches without a result")]
    RoundNotComplete(u32),
    #[error("Tournament is finished")]
    TournamentFinished,
    /// Teams have not been registered yet.
    #[error("Tournament has not started")]
    NotStarted,
    /// Teams were already registered.
    #[error("Teams are already registered")]
    AlreadyStarted,
}

/// Problems found while generating pairings. Logged and kept for display; pairing carries on.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum PairingWarning {
    /// A bracket slot had no team, so that pairing was skipped.
    #[error("Round {round}: no team for bracket slot {index}, pairing skipped")]
    MissingTeam { round: u32, index: usize },
    #[error("Reseeded team count mismatch: expected {expected}, got {actual}")]
    PairingCountMismatch { expected: usize, actual: usize },
    /// Swiss pairing ran out of new opponents and paired two teams again.
    #[error("Teams {team_1} and {team_2} have no unplayed opponent left and meet again")]
    ForcedRematch { team_1: TeamId, team_2: TeamId },
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle of the ladder.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Waiting for the 16 team names.
    #[default]
    CollectingTeams,
    /// Matches of this round are being played.
    InRound(u32),
    /// Every match of this round has a result; waiting for the operator to advance.
    RoundComplete(u32),
    /// Last round complete; no more pairings.
    Finished,
}

/// Full ladder state: teams, every match ever paired, and the round counter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    /// Sorted by original seed.
    pub teams: Vec<Team>,
    /// Append-only across the whole tournament.
    pub matches: Vec<GameMatch>,
    /// 0 until teams are registered.
    pub current_round: u32,
    pub state: TournamentState,
    /// Warnings from the most recent pairing generation.
    pub warnings: Vec<PairingWarning>,
    next_match_id: MatchId,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    /// Create a new tournament waiting for team registration.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            teams: Vec::new(),
            matches: Vec::new(),
            current_round: 0,
            state: TournamentState::CollectingTeams,
            warnings: Vec::new(),
            next_match_id: 0,
        }
    }

    /// Go back to team registration, keeping the tournament id.
    ///
    /// The match id counter carries on, so ids from before the reset never
    /// address a match of the new bracket.
    pub fn reset(&mut self) {
        let id = self.id;
        let next_match_id = self.next_match_id;
        *self = Self {
            id,
            next_match_id,
            ..Self::new()
        };
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.original_seed == id)
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.original_seed == id)
    }

    /// Display name for a team id, or "?" if unknown.
    pub fn team_name(&self, id: TeamId) -> &str {
        self.team(id).map(|t| t.name.as_str()).unwrap_or("?")
    }

    pub fn find_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn find_match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    pub fn round_matches(&self, round: u32) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    /// Matches of the round in progress (empty before registration).
    pub fn current_round_matches(&self) -> Vec<&GameMatch> {
        self.round_matches(self.current_round).collect()
    }

    /// True when every match of `round` has an outcome. A round without matches is complete.
    pub fn is_round_complete(&self, round: u32) -> bool {
        self.round_matches(round).all(GameMatch::is_resolved)
    }

    /// Hand out the next match id.
    pub(crate) fn allocate_match_id(&mut self) -> MatchId {
        let id = self.next_match_id;
        self.next_match_id += 1;
        id
    }
}
