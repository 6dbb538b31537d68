//! Data structures for the ladder: teams, matches, tournament state.

mod game;
mod team;
mod tournament;

pub use game::{GameMatch, MatchId, Outcome, Pairing};
pub use team::{Team, TeamId, TeamStatus};
pub use tournament::{
    PairingWarning, Tournament, TournamentError, TournamentId, TournamentState, INITIAL_ROUNDS,
    MAX_LOSSES, MAX_WINS, TOTAL_ROUNDS, TOTAL_TEAMS,
};
