//! Swiss ladder: library with models and business logic for a 16-team ladder
//! (seeded bracket for two rounds, then Swiss rounds with Buchholz standings).

pub mod logic;
pub mod models;
pub mod roster;

pub use logic::{
    advance_round, compare_teams, compute_buchholz, generate_pairings, has_played,
    is_valid_bo1_score, rank_teams, refresh_round_state, register_teams, reseed_after_round_one,
    round_one_pairings, round_two_pairings, standings, start_round, submit_result, swiss_pairings,
    RoundPairings, BO1_WIN_SCORE,
};
pub use models::{
    GameMatch, MatchId, Outcome, Pairing, PairingWarning, Team, TeamId, TeamStatus, Tournament,
    TournamentError, TournamentId, TournamentState, INITIAL_ROUNDS, MAX_LOSSES, MAX_WINS,
    TOTAL_ROUNDS, TOTAL_TEAMS,
};
pub use roster::{parse_roster, RosterError};
