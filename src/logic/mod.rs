//! Ladder business logic: pairing, results, standings, round lifecycle.

mod pairing;
mod results;
mod rounds;
mod setup;
mod standings;

pub use pairing::{
    generate_pairings, has_played, reseed_after_round_one, round_one_pairings, round_two_pairings,
    swiss_pairings, RoundPairings,
};
pub use results::{is_valid_bo1_score, submit_result, BO1_WIN_SCORE};
pub use rounds::{advance_round, refresh_round_state, start_round};
pub use setup::register_teams;
pub use standings::{compare_teams, compute_buchholz, rank_teams, standings};
