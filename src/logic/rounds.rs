//! Round lifecycle: pair a round, detect completion, advance.

use crate::logic::pairing::generate_pairings;
use crate::models::{
    GameMatch, Tournament, TournamentError, TournamentState, INITIAL_ROUNDS, TOTAL_ROUNDS,
};

/// Pair `current_round` and append its matches to the history.
///
/// Soft pairing warnings replace the previous round's warnings. A round that
/// produces no matches (every team already promoted or eliminated) is complete
/// straight away.
pub fn start_round(tournament: &mut Tournament) {
    let round = tournament.current_round;
    let generated = generate_pairings(round, &mut tournament.teams, &tournament.matches);

    let stage = if round <= INITIAL_ROUNDS { "bracket" } else { "swiss" };
    let mut labels = Vec::with_capacity(generated.pairings.len());
    for pairing in generated.pairings {
        let id = tournament.allocate_match_id();
        labels.push(format!(
            "{} vs {}",
            tournament.team_name(pairing.team_1),
            pairing
                .team_2
                .map(|t| tournament.team_name(t))
                .unwrap_or("Bye")
        ));
        tournament.matches.push(GameMatch::new(id, round, pairing));
    }
    log::info!("Generated {} pairings for round {}: {:?}", stage, round, labels);

    tournament.warnings = generated.warnings;
    tournament.state = TournamentState::InRound(round);
    refresh_round_state(tournament);
}

/// Move `InRound(n)` to `RoundComplete(n)` (or `Finished` after the last round)
/// once every match of round n has a result.
pub fn refresh_round_state(tournament: &mut Tournament) {
    let TournamentState::InRound(round) = tournament.state else {
        return;
    };
    if !tournament.is_round_complete(round) {
        return;
    }
    tournament.state = if round >= TOTAL_ROUNDS {
        log::info!("Tournament completed after round {}", round);
        TournamentState::Finished
    } else {
        log::info!("Round {} complete", round);
        TournamentState::RoundComplete(round)
    };
}

/// Advance to the next round and pair it. Only allowed once the current round is complete.
pub fn advance_round(tournament: &mut Tournament) -> Result<(), TournamentError> {
    match tournament.state {
        TournamentState::CollectingTeams => return Err(TournamentError::NotStarted),
        TournamentState::Finished => return Err(TournamentError::TournamentFinished),
        _ if tournament.current_round >= TOTAL_ROUNDS => {
            return Err(TournamentError::TournamentFinished)
        }
        TournamentState::InRound(round) => return Err(TournamentError::RoundNotComplete(round)),
        TournamentState::RoundComplete(_) => {}
    }
    tournament.current_round += 1;
    start_round(tournament);
    Ok(())
}
