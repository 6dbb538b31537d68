//! Setup phase: register the 16 teams and start round 1.

use crate::logic::rounds::start_round;
use crate::models::{Team, Tournament, TournamentError, TournamentState, TOTAL_TEAMS};

/// Register teams in seed order (first name is seed 1) and pair round 1.
/// Names are trimmed; exactly 16 non-empty names are required.
pub fn register_teams<S: AsRef<str>>(
    tournament: &mut Tournament,
    names: &[S],
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::CollectingTeams {
        return Err(TournamentError::AlreadyStarted);
    }
    let names: Vec<&str> = names.iter().map(|n| n.as_ref().trim()).collect();
    let non_empty = names.iter().filter(|n| !n.is_empty()).count();
    if names.len() != TOTAL_TEAMS || non_empty != TOTAL_TEAMS {
        return Err(TournamentError::WrongTeamCount {
            expected: TOTAL_TEAMS,
            actual: non_empty,
        });
    }

    tournament.teams = names
        .iter()
        .enumerate()
        .map(|(i, name)| Team::new(i as u32 + 1, *name))
        .collect();
    tournament.current_round = 1;
    log::info!("Registered {} teams", tournament.teams.len());
    start_round(tournament);
    Ok(())
}
