//! Standings: Buchholz tiebreak and ranking.

use crate::models::{GameMatch, Team, TeamId, Tournament};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Recompute every team's Buchholz from scratch.
///
/// For each decisive match, each side gets the opponent's wins minus losses added.
/// Opponent records are read as they are now, not as they were when the match was
/// played, so a team's Buchholz keeps moving as its past opponents play on.
/// Byes and unplayed matches count for nothing.
pub fn compute_buchholz(teams: &mut [Team], matches: &[GameMatch]) {
    let differential: HashMap<TeamId, i32> = teams
        .iter()
        .map(|t| (t.original_seed, t.differential()))
        .collect();

    for team in teams.iter_mut() {
        let id = team.original_seed;
        team.buchholz = matches
            .iter()
            .filter(|m| m.is_decisive() && m.involves(id))
            .filter_map(|m| m.opponent_of(id))
            .map(|opponent| differential.get(&opponent).copied().unwrap_or(0))
            .sum();
    }
}

/// Standings order: wins descending, then Buchholz descending, then original seed ascending.
pub fn compare_teams(a: &Team, b: &Team) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| b.buchholz.cmp(&a.buchholz))
        .then_with(|| a.original_seed.cmp(&b.original_seed))
}

/// Teams in standings order. Uses whatever Buchholz values the teams currently hold.
pub fn rank_teams(teams: &[Team]) -> Vec<Team> {
    let mut ranked = teams.to_vec();
    ranked.sort_by(compare_teams);
    ranked
}

/// Recompute Buchholz for the tournament and return its teams in standings order.
pub fn standings(tournament: &mut Tournament) -> Vec<Team> {
    compute_buchholz(&mut tournament.teams, &tournament.matches);
    rank_teams(&tournament.teams)
}
