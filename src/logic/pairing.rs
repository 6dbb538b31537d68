//! Pairing engine: seeded bracket for rounds 1-2, Swiss pairing afterwards.
//!
//! Round 2 is a two-step contract: [`reseed_after_round_one`] rewrites every team's
//! `current_seed` from the round 1 results and returns the reseeded order, then
//! [`round_two_pairings`] pairs that order. [`generate_pairings`] runs both.

use crate::logic::standings::{compare_teams, compute_buchholz};
use crate::models::{GameMatch, Pairing, PairingWarning, Team, TeamId, TOTAL_TEAMS};

/// Pairings for one round plus anything that went wrong while building them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoundPairings {
    pub pairings: Vec<Pairing>,
    pub warnings: Vec<PairingWarning>,
}

impl RoundPairings {
    fn warn(&mut self, warning: PairingWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Pair `order[i]` with `order[i + offset]` for every i in `slots`, skipping empty slots.
    fn pair_slots(&mut self, round: u32, order: &[TeamId], slots: std::ops::Range<usize>, offset: usize) {
        for i in slots {
            match (order.get(i), order.get(i + offset)) {
                (Some(&team_1), Some(&team_2)) => {
                    self.pairings.push(Pairing::versus(team_1, team_2, true));
                }
                (None, _) => self.warn(PairingWarning::MissingTeam { round, index: i }),
                (_, None) => self.warn(PairingWarning::MissingTeam { round, index: i + offset }),
            }
        }
    }
}

/// True if `a` and `b` have been paired before, in either slot order.
pub fn has_played(a: TeamId, b: TeamId, history: &[GameMatch]) -> bool {
    history.iter().any(|m| m.is_between(a, b))
}

/// Round 1: seed i plays seed i + 8 (1v9, 2v10, ..., 8v16). Single game.
pub fn round_one_pairings(teams: &[Team]) -> RoundPairings {
    let mut order: Vec<TeamId> = teams.iter().map(Team::id).collect();
    order.sort_unstable();

    let half = TOTAL_TEAMS / 2;
    let mut out = RoundPairings::default();
    out.pair_slots(1, &order, 0..half, half);
    out
}

/// Reseed after round 1: winners take seeds 1-8 and losers 9-16, each group in
/// original seed order. Writes `current_seed` on the teams and returns the
/// reseeded order (winners then losers).
pub fn reseed_after_round_one(teams: &mut [Team], history: &[GameMatch]) -> Vec<TeamId> {
    let round_one: Vec<&GameMatch> = history.iter().filter(|m| m.round == 1).collect();
    let mut winners: Vec<TeamId> = round_one.iter().filter_map(|m| m.winner()).collect();
    let mut losers: Vec<TeamId> = round_one.iter().filter_map(|m| m.loser()).collect();
    winners.sort_unstable();
    losers.sort_unstable();

    log::info!("Round 1 winners ({}): {:?}", winners.len(), names(teams, &winners));
    log::info!("Round 1 losers ({}): {:?}", losers.len(), names(teams, &losers));

    let half = (TOTAL_TEAMS / 2) as u32;
    for (index, id) in winners.iter().enumerate() {
        if let Some(team) = teams.iter_mut().find(|t| t.original_seed == *id) {
            team.current_seed = index as u32 + 1;
        }
    }
    for (index, id) in losers.iter().enumerate() {
        if let Some(team) = teams.iter_mut().find(|t| t.original_seed == *id) {
            team.current_seed = index as u32 + half + 1;
        }
    }

    winners.extend(losers);
    winners
}

/// Round 2 from a reseeded order: upper bracket 1v5, 2v6, 3v7, 4v8 and lower
/// bracket 9v13, 10v14, 11v15, 12v16. Single game.
pub fn round_two_pairings(reseeded: &[TeamId]) -> RoundPairings {
    let mut out = RoundPairings::default();
    if reseeded.len() != TOTAL_TEAMS {
        out.warn(PairingWarning::PairingCountMismatch {
            expected: TOTAL_TEAMS,
            actual: reseeded.len(),
        });
    }
    let quarter = TOTAL_TEAMS / 4;
    let half = TOTAL_TEAMS / 2;
    out.pair_slots(2, reseeded, 0..quarter, quarter);
    out.pair_slots(2, reseeded, half..half + quarter, quarter);
    out
}

/// Swiss round: active teams only, ranked by wins, Buchholz, then original seed.
///
/// Greedy: each unpaired team in rank order takes the first lower-ranked unpaired
/// team it has never met. Whatever is left over has already met every other
/// leftover. An odd leftover count gives the highest-ranked leftover a bye; the
/// rest are paired again in rank order and reported as forced rematches.
pub fn swiss_pairings(teams: &mut [Team], history: &[GameMatch]) -> RoundPairings {
    compute_buchholz(teams, history);
    let mut active: Vec<&Team> = teams.iter().filter(|t| t.is_active()).collect();
    active.sort_by(|a, b| compare_teams(a, b));
    let ranked: Vec<TeamId> = active.iter().map(|t| t.original_seed).collect();

    let mut out = RoundPairings::default();
    let mut used = vec![false; ranked.len()];
    for i in 0..ranked.len() {
        if used[i] {
            continue;
        }
        let partner = (i + 1..ranked.len())
            .find(|&j| !used[j] && !has_played(ranked[i], ranked[j], history));
        if let Some(j) = partner {
            out.pairings.push(Pairing::versus(ranked[i], ranked[j], false));
            used[i] = true;
            used[j] = true;
        }
    }

    let mut leftovers: Vec<TeamId> = ranked
        .iter()
        .zip(&used)
        .filter(|&(_, &u)| !u)
        .map(|(&id, _)| id)
        .collect();
    let bye = if leftovers.len() % 2 == 1 {
        Some(leftovers.remove(0))
    } else {
        None
    };
    for pair in leftovers.chunks_exact(2) {
        let (team_1, team_2) = (pair[0], pair[1]);
        if has_played(team_1, team_2, history) {
            out.warn(PairingWarning::ForcedRematch { team_1, team_2 });
        }
        out.pairings.push(Pairing::versus(team_1, team_2, false));
    }
    if let Some(team) = bye {
        out.pairings.push(Pairing::bye(team));
    }
    out
}

/// Pairings for `round`. Round 2 reseeds the teams first; Swiss rounds refresh Buchholz.
pub fn generate_pairings(round: u32, teams: &mut [Team], history: &[GameMatch]) -> RoundPairings {
    match round {
        0 => RoundPairings::default(),
        1 => round_one_pairings(teams),
        2 => {
            let reseeded = reseed_after_round_one(teams, history);
            round_two_pairings(&reseeded)
        }
        _ => swiss_pairings(teams, history),
    }
}

fn names<'a>(teams: &'a [Team], ids: &[TeamId]) -> Vec<&'a str> {
    ids.iter()
        .filter_map(|id| teams.iter().find(|t| t.original_seed == *id))
        .map(|t| t.name.as_str())
        .collect()
}
