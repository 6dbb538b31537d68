//! Match results: score validation and record updates.

use crate::logic::rounds::refresh_round_state;
use crate::models::{MatchId, Outcome, Tournament, TournamentError, TournamentState};

/// Rounds needed to win a single game.
pub const BO1_WIN_SCORE: u32 = 7;

/// Single-game rule: a side wins by reaching 7 while the other side has at most 7
/// (so 8-7 is the only result once the game reaches 7-7 after 6-6). Below 7 on
/// both sides the game is unfinished. Ties are rejected separately.
pub fn is_valid_bo1_score(score_1: u32, score_2: u32) -> bool {
    if score_1 < BO1_WIN_SCORE && score_2 < BO1_WIN_SCORE {
        return false;
    }
    (score_1 >= BO1_WIN_SCORE && score_2 <= BO1_WIN_SCORE)
        || (score_2 >= BO1_WIN_SCORE && score_1 <= BO1_WIN_SCORE)
}

fn to_score(raw: i64) -> Result<u32, TournamentError> {
    u32::try_from(raw).map_err(|_| TournamentError::InvalidScore)
}

/// Record the result of one match.
///
/// A bye ignores the scores: team 1 gets the win. Otherwise the higher score wins;
/// the winner gets a win, the loser a loss, and both statuses are refreshed.
/// Results are write-once, and a rejected submission changes nothing.
pub fn submit_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_1: i64,
    score_2: i64,
) -> Result<Outcome, TournamentError> {
    if tournament.state == TournamentState::CollectingTeams {
        return Err(TournamentError::NotStarted);
    }
    let m = tournament
        .find_match(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.is_resolved() {
        return Err(TournamentError::AlreadyResolved(match_id));
    }

    let (outcome, score) = match m.team_2 {
        None => (Outcome::Bye, None),
        Some(_) => {
            let (s1, s2) = (to_score(score_1)?, to_score(score_2)?);
            if m.is_bo1 && !is_valid_bo1_score(s1, s2) {
                return Err(TournamentError::InvalidBo1Score {
                    score_1: s1,
                    score_2: s2,
                });
            }
            let outcome = match s1.cmp(&s2) {
                std::cmp::Ordering::Greater => Outcome::Team1Win,
                std::cmp::Ordering::Less => Outcome::Team2Win,
                std::cmp::Ordering::Equal => return Err(TournamentError::TiedScore),
            };
            (outcome, Some((s1, s2)))
        }
    };

    // Validation is done; apply the result.
    let m = tournament
        .find_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    m.outcome = Some(outcome);
    m.score = score;
    let (winner, loser) = (m.winner(), m.loser());

    if let Some(team) = winner.and_then(|id| tournament.team_mut(id)) {
        team.add_win();
    }
    if let Some(team) = loser.and_then(|id| tournament.team_mut(id)) {
        team.add_loss();
    }
    log::debug!(
        "Match {} resolved as {:?} {:?}: winner {}, loser {}",
        match_id,
        outcome,
        score,
        winner.map(|id| tournament.team_name(id)).unwrap_or("-"),
        loser.map(|id| tournament.team_name(id)).unwrap_or("-")
    );

    refresh_round_state(tournament);
    Ok(outcome)
}
