//! Integration tests for the round lifecycle: registration, advancing, finishing.

use rand::{rngs::StdRng, Rng, SeedableRng};
use swiss_ladder::{
    advance_round, register_teams, start_round, submit_result, GameMatch, MatchId, PairingWarning,
    Team, TeamStatus, Tournament, TournamentError, TournamentState, TOTAL_ROUNDS,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn names() -> Vec<String> {
    (1..=16).map(|i| format!("T{i}")).collect()
}

fn started_tournament() -> Tournament {
    init_logging();
    let mut t = Tournament::new();
    register_teams(&mut t, names().as_slice()).unwrap();
    t
}

/// Resolve every open match of the current round; `team_1_wins` decides each decisive match.
fn play_round(t: &mut Tournament, mut team_1_wins: impl FnMut(&GameMatch) -> bool) {
    let open: Vec<GameMatch> = t
        .current_round_matches()
        .into_iter()
        .filter(|m| !m.is_resolved())
        .cloned()
        .collect();
    for m in open {
        let (s1, s2) = match (m.is_bye(), m.is_bo1, team_1_wins(&m)) {
            (true, _, _) => (0, 0),
            (false, true, true) => (7, 4),
            (false, true, false) => (5, 7),
            (false, false, true) => (2, 1),
            (false, false, false) => (0, 2),
        };
        submit_result(t, m.id, s1, s2).unwrap();
    }
}

fn assert_statuses_follow_records(t: &Tournament) {
    for team in &t.teams {
        assert_eq!(team.status, TeamStatus::from_record(team.wins, team.losses));
    }
}

#[test]
fn register_requires_sixteen_names() {
    let mut t = Tournament::new();
    let short: Vec<String> = names().into_iter().take(15).collect();
    assert_eq!(
        register_teams(&mut t, short.as_slice()),
        Err(TournamentError::WrongTeamCount {
            expected: 16,
            actual: 15
        })
    );
    assert_eq!(t.state, TournamentState::CollectingTeams);
    assert!(t.teams.is_empty());
    assert!(t.matches.is_empty());
}

#[test]
fn register_rejects_blank_names() {
    let mut t = Tournament::new();
    let mut list = names();
    list[4] = "   ".to_string();
    assert_eq!(
        register_teams(&mut t, list.as_slice()),
        Err(TournamentError::WrongTeamCount {
            expected: 16,
            actual: 15
        })
    );
    assert_eq!(t.state, TournamentState::CollectingTeams);
}

#[test]
fn register_assigns_seeds_and_pairs_round_one() {
    let t = started_tournament();
    assert_eq!(t.state, TournamentState::InRound(1));
    assert_eq!(t.current_round, 1);
    for (i, team) in t.teams.iter().enumerate() {
        assert_eq!(team.original_seed, i as u32 + 1);
        assert_eq!(team.name, format!("T{}", i + 1));
        assert_eq!(team.status, TeamStatus::Active);
    }
    let ids: Vec<MatchId> = t.current_round_matches().iter().map(|m| m.id).collect();
    assert_eq!(ids, (0..8).collect::<Vec<_>>());
    assert!(t.warnings.is_empty());
}

#[test]
fn register_trims_names() {
    let mut t = Tournament::new();
    let mut list = names();
    list[0] = "  Alpha  ".to_string();
    register_teams(&mut t, list.as_slice()).unwrap();
    assert_eq!(t.team(1).unwrap().name, "Alpha");
}

#[test]
fn register_twice_is_rejected() {
    let mut t = started_tournament();
    assert_eq!(
        register_teams(&mut t, names().as_slice()),
        Err(TournamentError::AlreadyStarted)
    );
}

#[test]
fn advance_before_registration_is_rejected() {
    let mut t = Tournament::new();
    assert_eq!(advance_round(&mut t), Err(TournamentError::NotStarted));
}

#[test]
fn advance_requires_complete_round() {
    let mut t = started_tournament();
    let id = t.current_round_matches()[0].id;
    submit_result(&mut t, id, 7, 0).unwrap();
    assert_eq!(advance_round(&mut t), Err(TournamentError::RoundNotComplete(1)));
    assert_eq!(t.current_round, 1);
    assert_eq!(t.matches.len(), 8);
}

#[test]
fn completing_a_round_waits_for_the_operator() {
    let mut t = started_tournament();
    play_round(&mut t, |_| true);
    assert_eq!(t.state, TournamentState::RoundComplete(1));
    assert_eq!(t.current_round, 1);

    advance_round(&mut t).unwrap();
    assert_eq!(t.state, TournamentState::InRound(2));
    let ids: Vec<MatchId> = t.current_round_matches().iter().map(|m| m.id).collect();
    assert_eq!(ids, (8..16).collect::<Vec<_>>());
    assert!(t.current_round_matches().iter().all(|m| m.is_bo1 && m.round == 2));
    // Earlier rounds stay in the history.
    assert_eq!(t.round_matches(1).count(), 8);
}

#[test]
fn top_seeds_winning_round_one_keep_their_seeds() {
    let mut t = started_tournament();
    play_round(&mut t, |_| true);
    advance_round(&mut t).unwrap();

    for team in &t.teams {
        assert_eq!(team.current_seed, team.original_seed);
    }
    let winners: Vec<&str> = t
        .teams
        .iter()
        .filter(|team| team.current_seed <= 8)
        .map(|team| team.name.as_str())
        .collect();
    assert_eq!(winners, vec!["T1", "T2", "T3", "T4", "T5", "T6", "T7", "T8"]);
}

#[test]
fn full_ladder_finishes_after_last_round() {
    let mut t = started_tournament();
    for round in 1..=TOTAL_ROUNDS {
        assert_eq!(t.current_round, round);
        play_round(&mut t, |_| true);
        assert_statuses_follow_records(&t);
        if round < TOTAL_ROUNDS {
            assert_eq!(t.state, TournamentState::RoundComplete(round));
            advance_round(&mut t).unwrap();
        }
    }
    assert_eq!(t.state, TournamentState::Finished);
    assert_eq!(advance_round(&mut t), Err(TournamentError::TournamentFinished));

    let ids: Vec<MatchId> = t.matches.iter().map(|m| m.id).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn last_round_cannot_advance_while_open() {
    let mut t = started_tournament();
    for _ in 1..TOTAL_ROUNDS {
        play_round(&mut t, |_| true);
        advance_round(&mut t).unwrap();
    }
    assert_eq!(t.current_round, TOTAL_ROUNDS);
    assert_eq!(advance_round(&mut t), Err(TournamentError::TournamentFinished));
}

#[test]
fn random_ladders_keep_their_invariants() {
    init_logging();
    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut t = Tournament::new();
        register_teams(&mut t, names().as_slice()).unwrap();

        for round in 1..=TOTAL_ROUNDS {
            let before: Vec<Team> = t.teams.clone();
            let round_matches: Vec<GameMatch> = t.current_round_matches().into_iter().cloned().collect();
            let history: Vec<GameMatch> = t.matches.iter().filter(|m| m.round < round).cloned().collect();

            // Nobody plays twice in a round, and at most one bye.
            let mut seen = Vec::new();
            for m in &round_matches {
                seen.push(m.team_1);
                seen.extend(m.team_2);
            }
            let total = seen.len();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), total);
            assert!(round_matches.iter().filter(|m| m.is_bye()).count() <= 1);

            // Swiss rematches only when reported as forced.
            for m in round_matches.iter().filter(|m| !m.is_bye()) {
                let (a, b) = (m.team_1, m.team_2.unwrap());
                if history.iter().any(|h| h.is_between(a, b)) {
                    assert!(round > 2);
                    assert!(t
                        .warnings
                        .contains(&PairingWarning::ForcedRematch { team_1: a, team_2: b }));
                }
            }
            // Only active teams get paired in Swiss rounds.
            if round > 2 {
                for m in &round_matches {
                    assert!(t.team(m.team_1).unwrap().is_active());
                }
            }

            play_round(&mut t, |_| rng.gen_bool(0.5));
            assert_statuses_follow_records(&t);
            for (old, new) in before.iter().zip(&t.teams) {
                assert!(new.wins >= old.wins && new.losses >= old.losses);
            }
            if round < TOTAL_ROUNDS {
                advance_round(&mut t).unwrap();
            }
        }
        assert_eq!(t.state, TournamentState::Finished);
    }
}

#[test]
fn round_without_active_teams_is_complete_immediately() {
    let mut t = Tournament::new();
    t.teams = (1..=4)
        .map(|i| {
            let mut team = Team::new(i, format!("T{i}"));
            team.wins = 3;
            team.refresh_status();
            team
        })
        .collect();
    t.current_round = 3;
    start_round(&mut t);
    assert!(t.current_round_matches().is_empty());
    assert_eq!(t.state, TournamentState::RoundComplete(3));

    t.current_round = TOTAL_ROUNDS;
    start_round(&mut t);
    assert_eq!(t.state, TournamentState::Finished);
}

#[test]
fn reset_returns_to_registration() {
    let mut t = started_tournament();
    let id = t.id;
    play_round(&mut t, |_| false);
    let old_ids: Vec<MatchId> = t.matches.iter().map(|m| m.id).collect();
    t.reset();

    assert_eq!(t.id, id);
    assert_eq!(t.state, TournamentState::CollectingTeams);
    assert_eq!(t.current_round, 0);
    assert!(t.teams.is_empty() && t.matches.is_empty());

    register_teams(&mut t, names().as_slice()).unwrap();
    let max_old = old_ids.iter().copied().max().unwrap();
    assert!(t.current_round_matches().iter().all(|m| m.id > max_old));
}

#[test]
fn match_ids_from_before_a_reset_do_not_resolve_new_matches() {
    let mut t = started_tournament();
    let stale = t.current_round_matches()[0].id;
    t.reset();
    register_teams(&mut t, names().as_slice()).unwrap();

    assert_eq!(
        submit_result(&mut t, stale, 7, 0),
        Err(TournamentError::MatchNotFound(stale))
    );
    assert!(t.matches.iter().all(|m| !m.is_resolved()));
    assert_eq!(t.team(1).unwrap().wins, 0);
}
