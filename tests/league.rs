//! Integration tests for the match registry: scheduling, status, results, rankings.

use chrono::{Duration, TimeZone, Utc};
use smash_score::{
    apply_result, apply_status_update, best_match, matches_for_player, parse_score, rank_of,
    rankings, upcoming, League, LeagueError, MatchId, MatchKind, MatchStatus, NewMatch, PlayerId,
    PlayerProfile, ResultSubmission, StatusUpdate,
};

fn new_match(player1: &str, player2: &str, ids: (PlayerId, PlayerId), point_goal: u32) -> NewMatch {
    NewMatch {
        kind: MatchKind::Singles,
        player1: player1.to_string(),
        player2: player2.to_string(),
        player1_id: Some(ids.0),
        player2_id: Some(ids.1),
        scheduled_at: Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap(),
        point_goal,
        description: String::new(),
    }
}

fn league_with_two() -> (League, PlayerId, PlayerId) {
    let mut league = League::new();
    let lin = league.add_player("Lin", "lin").unwrap();
    let lee = league.add_player("Lee", "lee").unwrap();
    (league, lin, lee)
}

fn submit(
    league: &mut League,
    match_id: MatchId,
    score: &str,
    winner: &str,
) -> Result<(), LeagueError> {
    apply_result(
        league,
        &ResultSubmission {
            match_id,
            score: score.to_string(),
            winner: winner.to_string(),
        },
    )
}

#[test]
fn usernames_are_unique_ignoring_case() {
    let (mut league, _, _) = league_with_two();
    assert_eq!(league.add_player("Other", "LIN"), Err(LeagueError::DuplicateUsername));
    assert_eq!(league.add_player("  ", "x"), Err(LeagueError::InvalidName));
}

#[test]
fn schedule_validates_match() {
    let (mut league, lin, lee) = league_with_two();
    assert_eq!(
        league.schedule_match(new_match("Lin", "Lin", (lin, lee), 21)),
        Err(LeagueError::InvalidName)
    );
    assert_eq!(
        league.schedule_match(new_match("Lin", "Lee", (lin, lee), 0)),
        Err(LeagueError::InvalidPointGoal)
    );
    let stranger = uuid::Uuid::new_v4();
    assert_eq!(
        league.schedule_match(new_match("Lin", "Lee", (lin, stranger), 21)),
        Err(LeagueError::PlayerNotFound(stranger))
    );

    let id = league.schedule_match(new_match("Lin", "Lee", (lin, lee), 11)).unwrap();
    let record = league.get_match(id).unwrap();
    assert_eq!(record.status, MatchStatus::Upcoming);
    let config = league.match_config(id).unwrap();
    assert_eq!(config.player1_name, "Lin");
    assert_eq!(config.cap_score, 15);
}

#[test]
fn status_update_marks_match_live() {
    let (mut league, lin, lee) = league_with_two();
    let id = league.schedule_match(new_match("Lin", "Lee", (lin, lee), 21)).unwrap();
    apply_status_update(&mut league, &StatusUpdate::live(id)).unwrap();
    assert_eq!(league.get_match(id).unwrap().status, MatchStatus::Live);

    let missing = uuid::Uuid::new_v4();
    assert_eq!(
        apply_status_update(&mut league, &StatusUpdate::live(missing)),
        Err(LeagueError::MatchNotFound(missing))
    );
}

#[test]
fn status_update_cannot_complete_match() {
    let (mut league, lin, lee) = league_with_two();
    let id = league.schedule_match(new_match("Lin", "Lee", (lin, lee), 21)).unwrap();
    let update = StatusUpdate {
        match_id: id,
        status: MatchStatus::Completed,
    };
    assert_eq!(
        apply_status_update(&mut league, &update),
        Err(LeagueError::CompletedWithoutResult)
    );
    assert_eq!(league.get_match(id).unwrap().status, MatchStatus::Upcoming);

    submit(&mut league, id, "21-10", "Lin").unwrap();
    let record = league.get_match(id).unwrap();
    assert_eq!(record.status, MatchStatus::Completed);
    assert_eq!(record.score.as_deref(), Some("21-10"));
}

#[test]
fn result_updates_match_and_player_stats() {
    let (mut league, lin, lee) = league_with_two();
    let id = league.schedule_match(new_match("Lin", "Lee", (lin, lee), 21)).unwrap();
    submit(&mut league, id, "22-20", "Lin").unwrap();

    let record = league.get_match(id).unwrap();
    assert_eq!(record.status, MatchStatus::Completed);
    assert_eq!(record.score.as_deref(), Some("22-20"));
    assert_eq!(record.winner.as_deref(), Some("Lin"));
    assert_eq!(record.margin, Some(2));

    let lin_stats = &league.get_player(lin).unwrap().stats;
    assert_eq!((lin_stats.wins, lin_stats.losses, lin_stats.total_points), (1, 0, 22));
    let lee_stats = &league.get_player(lee).unwrap().stats;
    assert_eq!((lee_stats.wins, lee_stats.losses, lee_stats.total_points), (0, 1, 20));
    assert_eq!(lee_stats.singles, 1);
    assert_eq!(lin_stats.win_rate(), 100.0);
    assert_eq!(lee_stats.win_rate(), 0.0);

    let lin_player = league.get_player(lin).unwrap();
    let profile = serde_json::to_value(PlayerProfile::from(lin_player)).unwrap();
    assert_eq!(profile["username"], "lin");
    assert_eq!(profile["winRate"], 100.0);
    assert_eq!(profile["stats"]["wins"], 1);

    assert_eq!(submit(&mut league, id, "22-20", "Lin"), Err(LeagueError::AlreadyCompleted));
    assert_eq!(
        apply_status_update(&mut league, &StatusUpdate::live(id)),
        Err(LeagueError::AlreadyCompleted)
    );
}

#[test]
fn result_must_agree_with_winner() {
    let (mut league, lin, lee) = league_with_two();
    let id = league.schedule_match(new_match("Lin", "Lee", (lin, lee), 21)).unwrap();
    for (score, winner) in [("20-22", "Lin"), ("22-20", "Nobody"), ("twenty", "Lin")] {
        assert!(matches!(
            submit(&mut league, id, score, winner),
            Err(LeagueError::InvalidScore(_))
        ));
    }
    assert_eq!(league.get_match(id).unwrap().status, MatchStatus::Upcoming);
}

#[test]
fn parse_score_reads_both_sides() {
    assert_eq!(parse_score("21-19"), Ok((21, 19)));
    assert_eq!(parse_score(" 0 - 11 "), Ok((0, 11)));
    assert!(parse_score("21").is_err());
}

#[test]
fn rankings_sort_by_total_points() {
    let (mut league, lin, lee) = league_with_two();
    let ann = league.add_player("Ann", "ann").unwrap();
    let first = league.schedule_match(new_match("Lin", "Lee", (lin, lee), 21)).unwrap();
    submit(&mut league, first, "21-10", "Lin").unwrap();
    let second = league.schedule_match(new_match("Ann", "Lee", (ann, lee), 11)).unwrap();
    submit(&mut league, second, "11-9", "Ann").unwrap();

    let table = rankings(&league);
    let names: Vec<_> = table.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Lin", "Lee", "Ann"]);
    assert_eq!(table[1].total_points, 19);
    assert_eq!(rank_of(&league, ann), Ok(3));
    assert_eq!(rank_of(&league, lin), Ok(1));
}

#[test]
fn best_match_is_widest_win() {
    let (mut league, lin, lee) = league_with_two();
    assert_eq!(best_match(&league, lin), Ok(None));

    let close = league.schedule_match(new_match("Lin", "Lee", (lin, lee), 21)).unwrap();
    submit(&mut league, close, "23-21", "Lin").unwrap();
    let wide = league.schedule_match(new_match("Lee", "Lin", (lee, lin), 21)).unwrap();
    submit(&mut league, wide, "5-21", "Lin").unwrap();
    let lost = league.schedule_match(new_match("Lin", "Lee", (lin, lee), 21)).unwrap();
    submit(&mut league, lost, "0-21", "Lee").unwrap();

    let best = best_match(&league, lin).unwrap().unwrap();
    assert_eq!(best.opponent, "Lee");
    assert_eq!(best.score, "5-21");
}

#[test]
fn upcoming_window_and_player_history() {
    let (mut league, lin, lee) = league_with_two();
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let mut soon = new_match("Lin", "Lee", (lin, lee), 21);
    soon.scheduled_at = now + Duration::hours(3);
    let mut earlier = new_match("Lee", "Lin", (lee, lin), 11);
    earlier.scheduled_at = now - Duration::hours(2);
    let mut far = new_match("Lin", "Lee", (lin, lee), 21);
    far.scheduled_at = now + Duration::days(3);
    let soon = league.schedule_match(soon).unwrap();
    let earlier = league.schedule_match(earlier).unwrap();
    let far = league.schedule_match(far).unwrap();

    let ids: Vec<_> = upcoming(&league, now).iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![earlier, soon]);

    let history: Vec<_> = matches_for_player(&league, lin).iter().map(|m| m.id).collect();
    assert_eq!(history, vec![far, soon, earlier]);
}
