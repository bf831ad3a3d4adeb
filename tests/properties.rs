//! Property tests over arbitrary rally sequences.

use proptest::prelude::*;
use smash_score::{
    score_point, start_match, undo_last_rally, winner_at, MatchConfig, PointOutcome,
    ScoringSession, SessionPhase, Side,
};
use uuid::Uuid;

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Side1), Just(Side::Side2)]
}

fn point_goal() -> impl Strategy<Value = u32> {
    prop_oneof![Just(21u32), Just(11u32), 1u32..40]
}

fn started(point_goal: u32) -> ScoringSession {
    let mut session =
        ScoringSession::new(Uuid::new_v4(), MatchConfig::new("a", "b", point_goal)).unwrap();
    start_match(&mut session).unwrap();
    session
}

proptest! {
    /// Property: score per side counts accepted points, and the log holds one entry per point
    #[test]
    fn prop_score_matches_log(goal in point_goal(), sides in prop::collection::vec(side(), 0..80)) {
        let mut session = started(goal);
        let mut counts = (0u32, 0u32);
        for side in sides {
            if score_point(&mut session, side).unwrap() != PointOutcome::Ignored {
                match side {
                    Side::Side1 => counts.0 += 1,
                    Side::Side2 => counts.1 += 1,
                }
            }
            let score = session.score();
            prop_assert_eq!((score.side1, score.side2), counts);
            prop_assert_eq!(session.rally_log().len() as u32, score.total());
            prop_assert_eq!(
                session.phase() == SessionPhase::Completed,
                winner_at(&session.config, score).is_some()
            );
        }
    }

    /// Property: once completed, further points change nothing
    #[test]
    fn prop_completed_is_frozen(
        goal in point_goal(),
        extra in prop::collection::vec(side(), 1..10),
    ) {
        let mut session = started(goal);
        while !session.is_completed() {
            score_point(&mut session, Side::Side1).unwrap();
        }
        let frozen = session.state.clone();
        for side in extra {
            prop_assert_eq!(score_point(&mut session, side).unwrap(), PointOutcome::Ignored);
        }
        prop_assert_eq!(session.state, frozen);
    }

    /// Property: undo right after a point restores score, server and phase
    #[test]
    fn prop_undo_inverts_point(
        goal in point_goal(),
        prefix in prop::collection::vec(side(), 0..60),
        last in side(),
    ) {
        let mut session = started(goal);
        for side in prefix {
            if session.is_completed() {
                break;
            }
            score_point(&mut session, side).unwrap();
        }
        prop_assume!(!session.is_completed());

        let before = (session.score(), session.current_server(), session.phase());
        score_point(&mut session, last).unwrap();
        undo_last_rally(&mut session).unwrap();
        prop_assert_eq!((session.score(), session.current_server(), session.phase()), before);
    }
}
