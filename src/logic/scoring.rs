//! Live scoring: start, point-by-point scoring with server rotation, win detection, and undo.

use crate::models::{
    GameFormat, MatchConfig, MatchId, MatchResult, PointOutcome, RallyRecord, ResultSubmission,
    Score, ScoringError, ScoringSession, SessionPhase, SessionState, Side,
};

/// Side that has won at `score`, if any.
///
/// A side wins on reaching the point goal with a two-point lead, or on reaching the cap
/// whatever the margin.
pub fn winner_at(config: &MatchConfig, score: Score) -> Option<Side> {
    [Side::Side1, Side::Side2]
        .into_iter()
        .find(|&side| has_won(config, score, side))
}

fn has_won(config: &MatchConfig, score: Score, side: Side) -> bool {
    let own = score.of(side);
    let other = score.of(side.opposite());
    (own >= config.point_goal && own >= other.saturating_add(2)) || own >= config.cap_score
}

/// Who serves next after `scorer` won the rally that produced `score`.
///
/// Long format: the serve passes to the scorer every second point, and on every point once
/// both sides are at deuce. Short format: the scorer always serves.
pub fn next_server(config: &MatchConfig, score: Score, scorer: Side, current: Side) -> Side {
    match config.format() {
        GameFormat::Long => {
            let deuce = config.deuce_threshold();
            let at_deuce = score.side1 >= deuce && score.side2 >= deuce;
            if at_deuce || score.total() % 2 == 0 {
                scorer
            } else {
                current
            }
        }
        GameFormat::Short => scorer,
    }
}

/// Begin scoring: NotStarted → InProgress. Any other phase is rejected.
pub fn start_match(session: &mut ScoringSession) -> Result<(), ScoringError> {
    if session.state.phase != SessionPhase::NotStarted {
        return Err(ScoringError::AlreadyStarted);
    }
    session.state.phase = SessionPhase::InProgress;
    log::info!(
        "Match {} started: {} vs {} to {}",
        session.match_id,
        session.config.player1_name,
        session.config.player2_name,
        session.config.point_goal
    );
    Ok(())
}

/// Record a rally won by `side`.
///
/// Once the game is completed further points are ignored until an undo reopens it.
pub fn score_point(session: &mut ScoringSession, side: Side) -> Result<PointOutcome, ScoringError> {
    match session.state.phase {
        SessionPhase::NotStarted => return Err(ScoringError::NotStarted),
        SessionPhase::Completed => return Ok(PointOutcome::Ignored),
        SessionPhase::InProgress => {}
    }

    let state = &mut session.state;
    let server_before = state.current_server;
    state.score.add_point(side);
    let sequence_number = state.rally_log.len() as u32 + 1;
    state
        .rally_log
        .push(RallyRecord::new(sequence_number, side, state.score, server_before));
    state.current_server = next_server(&session.config, state.score, side, server_before);
    log::debug!(
        "Match {}: rally {} to {}, score {}, {} to serve",
        session.match_id,
        sequence_number,
        side,
        state.score,
        state.current_server
    );

    if winner_at(&session.config, state.score).is_none() {
        return Ok(PointOutcome::Scored);
    }
    state.phase = SessionPhase::Completed;
    let result = compute_result(session)?;
    log::info!(
        "Match {} completed {} ({} wins)",
        session.match_id,
        result.final_score,
        session.config.player_name(result.winner)
    );
    Ok(PointOutcome::Completed(result))
}

/// Remove the last rally and roll score and server back. Returns the removed rally, or None
/// when there is nothing to undo. A completed game is reopened.
pub fn undo_last_rally(session: &mut ScoringSession) -> Option<RallyRecord> {
    let initial_server = session.config.initial_server;
    let state = &mut session.state;
    let undone = state.rally_log.pop()?;

    match state.rally_log.last() {
        None => {
            state.score = Score::default();
            state.current_server = initial_server;
        }
        Some(top) => {
            state.score = top.score();
            // Legacy records lack server_before: fall back to the opposite of the rally now on top.
            state.current_server = undone
                .server_before
                .unwrap_or_else(|| top.serving_side.opposite());
        }
    }
    if state.phase == SessionPhase::Completed {
        state.phase = SessionPhase::InProgress;
    }
    log::debug!(
        "Match {}: undid rally {}, score {}",
        session.match_id,
        undone.sequence_number,
        state.score
    );
    Some(undone)
}

/// Winner, canonical score string and margin of a completed game.
pub fn compute_result(session: &ScoringSession) -> Result<MatchResult, ScoringError> {
    if session.state.phase != SessionPhase::Completed {
        return Err(ScoringError::NotCompleted);
    }
    let score = session.state.score;
    let winner = score.leader().ok_or_else(|| {
        ScoringError::CorruptState(format!("completed game is level at {}", score))
    })?;
    Ok(MatchResult {
        winner,
        final_score: score.to_string(),
        margin: score.margin(),
    })
}

/// Result payload for the match registry, naming the winner by display name.
pub fn result_submission(session: &ScoringSession) -> Result<ResultSubmission, ScoringError> {
    let result = compute_result(session)?;
    Ok(ResultSubmission {
        match_id: session.match_id,
        score: result.final_score,
        winner: session.config.player_name(result.winner).to_string(),
    })
}

/// Rebuild a session from saved state, checking every session invariant.
pub fn restore_session(
    match_id: MatchId,
    config: MatchConfig,
    state: SessionState,
) -> Result<ScoringSession, ScoringError> {
    config.validate().map_err(ScoringError::InvalidConfig)?;
    check_state(&config, &state).map_err(ScoringError::CorruptState)?;
    Ok(ScoringSession {
        match_id,
        config,
        state,
    })
}

fn check_state(config: &MatchConfig, state: &SessionState) -> Result<(), String> {
    if state.phase == SessionPhase::NotStarted && !state.rally_log.is_empty() {
        return Err("rallies recorded before the match started".to_string());
    }

    let mut running = Score::default();
    for (i, rally) in state.rally_log.iter().enumerate() {
        if rally.sequence_number as usize != i + 1 {
            return Err(format!(
                "rally {} has sequence number {}",
                i + 1,
                rally.sequence_number
            ));
        }
        if winner_at(config, running).is_some() {
            return Err(format!("rally {} played after the game was won", i + 1));
        }
        running.add_point(rally.scoring_side);
        if rally.score() != running {
            return Err(format!(
                "rally {} records {} but the log adds up to {}",
                i + 1,
                rally.score(),
                running
            ));
        }
    }
    if state.score != running {
        return Err(format!("score {} does not match rally log {}", state.score, running));
    }

    let won = winner_at(config, state.score).is_some();
    match (state.phase, won) {
        (SessionPhase::Completed, false) => Err(format!("marked completed at {}", state.score)),
        (SessionPhase::InProgress, true) => Err(format!("still in progress at {}", state.score)),
        _ => Ok(()),
    }
}

/// Re-derive a consistent session by replaying the saved log's rally winners from zero.
///
/// Rallies after the game was won are dropped. Sequence numbers, scores and server are all
/// recomputed.
pub fn rebuild_session(
    match_id: MatchId,
    config: MatchConfig,
    state: &SessionState,
) -> Result<ScoringSession, ScoringError> {
    let mut session = ScoringSession::new(match_id, config)?;
    if state.phase == SessionPhase::NotStarted && state.rally_log.is_empty() {
        return Ok(session);
    }
    session.state.phase = SessionPhase::InProgress;
    for rally in &state.rally_log {
        if session.is_completed() {
            break;
        }
        score_point(&mut session, rally.scoring_side)?;
    }
    Ok(session)
}
