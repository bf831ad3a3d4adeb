//! RallyScoringEngine: the open scoring sessions plus the store that keeps them across reloads.

use crate::logic::scoring::{self, rebuild_session, restore_session};
use crate::models::{
    MatchConfig, MatchId, MatchResult, PointOutcome, RallyRecord, ResultSubmission, ScoringError,
    ScoringSession, Side,
};
use crate::store::SessionStore;
use std::collections::HashMap;

/// Open sessions by match id. Every state change is saved to the store before returning.
pub struct RallyScoringEngine<S> {
    store: S,
    sessions: HashMap<MatchId, ScoringSession>,
}

impl<S: SessionStore> RallyScoringEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            sessions: HashMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open (or re-open) the session for a match.
    ///
    /// Saved state is restored when present; state that fails validation is rebuilt from its
    /// rally log. Without saved state the session starts fresh. An already open session is
    /// returned as is.
    pub fn open(
        &mut self,
        match_id: MatchId,
        config: MatchConfig,
    ) -> Result<&ScoringSession, ScoringError> {
        if !self.sessions.contains_key(&match_id) {
            let session = match self.store.load(match_id)? {
                Some(state) => match restore_session(match_id, config.clone(), state.clone()) {
                    Ok(session) => session,
                    Err(ScoringError::CorruptState(reason)) => {
                        log::warn!("Rebuilding saved session for match {}: {}", match_id, reason);
                        let session = rebuild_session(match_id, config, &state)?;
                        self.store.save(match_id, &session.state)?;
                        session
                    }
                    Err(e) => return Err(e),
                },
                None => ScoringSession::new(match_id, config)?,
            };
            log::info!(
                "Opened scoring session for match {} at {}",
                match_id,
                session.state.score
            );
            self.sessions.insert(match_id, session);
        }
        self.session(match_id)
    }

    pub fn session(&self, match_id: MatchId) -> Result<&ScoringSession, ScoringError> {
        self.sessions
            .get(&match_id)
            .ok_or(ScoringError::SessionNotOpen(match_id))
    }

    pub fn is_open(&self, match_id: MatchId) -> bool {
        self.sessions.contains_key(&match_id)
    }

    fn session_mut(&mut self, match_id: MatchId) -> Result<&mut ScoringSession, ScoringError> {
        self.sessions
            .get_mut(&match_id)
            .ok_or(ScoringError::SessionNotOpen(match_id))
    }

    fn persist(&mut self, match_id: MatchId) -> Result<(), ScoringError> {
        let session = self
            .sessions
            .get(&match_id)
            .ok_or(ScoringError::SessionNotOpen(match_id))?;
        self.store.save(match_id, &session.state)?;
        Ok(())
    }

    /// Start scoring. The caller then marks the match Live.
    pub fn start_match(&mut self, match_id: MatchId) -> Result<&ScoringSession, ScoringError> {
        scoring::start_match(self.session_mut(match_id)?)?;
        self.persist(match_id)?;
        self.session(match_id)
    }

    pub fn score_point(
        &mut self,
        match_id: MatchId,
        side: Side,
    ) -> Result<PointOutcome, ScoringError> {
        let outcome = scoring::score_point(self.session_mut(match_id)?, side)?;
        if outcome != PointOutcome::Ignored {
            self.persist(match_id)?;
        }
        Ok(outcome)
    }

    /// Undo the last rally. None when the log was already empty.
    pub fn undo_last_rally(
        &mut self,
        match_id: MatchId,
    ) -> Result<Option<RallyRecord>, ScoringError> {
        let undone = scoring::undo_last_rally(self.session_mut(match_id)?);
        if undone.is_some() {
            self.persist(match_id)?;
        }
        Ok(undone)
    }

    pub fn compute_result(&self, match_id: MatchId) -> Result<MatchResult, ScoringError> {
        scoring::compute_result(self.session(match_id)?)
    }

    /// Result payload for the match registry, leaving the session open.
    pub fn result_submission(&self, match_id: MatchId) -> Result<ResultSubmission, ScoringError> {
        scoring::result_submission(self.session(match_id)?)
    }

    /// Build the result payload and discard the session along with its saved state.
    ///
    /// The session stays open when the game is not completed or the saved state cannot be
    /// removed, so the submission can be retried.
    pub fn submit(&mut self, match_id: MatchId) -> Result<ResultSubmission, ScoringError> {
        let submission = scoring::result_submission(self.session(match_id)?)?;
        self.store.remove(match_id)?;
        self.sessions.remove(&match_id);
        log::info!(
            "Submitted match {}: {} won {}",
            match_id,
            submission.winner,
            submission.score
        );
        Ok(submission)
    }

    /// Leave the scoring screen. Saved state stays so the match can be resumed later.
    pub fn close(&mut self, match_id: MatchId) -> Option<ScoringSession> {
        self.sessions.remove(&match_id)
    }
}
