//! ScoringSession, its persisted SessionState, and scoring errors.

use crate::models::config::MatchConfig;
use crate::models::game::MatchId;
use crate::models::rally::RallyRecord;
use crate::models::side::{Score, Side};
use crate::store::StoreError;
use serde::{Deserialize, Serialize};

/// Errors returned by scoring operations.
#[derive(Debug)]
pub enum ScoringError {
    /// `start_match` on a session that is already in progress or completed.
    AlreadyStarted,
    /// Scoring before the match was started.
    NotStarted,
    /// Asking for a result before the win condition holds.
    NotCompleted,
    /// No session is open for this match.
    SessionNotOpen(MatchId),
    /// Goal/cap combination the engine cannot play.
    InvalidConfig(String),
    /// Restored state breaks a session invariant.
    CorruptState(String),
    /// Session store failed to load, save, or remove state.
    Store(StoreError),
}

impl std::fmt::Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringError::AlreadyStarted => write!(f, "Match has already been started"),
            ScoringError::NotStarted => write!(f, "Match has not been started"),
            ScoringError::NotCompleted => write!(f, "Match is not completed yet"),
            ScoringError::SessionNotOpen(id) => {
                write!(f, "No scoring session open for match {}", id)
            }
            ScoringError::InvalidConfig(reason) => write!(f, "Invalid match config: {}", reason),
            ScoringError::CorruptState(reason) => write!(f, "Corrupt scoring state: {}", reason),
            ScoringError::Store(e) => write!(f, "Session store error: {}", e),
        }
    }
}

impl std::error::Error for ScoringError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoringError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ScoringError {
    fn from(e: StoreError) -> Self {
        ScoringError::Store(e)
    }
}

/// Position of a session in its lifecycle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// The part of a session that survives reloads: `{score, rallyLog, currentServer, phase}`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub score: Score,
    pub rally_log: Vec<RallyRecord>,
    pub current_server: Side,
    pub phase: SessionPhase,
}

impl SessionState {
    /// Zero state with `initial_server` to serve.
    pub fn fresh(initial_server: Side) -> Self {
        Self {
            current_server: initial_server,
            ..Self::default()
        }
    }
}

/// A match being scored: its identity, rules, and live state.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSession {
    pub match_id: MatchId,
    pub config: MatchConfig,
    pub state: SessionState,
}

impl ScoringSession {
    /// Fresh session: (0,0), empty log, initial server, not started.
    pub fn new(match_id: MatchId, config: MatchConfig) -> Result<Self, ScoringError> {
        config.validate().map_err(ScoringError::InvalidConfig)?;
        let state = SessionState::fresh(config.initial_server);
        Ok(Self {
            match_id,
            config,
            state,
        })
    }

    pub fn score(&self) -> Score {
        self.state.score
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn current_server(&self) -> Side {
        self.state.current_server
    }

    pub fn rally_log(&self) -> &[RallyRecord] {
        &self.state.rally_log
    }

    pub fn is_completed(&self) -> bool {
        self.state.phase == SessionPhase::Completed
    }
}

/// Outcome of a completed game, derived from the final score.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub winner: Side,
    /// `"side1-side2"`.
    pub final_score: String,
    pub margin: u32,
}

/// What a `score_point` call did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PointOutcome {
    /// Point recorded; game continues.
    Scored,
    /// Point recorded and it won the game.
    Completed(MatchResult),
    /// Game was already over; nothing changed.
    Ignored,
}
