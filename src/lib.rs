//! SmashScore: badminton match tracking. Library with models, the live rally scoring engine,
//! session stores, and league bookkeeping.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    apply_result, apply_status_update, best_match, compute_result, matches_for_player,
    next_server, parse_score, rally_log_csv, rank_of, rankings, rebuild_session, restore_session,
    result_submission, score_point, start_match, undo_last_rally, upcoming, winner_at, BestMatch,
    RallyScoringEngine, Ranking,
};
pub use models::{
    default_cap_score, GameFormat, League, LeagueError, MatchConfig, MatchId, MatchKind,
    MatchRecord, MatchResult, MatchStatus, NewMatch, Player, PlayerId, PlayerProfile, PlayerStats,
    PointOutcome, RallyRecord, ResultSubmission, Score, ScoringError, ScoringSession, SessionPhase,
    SessionState, Side, StatusUpdate, DEFAULT_LONG_FORMAT_CUTOFF,
};
pub use store::{storage_key, JsonFileSessionStore, MemorySessionStore, SessionStore, StoreError};
