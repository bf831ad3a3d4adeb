//! Data structures: sides and scores, scoring sessions, players, matches, league.

mod config;
mod game;
mod league;
mod payload;
mod player;
mod rally;
mod session;
mod side;

pub use config::{default_cap_score, GameFormat, MatchConfig, DEFAULT_LONG_FORMAT_CUTOFF};
pub use game::{MatchId, MatchKind, MatchRecord, MatchStatus};
pub use league::{League, LeagueError, NewMatch};
pub use payload::{ResultSubmission, StatusUpdate};
pub use player::{Player, PlayerId, PlayerProfile, PlayerStats};
pub use rally::RallyRecord;
pub use session::{
    MatchResult, PointOutcome, ScoringError, ScoringSession, SessionPhase, SessionState,
};
pub use side::{Score, Side};
