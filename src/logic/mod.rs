//! Business logic: live scoring, the scoring engine, league bookkeeping, exports.

mod engine;
mod export;
mod league;
mod scoring;

pub use engine::RallyScoringEngine;
pub use export::rally_log_csv;
pub use league::{
    apply_result, apply_status_update, best_match, matches_for_player, parse_score, rank_of,
    rankings, upcoming, BestMatch, Ranking,
};
pub use scoring::{
    compute_result, next_server, rebuild_session, restore_session, result_submission,
    score_point, start_match, undo_last_rally, winner_at,
};
