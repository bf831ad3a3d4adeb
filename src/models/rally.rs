//! RallyRecord: one entry in a session's append-only rally log.

use crate::models::side::{Score, Side};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RallyRecord {
    /// 1-based position in the log.
    pub sequence_number: u32,
    pub scoring_side: Side,
    /// Always equal to `scoring_side`: the rally winner takes the serve.
    pub serving_side: Side,
    pub side1_score: u32,
    pub side2_score: u32,
    /// Who was serving when the rally started. Missing in logs saved before it was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_before: Option<Side>,
}

impl RallyRecord {
    pub fn new(
        sequence_number: u32,
        scoring_side: Side,
        score: Score,
        server_before: Side,
    ) -> Self {
        Self {
            sequence_number,
            scoring_side,
            serving_side: scoring_side,
            side1_score: score.side1,
            side2_score: score.side2,
            server_before: Some(server_before),
        }
    }

    /// Cumulative score right after this rally.
    pub fn score(&self) -> Score {
        Score::new(self.side1_score, self.side2_score)
    }
}
