//! Payloads the scoring screen hands to the match registry.

use crate::models::game::{MatchId, MatchStatus};
use serde::{Deserialize, Serialize};

/// `{matchId, status}`; sent once with `Live` when scoring starts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub match_id: MatchId,
    pub status: MatchStatus,
}

impl StatusUpdate {
    pub fn live(match_id: MatchId) -> Self {
        Self {
            match_id,
            status: MatchStatus::Live,
        }
    }
}

/// `{matchId, score: "s1-s2", winner: <name>}`; sent once when the operator submits a
/// finished game.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSubmission {
    pub match_id: MatchId,
    pub score: String,
    pub winner: String,
}
