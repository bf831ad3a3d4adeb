//! Scheduled match record: who plays, under what point goal, and its status/result.

use crate::models::config::MatchConfig;
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match. Also the key of its scoring session.
pub type MatchId = Uuid;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    #[default]
    Singles,
    Doubles,
}

/// Status as shown on the match list. Transitions Upcoming → Live → Completed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Live,
    Completed,
}

/// A scheduled match between two sides.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: MatchId,
    pub kind: MatchKind,
    /// Side 1 display name (player, or team name in doubles).
    pub player1: String,
    pub player2: String,
    /// Registered player behind side 1, if any. Stats are only kept for linked players.
    pub player1_id: Option<PlayerId>,
    pub player2_id: Option<PlayerId>,
    pub scheduled_at: DateTime<Utc>,
    pub point_goal: u32,
    #[serde(default)]
    pub description: String,
    pub status: MatchStatus,
    /// Winner's display name once completed.
    pub winner: Option<String>,
    /// Final `"side1-side2"` score once completed.
    pub score: Option<String>,
    pub margin: Option<u32>,
}

impl MatchRecord {
    pub fn new(
        kind: MatchKind,
        player1: impl Into<String>,
        player2: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        point_goal: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            player1: player1.into(),
            player2: player2.into(),
            player1_id: None,
            player2_id: None,
            scheduled_at,
            point_goal,
            description: String::new(),
            status: MatchStatus::Upcoming,
            winner: None,
            score: None,
            margin: None,
        }
    }

    /// Scoring rules for this match (cap derived from the point goal).
    pub fn scoring_config(&self) -> MatchConfig {
        MatchConfig::new(self.player1.clone(), self.player2.clone(), self.point_goal)
    }

    /// Whether `player_id` plays on either side.
    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.player1_id == Some(player_id) || self.player2_id == Some(player_id)
    }
}
