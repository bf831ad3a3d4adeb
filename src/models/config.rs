//! MatchConfig: the fixed rules one scoring session is played under.

use crate::models::side::Side;
use serde::{Deserialize, Serialize};

/// Games with a point goal at or above this use long-format server rotation.
pub const DEFAULT_LONG_FORMAT_CUTOFF: u32 = 21;

/// Which server-rotation regime a game follows.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameFormat {
    /// Server moves every two points, and every point at deuce.
    Long,
    /// Server is always the side that won the last rally.
    Short,
}

/// Cap for a point goal when none is given: 21 → 30, 11 → 15, anything else goal + 9.
pub fn default_cap_score(point_goal: u32) -> u32 {
    match point_goal {
        21 => 30,
        11 => 15,
        goal => goal.saturating_add(9),
    }
}

/// Rules for a single game. Immutable for the lifetime of a scoring session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchConfig {
    pub player1_name: String,
    pub player2_name: String,
    pub point_goal: u32,
    /// Hard ceiling; reaching it wins regardless of margin.
    pub cap_score: u32,
    #[serde(default = "default_long_format_cutoff")]
    pub long_format_cutoff: u32,
    #[serde(default)]
    pub initial_server: Side,
}

fn default_long_format_cutoff() -> u32 {
    DEFAULT_LONG_FORMAT_CUTOFF
}

impl MatchConfig {
    /// Config with the cap derived from `point_goal` and Side1 serving first.
    pub fn new(
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
        point_goal: u32,
    ) -> Self {
        Self {
            player1_name: player1_name.into(),
            player2_name: player2_name.into(),
            point_goal,
            cap_score: default_cap_score(point_goal),
            long_format_cutoff: DEFAULT_LONG_FORMAT_CUTOFF,
            initial_server: Side::Side1,
        }
    }

    pub fn with_cap_score(mut self, cap_score: u32) -> Self {
        self.cap_score = cap_score;
        self
    }

    pub fn with_long_format_cutoff(mut self, cutoff: u32) -> Self {
        self.long_format_cutoff = cutoff;
        self
    }

    pub fn with_initial_server(mut self, side: Side) -> Self {
        self.initial_server = side;
        self
    }

    pub fn format(&self) -> GameFormat {
        if self.point_goal >= self.long_format_cutoff {
            GameFormat::Long
        } else {
            GameFormat::Short
        }
    }

    /// Score at which both sides are level on game point (20 in a 21-point game).
    pub fn deuce_threshold(&self) -> u32 {
        self.point_goal.saturating_sub(1)
    }

    /// Display name of the player or team on `side`.
    pub fn player_name(&self, side: Side) -> &str {
        match side {
            Side::Side1 => &self.player1_name,
            Side::Side2 => &self.player2_name,
        }
    }

    /// Check the goal and cap are usable. Returns a reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.point_goal == 0 {
            return Err("point goal must be positive".to_string());
        }
        if self.cap_score < self.point_goal {
            return Err(format!(
                "cap score {} is below point goal {}",
                self.cap_score, self.point_goal
            ));
        }
        Ok(())
    }
}
