//! Player and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// Career counters, updated when a match result is applied.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub singles: u32,
    pub wins: u32,
    pub losses: u32,
    /// Sum of points scored across all completed matches. Rankings sort on this.
    pub total_points: u32,
}

impl PlayerStats {
    /// Wins as a percentage of played matches (0 when none played).
    pub fn win_rate(&self) -> f64 {
        let played = self.wins + self.losses;
        if played == 0 {
            0.0
        } else {
            f64::from(self.wins) * 100.0 / f64::from(played)
        }
    }
}

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Unique handle (case-insensitive).
    pub username: String,
    pub stats: PlayerStats,
}

impl Player {
    /// Create a new player. Stats start at zero.
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            username: username.into(),
            stats: PlayerStats::default(),
        }
    }

    /// Record a won singles match worth `points` to this player.
    pub fn add_win(&mut self, points: u32) {
        self.stats.wins += 1;
        self.stats.singles += 1;
        self.stats.total_points += points;
    }

    /// Record a lost singles match in which this player scored `points`.
    pub fn add_loss(&mut self, points: u32) {
        self.stats.losses += 1;
        self.stats.singles += 1;
        self.stats.total_points += points;
    }
}

/// A player as returned to clients, with the derived win rate alongside the stored fields.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile<'a> {
    #[serde(flatten)]
    pub player: &'a Player,
    pub win_rate: f64,
}

impl<'a> From<&'a Player> for PlayerProfile<'a> {
    fn from(player: &'a Player) -> Self {
        Self {
            player,
            win_rate: player.stats.win_rate(),
        }
    }
}
