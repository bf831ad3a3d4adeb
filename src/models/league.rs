//! League: the registry of players and scheduled matches.

use crate::models::config::MatchConfig;
use crate::models::game::{MatchId, MatchKind, MatchRecord};
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors that can occur during league operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    MatchNotFound(MatchId),
    PlayerNotFound(PlayerId),
    /// A player with this username already exists (case-insensitive).
    DuplicateUsername,
    /// Empty name, or both sides given the same name.
    InvalidName,
    InvalidPointGoal,
    /// Submitted score is not of the form `"a-b"` or does not match the named winner.
    InvalidScore(String),
    /// Result already recorded for this match.
    AlreadyCompleted,
    /// Status update asked for Completed; only a submitted result completes a match.
    CompletedWithoutResult,
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::MatchNotFound(_) => write!(f, "Match not found"),
            LeagueError::PlayerNotFound(_) => write!(f, "Player not found"),
            LeagueError::DuplicateUsername => {
                write!(f, "A player with this username already exists")
            }
            LeagueError::InvalidName => write!(f, "Invalid player name"),
            LeagueError::InvalidPointGoal => write!(f, "Point goal must be positive"),
            LeagueError::InvalidScore(s) => write!(f, "Invalid score: {}", s),
            LeagueError::AlreadyCompleted => write!(f, "Match result already recorded"),
            LeagueError::CompletedWithoutResult => {
                write!(f, "A match is completed by submitting its result")
            }
        }
    }
}

impl std::error::Error for LeagueError {}

/// Everything needed to schedule a match.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatch {
    #[serde(default)]
    pub kind: MatchKind,
    pub player1: String,
    pub player2: String,
    #[serde(default)]
    pub player1_id: Option<PlayerId>,
    #[serde(default)]
    pub player2_id: Option<PlayerId>,
    pub scheduled_at: DateTime<Utc>,
    pub point_goal: u32,
    #[serde(default)]
    pub description: String,
}

/// All players and matches.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct League {
    pub players: Vec<Player>,
    pub matches: Vec<MatchRecord>,
}

impl League {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&MatchRecord> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut MatchRecord> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Register a player. Usernames must be unique (case-insensitive).
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        username: impl Into<String>,
    ) -> Result<PlayerId, LeagueError> {
        let name: String = name.into();
        let username: String = username.into();
        let (name, username) = (name.trim(), username.trim());
        if name.is_empty() || username.is_empty() {
            return Err(LeagueError::InvalidName);
        }
        if self
            .players
            .iter()
            .any(|p| p.username.eq_ignore_ascii_case(username))
        {
            return Err(LeagueError::DuplicateUsername);
        }
        let player = Player::new(name, username);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Add a match in Upcoming status. Linked player ids must exist.
    pub fn schedule_match(&mut self, new: NewMatch) -> Result<MatchId, LeagueError> {
        let (p1, p2) = (new.player1.trim(), new.player2.trim());
        if p1.is_empty() || p2.is_empty() || p1 == p2 {
            return Err(LeagueError::InvalidName);
        }
        if new.point_goal == 0 {
            return Err(LeagueError::InvalidPointGoal);
        }
        for id in [new.player1_id, new.player2_id].into_iter().flatten() {
            if self.get_player(id).is_none() {
                return Err(LeagueError::PlayerNotFound(id));
            }
        }
        let mut record = MatchRecord::new(new.kind, p1, p2, new.scheduled_at, new.point_goal);
        record.player1_id = new.player1_id;
        record.player2_id = new.player2_id;
        record.description = new.description;
        let id = record.id;
        self.matches.push(record);
        Ok(id)
    }

    /// Scoring rules for a scheduled match.
    pub fn match_config(&self, id: MatchId) -> Result<MatchConfig, LeagueError> {
        self.get_match(id)
            .map(MatchRecord::scoring_config)
            .ok_or(LeagueError::MatchNotFound(id))
    }
}
