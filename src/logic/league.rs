//! Match registry updates from the scoring screen, and leaderboard queries.

use crate::models::{
    League, LeagueError, MatchRecord, MatchStatus, PlayerId, ResultSubmission,
    StatusUpdate,
};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// One leaderboard row.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub rank: usize,
    pub player_id: PlayerId,
    pub name: String,
    pub total_points: u32,
}

/// A player's widest-margin win.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BestMatch {
    pub opponent: String,
    pub score: String,
}

/// Set a match's status (e.g. Live when scoring starts). Completed matches are final, and only
/// [`apply_result`] can complete one.
pub fn apply_status_update(league: &mut League, update: &StatusUpdate) -> Result<(), LeagueError> {
    let record = league
        .get_match_mut(update.match_id)
        .ok_or(LeagueError::MatchNotFound(update.match_id))?;
    if record.status == MatchStatus::Completed {
        return Err(LeagueError::AlreadyCompleted);
    }
    if update.status == MatchStatus::Completed {
        return Err(LeagueError::CompletedWithoutResult);
    }
    record.status = update.status;
    log::info!("Match {} is now {:?}", update.match_id, update.status);
    Ok(())
}

/// Parse `"a-b"` into its two scores.
pub fn parse_score(score: &str) -> Result<(u32, u32), LeagueError> {
    let invalid = || LeagueError::InvalidScore(score.to_string());
    let (a, b) = score.split_once('-').ok_or_else(invalid)?;
    let a = a.trim().parse().map_err(|_| invalid())?;
    let b = b.trim().parse().map_err(|_| invalid())?;
    Ok((a, b))
}

/// Record a final result: score, winner, margin and status on the match, then wins, losses and
/// points on any linked players.
pub fn apply_result(league: &mut League, submission: &ResultSubmission) -> Result<(), LeagueError> {
    let (side1_points, side2_points) = parse_score(&submission.score)?;
    let record = league
        .get_match_mut(submission.match_id)
        .ok_or(LeagueError::MatchNotFound(submission.match_id))?;
    if record.status == MatchStatus::Completed {
        return Err(LeagueError::AlreadyCompleted);
    }
    let side1_won = if submission.winner == record.player1 {
        true
    } else if submission.winner == record.player2 {
        false
    } else {
        return Err(LeagueError::InvalidScore(format!(
            "{} is not playing in this match",
            submission.winner
        )));
    };
    if side1_won != (side1_points > side2_points) {
        return Err(LeagueError::InvalidScore(format!(
            "{} does not name {} as the winner",
            submission.score, submission.winner
        )));
    }

    record.score = Some(submission.score.clone());
    record.winner = Some(submission.winner.clone());
    record.margin = Some(side1_points.abs_diff(side2_points));
    record.status = MatchStatus::Completed;
    let (p1, p2) = (record.player1_id, record.player2_id);

    if let Some(player) = p1.and_then(|id| league.get_player_mut(id)) {
        if side1_won {
            player.add_win(side1_points);
        } else {
            player.add_loss(side1_points);
        }
    }
    if let Some(player) = p2.and_then(|id| league.get_player_mut(id)) {
        if side1_won {
            player.add_loss(side2_points);
        } else {
            player.add_win(side2_points);
        }
    }
    log::info!(
        "Recorded result for match {}: {} won {}",
        submission.match_id,
        submission.winner,
        submission.score
    );
    Ok(())
}

/// Players by total points, highest first. Ties are ordered by name.
pub fn rankings(league: &League) -> Vec<Ranking> {
    let mut players: Vec<_> = league.players.iter().collect();
    players.sort_by(|a, b| {
        b.stats
            .total_points
            .cmp(&a.stats.total_points)
            .then_with(|| a.name.cmp(&b.name))
    });
    players
        .into_iter()
        .enumerate()
        .map(|(i, p)| Ranking {
            rank: i + 1,
            player_id: p.id,
            name: p.name.clone(),
            total_points: p.stats.total_points,
        })
        .collect()
}

/// 1-based leaderboard position of a player.
pub fn rank_of(league: &League, player_id: PlayerId) -> Result<usize, LeagueError> {
    rankings(league)
        .into_iter()
        .find(|r| r.player_id == player_id)
        .map(|r| r.rank)
        .ok_or(LeagueError::PlayerNotFound(player_id))
}

/// The player's completed win with the largest margin, or None if they have not won yet.
pub fn best_match(league: &League, player_id: PlayerId) -> Result<Option<BestMatch>, LeagueError> {
    if league.get_player(player_id).is_none() {
        return Err(LeagueError::PlayerNotFound(player_id));
    }
    let best = league
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Completed)
        .filter_map(|m| {
            let won = |id: Option<PlayerId>, name: &String| {
                id == Some(player_id) && m.winner.as_ref() == Some(name)
            };
            let opponent = if won(m.player1_id, &m.player1) {
                &m.player2
            } else if won(m.player2_id, &m.player2) {
                &m.player1
            } else {
                return None;
            };
            Some((m, opponent))
        })
        .max_by_key(|(m, _)| m.margin.unwrap_or(0));
    Ok(best.map(|(m, opponent)| BestMatch {
        opponent: opponent.clone(),
        score: m.score.clone().unwrap_or_default(),
    }))
}

/// Matches scheduled within 24 hours either side of `now`, earliest first.
pub fn upcoming(league: &League, now: DateTime<Utc>) -> Vec<&MatchRecord> {
    let window = Duration::hours(24);
    let mut matches: Vec<_> = league
        .matches
        .iter()
        .filter(|m| m.scheduled_at >= now - window && m.scheduled_at < now + window)
        .collect();
    matches.sort_by_key(|m| m.scheduled_at);
    matches
}

/// Every match a player is linked to, most recent first.
pub fn matches_for_player(league: &League, player_id: PlayerId) -> Vec<&MatchRecord> {
    let mut matches: Vec<_> = league
        .matches
        .iter()
        .filter(|m| m.involves(player_id))
        .collect();
    matches.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
    matches
}

