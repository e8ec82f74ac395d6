//! Head-to-head statistics
//!
//! Summarises every match between two players. Win probabilities are filled in
//! by the caller from current ratings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{Match, MatchId, PlayerId};

/// Most recent matches returned with a head-to-head summary
pub const RECENT_HEAD_TO_HEAD_MATCHES: usize = 30;

/// One player's side of a head-to-head summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideStats {
    pub player_id: PlayerId,
    pub matches_won: u32,
    /// Points scored in matches where that player's score was recorded
    pub total_points: u32,
    /// `total_points` over the number of fully scored matches
    pub avg_points_per_match: f64,
    pub longest_win_streak: u32,
    pub win_probability: f64,
}

impl SideStats {
    fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            matches_won: 0,
            total_points: 0,
            avg_points_per_match: 0.0,
            longest_win_streak: 0,
            win_probability: 0.0,
        }
    }
}

/// A fully scored match singled out by the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scoreline {
    pub match_id: MatchId,
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub winner_score: u8,
    pub loser_score: u8,
}

impl Scoreline {
    fn margin(&self) -> i32 {
        i32::from(self.winner_score) - i32::from(self.loser_score)
    }

    fn points(&self) -> u32 {
        u32::from(self.winner_score) + u32::from(self.loser_score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHead {
    pub player_a: SideStats,
    pub player_b: SideStats,
    pub total_matches: usize,
    pub first_played_at: Option<DateTime<Utc>>,
    /// Mean winning margin over fully scored matches
    pub avg_score_differential: f64,
    /// Largest winning margin; the newest one wins ties
    pub biggest_blowout: Option<Scoreline>,
    /// Most combined points; the newest one wins ties
    pub most_competitive: Option<Scoreline>,
    pub recent_matches: Vec<Match>,
}

impl HeadToHead {
    /// Tally `matches` (newest first) between `a` and `b`.
    ///
    /// Matches involving anyone else are ignored.
    pub fn tally(a: PlayerId, b: PlayerId, matches: &[Match]) -> Self {
        let mut side_a = SideStats::new(a);
        let mut side_b = SideStats::new(b);
        let (mut streak_a, mut streak_b) = (0u32, 0u32);
        let mut scored = 0u32;
        let mut margin_sum = 0i64;
        let mut biggest_blowout: Option<Scoreline> = None;
        let mut most_competitive: Option<Scoreline> = None;

        let between: Vec<&Match> = matches
            .iter()
            .filter(|m| m.involves(a) && m.opponent_of(a) == b && a != b)
            .collect();

        for m in &between {
            let (winner, loser, winner_streak, loser_streak) = if m.won_by(a) {
                (&mut side_a, &mut side_b, &mut streak_a, &mut streak_b)
            } else {
                (&mut side_b, &mut side_a, &mut streak_b, &mut streak_a)
            };

            winner.matches_won += 1;
            winner.total_points += m.winner_score.map_or(0, u32::from);
            loser.total_points += m.loser_score.map_or(0, u32::from);

            // streak length is the same read in either direction
            *winner_streak += 1;
            *loser_streak = 0;
            winner.longest_win_streak = winner.longest_win_streak.max(*winner_streak);

            let Some((winner_score, loser_score)) = m.scoreline() else {
                continue;
            };
            let line = Scoreline {
                match_id: m.id,
                winner_id: m.winner_id,
                loser_id: m.loser_id,
                winner_score,
                loser_score,
            };
            scored += 1;
            margin_sum += i64::from(line.margin());

            if biggest_blowout.map_or(true, |best| line.margin() > best.margin()) {
                biggest_blowout = Some(line);
            }
            if most_competitive.map_or(true, |best| line.points() > best.points()) {
                most_competitive = Some(line);
            }
        }

        let avg_score_differential = if scored > 0 {
            let count = f64::from(scored);
            side_a.avg_points_per_match = f64::from(side_a.total_points) / count;
            side_b.avg_points_per_match = f64::from(side_b.total_points) / count;
            margin_sum as f64 / count
        } else {
            0.0
        };

        Self {
            player_a: side_a,
            player_b: side_b,
            total_matches: between.len(),
            first_played_at: between.last().map(|m| m.played_at),
            avg_score_differential,
            biggest_blowout,
            most_competitive,
            recent_matches: between
                .iter()
                .take(RECENT_HEAD_TO_HEAD_MATCHES)
                .map(|m| (*m).clone())
                .collect(),
        }
    }
}
