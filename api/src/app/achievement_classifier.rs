//! Achievement classifier
//!
//! Derives the complete set of achievements a player currently holds from
//! their whole match history. Nothing is carried between calls: the same
//! input always yields the same set, and persisting the result is an
//! insert-if-absent per badge.

use std::collections::HashMap;

use chrono::{NaiveDate, Timelike};
use chrono_tz::Tz;

use crate::app::elo_config::{
    RATING_THRESHOLD_1100, RATING_THRESHOLD_1200, RATING_THRESHOLD_1300, UPSET_MARGIN,
};
use crate::domain::entities::{AchievementId, AchievementSet, Match, PlayerId, RatingSnapshot};
use crate::error::DomainError;

/// First local hour of the working day (inclusive)
pub const WORK_DAY_START_HOUR: u32 = 9;

/// Local hour at which the working day ends (exclusive)
pub const WORK_DAY_END_HOUR: u32 = 17;

/// Distinct opponents needed for "Social Butterfly"
pub const DISTINCT_OPPONENTS: usize = 5;

/// Running statistics against one opponent during a single scan
#[derive(Debug, Default)]
struct HeadToHead {
    played: u32,
    lost: u32,
    /// Day of the current same-day win run
    win_day: Option<NaiveDate>,
    day_wins: u32,
}

/// State carried across one forward pass over a history
#[derive(Debug, Default)]
struct HistoryScan {
    played: u32,
    last_day: Option<NaiveDate>,
    matches_today: u32,
    day_streak: u32,
    win_streak: u32,
    loss_streak: u32,
    head_to_head: HashMap<PlayerId, HeadToHead>,
}

impl HistoryScan {
    fn observe(&mut self, player_id: PlayerId, m: &Match, tz: Tz, earned: &mut AchievementSet) {
        let local = m.played_at.with_timezone(&tz);
        let day = local.date_naive();

        self.played += 1;
        if let Some(badge) = milestone_badge(self.played) {
            earned.insert(badge);
        }

        match self.last_day {
            Some(previous) if previous == day => {
                self.matches_today += 1;
                match self.matches_today {
                    5 => earned.insert(AchievementId::Play5InADay),
                    10 => earned.insert(AchievementId::Play10InADay),
                    _ => {}
                }
            }
            previous => {
                self.matches_today = 1;
                self.day_streak = match previous.and_then(|p| p.succ_opt()) {
                    Some(next_day) if next_day == day => self.day_streak + 1,
                    _ => 1,
                };
                match self.day_streak {
                    3 => earned.insert(AchievementId::PlayStreak3Days),
                    5 => earned.insert(AchievementId::PlayStreak5Days),
                    _ => {}
                }
            }
        }
        self.last_day = Some(day);

        let won = m.won_by(player_id);
        if won {
            self.loss_streak = 0;
            self.win_streak += 1;
            match self.win_streak {
                5 => earned.insert(AchievementId::WinStreak5),
                10 => earned.insert(AchievementId::WinStreak10),
                15 => earned.insert(AchievementId::WinStreak15),
                _ => {}
            }
            if let Some(badge) = m.scoreline().and_then(winning_scoreline_badge) {
                earned.insert(badge);
            }
        } else {
            self.win_streak = 0;
            self.loss_streak += 1;
            if self.loss_streak == 5 {
                earned.insert(AchievementId::LoseStreak5);
            }
            if m.scoreline() == Some((12, 10)) {
                earned.insert(AchievementId::Lose10To12);
            }
        }

        let h2h = self
            .head_to_head
            .entry(m.opponent_of(player_id))
            .or_default();
        h2h.played += 1;
        if h2h.played == 25 {
            earned.insert(AchievementId::PlayOpponent25);
        }
        if won {
            if h2h.win_day == Some(day) {
                h2h.day_wins += 1;
            } else {
                h2h.win_day = Some(day);
                h2h.day_wins = 1;
            }
            match h2h.day_wins {
                3 => earned.insert(AchievementId::DailyWinStreakVsOpponent3),
                5 => earned.insert(AchievementId::DailyWinStreakVsOpponent5),
                _ => {}
            }
        } else {
            h2h.win_day = Some(day);
            h2h.day_wins = 0;
            h2h.lost += 1;
            if h2h.lost == 15 {
                earned.insert(AchievementId::LoseToOpponent15);
            }
        }

        let hour = local.hour();
        if !(WORK_DAY_START_HOUR..WORK_DAY_END_HOUR).contains(&hour) {
            earned.insert(AchievementId::PlayOutsideWorkHours);
        }
    }
}

fn milestone_badge(played: u32) -> Option<AchievementId> {
    match played {
        1 => Some(AchievementId::Play1),
        10 => Some(AchievementId::Play10),
        50 => Some(AchievementId::Play50),
        100 => Some(AchievementId::Play100),
        250 => Some(AchievementId::Play250),
        500 => Some(AchievementId::Play500),
        _ => None,
    }
}

fn winning_scoreline_badge((winner_score, loser_score): (u8, u8)) -> Option<AchievementId> {
    match (winner_score, loser_score) {
        (11, 0) => Some(AchievementId::Win11To0),
        (11, 1) => Some(AchievementId::Win11To1),
        (12, 10) => Some(AchievementId::Win12To10),
        (w, _) if w >= 15 => Some(AchievementId::WinWith15Plus),
        _ => None,
    }
}

/// Classifies match histories in a fixed reference timezone
#[derive(Debug, Clone, Copy)]
pub struct AchievementClassifier {
    timezone: Tz,
}

impl AchievementClassifier {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Derive every achievement `player_id` currently holds.
    ///
    /// `history` must be oldest first and include `last_match`. The rating
    /// snapshots are the ones produced by the rating update for
    /// `last_match`. An empty history yields an empty set.
    pub fn classify(
        &self,
        player_id: PlayerId,
        history: &[Match],
        last_match: &Match,
        pre_match: &RatingSnapshot,
        post_match: &RatingSnapshot,
    ) -> Result<AchievementSet, DomainError> {
        let mut earned = AchievementSet::new();
        if history.is_empty() {
            return Ok(earned);
        }

        let mut scan = HistoryScan::default();
        for m in history.iter().filter(|m| m.involves(player_id)) {
            scan.observe(player_id, m, self.timezone, &mut earned);
        }

        if scan.head_to_head.len() >= DISTINCT_OPPONENTS {
            earned.insert(AchievementId::Play5Opponents);
        }

        rating_badges(player_id, last_match, pre_match, post_match, &mut earned)?;

        Ok(earned)
    }
}

fn rating_badges(
    player_id: PlayerId,
    last_match: &Match,
    pre_match: &RatingSnapshot,
    post_match: &RatingSnapshot,
    earned: &mut AchievementSet,
) -> Result<(), DomainError> {
    let lookup = |snapshot: &RatingSnapshot, id: PlayerId| {
        snapshot.get(id).ok_or(DomainError::MissingRatingEntry(id))
    };

    let winner_before = lookup(pre_match, last_match.winner_id)?;
    let loser_before = lookup(pre_match, last_match.loser_id)?;
    let rating_after = lookup(post_match, player_id)?;

    if last_match.won_by(player_id) && loser_before - winner_before >= UPSET_MARGIN {
        earned.insert(AchievementId::UpsetWin100);
    }

    for (threshold, badge) in [
        (RATING_THRESHOLD_1100, AchievementId::ReachRating1100),
        (RATING_THRESHOLD_1200, AchievementId::ReachRating1200),
        (RATING_THRESHOLD_1300, AchievementId::ReachRating1300),
    ] {
        if rating_after >= threshold {
            earned.insert(badge);
        }
    }

    Ok(())
}
