//! Achievement domain entity
//!
//! Achievements are badges derived from a player's full match history.
//! The integer code of every variant is part of the storage and wire
//! contract: codes are listed explicitly in [`AchievementId::code`] and must
//! never be renumbered or reused.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::player::PlayerId;

/// Identifier of an achievement badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AchievementId {
    // Cumulative play milestones
    Play1,
    Play10,
    Play50,
    Play100,
    Play250,
    Play500,

    // Exact scorelines
    Win11To0,
    Win11To1,
    Win12To10,
    WinWith15Plus,
    Lose10To12,

    // Win / loss streaks
    WinStreak5,
    WinStreak10,
    WinStreak15,
    LoseStreak5,

    // Head-to-head
    DailyWinStreakVsOpponent3,
    DailyWinStreakVsOpponent5,
    LoseToOpponent15,
    PlayOpponent25,
    Play5Opponents,

    // Calendar
    Play5InADay,
    Play10InADay,
    PlayOutsideWorkHours,
    PlayStreak3Days,
    PlayStreak5Days,

    // Rating
    UpsetWin100,
    ReachRating1100,
    ReachRating1200,
    ReachRating1300,
}

impl AchievementId {
    /// Every achievement, in code order
    pub const ALL: [AchievementId; 29] = [
        AchievementId::Play1,
        AchievementId::Play10,
        AchievementId::Play50,
        AchievementId::Play100,
        AchievementId::Play250,
        AchievementId::Play500,
        AchievementId::Win11To0,
        AchievementId::Win11To1,
        AchievementId::Win12To10,
        AchievementId::WinWith15Plus,
        AchievementId::Lose10To12,
        AchievementId::WinStreak5,
        AchievementId::WinStreak10,
        AchievementId::WinStreak15,
        AchievementId::LoseStreak5,
        AchievementId::DailyWinStreakVsOpponent3,
        AchievementId::DailyWinStreakVsOpponent5,
        AchievementId::LoseToOpponent15,
        AchievementId::PlayOpponent25,
        AchievementId::Play5Opponents,
        AchievementId::Play5InADay,
        AchievementId::Play10InADay,
        AchievementId::PlayOutsideWorkHours,
        AchievementId::PlayStreak3Days,
        AchievementId::PlayStreak5Days,
        AchievementId::UpsetWin100,
        AchievementId::ReachRating1100,
        AchievementId::ReachRating1200,
        AchievementId::ReachRating1300,
    ];

    /// Stable storage / wire code
    pub const fn code(self) -> i32 {
        match self {
            AchievementId::Play1 => 1,
            AchievementId::Play10 => 2,
            AchievementId::Play50 => 3,
            AchievementId::Play100 => 4,
            AchievementId::Play250 => 5,
            AchievementId::Play500 => 6,
            AchievementId::Win11To0 => 7,
            AchievementId::Win11To1 => 8,
            AchievementId::Win12To10 => 9,
            AchievementId::WinWith15Plus => 10,
            AchievementId::Lose10To12 => 11,
            AchievementId::WinStreak5 => 12,
            AchievementId::WinStreak10 => 13,
            AchievementId::WinStreak15 => 14,
            AchievementId::LoseStreak5 => 15,
            AchievementId::DailyWinStreakVsOpponent3 => 16,
            AchievementId::DailyWinStreakVsOpponent5 => 17,
            AchievementId::LoseToOpponent15 => 18,
            AchievementId::PlayOpponent25 => 19,
            AchievementId::Play5Opponents => 20,
            AchievementId::Play5InADay => 21,
            AchievementId::Play10InADay => 22,
            AchievementId::PlayOutsideWorkHours => 23,
            AchievementId::PlayStreak3Days => 24,
            AchievementId::PlayStreak5Days => 25,
            AchievementId::UpsetWin100 => 26,
            AchievementId::ReachRating1100 => 27,
            AchievementId::ReachRating1200 => 28,
            AchievementId::ReachRating1300 => 29,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.code() == code)
    }

    pub const fn title(self) -> &'static str {
        match self {
            AchievementId::Play1 => "Warming Up",
            AchievementId::Play10 => "Minimum Viable Pong",
            AchievementId::Play50 => "Regular",
            AchievementId::Play100 => "Centurion",
            AchievementId::Play250 => "Legend",
            AchievementId::Play500 => "Unicorn",
            AchievementId::Win11To0 => "Chocolate",
            AchievementId::Win11To1 => "Bottle Job",
            AchievementId::Win12To10 => "Clutch",
            AchievementId::WinWith15Plus => "Marathon Madness",
            AchievementId::Lose10To12 => "Heartbreaker",
            AchievementId::WinStreak5 => "Streaky",
            AchievementId::WinStreak10 => "Unstoppable",
            AchievementId::WinStreak15 => "Immortal",
            AchievementId::LoseStreak5 => "Knocked Down",
            AchievementId::DailyWinStreakVsOpponent3 => "Hat Trick",
            AchievementId::DailyWinStreakVsOpponent5 => "Brutal",
            AchievementId::LoseToOpponent15 => "Nemesis",
            AchievementId::PlayOpponent25 => "Rivalry",
            AchievementId::Play5Opponents => "Social Butterfly",
            AchievementId::Play5InADay => "Daily Standup",
            AchievementId::Play10InADay => "Do You Even Work Here?",
            AchievementId::PlayOutsideWorkHours => "Go Home",
            AchievementId::PlayStreak3Days => "Dedicated",
            AchievementId::PlayStreak5Days => "Addicted",
            AchievementId::UpsetWin100 => "Hostile Takeover",
            AchievementId::ReachRating1100 => "Rising Star",
            AchievementId::ReachRating1200 => "Big Shot",
            AchievementId::ReachRating1300 => "Final Boss",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            AchievementId::Play1 => "Play your first match",
            AchievementId::Play10 => "Play 10 matches",
            AchievementId::Play50 => "Play 50 matches",
            AchievementId::Play100 => "Play 100 matches",
            AchievementId::Play250 => "Play 250 matches",
            AchievementId::Play500 => "Play 500 matches",
            AchievementId::Win11To0 => "Win a match 11-0",
            AchievementId::Win11To1 => "Win a match 11-1",
            AchievementId::Win12To10 => "Win a match 12-10",
            AchievementId::WinWith15Plus => "Win a match scoring 15 or more points",
            AchievementId::Lose10To12 => "Lose a match 10-12",
            AchievementId::WinStreak5 => "Win 5 matches in a row",
            AchievementId::WinStreak10 => "Win 10 matches in a row",
            AchievementId::WinStreak15 => "Win 15 matches in a row",
            AchievementId::LoseStreak5 => "Lose 5 matches in a row",
            AchievementId::DailyWinStreakVsOpponent3 => {
                "Beat the same opponent 3 times in a row on one day"
            }
            AchievementId::DailyWinStreakVsOpponent5 => {
                "Beat the same opponent 5 times in a row on one day"
            }
            AchievementId::LoseToOpponent15 => "Lose 15 matches to the same opponent",
            AchievementId::PlayOpponent25 => "Play 25 matches against the same opponent",
            AchievementId::Play5Opponents => "Play against 5 different opponents",
            AchievementId::Play5InADay => "Play 5 matches in one day",
            AchievementId::Play10InADay => "Play 10 matches in one day",
            AchievementId::PlayOutsideWorkHours => "Play a match before 9am or after 5pm",
            AchievementId::PlayStreak3Days => "Play on 3 consecutive days",
            AchievementId::PlayStreak5Days => "Play on 5 consecutive days",
            AchievementId::UpsetWin100 => "Beat an opponent rated at least 100 points above you",
            AchievementId::ReachRating1100 => "Reach a rating of 1100",
            AchievementId::ReachRating1200 => "Reach a rating of 1200",
            AchievementId::ReachRating1300 => "Reach a rating of 1300",
        }
    }
}

impl TryFrom<i32> for AchievementId {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("Unknown achievement code: {}", code))
    }
}

impl std::fmt::Display for AchievementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for AchievementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for AchievementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i32::deserialize(deserializer)?;
        AchievementId::try_from(code).map_err(serde::de::Error::custom)
    }
}

/// Catalogue entry for an achievement
#[derive(Debug, Clone, Serialize)]
pub struct AchievementInfo {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
}

impl From<AchievementId> for AchievementInfo {
    fn from(id: AchievementId) -> Self {
        Self {
            id,
            title: id.title(),
            description: id.description(),
        }
    }
}

/// The complete achievement catalogue
pub fn catalogue() -> Vec<AchievementInfo> {
    AchievementId::ALL.iter().copied().map(Into::into).collect()
}

/// A badge held by a player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAchievement {
    pub player_id: PlayerId,
    pub achievement_id: AchievementId,
    /// When the match that first earned the badge was played
    pub earned_at: DateTime<Utc>,
}

/// The set of achievements currently earned by a player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AchievementSet(BTreeSet<AchievementId>);

impl AchievementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: AchievementId) {
        self.0.insert(id);
    }

    pub fn contains(&self, id: AchievementId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AchievementId> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<AchievementId> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<AchievementId> for AchievementSet {
    fn from_iter<I: IntoIterator<Item = AchievementId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
