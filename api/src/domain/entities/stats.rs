//! Aggregate match counts
//!
//! Read-side summaries computed by the store rather than from a full history.

use serde::Serialize;

/// Matches played and won by one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    pub played: u64,
    pub won: u64,
}

/// Totals over every recorded match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchTotals {
    pub total_matches: u64,
    /// Sum of every recorded score, winners and losers alike
    pub total_points: u64,
}
