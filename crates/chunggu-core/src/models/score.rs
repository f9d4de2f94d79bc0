use serde::{Deserialize, Serialize};

/// One member's stroke count at one meeting. Lower is better.
///
/// `member_id` is a weak reference: it may name a member that is not in the
/// directory, which consumers treat as an unknown member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ScoreRecord {
    pub member_id: i64,
    pub meeting_id: i64,
    pub score: f64,
}

impl ScoreRecord {
    pub fn new(member_id: i64, meeting_id: i64, score: f64) -> Self {
        Self {
            member_id,
            meeting_id,
            score,
        }
    }
}
