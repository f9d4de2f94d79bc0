use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{Member, ScoreRecord};

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

/// An immutable, fully loaded pair of collections.
///
/// Cloning is cheap; views share the same slices. Each dataset gets a fresh
/// `revision` so derived structures can tell when they are out of date.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub members: Arc<[Member]>,
    pub scores: Arc<[ScoreRecord]>,
    pub loaded_at: DateTime<Utc>,
    pub revision: u64,
}

impl Dataset {
    pub fn new(members: Vec<Member>, scores: Vec<ScoreRecord>) -> Self {
        Self {
            members: members.into(),
            scores: scores.into(),
            loaded_at: Utc::now(),
            revision: NEXT_REVISION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// A dataset over new members that reuses an existing score slice.
    pub fn with_shared_scores(members: Vec<Member>, scores: Arc<[ScoreRecord]>) -> Self {
        Self {
            members: members.into(),
            scores,
            loaded_at: Utc::now(),
            revision: NEXT_REVISION.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.scores.is_empty()
    }

    pub fn member(&self, id: i64) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// All records of one member, in input order.
    pub fn scores_for(&self, member_id: i64) -> Vec<ScoreRecord> {
        self.scores
            .iter()
            .filter(|r| r.member_id == member_id)
            .copied()
            .collect()
    }

    /// Number of distinct meeting ids.
    pub fn meeting_count(&self) -> usize {
        self.scores
            .iter()
            .map(|r| r.meeting_id)
            .collect::<std::collections::HashSet<_>>()
            .len()
    }
}
