//! Generation and gender rollups.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::models::{Gender, Member, ScoreRecord};

use super::ordering::round1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CohortKey {
    Generation,
    Gender,
}

impl CohortKey {
    pub fn of(&self, member: &Member) -> CohortId {
        match self {
            CohortKey::Generation => CohortId::Generation(member.generation),
            CohortKey::Gender => CohortId::Gender(member.gender),
        }
    }
}

/// The value members were grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "snake_case")]
pub enum CohortId {
    Generation(u32),
    Gender(Gender),
}

impl std::fmt::Display for CohortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CohortId::Generation(g) => write!(f, "{}기", g),
            CohortId::Gender(g) => write!(f, "{}", g),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CohortRollup {
    pub key: CohortId,
    pub member_count: usize,
    /// Members of the cohort with at least one record.
    pub active_member_count: usize,
    /// Score records belonging to the cohort's members.
    pub participation_count: usize,
    pub average_score: Option<f64>,
    /// Records per member, one decimal.
    pub participation_rate: f64,
}

#[derive(Default)]
struct CohortAcc {
    member_count: usize,
    participation_count: usize,
    total_score: f64,
    active: HashSet<i64>,
}

/// Group members by `key`, join their scores, and summarise each cohort.
///
/// Cohorts whose members never played are listed with no average. Cohorts
/// with fewer than `min_records` records are dropped (0 keeps everything).
/// Records of unknown members are ignored. Output is ordered by key.
pub fn cohort_rollup(
    members: &[Member],
    scores: &[ScoreRecord],
    key: CohortKey,
    min_records: usize,
) -> Vec<CohortRollup> {
    let mut cohorts: BTreeMap<CohortId, CohortAcc> = BTreeMap::new();
    let mut member_cohort: HashMap<i64, CohortId> = HashMap::new();

    for member in members {
        let id = key.of(member);
        cohorts.entry(id).or_default().member_count += 1;
        member_cohort.entry(member.id).or_insert(id);
    }

    for record in scores {
        let Some(id) = member_cohort.get(&record.member_id) else {
            continue;
        };
        if let Some(acc) = cohorts.get_mut(id) {
            acc.participation_count += 1;
            acc.total_score += record.score;
            acc.active.insert(record.member_id);
        }
    }

    cohorts
        .into_iter()
        .filter(|(_, acc)| acc.participation_count >= min_records)
        .map(|(key, acc)| {
            let average_score = if acc.participation_count > 0 {
                Some(round1(acc.total_score / acc.participation_count as f64))
            } else {
                None
            };
            CohortRollup {
                key,
                member_count: acc.member_count,
                active_member_count: acc.active.len(),
                participation_count: acc.participation_count,
                average_score,
                participation_rate: round1(acc.participation_count as f64 / acc.member_count as f64),
            }
        })
        .collect()
}
