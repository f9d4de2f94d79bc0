//! Overall, generation and recent-form rank tables.
//!
//! The index is rebuilt from scratch whenever the dataset changes; there is
//! no incremental update. `RankingCache` keeps the last build keyed by the
//! dataset revision.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::engine::{mean_score, rank, recent_mean, EngineError, RankPosition, RankedEntry};
use crate::models::{Member, ScoreRecord};
use crate::store::Dataset;

/// A member's three ranks. Members who never played are unranked (rank 0)
/// in all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RankEntry {
    pub member_id: i64,
    pub overall: RankPosition,
    /// Rank within the member's generation.
    pub cohort: RankPosition,
    pub recent_form: RankPosition,
}

#[derive(Debug, Clone, Default)]
pub struct RankingIndex {
    overall: Vec<RankedEntry>,
    recent_form: Vec<RankedEntry>,
    by_generation: BTreeMap<u32, Vec<RankedEntry>>,
    generation_of: HashMap<i64, u32>,
    recent_window: usize,
}

impl RankingIndex {
    /// Rank every member with at least one record by average score and by
    /// the average of their `recent_window` latest meetings, lower first.
    /// Entries carry the unrounded means; only exact ties keep directory
    /// order.
    pub fn build(
        members: &[Member],
        scores: &[ScoreRecord],
        recent_window: usize,
    ) -> Result<Self, EngineError> {
        let mut index = RankingIndex {
            recent_window,
            ..Default::default()
        };

        for member in members {
            index.generation_of.entry(member.id).or_insert(member.generation);

            let Some(average) = mean_score(scores, member.id) else {
                continue;
            };
            let entry = RankedEntry {
                member_id: member.id,
                value: average,
            };
            index.overall.push(entry);
            index
                .by_generation
                .entry(member.generation)
                .or_default()
                .push(entry);

            if let Some(recent) = recent_mean(scores, member.id, recent_window)? {
                index.recent_form.push(RankedEntry {
                    member_id: member.id,
                    value: recent,
                });
            }
        }

        RankedEntry::sort_best_first(&mut index.overall);
        RankedEntry::sort_best_first(&mut index.recent_form);
        for entries in index.by_generation.values_mut() {
            RankedEntry::sort_best_first(entries);
        }

        debug!(
            ranked = index.overall.len(),
            generations = index.by_generation.len(),
            recent_window,
            "Built ranking index"
        );
        Ok(index)
    }

    pub fn from_dataset(dataset: &Dataset, recent_window: usize) -> Result<Self, EngineError> {
        Self::build(&dataset.members, &dataset.scores, recent_window)
    }

    pub fn entry(&self, member_id: i64) -> RankEntry {
        let cohort = match self.generation_of.get(&member_id) {
            Some(generation) => self.generation_position(*generation, member_id),
            None => RankPosition::unranked(0),
        };

        RankEntry {
            member_id,
            overall: rank(&self.overall, member_id),
            cohort,
            recent_form: rank(&self.recent_form, member_id),
        }
    }

    fn generation_position(&self, generation: u32, member_id: i64) -> RankPosition {
        match self.by_generation.get(&generation) {
            Some(entries) => rank(entries, member_id),
            None => RankPosition::unranked(0),
        }
    }

    pub fn overall(&self) -> &[RankedEntry] {
        &self.overall
    }

    pub fn recent_form(&self) -> &[RankedEntry] {
        &self.recent_form
    }

    pub fn generation(&self, generation: u32) -> &[RankedEntry] {
        self.by_generation
            .get(&generation)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn recent_window(&self) -> usize {
        self.recent_window
    }
}

/// Holds the latest index and rebuilds it when handed a newer dataset.
#[derive(Debug, Default)]
pub struct RankingCache {
    built: Option<(u64, usize, RankingIndex)>,
}

impl RankingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, dataset: &Dataset, recent_window: usize) -> Result<&RankingIndex, EngineError> {
        let built = match self.built.take() {
            Some(built) if built.0 == dataset.revision && built.1 == recent_window => built,
            _ => (
                dataset.revision,
                recent_window,
                RankingIndex::from_dataset(dataset, recent_window)?,
            ),
        };
        Ok(&self.built.insert(built).2)
    }

    pub fn revision(&self) -> Option<u64> {
        self.built.as_ref().map(|(revision, _, _)| *revision)
    }

    pub fn invalidate(&mut self) {
        self.built = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn member(id: i64, generation: u32) -> Member {
        Member {
            id,
            name: format!("m{}", id),
            generation,
            gender: Gender::Male,
            phone: String::new(),
        }
    }

    fn fixture() -> (Vec<Member>, Vec<ScoreRecord>) {
        let members = vec![member(1, 10), member(2, 10), member(3, 11), member(4, 11)];
        let mut scores = Vec::new();
        // member 1: steady 90s
        for meeting in 1..=6 {
            scores.push(ScoreRecord::new(1, meeting, 90.0));
        }
        // member 2: poor start, strong recent form
        for (meeting, score) in [(1, 110.0), (2, 108.0), (3, 85.0), (4, 84.0), (5, 83.0), (6, 82.0)] {
            scores.push(ScoreRecord::new(2, meeting, score));
        }
        // member 3: best average
        scores.push(ScoreRecord::new(3, 2, 80.0));
        // member 4 never played
        (members, scores)
    }

    #[test]
    fn test_overall_and_cohort_ranks() {
        let (members, scores) = fixture();
        let index = RankingIndex::build(&members, &scores, 5).unwrap();

        let e3 = index.entry(3);
        assert_eq!(e3.overall, RankPosition { rank: 1, total: 3, percentile: Some(100) });
        assert_eq!(e3.cohort, RankPosition { rank: 1, total: 1, percentile: Some(100) });

        // member 1 average 90.0, member 2 average 92.0
        let e1 = index.entry(1);
        assert_eq!(e1.overall.rank, 2);
        assert_eq!(e1.cohort.rank, 1);
        assert_eq!(index.entry(2).cohort.rank, 2);
    }

    #[test]
    fn test_recent_form_rank() {
        let (members, scores) = fixture();
        let index = RankingIndex::build(&members, &scores, 4).unwrap();
        // member 2's last four: 85, 84, 83, 82 -> 83.5
        let ids: Vec<i64> = index.recent_form().iter().map(|e| e.member_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(index.entry(2).recent_form.rank, 2);
    }

    #[test]
    fn test_non_participant_is_unranked_everywhere() {
        let (members, scores) = fixture();
        let index = RankingIndex::build(&members, &scores, 5).unwrap();
        let e4 = index.entry(4);
        assert_eq!(e4.overall, RankPosition::unranked(3));
        assert_eq!(e4.cohort, RankPosition::unranked(1));
        assert_eq!(e4.recent_form.rank, 0);

        let unknown = index.entry(99);
        assert_eq!(unknown.cohort, RankPosition::unranked(0));
        assert!(!unknown.overall.is_ranked());
    }

    #[test]
    fn test_ranks_consistent_with_order() {
        let (members, scores) = fixture();
        let index = RankingIndex::build(&members, &scores, 5).unwrap();
        for pair in index.overall().windows(2) {
            assert!(pair[0].value <= pair[1].value);
            assert!(index.entry(pair[0].member_id).overall.rank < index.entry(pair[1].member_id).overall.rank);
        }
    }

    #[test]
    fn test_close_averages_rank_by_unrounded_mean() {
        // 88.24 and 88.16 both display as 88.2
        let members = vec![member(1, 10), member(2, 10)];
        let mut scores = Vec::new();
        for (id, last) in [(1, 89.2), (2, 88.8)] {
            for meeting in 1..=4 {
                scores.push(ScoreRecord::new(id, meeting, 88.0));
            }
            scores.push(ScoreRecord::new(id, 5, last));
        }

        let index = RankingIndex::build(&members, &scores, 5).unwrap();
        assert_eq!(index.entry(2).overall.rank, 1);
        assert_eq!(index.entry(1).overall.rank, 2);
        assert_eq!(index.entry(2).cohort.rank, 1);
        assert_eq!(index.entry(2).recent_form.rank, 1);
        assert!(index.overall()[0].value < index.overall()[1].value);
    }

    #[test]
    fn test_zero_recent_window_is_invalid() {
        let (members, scores) = fixture();
        assert!(RankingIndex::build(&members, &scores, 0).is_err());
    }

    #[test]
    fn test_cache_rebuilds_on_new_revision() {
        let (members, scores) = fixture();
        let first = Dataset::new(members.clone(), scores.clone());
        let mut cache = RankingCache::new();

        assert_eq!(cache.get(&first, 5).unwrap().overall().len(), 3);
        assert_eq!(cache.revision(), Some(first.revision));

        let second = Dataset::new(members, scores[..6].to_vec());
        assert_eq!(cache.get(&second, 5).unwrap().overall().len(), 1);
        assert_eq!(cache.revision(), Some(second.revision));

        cache.invalidate();
        assert_eq!(cache.revision(), None);
    }
}
