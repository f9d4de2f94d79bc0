//! Pseudo-year buckets.
//!
//! The source data has no dates, so meetings are grouped into fixed-size
//! ranges of meeting ids (`ceil(meeting_id / size)`). This is a display
//! approximation, not a calendar derivation.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::ScoreRecord;

use super::error::EngineError;
use super::ordering::round1;

pub const DEFAULT_MEETINGS_PER_BUCKET: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct YearBucket {
    pub bucket: i64,
    pub meeting_ids: BTreeSet<i64>,
    pub average_score: f64,
    /// Score records in the bucket.
    pub participant_count: usize,
    pub meeting_count: usize,
}

impl YearBucket {
    pub fn label(&self) -> String {
        format!("{}년차", self.bucket)
    }
}

/// Ceiling division of the meeting id by the bucket size.
pub fn bucket_of(meeting_id: i64, meetings_per_bucket: i64) -> i64 {
    let quotient = meeting_id.div_euclid(meetings_per_bucket);
    if meeting_id.rem_euclid(meetings_per_bucket) > 0 {
        quotient + 1
    } else {
        quotient
    }
}

pub fn year_buckets(
    scores: &[ScoreRecord],
    meetings_per_bucket: i64,
) -> Result<Vec<YearBucket>, EngineError> {
    if meetings_per_bucket <= 0 {
        return Err(EngineError::InvalidInput(format!(
            "meetings per bucket must be positive, got {}",
            meetings_per_bucket
        )));
    }

    let mut buckets: BTreeMap<i64, (BTreeSet<i64>, f64, usize)> = BTreeMap::new();
    for record in scores {
        let entry = buckets
            .entry(bucket_of(record.meeting_id, meetings_per_bucket))
            .or_default();
        entry.0.insert(record.meeting_id);
        entry.1 += record.score;
        entry.2 += 1;
    }

    Ok(buckets
        .into_iter()
        .map(|(bucket, (meeting_ids, total, count))| YearBucket {
            bucket,
            meeting_count: meeting_ids.len(),
            meeting_ids,
            average_score: round1(total / count as f64),
            participant_count: count,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_of_is_ceiling() {
        assert_eq!(bucket_of(1, 10), 1);
        assert_eq!(bucket_of(10, 10), 1);
        assert_eq!(bucket_of(11, 10), 2);
        assert_eq!(bucket_of(20, 10), 2);
        assert_eq!(bucket_of(0, 10), 0);
    }

    #[test]
    fn test_year_buckets_group_and_average() {
        let scores = vec![
            ScoreRecord::new(1, 1, 90.0),
            ScoreRecord::new(2, 1, 100.0),
            ScoreRecord::new(1, 10, 80.0),
            ScoreRecord::new(1, 11, 85.0),
            ScoreRecord::new(2, 25, 99.0),
        ];
        let buckets = year_buckets(&scores, 10).unwrap();
        assert_eq!(buckets.len(), 3);

        assert_eq!(buckets[0].bucket, 1);
        assert_eq!(buckets[0].meeting_ids, BTreeSet::from([1, 10]));
        assert_eq!(buckets[0].meeting_count, 2);
        assert_eq!(buckets[0].participant_count, 3);
        assert_eq!(buckets[0].average_score, 90.0);
        assert_eq!(buckets[0].label(), "1년차");

        assert_eq!(buckets[2].bucket, 3);
        assert_eq!(buckets[2].average_score, 99.0);
    }

    #[test]
    fn test_year_buckets_flatten_reproduces_meetings() {
        let scores: Vec<ScoreRecord> = (1..=37)
            .map(|m| ScoreRecord::new(m % 4, m, 80.0 + (m % 7) as f64))
            .collect();
        let buckets = year_buckets(&scores, 10).unwrap();

        let flattened: Vec<i64> = buckets.iter().flat_map(|b| b.meeting_ids.iter().copied()).collect();
        let original: BTreeSet<i64> = scores.iter().map(|r| r.meeting_id).collect();
        assert_eq!(flattened.len(), original.len());
        assert_eq!(flattened.into_iter().collect::<BTreeSet<_>>(), original);
        assert_eq!(
            buckets.iter().map(|b| b.participant_count).sum::<usize>(),
            scores.len()
        );
    }

    #[test]
    fn test_year_buckets_rejects_zero_size() {
        assert!(matches!(
            year_buckets(&[], 0),
            Err(EngineError::InvalidInput(_))
        ));
    }
}
