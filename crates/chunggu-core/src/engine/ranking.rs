//! Top-N selection and rank lookup.

use serde::Serialize;

use super::attendance::MemberStat;
use super::ordering::ScoreOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Most records first.
    Attendance,
    /// Lowest average first.
    Average,
}

/// Select the top `limit` rows by `metric`.
///
/// Rows with fewer than `min_samples` records are dropped first; for
/// `Average`, rows without an average are dropped too. Sorting is stable so
/// ties keep their input order.
pub fn top_by_metric(
    entries: &[MemberStat],
    metric: Metric,
    min_samples: usize,
    limit: usize,
) -> Vec<MemberStat> {
    let mut selected: Vec<MemberStat> = entries
        .iter()
        .filter(|e| e.attendance >= min_samples)
        .filter(|e| metric == Metric::Attendance || e.average_score.is_some())
        .cloned()
        .collect();

    match metric {
        Metric::Attendance => selected.sort_by(|a, b| b.attendance.cmp(&a.attendance)),
        Metric::Average => selected.sort_by(|a, b| {
            ScoreOrder::best_first(
                a.average_score.unwrap_or(f64::INFINITY),
                b.average_score.unwrap_or(f64::INFINITY),
            )
        }),
    }

    selected.truncate(limit);
    selected
}

/// A member's value in a ranking list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RankedEntry {
    pub member_id: i64,
    pub value: f64,
}

impl RankedEntry {
    /// Stable best-first sort.
    pub fn sort_best_first(entries: &mut [RankedEntry]) {
        entries.sort_by(|a, b| ScoreOrder::best_first(a.value, b.value));
    }
}

/// Position of one member within a ranking list.
///
/// `rank == 0` means "not ranked"; `percentile` is then `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RankPosition {
    pub rank: usize,
    pub total: usize,
    pub percentile: Option<u32>,
}

impl RankPosition {
    pub fn unranked(total: usize) -> Self {
        Self {
            rank: 0,
            total,
            percentile: None,
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.rank > 0
    }
}

/// Rank of `member_id` within `entries`, which must already be sorted best
/// first. Percentile is `round((total - rank + 1) / total * 100)`.
pub fn rank(entries: &[RankedEntry], member_id: i64) -> RankPosition {
    let total = entries.len();
    match entries.iter().position(|e| e.member_id == member_id) {
        Some(index) => {
            let rank = index + 1;
            let percentile = ((total - rank + 1) as f64 / total as f64 * 100.0).round() as u32;
            RankPosition {
                rank,
                total,
                percentile: Some(percentile),
            }
        }
        None => RankPosition::unranked(total),
    }
}
