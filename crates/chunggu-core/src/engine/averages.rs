//! Per-member averages, recent form, and best/worst rounds.

use crate::models::ScoreRecord;

use super::error::EngineError;
use super::ordering::{mean, round1, ScoreOrder};

/// Mean of one member's scores rounded to one decimal, or `None` when the
/// member has no records. Never returns 0 for "no data".
pub fn average_score(scores: &[ScoreRecord], member_id: i64) -> Option<f64> {
    mean_score(scores, member_id).map(round1)
}

/// Unrounded mean of one member's scores. Rankings order by this value so
/// two averages that display alike still compare correctly.
pub fn mean_score(scores: &[ScoreRecord], member_id: i64) -> Option<f64> {
    mean(
        scores
            .iter()
            .filter(|r| r.member_id == member_id)
            .map(|r| r.score),
    )
}

/// Mean of the member's `k` most recent meetings (highest meeting ids),
/// rounded to one decimal.
pub fn recent_score(
    scores: &[ScoreRecord],
    member_id: i64,
    k: usize,
) -> Result<Option<f64>, EngineError> {
    Ok(recent_mean(scores, member_id, k)?.map(round1))
}

/// Unrounded form of [`recent_score`].
pub fn recent_mean(
    scores: &[ScoreRecord],
    member_id: i64,
    k: usize,
) -> Result<Option<f64>, EngineError> {
    if k == 0 {
        return Err(EngineError::InvalidInput(
            "recent window must be at least 1".to_string(),
        ));
    }

    let mut own: Vec<&ScoreRecord> = scores.iter().filter(|r| r.member_id == member_id).collect();
    own.sort_by(|a, b| b.meeting_id.cmp(&a.meeting_id));
    Ok(mean(own.iter().take(k).map(|r| r.score)))
}

/// Lowest score; the first one wins a tie. `None` for empty input.
pub fn best_score(scores: &[ScoreRecord]) -> Option<&ScoreRecord> {
    scores.iter().fold(None, |best: Option<&ScoreRecord>, current| match best {
        Some(b) if !ScoreOrder::is_better(current.score, b.score) => Some(b),
        _ => Some(current),
    })
}

/// Highest score; the first one wins a tie. `None` for empty input.
pub fn worst_score(scores: &[ScoreRecord]) -> Option<&ScoreRecord> {
    scores.iter().fold(None, |worst: Option<&ScoreRecord>, current| match worst {
        Some(w) if !ScoreOrder::is_better(w.score, current.score) => Some(w),
        _ => Some(current),
    })
}

/// Club-wide average over every record.
pub fn overall_average(scores: &[ScoreRecord]) -> Option<f64> {
    mean(scores.iter().map(|r| r.score)).map(round1)
}

/// Rejects records whose score is NaN or infinite.
pub fn validate_scores(scores: &[ScoreRecord]) -> Result<(), EngineError> {
    match scores.iter().position(|r| !r.score.is_finite()) {
        Some(index) => Err(EngineError::InvalidInput(format!(
            "score at index {} (member {}, meeting {}) is not a finite number",
            index, scores[index].member_id, scores[index].meeting_id
        ))),
        None => Ok(()),
    }
}
