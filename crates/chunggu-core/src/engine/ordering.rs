//! Shared ordering and rounding rules.

use std::cmp::Ordering;

/// Round to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Arithmetic mean, or `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Golf ordering: fewer strokes rank higher.
pub struct ScoreOrder;

impl ScoreOrder {
    /// Comparator for "best first" sorts. Use with a stable sort so ties keep
    /// their input order.
    pub fn best_first(a: f64, b: f64) -> Ordering {
        a.total_cmp(&b)
    }

    pub fn worst_first(a: f64, b: f64) -> Ordering {
        b.total_cmp(&a)
    }

    /// Strictly better, so the earlier of two equal scores is kept.
    pub fn is_better(candidate: f64, current: f64) -> bool {
        candidate < current
    }
}
