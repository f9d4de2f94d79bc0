//! Score trends over a member's sequence of appearances.
//!
//! The x-axis is the 0-based appearance index, not calendar time.

use serde::Serialize;

use crate::models::ScoreRecord;

use super::error::EngineError;
use super::ordering::round1;

/// Trailing moving average. Positions with fewer than `window` points so far
/// are `None` rather than a partial average.
pub fn moving_average(sequence: &[f64], window: usize) -> Result<Vec<Option<f64>>, EngineError> {
    if window == 0 {
        return Err(EngineError::InvalidInput(
            "moving average window must be at least 1".to_string(),
        ));
    }

    Ok((0..sequence.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                let slice = &sequence[i + 1 - window..=i];
                Some(round1(slice.iter().sum::<f64>() / window as f64))
            }
        })
        .collect())
}

/// Least-squares line through `(index, score)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LinearTrend {
    /// Strokes per appearance. Negative means improving.
    pub slope: f64,
    pub intercept: f64,
    /// Fitted value at each index, one decimal.
    pub fitted: Vec<f64>,
}

impl LinearTrend {
    pub fn class(&self) -> TrendClass {
        TrendClass::from_slope(self.slope)
    }
}

pub fn linear_trend(sequence: &[f64]) -> Result<LinearTrend, EngineError> {
    let n = sequence.len();
    if n < 2 {
        return Err(EngineError::InsufficientData {
            required: 2,
            actual: n,
        });
    }

    let mean_x = (n - 1) as f64 / 2.0;
    let mean_y = sequence.iter().sum::<f64>() / n as f64;

    let (numerator, denominator) = sequence.iter().enumerate().fold(
        (0.0, 0.0),
        |(num, den), (i, &y)| {
            let dx = i as f64 - mean_x;
            (num + dx * (y - mean_y), den + dx * dx)
        },
    );

    let slope = if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    };
    let intercept = mean_y - slope * mean_x;
    let fitted = (0..n).map(|i| round1(intercept + slope * i as f64)).collect();

    Ok(LinearTrend {
        slope,
        intercept,
        fitted,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "snake_case")]
pub enum TrendClass {
    RapidImprovement,
    SteadyImprovement,
    Stable,
    SlightDecline,
    NeedsImprovement,
}

impl TrendClass {
    pub fn from_slope(slope: f64) -> Self {
        if slope < -0.5 {
            TrendClass::RapidImprovement
        } else if slope < -0.1 {
            TrendClass::SteadyImprovement
        } else if slope < 0.1 {
            TrendClass::Stable
        } else if slope < 0.5 {
            TrendClass::SlightDecline
        } else {
            TrendClass::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendClass::RapidImprovement => "rapid improvement",
            TrendClass::SteadyImprovement => "steady improvement",
            TrendClass::Stable => "stable",
            TrendClass::SlightDecline => "slight decline",
            TrendClass::NeedsImprovement => "needs improvement",
        }
    }
}

impl std::fmt::Display for TrendClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parameters for the improvement panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendSettings {
    /// Fewer appearances than this and the panel is hidden.
    pub min_points: usize,
    pub moving_average_window: usize,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            min_points: 5,
            moving_average_window: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct TrendPoint {
    pub meeting_id: i64,
    pub score: f64,
    pub moving_average: Option<f64>,
    pub trend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ImprovementReport {
    pub member_id: i64,
    pub points: Vec<TrendPoint>,
    pub slope: f64,
    pub intercept: f64,
    pub class: TrendClass,
}

/// Moving average, trend line and classification for one member, with the
/// member's rounds ordered by meeting id.
///
/// `Ok(None)` when the member has too few rounds; the panel is then omitted.
pub fn improvement_report(
    scores: &[ScoreRecord],
    member_id: i64,
    settings: &TrendSettings,
) -> Result<Option<ImprovementReport>, EngineError> {
    let mut own: Vec<&ScoreRecord> = scores.iter().filter(|r| r.member_id == member_id).collect();
    own.sort_by_key(|r| r.meeting_id);

    if own.len() < settings.min_points.max(2) {
        return Ok(None);
    }

    let sequence: Vec<f64> = own.iter().map(|r| r.score).collect();
    let averages = moving_average(&sequence, settings.moving_average_window)?;
    let trend = linear_trend(&sequence)?;

    let points = own
        .iter()
        .zip(averages)
        .zip(trend.fitted.iter())
        .map(|((record, moving_average), &fitted)| TrendPoint {
            meeting_id: record.meeting_id,
            score: record.score,
            moving_average,
            trend: fitted,
        })
        .collect();

    Ok(Some(ImprovementReport {
        member_id,
        points,
        slope: trend.slope,
        intercept: trend.intercept,
        class: trend.class(),
    }))
}
