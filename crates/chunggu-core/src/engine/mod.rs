//! Aggregation engine: pure statistics over the member and score collections.
//!
//! Every function here takes already-loaded slices plus explicit parameters,
//! holds no state, and may be called repeatedly or from several views at
//! once. "No data" is expressed with `Option` (or rank 0), never a panic and
//! never a fake zero. Only contract violations (a zero window, a zero bucket
//! size, a non-finite score) produce `EngineError::InvalidInput`.
//!
//! Lower stroke counts are better everywhere; the comparator lives in
//! [`ordering::ScoreOrder`].

pub mod attendance;
pub mod averages;
pub mod buckets;
pub mod cohort;
pub mod distribution;
pub mod error;
pub mod meetings;
pub mod ordering;
pub mod ranking;
pub mod trend;

pub use attendance::{attendance_counts, member_stats, MemberStat};
pub use averages::{
    average_score, best_score, mean_score, overall_average, recent_mean, recent_score,
    validate_scores, worst_score,
};
pub use buckets::{bucket_of, year_buckets, YearBucket, DEFAULT_MEETINGS_PER_BUCKET};
pub use cohort::{cohort_rollup, CohortId, CohortKey, CohortRollup};
pub use distribution::{gender_distribution, generation_distribution, GenderCount, GenerationCount};
pub use error::EngineError;
pub use meetings::{
    generation_leaders, meeting_leaderboard, meeting_summaries, recent_meetings,
    special_tournament, special_tournament_scores, GenerationLeader, LeaderboardRow,
    MeetingHighlight, MeetingSummary, ScoreGrade, SpecialTournament,
};
pub use ordering::{mean, round1, ScoreOrder};
pub use ranking::{rank, top_by_metric, Metric, RankPosition, RankedEntry};
pub use trend::{
    improvement_report, linear_trend, moving_average, ImprovementReport, LinearTrend, TrendClass,
    TrendPoint, TrendSettings,
};
