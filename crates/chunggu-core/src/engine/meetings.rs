//! Meeting-level views: per-meeting summaries, leaderboards, recent
//! highlights, per-generation leaders and the special tournaments.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::{Gender, Member, ScoreRecord};

use super::attendance::member_stats;
use super::ordering::{round1, ScoreOrder};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct MeetingSummary {
    pub meeting_id: i64,
    pub participant_count: usize,
    pub average_score: f64,
}

/// One summary per meeting id, newest (highest id) first.
pub fn meeting_summaries(scores: &[ScoreRecord]) -> Vec<MeetingSummary> {
    let mut meetings: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
    for record in scores {
        let entry = meetings.entry(record.meeting_id).or_default();
        entry.0 += record.score;
        entry.1 += 1;
    }
    meetings
        .into_iter()
        .rev()
        .map(|(meeting_id, (total, count))| MeetingSummary {
            meeting_id,
            participant_count: count,
            average_score: round1(total / count as f64),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LeaderboardRow {
    pub member_id: i64,
    /// `None` for a record whose member is not in the directory.
    pub name: Option<String>,
    pub generation: Option<u32>,
    pub gender: Option<Gender>,
    pub score: f64,
}

/// Results of one meeting, best score first. Ties keep input order.
pub fn meeting_leaderboard(
    members: &[Member],
    scores: &[ScoreRecord],
    meeting_id: i64,
) -> Vec<LeaderboardRow> {
    let directory: HashMap<i64, &Member> = members.iter().map(|m| (m.id, m)).collect();

    let mut rows: Vec<LeaderboardRow> = scores
        .iter()
        .filter(|r| r.meeting_id == meeting_id)
        .map(|r| {
            let member = directory.get(&r.member_id);
            LeaderboardRow {
                member_id: r.member_id,
                name: member.map(|m| m.name.clone()),
                generation: member.map(|m| m.generation),
                gender: member.map(|m| m.gender),
                score: r.score,
            }
        })
        .collect();
    rows.sort_by(|a, b| ScoreOrder::best_first(a.score, b.score));
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct MeetingHighlight {
    pub summary: MeetingSummary,
    pub winner: Option<LeaderboardRow>,
}

/// The `n` newest meetings with their winner.
pub fn recent_meetings(
    members: &[Member],
    scores: &[ScoreRecord],
    n: usize,
) -> Vec<MeetingHighlight> {
    meeting_summaries(scores)
        .into_iter()
        .take(n)
        .map(|summary| {
            let winner = meeting_leaderboard(members, scores, summary.meeting_id)
                .into_iter()
                .next();
            MeetingHighlight { summary, winner }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct GenerationLeader {
    pub generation: u32,
    pub member_id: i64,
    pub name: String,
    pub gender: Gender,
    pub average_score: f64,
    pub participation_count: usize,
}

/// Best average per generation among members with at least `min_samples`
/// rounds. On a tie the member listed first keeps the spot.
pub fn generation_leaders(
    members: &[Member],
    scores: &[ScoreRecord],
    min_samples: usize,
) -> Vec<GenerationLeader> {
    let mut leaders: BTreeMap<u32, GenerationLeader> = BTreeMap::new();

    for stat in member_stats(members, scores) {
        let (Some(name), Some(generation), Some(gender), Some(average_score)) =
            (stat.name, stat.generation, stat.gender, stat.average_score)
        else {
            continue;
        };
        if stat.attendance < min_samples {
            continue;
        }

        let replace = leaders
            .get(&generation)
            .map_or(true, |current| ScoreOrder::is_better(average_score, current.average_score));
        if replace {
            leaders.insert(
                generation,
                GenerationLeader {
                    generation,
                    member_id: stat.member_id,
                    name,
                    gender,
                    average_score,
                    participation_count: stat.attendance,
                },
            );
        }
    }

    leaders.into_values().collect()
}

/// The two annual cup meetings.
///
/// There is no calendar data; the club assumes eight meetings a year with the
/// President's Cup in May and the Alumni Cup in October, which puts them at
/// `meeting_id % 12 == 5` and `== 10`. Unverified against real dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "snake_case")]
pub enum SpecialTournament {
    PresidentsCup,
    AlumniCup,
}

impl SpecialTournament {
    pub fn label(&self) -> &'static str {
        match self {
            SpecialTournament::PresidentsCup => "청구회장배",
            SpecialTournament::AlumniCup => "총동창회장배",
        }
    }
}

pub fn special_tournament(meeting_id: i64) -> Option<SpecialTournament> {
    match meeting_id.rem_euclid(12) {
        5 => Some(SpecialTournament::PresidentsCup),
        10 => Some(SpecialTournament::AlumniCup),
        _ => None,
    }
}

/// Records from meetings that were `tournament`, input order preserved.
pub fn special_tournament_scores(
    scores: &[ScoreRecord],
    tournament: SpecialTournament,
) -> Vec<ScoreRecord> {
    scores
        .iter()
        .filter(|r| special_tournament(r.meeting_id) == Some(tournament))
        .copied()
        .collect()
}

/// Note shown next to a tournament score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ScoreGrade {
    Excellent,
    Good,
}

impl ScoreGrade {
    pub fn of(score: f64) -> Option<Self> {
        if score < 85.0 {
            Some(ScoreGrade::Excellent)
        } else if score < 90.0 {
            Some(ScoreGrade::Good)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreGrade::Excellent => "우수",
            ScoreGrade::Good => "양호",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, generation: u32) -> Member {
        Member {
            id,
            name: format!("m{}", id),
            generation,
            gender: Gender::Female,
            phone: String::new(),
        }
    }

    fn fixture() -> (Vec<Member>, Vec<ScoreRecord>) {
        let members = vec![member(1, 5), member(2, 5), member(3, 6)];
        let scores = vec![
            ScoreRecord::new(1, 1, 90.0),
            ScoreRecord::new(2, 1, 86.0),
            ScoreRecord::new(3, 1, 95.0),
            ScoreRecord::new(1, 2, 84.0),
            ScoreRecord::new(77, 2, 84.0),
            ScoreRecord::new(3, 2, 99.0),
            ScoreRecord::new(2, 3, 88.0),
        ];
        (members, scores)
    }

    #[test]
    fn test_meeting_summaries_newest_first() {
        let (_, scores) = fixture();
        let summaries = meeting_summaries(&scores);
        let ids: Vec<i64> = summaries.iter().map(|s| s.meeting_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(summaries[2].participant_count, 3);
        assert_eq!(summaries[2].average_score, 90.3);
    }

    #[test]
    fn test_leaderboard_best_first_with_unknown_member() {
        let (members, scores) = fixture();
        let board = meeting_leaderboard(&members, &scores, 2);
        let ids: Vec<i64> = board.iter().map(|r| r.member_id).collect();
        // 1 and 77 tie at 84 and keep input order
        assert_eq!(ids, vec![1, 77, 3]);
        assert_eq!(board[1].name, None);
        assert!(meeting_leaderboard(&members, &scores, 42).is_empty());
    }

    #[test]
    fn test_recent_meetings_with_winner() {
        let (members, scores) = fixture();
        let recent = recent_meetings(&members, &scores, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].summary.meeting_id, 3);
        assert_eq!(recent[0].winner.as_ref().map(|w| w.member_id), Some(2));
        assert_eq!(recent[1].winner.as_ref().map(|w| w.score), Some(84.0));
    }

    #[test]
    fn test_generation_leaders() {
        let (members, scores) = fixture();
        let leaders = generation_leaders(&members, &scores, 2);
        assert_eq!(leaders.len(), 2);
        // gen 5: member 1 avg 87.0, member 2 avg 87.0 -> first listed keeps it
        assert_eq!(leaders[0].generation, 5);
        assert_eq!(leaders[0].member_id, 1);
        assert_eq!(leaders[1].member_id, 3);
        assert_eq!(leaders[1].average_score, 97.0);

        assert!(generation_leaders(&members, &scores, 3).is_empty());
    }

    #[test]
    fn test_special_tournaments() {
        assert_eq!(special_tournament(5), Some(SpecialTournament::PresidentsCup));
        assert_eq!(special_tournament(17), Some(SpecialTournament::PresidentsCup));
        assert_eq!(special_tournament(22), Some(SpecialTournament::AlumniCup));
        assert_eq!(special_tournament(6), None);

        let scores = vec![
            ScoreRecord::new(1, 5, 84.0),
            ScoreRecord::new(1, 6, 90.0),
            ScoreRecord::new(1, 29, 88.0),
        ];
        let cup = special_tournament_scores(&scores, SpecialTournament::PresidentsCup);
        assert_eq!(cup.len(), 2);
        assert_eq!(cup[1].meeting_id, 29);
    }

    #[test]
    fn test_score_grade() {
        assert_eq!(ScoreGrade::of(84.9), Some(ScoreGrade::Excellent));
        assert_eq!(ScoreGrade::of(85.0), Some(ScoreGrade::Good));
        assert_eq!(ScoreGrade::of(90.0), None);
    }
}
