//! Attendance counts and the per-member stat rows most views start from.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Gender, Member, ScoreRecord};

use super::ordering::round1;

/// Number of score records per member id. Members without records are
/// absent; callers default to 0.
pub fn attendance_counts(scores: &[ScoreRecord]) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for record in scores {
        *counts.entry(record.member_id).or_insert(0) += 1;
    }
    counts
}

/// Attendance and rounded average for one member id.
///
/// `name`, `generation` and `gender` are `None` when the id has scores but no
/// directory entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct MemberStat {
    pub member_id: i64,
    pub name: Option<String>,
    pub generation: Option<u32>,
    pub gender: Option<Gender>,
    pub attendance: usize,
    pub average_score: Option<f64>,
}

impl MemberStat {
    pub fn is_known(&self) -> bool {
        self.name.is_some()
    }

    /// Directory name, or a placeholder for unknown members.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("회원 {}", self.member_id),
        }
    }
}

/// One row per member in directory order (including members who never
/// played), followed by unknown member ids in order of first appearance.
pub fn member_stats(members: &[Member], scores: &[ScoreRecord]) -> Vec<MemberStat> {
    let mut totals: HashMap<i64, (f64, usize)> = HashMap::new();
    let mut first_seen: Vec<i64> = Vec::new();

    for record in scores {
        let entry = totals.entry(record.member_id).or_insert_with(|| {
            first_seen.push(record.member_id);
            (0.0, 0)
        });
        entry.0 += record.score;
        entry.1 += 1;
    }

    let stat_for = |member_id: i64| -> (usize, Option<f64>) {
        match totals.get(&member_id) {
            Some(&(sum, count)) if count > 0 => (count, Some(round1(sum / count as f64))),
            _ => (0, None),
        }
    };

    let mut rows: Vec<MemberStat> = members
        .iter()
        .map(|member| {
            let (attendance, average_score) = stat_for(member.id);
            MemberStat {
                member_id: member.id,
                name: Some(member.name.clone()),
                generation: Some(member.generation),
                gender: Some(member.gender),
                attendance,
                average_score,
            }
        })
        .collect();

    let known: std::collections::HashSet<i64> = members.iter().map(|m| m.id).collect();
    rows.extend(first_seen.into_iter().filter(|id| !known.contains(id)).map(|id| {
        let (attendance, average_score) = stat_for(id);
        MemberStat {
            member_id: id,
            name: None,
            generation: None,
            gender: None,
            attendance,
            average_score,
        }
    }));

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, generation: u32) -> Member {
        Member {
            id,
            name: format!("member{}", id),
            generation,
            gender: Gender::Male,
            phone: String::new(),
        }
    }

    #[test]
    fn test_attendance_counts_sum_to_len() {
        let scores = vec![
            ScoreRecord::new(1, 1, 90.0),
            ScoreRecord::new(2, 1, 95.0),
            ScoreRecord::new(1, 2, 88.0),
            ScoreRecord::new(9, 2, 101.0),
        ];
        let counts = attendance_counts(&scores);
        assert_eq!(counts.values().sum::<usize>(), scores.len());
        assert_eq!(counts[&1], 2);
        assert_eq!(counts[&2], 1);
        assert_eq!(counts.get(&3), None);
    }

    #[test]
    fn test_member_stats_order_and_unknowns() {
        let members = vec![member(1, 10), member(2, 11), member(3, 11)];
        let scores = vec![
            ScoreRecord::new(42, 1, 100.0),
            ScoreRecord::new(2, 1, 90.0),
            ScoreRecord::new(2, 2, 91.0),
            ScoreRecord::new(7, 2, 99.0),
        ];
        let rows = member_stats(&members, &scores);
        let ids: Vec<i64> = rows.iter().map(|r| r.member_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 42, 7]);

        assert_eq!(rows[0].attendance, 0);
        assert_eq!(rows[0].average_score, None);
        assert_eq!(rows[1].average_score, Some(90.5));
        assert!(!rows[3].is_known());
        assert_eq!(rows[3].display_name(), "회원 42");
        assert_eq!(rows[3].generation, None);
    }
}
