//! Member directory listing: filtering, sorting and the sort toggle.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::engine::{attendance_counts, mean, round1, ScoreOrder};
use crate::models::{Gender, Member, ScoreRecord};
use crate::utils::{cmp_ignore_case, contains_ignore_case};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberSortColumn {
    #[default]
    Name,
    Generation,
    Attendance,
    Average,
}

impl MemberSortColumn {
    pub fn label(&self) -> &'static str {
        match self {
            MemberSortColumn::Name => "Name",
            MemberSortColumn::Generation => "Generation",
            MemberSortColumn::Attendance => "Attendance",
            MemberSortColumn::Average => "Average",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// One row of the directory listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryRow {
    pub member: Member,
    pub attendance: usize,
    pub average_score: Option<f64>,
}

/// Filters and sort order for the member directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberQuery {
    /// Case-insensitive substring of the member name. Empty matches all.
    pub search: String,
    pub generation: Option<u32>,
    pub gender: Option<Gender>,
    pub sort: MemberSortColumn,
    pub direction: SortDirection,
}

impl MemberQuery {
    /// Selecting the current column again flips the direction; a new column
    /// starts ascending.
    pub fn toggle_sort(&mut self, column: MemberSortColumn) {
        if self.sort == column {
            self.direction = self.direction.flipped();
        } else {
            self.sort = column;
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn matches(&self, member: &Member) -> bool {
        (self.search.is_empty() || contains_ignore_case(&member.name, &self.search))
            && self.generation.map_or(true, |g| member.generation == g)
            && self.gender.map_or(true, |g| member.gender == g)
    }

    /// Filter and sort the directory.
    ///
    /// Ascending means A→Z, oldest generation first, most attendance first,
    /// best average first. Members without an average always sort last.
    pub fn run(&self, members: &[Member], scores: &[ScoreRecord]) -> Vec<DirectoryRow> {
        let attendance = attendance_counts(scores);
        let mut by_member: HashMap<i64, Vec<f64>> = HashMap::new();
        for record in scores {
            by_member.entry(record.member_id).or_default().push(record.score);
        }

        let mut rows: Vec<DirectoryRow> = members
            .iter()
            .filter(|m| self.matches(m))
            .map(|m| DirectoryRow {
                member: m.clone(),
                attendance: attendance.get(&m.id).copied().unwrap_or(0),
                average_score: by_member
                    .get(&m.id)
                    .and_then(|values| mean(values.iter().copied()))
                    .map(round1),
            })
            .collect();

        rows.sort_by(|a, b| {
            let by_name = || cmp_ignore_case(&a.member.name, &b.member.name);
            let ordering = match self.sort {
                MemberSortColumn::Name => by_name(),
                MemberSortColumn::Generation => a
                    .member
                    .generation
                    .cmp(&b.member.generation)
                    .then_with(by_name),
                MemberSortColumn::Attendance => b.attendance.cmp(&a.attendance).then_with(by_name),
                MemberSortColumn::Average => match (a.average_score, b.average_score) {
                    (Some(x), Some(y)) => ScoreOrder::best_first(x, y).then_with(by_name),
                    (Some(_), None) => return Ordering::Less,
                    (None, Some(_)) => return Ordering::Greater,
                    (None, None) => return by_name(),
                },
            };
            self.direction.apply(ordering)
        });

        rows
    }
}

/// Distinct generations, ascending, for the generation filter.
pub fn generations(members: &[Member]) -> Vec<u32> {
    members
        .iter()
        .map(|m| m.generation)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
