//! Head counts over the member directory.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Gender, Member};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct GenderCount {
    pub gender: Gender,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct GenerationCount {
    pub generation: u32,
    pub count: usize,
}

/// Members per gender; both genders are always listed.
pub fn gender_distribution(members: &[Member]) -> Vec<GenderCount> {
    Gender::ALL
        .iter()
        .map(|&gender| GenderCount {
            gender,
            count: members.iter().filter(|m| m.gender == gender).count(),
        })
        .collect()
}

/// Members per generation, oldest generation first.
pub fn generation_distribution(members: &[Member]) -> Vec<GenerationCount> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for member in members {
        *counts.entry(member.generation).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(generation, count)| GenerationCount { generation, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, generation: u32, gender: Gender) -> Member {
        Member {
            id,
            name: String::new(),
            generation,
            gender,
            phone: String::new(),
        }
    }

    #[test]
    fn test_gender_distribution_lists_both() {
        let members = vec![member(1, 3, Gender::Male), member(2, 3, Gender::Male)];
        let dist = gender_distribution(&members);
        assert_eq!(
            dist,
            vec![
                GenderCount { gender: Gender::Male, count: 2 },
                GenderCount { gender: Gender::Female, count: 0 },
            ]
        );
    }

    #[test]
    fn test_generation_distribution_sorted() {
        let members = vec![
            member(1, 12, Gender::Male),
            member(2, 3, Gender::Female),
            member(3, 12, Gender::Female),
        ];
        let dist = generation_distribution(&members);
        assert_eq!(dist[0], GenerationCount { generation: 3, count: 1 });
        assert_eq!(dist[1], GenerationCount { generation: 12, count: 2 });
    }
}
