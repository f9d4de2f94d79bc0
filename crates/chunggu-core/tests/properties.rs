//! Properties of the statistics engine over generated members and scores.

use std::collections::BTreeSet;

use chunggu_core::engine::{
    attendance_counts, average_score, best_score, mean_score, member_stats, moving_average,
    round1, top_by_metric, worst_score, year_buckets, Metric,
};
use chunggu_core::{Gender, Member, RankingIndex, ScoreRecord};
use proptest::prelude::*;

/// Score ids run past the directory so some records belong to unknown members.
const MAX_MEMBERS: usize = 12;
const MAX_SCORE_MEMBER_ID: i64 = 16;

fn arb_gender() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female)]
}

fn arb_members() -> impl Strategy<Value = Vec<Member>> {
    prop::collection::vec((1u32..6, arb_gender()), 0..MAX_MEMBERS).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (generation, gender))| Member {
                id: i as i64 + 1,
                name: format!("회원{}", i + 1),
                generation,
                gender,
                phone: String::new(),
            })
            .collect()
    })
}

/// Scores on the 0.1 grid, as the club records them.
fn arb_score() -> impl Strategy<Value = ScoreRecord> {
    (1..=MAX_SCORE_MEMBER_ID, 1i64..40, 600u32..1300).prop_map(|(member_id, meeting_id, tenths)| {
        ScoreRecord::new(member_id, meeting_id, tenths as f64 / 10.0)
    })
}

fn arb_scores() -> impl Strategy<Value = Vec<ScoreRecord>> {
    prop::collection::vec(arb_score(), 0..80)
}

proptest! {
    #[test]
    fn attendance_counts_sum_to_record_count(scores in arb_scores()) {
        let counts = attendance_counts(&scores);
        prop_assert_eq!(counts.values().sum::<usize>(), scores.len());
        for (&member_id, &count) in &counts {
            prop_assert!(count > 0);
            prop_assert_eq!(count, scores.iter().filter(|r| r.member_id == member_id).count());
        }
    }

    #[test]
    fn average_lies_between_best_and_worst(scores in arb_scores()) {
        for member_id in 1..=MAX_SCORE_MEMBER_ID {
            let own: Vec<ScoreRecord> =
                scores.iter().filter(|r| r.member_id == member_id).copied().collect();
            match average_score(&scores, member_id) {
                None => prop_assert!(own.is_empty()),
                Some(average) => {
                    let best = best_score(&own).unwrap().score;
                    let worst = worst_score(&own).unwrap().score;
                    prop_assert!(best <= average && average <= worst,
                        "{} not in [{}, {}]", average, best, worst);
                }
            }
        }
    }

    #[test]
    fn top_by_metric_is_ordered_limited_and_filtered(
        members in arb_members(),
        scores in arb_scores(),
        min_samples in 0usize..5,
        limit in 0usize..10,
    ) {
        let stats = member_stats(&members, &scores);

        let by_average = top_by_metric(&stats, Metric::Average, min_samples, limit);
        prop_assert!(by_average.len() <= limit);
        prop_assert!(by_average.iter().all(|s| s.attendance >= min_samples));
        for pair in by_average.windows(2) {
            prop_assert!(pair[0].average_score.unwrap() <= pair[1].average_score.unwrap());
        }

        let by_attendance = top_by_metric(&stats, Metric::Attendance, min_samples, limit);
        prop_assert!(by_attendance.len() <= limit);
        prop_assert!(by_attendance.iter().all(|s| s.attendance >= min_samples));
        for pair in by_attendance.windows(2) {
            prop_assert!(pair[0].attendance >= pair[1].attendance);
        }
    }

    #[test]
    fn ranks_agree_with_unrounded_means(members in arb_members(), scores in arb_scores()) {
        let index = RankingIndex::build(&members, &scores, 5).unwrap();

        for member in &members {
            let entry = index.entry(member.id);
            prop_assert_eq!(entry.overall.is_ranked(), mean_score(&scores, member.id).is_some());
            prop_assert_eq!(entry.overall.is_ranked(), entry.cohort.is_ranked());
            prop_assert_eq!(entry.overall.is_ranked(), entry.recent_form.is_ranked());
        }

        for a in index.overall() {
            for b in index.overall() {
                if mean_score(&scores, a.member_id) < mean_score(&scores, b.member_id) {
                    prop_assert!(index.entry(a.member_id).overall.rank
                        < index.entry(b.member_id).overall.rank);
                }
            }
        }
    }

    #[test]
    fn moving_average_matches_trailing_mean(
        sequence in prop::collection::vec((600u32..1300).prop_map(|t| t as f64 / 10.0), 0..20),
        window in 1usize..6,
    ) {
        let output = moving_average(&sequence, window).unwrap();
        prop_assert_eq!(output.len(), sequence.len());
        for (i, value) in output.iter().enumerate() {
            if i + 1 < window {
                prop_assert_eq!(*value, None);
            } else {
                let slice = &sequence[i + 1 - window..=i];
                let expected = round1(slice.iter().sum::<f64>() / window as f64);
                prop_assert_eq!(*value, Some(expected));
            }
        }
    }

    #[test]
    fn year_buckets_partition_meetings(scores in arb_scores(), size in 1i64..15) {
        let original: BTreeSet<i64> = scores.iter().map(|r| r.meeting_id).collect();
        let buckets = year_buckets(&scores, size).unwrap();

        let flattened: Vec<i64> = buckets
            .iter()
            .flat_map(|b| b.meeting_ids.iter().copied())
            .collect();
        let unique: BTreeSet<i64> = flattened.iter().copied().collect();

        prop_assert_eq!(unique.len(), flattened.len(), "meeting placed in two buckets");
        prop_assert_eq!(unique, original);
        prop_assert_eq!(
            buckets.iter().map(|b| b.participant_count).sum::<usize>(),
            scores.len()
        );
    }
}
