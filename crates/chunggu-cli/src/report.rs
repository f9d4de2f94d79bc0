//! Plain-text rendering of the engine's views.

use anyhow::{bail, Result};

use chunggu_core::admin::AdminOverview;
use chunggu_core::directory::MemberQuery;
use chunggu_core::engine::{
    average_score, best_score, cohort_rollup, gender_distribution, generation_distribution,
    generation_leaders, improvement_report, meeting_leaderboard, meeting_summaries,
    member_stats, overall_average, recent_meetings, recent_score, special_tournament,
    special_tournament_scores, top_by_metric, worst_score, year_buckets, CohortKey, Metric,
    ScoreGrade, ScoreOrder, SpecialTournament,
};
use chunggu_core::utils::{format_average, format_phone, format_rank, truncate_string, NO_DATA};
use chunggu_core::{Config, Dataset, RankingIndex};

/// Recent meetings listed on the dashboard.
const DASHBOARD_MEETINGS: usize = 5;

/// Rounds required before a member can lead their generation.
const GENERATION_LEADER_MIN_ROUNDS: usize = 5;

const NAME_WIDTH: usize = 12;

fn heading(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "-".repeat(title.chars().count().max(20)));
}

fn unknown_member(id: i64) -> String {
    format!("회원 {}", id)
}

pub fn dashboard(dataset: &Dataset, config: &Config) -> Result<()> {
    heading("Club");
    println!("Members:  {}", dataset.members.len());
    println!("Meetings: {}", dataset.meeting_count());
    println!("Rounds:   {}", dataset.scores.len());
    println!("Average:  {}", format_average(overall_average(&dataset.scores)));

    heading("Gender");
    for entry in gender_distribution(&dataset.members) {
        println!("{:<6} {}", entry.gender.label(), entry.count);
    }

    heading("Generations");
    for entry in generation_distribution(&dataset.members) {
        println!("{:>4}기 {}", entry.generation, entry.count);
    }

    let stats = member_stats(&dataset.members, &dataset.scores);

    heading("Most rounds");
    for (i, stat) in top_by_metric(&stats, Metric::Attendance, 1, config.top_limit)
        .iter()
        .enumerate()
    {
        println!(
            "{:>2}. {:<width$} {}",
            i + 1,
            truncate_string(&stat.display_name(), NAME_WIDTH),
            stat.attendance,
            width = NAME_WIDTH
        );
    }

    heading(&format!("Best average (min {} rounds)", config.top_min_samples));
    for (i, stat) in top_by_metric(&stats, Metric::Average, config.top_min_samples, config.top_limit)
        .iter()
        .enumerate()
    {
        println!(
            "{:>2}. {:<width$} {}",
            i + 1,
            truncate_string(&stat.display_name(), NAME_WIDTH),
            format_average(stat.average_score),
            width = NAME_WIDTH
        );
    }

    heading("Generation leaders");
    for leader in generation_leaders(&dataset.members, &dataset.scores, GENERATION_LEADER_MIN_ROUNDS) {
        println!(
            "{:>4}기 {:<width$} {:>6.1} ({} rounds)",
            leader.generation,
            truncate_string(&leader.name, NAME_WIDTH),
            leader.average_score,
            leader.participation_count,
            width = NAME_WIDTH
        );
    }

    heading("Recent meetings");
    for highlight in recent_meetings(&dataset.members, &dataset.scores, DASHBOARD_MEETINGS) {
        let winner = highlight
            .winner
            .map(|w| {
                let name = w.name.unwrap_or_else(|| unknown_member(w.member_id));
                format!("{} {:.0}", name, w.score)
            })
            .unwrap_or_else(|| NO_DATA.to_string());
        println!(
            "#{:<4} {:>3} players  avg {:>5.1}  winner {}",
            highlight.summary.meeting_id,
            highlight.summary.participant_count,
            highlight.summary.average_score,
            winner
        );
    }

    Ok(())
}

pub fn member(dataset: &Dataset, index: &RankingIndex, config: &Config, id: i64) -> Result<()> {
    let Some(member) = dataset.member(id) else {
        bail!("Member not found: {}", id);
    };
    let own = dataset.scores_for(id);

    heading(&member.display_name());
    println!("Gender:  {}", member.gender);
    if !member.phone.is_empty() {
        println!("Phone:   {}", format_phone(&member.phone));
    }
    println!("Rounds:  {}", own.len());
    println!("Average: {}", format_average(average_score(&dataset.scores, id)));
    println!(
        "Recent {}: {}",
        config.recent_window,
        format_average(recent_score(&dataset.scores, id, config.recent_window)?)
    );
    match best_score(&own) {
        Some(best) => println!("Best:    {:.0} (meeting {})", best.score, best.meeting_id),
        None => println!("Best:    {}", NO_DATA),
    }
    match worst_score(&own) {
        Some(worst) => println!("Worst:   {:.0} (meeting {})", worst.score, worst.meeting_id),
        None => println!("Worst:   {}", NO_DATA),
    }

    let ranks = index.entry(id);
    heading("Ranks");
    println!("Overall:     {}", format_rank(&ranks.overall));
    println!("Generation:  {}", format_rank(&ranks.cohort));
    println!("Recent form: {}", format_rank(&ranks.recent_form));

    let tournaments: Vec<_> = own
        .iter()
        .filter_map(|r| special_tournament(r.meeting_id).map(|t| (t, r)))
        .collect();
    if !tournaments.is_empty() {
        heading("Tournaments");
        for (tournament, record) in tournaments {
            let grade = ScoreGrade::of(record.score).map(|g| g.label()).unwrap_or("");
            println!(
                "#{:<4} {:<8} {:>4.0} {}",
                record.meeting_id,
                tournament.label(),
                record.score,
                grade
            );
        }
    }

    match improvement_report(&dataset.scores, id, &config.trend_settings())? {
        Some(report) => {
            heading(&format!("Trend: {} (slope {:+.2})", report.class, report.slope));
            for point in report.points {
                println!(
                    "#{:<4} {:>4.0}  avg {:>6}  trend {:>5.1}",
                    point.meeting_id,
                    point.score,
                    format_average(point.moving_average),
                    point.trend
                );
            }
        }
        None => println!(
            "\nTrend needs at least {} rounds.",
            config.improvement_min_points
        ),
    }

    Ok(())
}

pub fn meetings(dataset: &Dataset) -> Result<()> {
    heading("Meetings");
    for summary in meeting_summaries(&dataset.scores) {
        let label = special_tournament(summary.meeting_id)
            .map(|t| t.label())
            .unwrap_or("");
        println!(
            "#{:<4} {:>3} players  avg {:>5.1}  {}",
            summary.meeting_id, summary.participant_count, summary.average_score, label
        );
    }
    Ok(())
}

pub fn meeting(dataset: &Dataset, id: i64) -> Result<()> {
    let rows = meeting_leaderboard(&dataset.members, &dataset.scores, id);
    if rows.is_empty() {
        bail!("No results for meeting {}", id);
    }

    match special_tournament(id) {
        Some(tournament) => heading(&format!("Meeting {} ({})", id, tournament.label())),
        None => heading(&format!("Meeting {}", id)),
    }
    for (i, row) in rows.into_iter().enumerate() {
        let generation = row
            .generation
            .map(|g| format!("{}기", g))
            .unwrap_or_else(|| NO_DATA.to_string());
        let name = row.name.unwrap_or_else(|| unknown_member(row.member_id));
        println!(
            "{:>3}. {:<width$} {:>5} {:>4.0}",
            i + 1,
            truncate_string(&name, NAME_WIDTH),
            generation,
            row.score,
            width = NAME_WIDTH
        );
    }
    Ok(())
}

pub fn tournaments(
    dataset: &Dataset,
    only: Option<SpecialTournament>,
    limit: usize,
) -> Result<()> {
    let cups = [SpecialTournament::PresidentsCup, SpecialTournament::AlumniCup];
    for tournament in cups.into_iter().filter(|t| only.map_or(true, |o| o == *t)) {
        let mut records = special_tournament_scores(&dataset.scores, tournament);
        records.sort_by(|a, b| ScoreOrder::best_first(a.score, b.score));

        heading(&format!("{} ({} rounds)", tournament.label(), records.len()));
        if records.is_empty() {
            println!("{}", NO_DATA);
            continue;
        }
        for (i, record) in records.iter().take(limit).enumerate() {
            let name = dataset
                .member(record.member_id)
                .map(|m| m.display_name())
                .unwrap_or_else(|| unknown_member(record.member_id));
            let grade = ScoreGrade::of(record.score).map(|g| g.label()).unwrap_or("");
            println!(
                "{:>3}. {:<width$} #{:<4} {:>4.0} {}",
                i + 1,
                truncate_string(&name, NAME_WIDTH + 6),
                record.meeting_id,
                record.score,
                grade,
                width = NAME_WIDTH + 6
            );
        }
    }
    Ok(())
}

pub fn cohorts(dataset: &Dataset, key: CohortKey, min_records: usize) -> Result<()> {
    heading(match key {
        CohortKey::Generation => "By generation",
        CohortKey::Gender => "By gender",
    });
    println!("{:<6} {:>7} {:>7} {:>7} {:>7} {:>6}", "", "members", "active", "rounds", "avg", "rate");
    for rollup in cohort_rollup(&dataset.members, &dataset.scores, key, min_records) {
        println!(
            "{:<6} {:>7} {:>7} {:>7} {:>7} {:>6.1}",
            rollup.key.to_string(),
            rollup.member_count,
            rollup.active_member_count,
            rollup.participation_count,
            format_average(rollup.average_score),
            rollup.participation_rate
        );
    }
    Ok(())
}

pub fn years(dataset: &Dataset, meetings_per_bucket: i64) -> Result<()> {
    heading(&format!("By year ({} meetings per year, approximate)", meetings_per_bucket));
    for bucket in year_buckets(&dataset.scores, meetings_per_bucket)? {
        println!(
            "{:<6} {:>3} meetings {:>5} rounds  avg {:>5.1}",
            bucket.label(),
            bucket.meeting_count,
            bucket.participant_count,
            bucket.average_score
        );
    }
    Ok(())
}

pub fn directory(dataset: &Dataset, query: &MemberQuery) -> Result<()> {
    let rows = query.run(&dataset.members, &dataset.scores);
    heading(&format!(
        "Members ({} of {}, by {})",
        rows.len(),
        dataset.members.len(),
        query.sort.label()
    ));
    for row in rows {
        println!(
            "{:>5} {:<width$} {:>4}기 {:<4} {:>4} {:>6}",
            row.member.id,
            truncate_string(&row.member.name, NAME_WIDTH),
            row.member.generation,
            row.member.gender.label(),
            row.attendance,
            format_average(row.average_score),
            width = NAME_WIDTH
        );
    }
    Ok(())
}

pub fn admin_overview(overview: &AdminOverview) -> Result<()> {
    heading("Admin");
    println!("Members:  {}", overview.total_members);
    println!("Meetings: {}", overview.total_meetings);
    println!("Rounds:   {}", overview.total_scores);

    heading("Newest members");
    for member in &overview.recent_members {
        println!("{:>5} {}", member.id, member.display_name());
    }

    heading("Latest meetings");
    let ids: Vec<String> = overview.recent_meeting_ids.iter().map(|id| format!("#{}", id)).collect();
    println!("{}", ids.join(" "));
    Ok(())
}
