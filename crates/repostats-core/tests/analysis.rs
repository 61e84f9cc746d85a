use std::collections::HashSet;

use polars::prelude::*;
use repostats_core::analysis::{
    activity_levels, analyze, contribution_opportunities, issue_trends, language_breakdown,
    summary_stats, top_contributors,
};

fn cleaned_frame(rows: &[(&str, &str, i64, i64, i64, i64, i64)]) -> DataFrame {
    let repositories: Vec<&str> = rows.iter().map(|row| row.0).collect();
    let languages: Vec<&str> = rows.iter().map(|row| row.1).collect();
    let stars: Vec<i64> = rows.iter().map(|row| row.2).collect();
    let forks: Vec<i64> = rows.iter().map(|row| row.3).collect();
    let issues: Vec<i64> = rows.iter().map(|row| row.4).collect();
    let pull_requests: Vec<i64> = rows.iter().map(|row| row.5).collect();
    let contributors: Vec<i64> = rows.iter().map(|row| row.6).collect();

    df!(
        "repositories" => repositories,
        "language" => languages,
        "stars_count" => stars,
        "forks_count" => forks,
        "issues_count" => issues,
        "pull_requests" => pull_requests,
        "contributors" => contributors,
    )
    .unwrap()
}

#[test]
fn activity_buckets_split_on_inclusive_medium_range() -> PolarsResult<()> {
    let df = df!(
        "issues_count" => &[0i64, 49, 50, 75, 100, 101, 5000],
    )?;

    let levels = activity_levels(&df).expect("activity levels");
    let counts: Vec<usize> = levels.iter().map(|level| level.count).collect();
    assert_eq!(counts, vec![2, 3, 2]);
    assert_eq!(counts.iter().sum::<usize>(), df.height());

    Ok(())
}

#[test]
fn language_breakdown_keeps_top_ten_by_count() {
    let mut rows = Vec::new();
    let names: Vec<String> = (0..14).map(|idx| format!("repo-{idx}")).collect();
    let languages = [
        "Rust", "Rust", "Rust", "Go", "Go", "C", "D", "Elm", "F#", "Haskell", "Java", "Kotlin",
        "Lua", "Nim",
    ];
    for (idx, language) in languages.iter().enumerate() {
        rows.push((names[idx].as_str(), *language, (idx as i64) * 10, 1, 1, 1, 1));
    }

    let stats = language_breakdown(&cleaned_frame(&rows)).expect("language stats");

    assert_eq!(stats.len(), 10);
    assert_eq!(stats[0].language, "Rust");
    assert_eq!(stats[0].repository_count, 3);
    assert!((stats[0].mean_stars - 10.0).abs() < 1e-9);
    assert_eq!(stats[1].language, "Go");
    assert!((stats[1].mean_stars - 35.0).abs() < 1e-9);

    let counts: Vec<usize> = stats.iter().map(|stat| stat.repository_count).collect();
    assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
    let unique: HashSet<&str> = stats.iter().map(|stat| stat.language.as_str()).collect();
    assert_eq!(unique.len(), stats.len());
}

#[test]
fn blank_languages_are_not_grouped() {
    let rows = [
        ("a", "Rust", 10, 0, 0, 0, 0),
        ("b", "", 40, 0, 0, 0, 0),
        ("c", "Unknown", 6, 0, 0, 0, 0),
        ("d", "", 2, 0, 0, 0, 0),
    ];
    let stats = language_breakdown(&cleaned_frame(&rows)).expect("language stats");

    let names: Vec<&str> = stats.iter().map(|stat| stat.language.as_str()).collect();
    assert_eq!(names, vec!["Rust", "Unknown"]);
    assert!((stats[0].mean_stars - 10.0).abs() < 1e-9);
}

#[test]
fn outliers_use_issue_mean_and_sample_deviation() {
    let mut rows: Vec<(String, i64)> = (0..10).map(|idx| (format!("r{idx}"), 10)).collect();
    rows.push(("spike".to_string(), 500));
    let tuples: Vec<(&str, &str, i64, i64, i64, i64, i64)> = rows
        .iter()
        .map(|(name, issues)| (name.as_str(), "Rust", 1, 1, *issues, 0, 0))
        .collect();

    let stats = summary_stats(&cleaned_frame(&tuples)).expect("summary stats");

    assert_eq!(stats.outliers, 1);
    assert_eq!(stats.median_issues, 10.0);
    assert!(stats.std_issues > 0.0);
    assert_eq!(stats.corr_stars_forks, 0.0);
    assert_eq!(stats.mean_stars, 1.0);
}

#[test]
fn constant_issues_have_no_outliers() {
    let rows = [
        ("a", "Rust", 1, 2, 7, 0, 0),
        ("b", "Rust", 2, 4, 7, 0, 0),
        ("c", "Rust", 3, 6, 7, 0, 0),
    ];
    let stats = summary_stats(&cleaned_frame(&rows)).expect("summary stats");

    assert_eq!(stats.std_issues, 0.0);
    assert_eq!(stats.outliers, 0);
    assert!((stats.corr_stars_forks - 1.0).abs() < 1e-12);
}

#[test]
fn contribution_opportunities_filter_and_cap() {
    let rows = [
        ("a", "Rust", 0, 0, 51, 9, 0),
        ("b", "Rust", 0, 0, 50, 0, 0),
        ("c", "Rust", 0, 0, 80, 10, 0),
        ("d", "Rust", 0, 0, 90, 0, 0),
        ("e", "Rust", 0, 0, 200, 3, 0),
        ("f", "Rust", 0, 0, 60, 1, 0),
        ("g", "Rust", 0, 0, 61, 2, 0),
        ("h", "Rust", 0, 0, 62, 2, 0),
    ];
    let ops = contribution_opportunities(&cleaned_frame(&rows)).expect("opportunities");

    let names: Vec<&str> = ops.iter().map(|op| op.repository.as_str()).collect();
    assert_eq!(names, vec!["a", "d", "e", "f", "g"]);
    assert!(ops
        .iter()
        .all(|op| op.issues_count > 50 && op.pull_requests < 10));
}

#[test]
fn rankings_are_stable_on_ties() {
    let rows = [
        ("a", "Rust", 0, 0, 5, 0, 3),
        ("b", "Rust", 0, 0, 9, 0, 8),
        ("c", "Rust", 0, 0, 5, 0, 3),
        ("d", "Rust", 0, 0, 1, 0, 8),
    ];
    let df = cleaned_frame(&rows);

    let top = top_contributors(&df).expect("top contributors");
    let names: Vec<&str> = top.iter().map(|entry| entry.repository.as_str()).collect();
    assert_eq!(names, vec!["b", "d", "a", "c"]);

    let trends = issue_trends(&df).expect("issue trends");
    let ranked: Vec<(usize, i64)> = trends
        .iter()
        .map(|trend| (trend.rank, trend.issues_count))
        .collect();
    assert_eq!(ranked, vec![(1, 9), (2, 5), (3, 5), (4, 1)]);
}

#[test]
fn analyze_assembles_every_section() {
    let rows = [
        ("a", "Rust", 10, 2, 60, 3, 0),
        ("b", "Go", 20, 5, 120, 30, 4),
    ];
    let analysis = analyze(&cleaned_frame(&rows)).expect("analysis");

    assert_eq!(analysis.language_stats.len(), 2);
    assert_eq!(analysis.activity_levels.len(), 3);
    assert_eq!(analysis.contrib_ops.len(), 1);
    assert_eq!(analysis.top_contributors.len(), 2);
    assert_eq!(analysis.issue_trends.len(), 2);
    assert_eq!(analysis.stats.median_issues, 90.0);
    assert!((analysis.stats.mean_stars - 15.0).abs() < 1e-9);
}
