// crates/repostats-core/src/analysis.rs

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use statrs::statistics::Statistics;
use tracing::debug;

use crate::cleaning::{count_values, text_values};
use crate::error::Result;
use crate::model::{
    ActivityLevel, Analysis, ContributionOpportunity, IssueTrend, LanguageStat, SummaryStats,
    TopContributor, CONTRIBUTORS_COLUMN, FORKS_COLUMN, ISSUES_COLUMN, LANGUAGE_COLUMN,
    PULL_REQUESTS_COLUMN, REPOSITORY_COLUMN, STARS_COLUMN,
};

const OUTLIER_Z_THRESHOLD: f64 = 2.0;
const TOP_LANGUAGES: usize = 10;
const TOP_CONTRIBUTORS: usize = 10;
const ISSUE_TREND_LIMIT: usize = 20;
const CONTRIBUTION_LIMIT: usize = 5;
const CONTRIBUTION_MIN_ISSUES: i64 = 50;
const CONTRIBUTION_MAX_PULL_REQUESTS: i64 = 10;

pub const LOW_ACTIVITY: &str = "Low (<50 issues)";
pub const MEDIUM_ACTIVITY: &str = "Medium (50-100 issues)";
pub const HIGH_ACTIVITY: &str = "High (>100 issues)";

pub fn analyze(df: &DataFrame) -> Result<Analysis> {
    let analysis = Analysis {
        stats: summary_stats(df)?,
        language_stats: language_breakdown(df)?,
        activity_levels: activity_levels(df)?,
        contrib_ops: contribution_opportunities(df)?,
        top_contributors: top_contributors(df)?,
        issue_trends: issue_trends(df)?,
    };
    debug!(
        languages = analysis.language_stats.len(),
        outliers = analysis.stats.outliers,
        "computed repository analysis"
    );
    Ok(analysis)
}

/// Scalar statistics over stars, forks and issues.
///
/// Degenerate inputs never produce NaN: an empty set is all zeros, a single
/// row has `std_issues == 0`, and constant stars or forks give a correlation
/// of 0.
pub fn summary_stats(df: &DataFrame) -> Result<SummaryStats> {
    let stars = as_f64(&count_values(df, STARS_COLUMN)?);
    let forks = as_f64(&count_values(df, FORKS_COLUMN)?);
    let issues = as_f64(&count_values(df, ISSUES_COLUMN)?);

    if issues.is_empty() {
        return Ok(SummaryStats {
            mean_stars: 0.0,
            median_issues: 0.0,
            std_issues: 0.0,
            outliers: 0,
            corr_stars_forks: 0.0,
        });
    }

    let mean_stars = stars.iter().mean();
    let median_issues = median(&issues);
    let std_issues = finite_or_zero(issues.iter().std_dev());

    let outliers = if std_issues > 0.0 {
        let mean_issues = issues.iter().mean();
        issues
            .iter()
            .filter(|value| ((*value - mean_issues) / std_issues).abs() > OUTLIER_Z_THRESHOLD)
            .count()
    } else {
        0
    };

    Ok(SummaryStats {
        mean_stars,
        median_issues,
        std_issues,
        outliers,
        corr_stars_forks: pearson(&stars, &forks),
    })
}

/// Pearson correlation coefficient, 0 when either series has no variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }
    let sd_x = x.iter().std_dev();
    let sd_y = y.iter().std_dev();
    if !(sd_x > 0.0 && sd_y > 0.0) {
        return 0.0;
    }
    finite_or_zero(x.iter().covariance(y.iter()) / (sd_x * sd_y))
}

pub fn language_breakdown(df: &DataFrame) -> Result<Vec<LanguageStat>> {
    let languages = text_values(df, LANGUAGE_COLUMN)?;
    let stars = count_values(df, STARS_COLUMN)?;

    let mut groups: BTreeMap<String, (usize, f64)> = BTreeMap::new();
    for (language, stars) in languages.into_iter().zip(stars) {
        // Blank cells carry no language; they are left out of the breakdown.
        if language.is_empty() {
            continue;
        }
        let entry = groups.entry(language).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += stars as f64;
    }

    let mut stats: Vec<LanguageStat> = groups
        .into_iter()
        .map(|(language, (count, total_stars))| LanguageStat {
            language,
            repository_count: count,
            mean_stars: total_stars / count as f64,
        })
        .collect();
    // Stable: equal counts stay in alphabetical order.
    stats.sort_by(|a, b| b.repository_count.cmp(&a.repository_count));
    stats.truncate(TOP_LANGUAGES);

    Ok(stats)
}

pub fn activity_levels(df: &DataFrame) -> Result<Vec<ActivityLevel>> {
    let issues = count_values(df, ISSUES_COLUMN)?;

    let mut low = 0;
    let mut medium = 0;
    let mut high = 0;
    for value in issues {
        match value {
            i64::MIN..=49 => low += 1,
            50..=100 => medium += 1,
            _ => high += 1,
        }
    }

    Ok(vec![
        ActivityLevel {
            name: LOW_ACTIVITY.to_string(),
            count: low,
        },
        ActivityLevel {
            name: MEDIUM_ACTIVITY.to_string(),
            count: medium,
        },
        ActivityLevel {
            name: HIGH_ACTIVITY.to_string(),
            count: high,
        },
    ])
}

/// Repositories with a backlog of issues but few pull requests, in dataset order.
pub fn contribution_opportunities(df: &DataFrame) -> Result<Vec<ContributionOpportunity>> {
    let repositories = text_values(df, REPOSITORY_COLUMN)?;
    let issues = count_values(df, ISSUES_COLUMN)?;
    let pull_requests = count_values(df, PULL_REQUESTS_COLUMN)?;

    Ok(repositories
        .into_iter()
        .zip(issues)
        .zip(pull_requests)
        .filter(|((_, issues), prs)| {
            *issues > CONTRIBUTION_MIN_ISSUES && *prs < CONTRIBUTION_MAX_PULL_REQUESTS
        })
        .take(CONTRIBUTION_LIMIT)
        .map(|((repository, issues_count), pull_requests)| ContributionOpportunity {
            repository,
            issues_count,
            pull_requests,
        })
        .collect())
}

pub fn top_contributors(df: &DataFrame) -> Result<Vec<TopContributor>> {
    let repositories = text_values(df, REPOSITORY_COLUMN)?;
    let contributors = count_values(df, CONTRIBUTORS_COLUMN)?;

    let mut ranked: Vec<TopContributor> = repositories
        .into_iter()
        .zip(contributors)
        .map(|(repository, contributors)| TopContributor {
            repository,
            contributors,
        })
        .collect();
    ranked.sort_by(|a, b| b.contributors.cmp(&a.contributors));
    ranked.truncate(TOP_CONTRIBUTORS);

    Ok(ranked)
}

pub fn issue_trends(df: &DataFrame) -> Result<Vec<IssueTrend>> {
    let mut issues = count_values(df, ISSUES_COLUMN)?;
    issues.sort_by(|a, b| b.cmp(a));

    Ok(issues
        .into_iter()
        .take(ISSUE_TREND_LIMIT)
        .enumerate()
        .map(|(idx, issues_count)| IssueTrend {
            rank: idx + 1,
            issues_count,
        })
        .collect())
}

/// Middle value, or the mean of the two middle values for an even count.
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn as_f64(values: &[i64]) -> Vec<f64> {
    values.iter().map(|value| *value as f64).collect()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
