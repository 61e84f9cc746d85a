use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const REPOSITORY_COLUMN: &str = "repositories";
pub const LANGUAGE_COLUMN: &str = "language";
pub const STARS_COLUMN: &str = "stars_count";
pub const FORKS_COLUMN: &str = "forks_count";
pub const ISSUES_COLUMN: &str = "issues_count";
pub const PULL_REQUESTS_COLUMN: &str = "pull_requests";
pub const CONTRIBUTORS_COLUMN: &str = "contributors";

/// Columns every dataset must carry, in the order the cleaned frame uses.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    REPOSITORY_COLUMN,
    LANGUAGE_COLUMN,
    STARS_COLUMN,
    FORKS_COLUMN,
    ISSUES_COLUMN,
    PULL_REQUESTS_COLUMN,
    CONTRIBUTORS_COLUMN,
];

/// Count columns coerced with the generic numeric rule. `contributors` has its own.
pub const COUNT_COLUMNS: [&str; 4] = [
    STARS_COLUMN,
    FORKS_COLUMN,
    ISSUES_COLUMN,
    PULL_REQUESTS_COLUMN,
];

/// One CSV row exactly as read, keyed by header name.
pub type RawRow = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    #[serde(rename = "repositories")]
    pub repository: String,
    pub language: String,
    pub stars_count: i64,
    pub forks_count: i64,
    pub issues_count: i64,
    pub pull_requests: i64,
    pub contributors: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean_stars: f64,
    pub median_issues: f64,
    pub std_issues: f64,
    pub outliers: usize,
    pub corr_stars_forks: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub language: String,
    pub repository_count: usize,
    pub mean_stars: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLevel {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionOpportunity {
    pub repository: String,
    pub issues_count: i64,
    pub pull_requests: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopContributor {
    pub repository: String,
    pub contributors: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTrend {
    pub rank: usize,
    pub issues_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub stats: SummaryStats,
    pub language_stats: Vec<LanguageStat>,
    pub activity_levels: Vec<ActivityLevel>,
    pub contrib_ops: Vec<ContributionOpportunity>,
    pub top_contributors: Vec<TopContributor>,
    pub issue_trends: Vec<IssueTrend>,
}

/// Everything a single `/data` request returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub raw_data: Vec<RawRow>,
    pub cleaned_data: Vec<RepositoryRecord>,
    pub analysis: Analysis,
}
