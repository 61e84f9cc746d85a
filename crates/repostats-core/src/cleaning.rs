// crates/repostats-core/src/cleaning.rs

use std::collections::HashSet;

use polars::prelude::*;
use tracing::info;

use crate::error::Result;
use crate::model::{
    RepositoryRecord, CONTRIBUTORS_COLUMN, COUNT_COLUMNS, FORKS_COLUMN, ISSUES_COLUMN,
    LANGUAGE_COLUMN, PULL_REQUESTS_COLUMN, REPOSITORY_COLUMN, STARS_COLUMN,
};

pub const NULL_SENTINEL: &str = "NULL";
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

pub fn normalize_language(value: &str) -> &str {
    if value == NULL_SENTINEL {
        UNKNOWN_LANGUAGE
    } else {
        value
    }
}

/// Lenient integer coercion. Anything that does not read as a finite number is 0;
/// fractional values truncate toward zero.
pub fn coerce_count(value: &str) -> i64 {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return parsed;
    }
    match trimmed.parse::<f64>() {
        // `as` saturates at the i64 bounds.
        Ok(parsed) if parsed.is_finite() => parsed.trunc() as i64,
        _ => 0,
    }
}

pub fn coerce_contributors(value: &str) -> i64 {
    if value == NULL_SENTINEL {
        0
    } else {
        coerce_count(value)
    }
}

/// Drops repeated repositories (first wins) and normalizes every column.
///
/// Input is the string frame produced by ingestion; output keeps the same
/// column names with the count columns typed as `i64`.
pub fn clean_dataset(df: &DataFrame) -> Result<DataFrame> {
    let len = df.height();

    let repositories = df.column(REPOSITORY_COLUMN)?.str()?;
    let languages = df.column(LANGUAGE_COLUMN)?.str()?;
    let contributors = df.column(CONTRIBUTORS_COLUMN)?.str()?;
    let counts = COUNT_COLUMNS
        .iter()
        .map(|name| df.column(name).and_then(|column| column.str()))
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut seen: HashSet<&str> = HashSet::with_capacity(len);
    let mut repository_out: Vec<String> = Vec::with_capacity(len);
    let mut language_out: Vec<String> = Vec::with_capacity(len);
    let mut contributors_out: Vec<i64> = Vec::with_capacity(len);
    let mut counts_out: Vec<Vec<i64>> = vec![Vec::with_capacity(len); COUNT_COLUMNS.len()];

    for idx in 0..len {
        let repository = repositories.get(idx).unwrap_or("");
        if !seen.insert(repository) {
            continue;
        }

        repository_out.push(repository.to_string());
        language_out.push(normalize_language(languages.get(idx).unwrap_or("")).to_string());
        contributors_out.push(coerce_contributors(contributors.get(idx).unwrap_or("")));
        for (values, column) in counts_out.iter_mut().zip(counts.iter()) {
            values.push(coerce_count(column.get(idx).unwrap_or("")));
        }
    }

    info!(
        raw_rows = len,
        cleaned_rows = repository_out.len(),
        "cleaned repository dataset"
    );

    let mut columns: Vec<Column> = vec![
        Series::new(REPOSITORY_COLUMN.into(), repository_out).into(),
        Series::new(LANGUAGE_COLUMN.into(), language_out).into(),
    ];
    for (name, values) in COUNT_COLUMNS.iter().zip(counts_out) {
        columns.push(Series::new((*name).into(), values).into());
    }
    columns.push(Series::new(CONTRIBUTORS_COLUMN.into(), contributors_out).into());

    Ok(DataFrame::new(columns)?)
}

/// Reads an `i64` column of the cleaned frame, treating nulls as 0.
pub(crate) fn count_values(df: &DataFrame, name: &str) -> Result<Vec<i64>> {
    Ok(df
        .column(name)?
        .i64()?
        .into_iter()
        .map(|value| value.unwrap_or(0))
        .collect())
}

pub(crate) fn text_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    Ok(df
        .column(name)?
        .str()?
        .into_iter()
        .map(|value| value.unwrap_or("").to_string())
        .collect())
}

pub fn records_from_frame(df: &DataFrame) -> Result<Vec<RepositoryRecord>> {
    let repositories = text_values(df, REPOSITORY_COLUMN)?;
    let languages = text_values(df, LANGUAGE_COLUMN)?;
    let stars = count_values(df, STARS_COLUMN)?;
    let forks = count_values(df, FORKS_COLUMN)?;
    let issues = count_values(df, ISSUES_COLUMN)?;
    let pull_requests = count_values(df, PULL_REQUESTS_COLUMN)?;
    let contributors = count_values(df, CONTRIBUTORS_COLUMN)?;

    Ok(repositories
        .into_iter()
        .zip(languages)
        .enumerate()
        .map(|(idx, (repository, language))| RepositoryRecord {
            repository,
            language,
            stars_count: stars[idx],
            forks_count: forks[idx],
            issues_count: issues[idx],
            pull_requests: pull_requests[idx],
            contributors: contributors[idx],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_count_handles_messy_cells() {
        assert_eq!(coerce_count("17"), 17);
        assert_eq!(coerce_count(" 17 "), 17);
        assert_eq!(coerce_count("12.9"), 12);
        assert_eq!(coerce_count("-4.5"), -4);
        assert_eq!(coerce_count("1e3"), 1000);
        assert_eq!(coerce_count(""), 0);
        assert_eq!(coerce_count("NULL"), 0);
        assert_eq!(coerce_count("lots"), 0);
        assert_eq!(coerce_count("inf"), 0);
        assert_eq!(coerce_count("NaN"), 0);
    }

    #[test]
    fn coerce_count_is_idempotent() {
        for cell in ["17", "12.9", "1e3", "", "NULL", "lots", "-4.5", "99999999999999999999"] {
            let once = coerce_count(cell);
            assert_eq!(coerce_count(&once.to_string()), once, "cell {cell:?}");
        }
    }

    #[test]
    fn contributors_sentinel_becomes_zero() {
        assert_eq!(coerce_contributors("NULL"), 0);
        assert_eq!(coerce_contributors("8"), 8);
        assert_eq!(coerce_contributors("n/a"), 0);
    }

    #[test]
    fn only_exact_sentinel_language_is_replaced() {
        assert_eq!(normalize_language("NULL"), "Unknown");
        assert_eq!(normalize_language("null"), "null");
        assert_eq!(normalize_language("Rust"), "Rust");
        assert_eq!(normalize_language(""), "");
    }
}
