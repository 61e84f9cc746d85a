// crates/repostats-core/src/pipeline.rs

use std::path::{Path, PathBuf};

use tracing::info;

use crate::analysis;
use crate::cleaning::{clean_dataset, records_from_frame};
use crate::error::Result;
use crate::ingestion::{parse_dataset, read_dataset, Dataset};
use crate::model::AnalysisResponse;

/// The dataset every request reads, relative to the working directory.
pub const DATASET_PATH: &str = "github_dataset.csv";

/// Load, clean and analyse the repository dataset.
///
/// Holds nothing but the file location; every `run` reads the file again and
/// builds the whole response from scratch.
#[derive(Debug, Clone)]
pub struct Pipeline {
    dataset_path: PathBuf,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(DATASET_PATH)
    }
}

impl Pipeline {
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
        }
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    pub fn run(&self) -> Result<AnalysisResponse> {
        let dataset = read_dataset(&self.dataset_path)?;
        build_response(dataset)
    }
}

/// Runs the pipeline over in-memory CSV content.
pub fn run_on_bytes(content: &[u8]) -> Result<AnalysisResponse> {
    build_response(parse_dataset(content)?)
}

fn build_response(dataset: Dataset) -> Result<AnalysisResponse> {
    let Dataset { raw_rows, frame } = dataset;

    let cleaned = clean_dataset(&frame)?;
    let cleaned_data = records_from_frame(&cleaned)?;
    let analysis = analysis::analyze(&cleaned)?;

    info!(
        raw_rows = raw_rows.len(),
        cleaned_rows = cleaned_data.len(),
        contrib_ops = analysis.contrib_ops.len(),
        "pipeline run complete"
    );

    Ok(AnalysisResponse {
        raw_data: raw_rows,
        cleaned_data,
        analysis,
    })
}
