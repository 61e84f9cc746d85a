pub mod analysis;
pub mod cleaning;
pub mod error;
pub mod ingestion;
pub mod model;
pub mod pipeline;

pub use error::{PipelineError, Result};
pub use model::{
    ActivityLevel, Analysis, AnalysisResponse, ContributionOpportunity, IssueTrend, LanguageStat,
    RawRow, RepositoryRecord, SummaryStats, TopContributor,
};
pub use pipeline::{run_on_bytes, Pipeline, DATASET_PATH};
