//! Persistence of analyses, their results and recommendations
//!
//! An analysis is created `pending`, gets exactly one result and one batch of
//! recommendations, then moves to `completed` or `failed`. Results and
//! recommendations are never rewritten once saved.

pub mod file_store;
pub mod memory;

pub use file_store::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::model::{BenchmarkSource, ProgramMode};
use crate::processing::AnalysisOutput;
use crate::recommendations::RecommendationDraft;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Pending,
    Completed,
    Failed,
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisStatus::Pending => "pending",
            AnalysisStatus::Completed => "completed",
            AnalysisStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: String,
    pub program_id: String,
    pub benchmark_id: String,
    pub benchmark_source: BenchmarkSource,
    pub program_mode: ProgramMode,
    pub weights_id: String,
    pub status: AnalysisStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub degree_level: Option<String>,
    /// Free-form purpose of the run, e.g. `academic` or `market`.
    #[serde(default)]
    pub analysis_goal: Option<String>,
}

impl AnalysisRecord {
    /// A fresh pending record with a random id.
    pub fn pending(
        program_id: &str,
        benchmark_id: &str,
        benchmark_source: BenchmarkSource,
        program_mode: ProgramMode,
        weights_id: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            program_id: program_id.to_string(),
            benchmark_id: benchmark_id.to_string(),
            benchmark_source,
            program_mode,
            weights_id: weights_id.to_string(),
            status: AnalysisStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
            error: None,
            degree_level: None,
            analysis_goal: None,
        }
    }

    pub fn with_scope(mut self, degree_level: Option<String>, analysis_goal: Option<String>) -> Self {
        self.degree_level = degree_level;
        self.analysis_goal = analysis_goal;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResultRecord {
    pub analysis_id: String,
    pub created_at: DateTime<Utc>,
    pub output: AnalysisOutput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub id: String,
    pub analysis_id: String,
    #[serde(flatten)]
    pub draft: RecommendationDraft,
}

impl RecommendationRecord {
    pub fn from_draft(analysis_id: &str, draft: RecommendationDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            analysis_id: analysis_id.to_string(),
            draft,
        }
    }
}

/// An analysis with whatever has been persisted for it so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub analysis: AnalysisRecord,
    pub result: Option<AnalysisResultRecord>,
    pub recommendations: Vec<RecommendationRecord>,
}

pub trait AnalysisStore: Send + Sync {
    /// Insert a new analysis. Fails if the id already exists.
    fn create(&self, record: &AnalysisRecord) -> Result<()>;

    /// Attach the result. Fails if one is already stored.
    fn save_result(&self, result: &AnalysisResultRecord) -> Result<()>;

    /// Attach the recommendation batch. Fails if one is already stored.
    fn save_recommendations(&self, analysis_id: &str, records: &[RecommendationRecord])
        -> Result<()>;

    /// Move a pending analysis to `status`. Fails if it is no longer pending.
    fn finish(&self, analysis_id: &str, status: AnalysisStatus, error: Option<String>)
        -> Result<()>;

    fn load(&self, analysis_id: &str) -> Result<StoredAnalysis>;

    /// All analyses, newest first.
    fn list(&self) -> Result<Vec<AnalysisRecord>>;
}

pub(crate) fn finished(
    mut record: AnalysisRecord,
    status: AnalysisStatus,
    error: Option<String>,
) -> Result<AnalysisRecord> {
    if record.status != AnalysisStatus::Pending {
        return Err(crate::error::AlignerError::Storage(format!(
            "Analysis {} is already {}",
            record.id, record.status
        )));
    }
    record.status = status;
    record.error = error;
    record.completed_at = Some(Utc::now());
    Ok(record)
}

pub(crate) fn newest_first(records: &mut [AnalysisRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}
