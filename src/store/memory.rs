//! In-memory store for tests and one-off runs

use super::{
    finished, newest_first, AnalysisRecord, AnalysisResultRecord, AnalysisStatus, AnalysisStore,
    RecommendationRecord, StoredAnalysis,
};
use crate::error::{AlignerError, Result};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

struct Entry {
    stored: StoredAnalysis,
    recommendations_saved: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>> {
        self.inner
            .lock()
            .map_err(|_| AlignerError::Storage("Memory store lock poisoned".to_string()))
    }
}

fn not_found(id: &str) -> AlignerError {
    AlignerError::Storage(format!("Analysis not found: {}", id))
}

impl AnalysisStore for MemoryStore {
    fn create(&self, record: &AnalysisRecord) -> Result<()> {
        let mut guard = self.guard()?;
        if guard.contains_key(&record.id) {
            return Err(AlignerError::Storage(format!(
                "Analysis already exists: {}",
                record.id
            )));
        }
        guard.insert(
            record.id.clone(),
            Entry {
                stored: StoredAnalysis {
                    analysis: record.clone(),
                    result: None,
                    recommendations: Vec::new(),
                },
                recommendations_saved: false,
            },
        );
        Ok(())
    }

    fn save_result(&self, result: &AnalysisResultRecord) -> Result<()> {
        let mut guard = self.guard()?;
        let entry = guard
            .get_mut(&result.analysis_id)
            .ok_or_else(|| not_found(&result.analysis_id))?;
        if entry.stored.result.is_some() {
            return Err(AlignerError::Storage(format!(
                "Result already stored for analysis {}",
                result.analysis_id
            )));
        }
        entry.stored.result = Some(result.clone());
        Ok(())
    }

    fn save_recommendations(
        &self,
        analysis_id: &str,
        records: &[RecommendationRecord],
    ) -> Result<()> {
        let mut guard = self.guard()?;
        let entry = guard
            .get_mut(analysis_id)
            .ok_or_else(|| not_found(analysis_id))?;
        if entry.stored.result.is_none() {
            return Err(AlignerError::Storage(format!(
                "Analysis {} has no result yet",
                analysis_id
            )));
        }
        if entry.recommendations_saved {
            return Err(AlignerError::Storage(format!(
                "Recommendations already stored for analysis {}",
                analysis_id
            )));
        }
        entry.stored.recommendations = records.to_vec();
        entry.recommendations_saved = true;
        Ok(())
    }

    fn finish(
        &self,
        analysis_id: &str,
        status: AnalysisStatus,
        error: Option<String>,
    ) -> Result<()> {
        let mut guard = self.guard()?;
        let entry = guard
            .get_mut(analysis_id)
            .ok_or_else(|| not_found(analysis_id))?;
        entry.stored.analysis = finished(entry.stored.analysis.clone(), status, error)?;
        Ok(())
    }

    fn load(&self, analysis_id: &str) -> Result<StoredAnalysis> {
        let guard = self.guard()?;
        guard
            .get(analysis_id)
            .map(|entry| entry.stored.clone())
            .ok_or_else(|| not_found(analysis_id))
    }

    fn list(&self) -> Result<Vec<AnalysisRecord>> {
        let guard = self.guard()?;
        let mut records: Vec<AnalysisRecord> =
            guard.values().map(|e| e.stored.analysis.clone()).collect();
        newest_first(&mut records);
        Ok(records)
    }
}
