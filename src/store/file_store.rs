//! Directory-per-analysis JSON store
//!
//! ```text
//! <data_dir>/<analysis id>/analysis.json
//!                         /result.json
//!                         /recommendations.json
//! ```

use super::{
    finished, newest_first, AnalysisRecord, AnalysisResultRecord, AnalysisStatus, AnalysisStore,
    RecommendationRecord, StoredAnalysis,
};
use crate::error::{AlignerError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const ANALYSIS_FILE: &str = "analysis.json";
const RESULT_FILE: &str = "result.json";
const RECOMMENDATIONS_FILE: &str = "recommendations.json";

pub struct FileStore {
    root: PathBuf,
    // serializes read-modify-write of analysis.json
    status_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            status_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn analysis_dir(&self, analysis_id: &str) -> Result<PathBuf> {
        if analysis_id.is_empty()
            || analysis_id.contains(['/', '\\'])
            || analysis_id.starts_with('.')
        {
            return Err(AlignerError::InvalidInput(format!(
                "Invalid analysis id: {}",
                analysis_id
            )));
        }
        Ok(self.root.join(analysis_id))
    }

    fn existing_dir(&self, analysis_id: &str) -> Result<PathBuf> {
        let dir = self.analysis_dir(analysis_id)?;
        if !dir.join(ANALYSIS_FILE).exists() {
            return Err(AlignerError::Storage(format!(
                "Analysis not found: {}",
                analysis_id
            )));
        }
        Ok(dir)
    }
}

/// Write `value` to a file that must not exist yet.
fn write_new<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => {
                AlignerError::Storage(format!("Refusing to overwrite {}", path.display()))
            }
            _ => AlignerError::Io(e),
        })?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn read_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if path.exists() {
        read_json(path).map(Some)
    } else {
        Ok(None)
    }
}

impl AnalysisStore for FileStore {
    fn create(&self, record: &AnalysisRecord) -> Result<()> {
        let dir = self.analysis_dir(&record.id)?;
        fs::create_dir_all(&dir)?;
        write_new(&dir.join(ANALYSIS_FILE), record)?;
        log::debug!("Created analysis {} in {}", record.id, dir.display());
        Ok(())
    }

    fn save_result(&self, result: &AnalysisResultRecord) -> Result<()> {
        let dir = self.existing_dir(&result.analysis_id)?;
        write_new(&dir.join(RESULT_FILE), result)
    }

    fn save_recommendations(
        &self,
        analysis_id: &str,
        records: &[RecommendationRecord],
    ) -> Result<()> {
        let dir = self.existing_dir(analysis_id)?;
        if !dir.join(RESULT_FILE).exists() {
            return Err(AlignerError::Storage(format!(
                "Analysis {} has no result yet",
                analysis_id
            )));
        }
        write_new(&dir.join(RECOMMENDATIONS_FILE), records)
    }

    fn finish(
        &self,
        analysis_id: &str,
        status: AnalysisStatus,
        error: Option<String>,
    ) -> Result<()> {
        let _guard = self
            .status_lock
            .lock()
            .map_err(|_| AlignerError::Storage("File store lock poisoned".to_string()))?;

        let path = self.existing_dir(analysis_id)?.join(ANALYSIS_FILE);
        let record: AnalysisRecord = read_json(&path)?;
        let record = finished(record, status, error)?;
        fs::write(&path, serde_json::to_string_pretty(&record)?)?;
        Ok(())
    }

    fn load(&self, analysis_id: &str) -> Result<StoredAnalysis> {
        let dir = self.existing_dir(analysis_id)?;
        Ok(StoredAnalysis {
            analysis: read_json(&dir.join(ANALYSIS_FILE))?,
            result: read_optional(&dir.join(RESULT_FILE))?,
            recommendations: read_optional(&dir.join(RECOMMENDATIONS_FILE))?.unwrap_or_default(),
        })
    }

    fn list(&self) -> Result<Vec<AnalysisRecord>> {
        let mut records = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path().join(ANALYSIS_FILE);
            if !path.exists() {
                continue;
            }
            match read_json::<AnalysisRecord>(&path) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Skipping unreadable analysis {}: {}", path.display(), e),
            }
        }

        newest_first(&mut records);
        Ok(records)
    }
}
