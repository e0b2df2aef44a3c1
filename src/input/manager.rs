//! Dataset loader with a path-keyed cache

use crate::error::{AlignerError, Result};
use crate::input::dataset::Dataset;
use crate::input::file_detector::FileType;
use log::info;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub struct DatasetLoader {
    cache: HashMap<String, Arc<Dataset>>,
    enable_cache: bool,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn load(&mut self, path: &Path) -> Result<Arc<Dataset>> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached dataset for: {}", path.display());
                return Ok(Arc::clone(cached));
            }
        }

        if !path.exists() {
            return Err(AlignerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;
        if file_type == FileType::Unknown {
            return Err(AlignerError::UnsupportedFormat(format!(
                "Unsupported dataset type for: {}",
                path.display()
            )));
        }

        let content = tokio::fs::read_to_string(path).await?;
        let dataset = Arc::new(Dataset::parse(&content, file_type)?);

        info!(
            "Loaded dataset {}: {} programs, {} courses, {} skills, {} benchmarks",
            path.display(),
            dataset.programs.len(),
            dataset.courses.len(),
            dataset.skills.len(),
            dataset.benchmarks.len()
        );

        if self.enable_cache {
            self.cache.insert(path_str, Arc::clone(&dataset));
        }

        Ok(dataset)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                AlignerError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
