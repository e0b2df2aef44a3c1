//! In-memory record set for one analysis session

use crate::error::{AlignerError, Result};
use crate::input::file_detector::FileType;
use crate::model::{BenchmarkSource, BenchmarkUniversity, Course, Program, ScoringWeights, Skill};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Programs, courses, the skill vocabulary, benchmarks and weight profiles
/// as read from a dataset file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub programs: Vec<Program>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub benchmarks: Vec<BenchmarkUniversity>,
    #[serde(default)]
    pub scoring_weights: Vec<ScoringWeights>,
}

impl Dataset {
    pub fn parse(content: &str, file_type: FileType) -> Result<Self> {
        let dataset: Dataset = match file_type {
            FileType::Json => serde_json::from_str(content)?,
            FileType::Toml => toml::from_str(content)?,
            FileType::Unknown => {
                return Err(AlignerError::UnsupportedFormat(
                    "Dataset must be JSON or TOML".to_string(),
                ))
            }
        };
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::parse(content, FileType::Json)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, FileType::Toml)
    }

    /// Reject duplicate ids within a record kind and more than one default
    /// weights record.
    pub fn validate(&self) -> Result<()> {
        check_unique("program", self.programs.iter().map(|p| p.id.as_str()))?;
        check_unique("course", self.courses.iter().map(|c| c.id.as_str()))?;
        check_unique("skill", self.skills.iter().map(|s| s.id.as_str()))?;
        check_unique("benchmark", self.benchmarks.iter().map(|b| b.id.as_str()))?;
        check_unique(
            "scoring weights",
            self.scoring_weights
                .iter()
                .map(|w| w.id.as_str())
                .filter(|id| !id.is_empty()),
        )?;

        let defaults = self.scoring_weights.iter().filter(|w| w.is_default).count();
        if defaults > 1 {
            return Err(AlignerError::InvalidInput(format!(
                "{} scoring weights records are marked default; expected at most one",
                defaults
            )));
        }
        Ok(())
    }

    pub fn program(&self, id: &str) -> Result<&Program> {
        self.programs
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AlignerError::MissingConfiguration(format!("Program not found: {}", id)))
    }

    pub fn course(&self, id: &str) -> Result<&Course> {
        self.courses
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AlignerError::MissingConfiguration(format!("Course not found: {}", id)))
    }

    /// Every course row of a program, inactive ones included.
    pub fn courses_for_program(&self, program_id: &str) -> Vec<Course> {
        self.courses
            .iter()
            .filter(|c| c.program_id == program_id)
            .cloned()
            .collect()
    }

    pub fn benchmark(&self, id: &str) -> Result<&BenchmarkUniversity> {
        self.benchmarks
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| {
                AlignerError::MissingConfiguration(format!("Benchmark university not found: {}", id))
            })
    }

    pub fn benchmarks_by_source(&self, source: BenchmarkSource) -> Vec<&BenchmarkUniversity> {
        self.benchmarks
            .iter()
            .filter(|b| b.ranking_source == source)
            .collect()
    }

    /// Weight profile by name or id, or the default profile when `profile` is `None`.
    pub fn resolve_weights(&self, profile: Option<&str>) -> Result<&ScoringWeights> {
        match profile {
            Some(name) => self
                .scoring_weights
                .iter()
                .find(|w| w.name == name || w.id == name)
                .ok_or_else(|| {
                    AlignerError::MissingConfiguration(format!(
                        "Scoring weights profile not found: {}",
                        name
                    ))
                }),
            None => self
                .scoring_weights
                .iter()
                .find(|w| w.is_default)
                .ok_or_else(|| {
                    AlignerError::MissingConfiguration(
                        "No default scoring weights configured".to_string(),
                    )
                }),
        }
    }
}

fn check_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AlignerError::InvalidInput(format!(
                "Duplicate {} id: {}",
                kind, id
            )));
        }
    }
    Ok(())
}
