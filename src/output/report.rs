//! Report structures assembled from one analysis

use crate::model::{BenchmarkSource, BenchmarkUniversity, Course, Program, ProgramMode, ScoringWeights, SkillCluster};
use crate::processing::AnalysisOutput;
use crate::recommendations::RecommendationDraft;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cluster scores at or above this count as strengths.
const STRENGTH_SCORE: u32 = 70;
/// Cluster scores below this count as weak areas.
const WEAK_SCORE: u32 = 50;

/// Everything a formatter needs to render one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: ReportSummary,
    pub analysis: AnalysisOutput,
    /// Redundant pairs with course codes and titles resolved.
    pub redundant_courses: Vec<NamedRedundantPair>,
    pub recommendations: Vec<RecommendationDraft>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub program_id: String,
    pub program_name: String,
    pub benchmark_id: String,
    pub benchmark_name: String,
    pub benchmark_source: BenchmarkSource,
    pub program_mode: ProgramMode,
    pub weights_name: String,
    pub wai_score: u32,
    pub band: AlignmentBand,
    pub verdict: String,
    pub strengths: Vec<String>,
    pub weak_areas: Vec<String>,
}

/// Traffic-light grouping of a WAI score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentBand {
    Strong,
    Moderate,
    HighRisk,
}

impl AlignmentBand {
    pub fn from_score(wai_score: u32) -> Self {
        match wai_score {
            75.. => AlignmentBand::Strong,
            50..=74 => AlignmentBand::Moderate,
            _ => AlignmentBand::HighRisk,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlignmentBand::Strong => "STRONG",
            AlignmentBand::Moderate => "MODERATE",
            AlignmentBand::HighRisk => "HIGH RISK",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRedundantPair {
    pub course1: CourseRef,
    pub course2: CourseRef,
    pub overlap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRef {
    pub id: String,
    pub code: String,
    pub title: String,
}

impl CourseRef {
    fn resolve(id: &str, courses: &[Course]) -> Self {
        match courses.iter().find(|c| c.id == id) {
            Some(course) => Self {
                id: course.id.clone(),
                code: course.code.clone(),
                title: course.title.clone(),
            },
            None => Self {
                id: id.to_string(),
                code: String::new(),
                title: id.to_string(),
            },
        }
    }

    /// `CODE Title`, or just the title when there is no code.
    pub fn display_name(&self) -> String {
        if self.code.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.code, self.title)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub aligner_version: String,
    pub catalog_version: String,
    pub analysis_id: Option<String>,
    pub course_count: usize,
}

/// Records the report describes.
pub struct ReportContext<'a> {
    pub program: &'a Program,
    pub courses: &'a [Course],
    pub benchmark: &'a BenchmarkUniversity,
    pub weights: &'a ScoringWeights,
    pub program_mode: ProgramMode,
    pub catalog_version: &'a str,
    pub analysis_id: Option<&'a str>,
}

impl AnalysisReport {
    pub fn build(
        context: &ReportContext<'_>,
        analysis: AnalysisOutput,
        recommendations: Vec<RecommendationDraft>,
    ) -> Self {
        let summary = Self::create_summary(context, &analysis);

        let redundant_courses = analysis
            .redundant_courses
            .iter()
            .map(|pair| NamedRedundantPair {
                course1: CourseRef::resolve(&pair.course1, context.courses),
                course2: CourseRef::resolve(&pair.course2, context.courses),
                overlap: pair.overlap,
            })
            .collect();

        let metadata = ReportMetadata {
            generated_at: Utc::now(),
            aligner_version: env!("CARGO_PKG_VERSION").to_string(),
            catalog_version: context.catalog_version.to_string(),
            analysis_id: context.analysis_id.map(str::to_string),
            course_count: context.courses.iter().filter(|c| c.is_active).count(),
        };

        Self {
            summary,
            analysis,
            redundant_courses,
            recommendations,
            metadata,
        }
    }

    fn create_summary(context: &ReportContext<'_>, analysis: &AnalysisOutput) -> ReportSummary {
        let band = AlignmentBand::from_score(analysis.wai_score);

        let verdict = match band {
            AlignmentBand::Strong => {
                "Curriculum is well aligned with the benchmark and market needs".to_string()
            }
            AlignmentBand::Moderate => {
                "Curriculum is partially aligned; targeted updates recommended".to_string()
            }
            AlignmentBand::HighRisk => {
                "Curriculum is significantly misaligned; restructuring recommended".to_string()
            }
        };

        let mut strengths = Vec::new();
        let mut weak_areas = Vec::new();
        for cluster in SkillCluster::ALL {
            let score = analysis.cluster_score(cluster);
            if score >= STRENGTH_SCORE {
                strengths.push(format!("{} ({}%)", cluster.label(), score));
            } else if score < WEAK_SCORE {
                weak_areas.push(format!("{} ({}%)", cluster.label(), score));
            }
        }

        ReportSummary {
            program_id: context.program.id.clone(),
            program_name: context.program.name.clone(),
            benchmark_id: context.benchmark.id.clone(),
            benchmark_name: context.benchmark.name.clone(),
            benchmark_source: context.benchmark.ranking_source,
            program_mode: context.program_mode,
            weights_name: context.weights.name.clone(),
            wai_score: analysis.wai_score,
            band,
            verdict,
            strengths,
            weak_areas,
        }
    }
}
