//! End-to-end analysis: resolve records, score, recommend, persist

use crate::error::Result;
use crate::input::Dataset;
use crate::model::{BenchmarkUniversity, Course, Program, ProgramMode, ScoringWeights};
use crate::processing::{AnalysisEngine, AnalysisOutput};
use crate::recommendations::{RecommendationDraft, RecommendationEngine, RecommendationInput};
use crate::store::{
    AnalysisRecord, AnalysisResultRecord, AnalysisStatus, AnalysisStore, RecommendationRecord,
};
use chrono::Utc;
use log::{info, warn};

/// What to analyse. Unset fields fall back to the dataset or the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub program_id: String,
    pub benchmark_id: String,
    pub weights_profile: Option<String>,
    pub program_mode: Option<ProgramMode>,
    /// Overrides the program record's degree level on the stored analysis.
    pub degree_level: Option<String>,
    pub analysis_goal: Option<String>,
}

/// Records a request resolves to. Building one is the precondition check.
pub struct ResolvedRequest<'a> {
    pub program: &'a Program,
    pub courses: Vec<Course>,
    pub benchmark: &'a BenchmarkUniversity,
    pub weights: &'a ScoringWeights,
    pub program_mode: ProgramMode,
}

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub output: AnalysisOutput,
    pub recommendations: Vec<RecommendationDraft>,
}

#[derive(Debug, Clone)]
pub struct CompletedAnalysis {
    pub record: AnalysisRecord,
    pub evaluation: Evaluation,
}

pub struct AnalysisPipeline<'a> {
    dataset: &'a Dataset,
    engine: AnalysisEngine<'a>,
    recommendations: &'a RecommendationEngine,
    default_mode: ProgramMode,
}

impl<'a> AnalysisPipeline<'a> {
    pub fn new(dataset: &'a Dataset, recommendations: &'a RecommendationEngine) -> Self {
        Self {
            dataset,
            engine: AnalysisEngine::new(&dataset.skills),
            recommendations,
            default_mode: ProgramMode::default(),
        }
    }

    /// Mode used when neither the request nor the program record sets one.
    pub fn with_default_mode(mut self, mode: ProgramMode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn resolve(&self, request: &AnalysisRequest) -> Result<ResolvedRequest<'a>> {
        let program = self.dataset.program(&request.program_id)?;
        let benchmark = self.dataset.benchmark(&request.benchmark_id)?;
        let weights = self
            .dataset
            .resolve_weights(request.weights_profile.as_deref())?;
        let program_mode = request
            .program_mode
            .or(program.mode)
            .unwrap_or(self.default_mode);

        Ok(ResolvedRequest {
            program,
            courses: self.dataset.courses_for_program(&program.id),
            benchmark,
            weights,
            program_mode,
        })
    }

    /// Score and recommend without touching any store.
    pub fn evaluate(&self, resolved: &ResolvedRequest<'_>) -> Evaluation {
        let output = self.engine.analyze(
            &resolved.courses,
            resolved.benchmark,
            resolved.weights,
            resolved.program_mode,
        );
        let recommendations = self.recommendations.generate(&RecommendationInput {
            gaps: &output.gaps,
            skills: &self.dataset.skills,
            wai_score: output.wai_score,
        });
        Evaluation {
            output,
            recommendations,
        }
    }

    /// Resolve, score and persist one analysis.
    ///
    /// Nothing is written when the request cannot be resolved. The result is
    /// stored before its recommendations; a failed write leaves the analysis
    /// marked `failed`.
    pub fn run(
        &self,
        request: &AnalysisRequest,
        store: &dyn AnalysisStore,
    ) -> Result<CompletedAnalysis> {
        let resolved = self.resolve(request)?;

        let record = AnalysisRecord::pending(
            &resolved.program.id,
            &resolved.benchmark.id,
            resolved.benchmark.ranking_source,
            resolved.program_mode,
            &resolved.weights.id,
        )
        .with_scope(
            request
                .degree_level
                .clone()
                .or_else(|| non_empty(&resolved.program.degree_level)),
            request.analysis_goal.clone(),
        );
        store.create(&record)?;
        info!(
            "Started analysis {} of {} against {}",
            record.id, resolved.program.name, resolved.benchmark.name
        );

        let evaluation = self.evaluate(&resolved);

        if let Err(e) = persist(store, &record.id, &evaluation) {
            if let Err(mark_err) =
                store.finish(&record.id, AnalysisStatus::Failed, Some(e.to_string()))
            {
                warn!("Could not mark analysis {} failed: {}", record.id, mark_err);
            }
            return Err(e);
        }

        store.finish(&record.id, AnalysisStatus::Completed, None)?;
        let record = store.load(&record.id)?.analysis;
        info!("Completed analysis {} with WAI {}", record.id, evaluation.output.wai_score);

        Ok(CompletedAnalysis { record, evaluation })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn persist(store: &dyn AnalysisStore, analysis_id: &str, evaluation: &Evaluation) -> Result<()> {
    store.save_result(&AnalysisResultRecord {
        analysis_id: analysis_id.to_string(),
        created_at: Utc::now(),
        output: evaluation.output.clone(),
    })?;

    let records: Vec<RecommendationRecord> = evaluation
        .recommendations
        .iter()
        .cloned()
        .map(|draft| RecommendationRecord::from_draft(analysis_id, draft))
        .collect();
    store.save_recommendations(analysis_id, &records)
}
