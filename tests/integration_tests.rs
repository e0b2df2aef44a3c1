//! Integration tests for the curriculum aligner

use curriculum_aligner::config::OutputFormat;
use curriculum_aligner::error::AlignerError;
use curriculum_aligner::input::{Dataset, DatasetLoader};
use curriculum_aligner::model::{BenchmarkSource, ProgramMode};
use curriculum_aligner::output::{AnalysisReport, ReportContext, ReportGenerator};
use curriculum_aligner::pipeline::{AnalysisPipeline, AnalysisRequest};
use curriculum_aligner::recommendations::{Priority, RecommendationEngine, RecommendationType};
use curriculum_aligner::store::{AnalysisStatus, AnalysisStore, FileStore};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const FIXTURE: &str = "tests/fixtures/sample_program.json";

async fn load_fixture() -> Arc<Dataset> {
    let mut loader = DatasetLoader::new();
    loader.load(Path::new(FIXTURE)).await.unwrap()
}

fn request(benchmark_id: &str) -> AnalysisRequest {
    AnalysisRequest {
        program_id: "p-it".to_string(),
        benchmark_id: benchmark_id.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_load_fixture_dataset() {
    let mut loader = DatasetLoader::new();
    let dataset = loader.load(Path::new(FIXTURE)).await.unwrap();

    assert_eq!(dataset.programs.len(), 2);
    assert_eq!(dataset.skills.len(), 9);
    assert_eq!(dataset.benchmarks_by_source(BenchmarkSource::QS).len(), 1);
    assert_eq!(dataset.resolve_weights(None).unwrap().id, "w-default");
    assert_eq!(dataset.resolve_weights(Some("Balanced")).unwrap().id, "w-balanced");

    // second load is served from the cache
    let again = loader.load(Path::new(FIXTURE)).await.unwrap();
    assert!(Arc::ptr_eq(&dataset, &again));
    assert_eq!(loader.cache_size(), 1);
}

#[tokio::test]
async fn test_load_rejects_bad_paths() {
    let dir = TempDir::new().unwrap();
    let mut loader = DatasetLoader::new();

    let missing = loader.load(&dir.path().join("nope.json")).await;
    assert!(matches!(missing, Err(AlignerError::InvalidInput(_))));

    let text_file = dir.path().join("notes.txt");
    std::fs::write(&text_file, "not a dataset").unwrap();
    let unsupported = loader.load(&text_file).await;
    assert!(matches!(unsupported, Err(AlignerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_toml_dataset_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dataset.toml");
    std::fs::write(
        &path,
        r#"
[[programs]]
id = "p1"
name = "MSc Data Science"

[[courses]]
id = "c1"
program_id = "p1"
title = "Statistics"
credits = 3
level = "basic"
category = "core"
"#,
    )
    .unwrap();

    let dataset = DatasetLoader::new().load(&path).await.unwrap();

    assert_eq!(dataset.program("p1").unwrap().name, "MSc Data Science");
    assert_eq!(dataset.courses_for_program("p1").len(), 1);
}

#[tokio::test]
async fn test_pipeline_persists_completed_analysis() {
    let dataset = load_fixture().await;
    let engine = RecommendationEngine::new();
    let pipeline = AnalysisPipeline::new(&dataset, &engine);
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("analyses")).unwrap();

    let completed = pipeline.run(&request("b-mit"), &store).unwrap();

    assert_eq!(completed.record.status, AnalysisStatus::Completed);
    assert!(completed.record.completed_at.is_some());
    assert_eq!(completed.record.program_mode, ProgramMode::Teaching);
    assert_eq!(completed.record.weights_id, "w-default");

    let analysis_dir = store.root().join(&completed.record.id);
    assert!(analysis_dir.join("analysis.json").exists());
    assert!(analysis_dir.join("result.json").exists());
    assert!(analysis_dir.join("recommendations.json").exists());

    let stored = store.load(&completed.record.id).unwrap();
    assert_eq!(stored.result.unwrap().output, completed.evaluation.output);
    assert_eq!(
        stored.recommendations.len(),
        completed.evaluation.recommendations.len()
    );
    assert!(stored
        .recommendations
        .iter()
        .all(|r| r.analysis_id == completed.record.id));
}

#[tokio::test]
async fn test_history_lists_newest_first() {
    let dataset = load_fixture().await;
    let engine = RecommendationEngine::new();
    let pipeline = AnalysisPipeline::new(&dataset, &engine);
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    pipeline.run(&request("b-mit"), &store).unwrap();
    pipeline.run(&request("b-tsinghua"), &store).unwrap();

    let history = store.list().unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].created_at >= history[1].created_at);
    assert!(history
        .iter()
        .all(|record| record.status == AnalysisStatus::Completed));
}

#[tokio::test]
async fn test_unresolvable_request_writes_nothing() {
    let dataset = load_fixture().await;
    let engine = RecommendationEngine::new();
    let pipeline = AnalysisPipeline::new(&dataset, &engine);
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    let result = pipeline.run(&request("b-unknown"), &store);

    assert!(matches!(result, Err(AlignerError::MissingConfiguration(_))));
    assert!(store.list().unwrap().is_empty());
}

#[tokio::test]
async fn test_stored_result_is_append_only() {
    let dataset = load_fixture().await;
    let engine = RecommendationEngine::new();
    let pipeline = AnalysisPipeline::new(&dataset, &engine);
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    let completed = pipeline.run(&request("b-mit"), &store).unwrap();
    let stored = store.load(&completed.record.id).unwrap();

    let rewrite = store.save_result(&stored.result.unwrap());
    assert!(matches!(rewrite, Err(AlignerError::Storage(_))));

    let refinish = store.finish(&completed.record.id, AnalysisStatus::Failed, None);
    assert!(refinish.is_err());
}

#[tokio::test]
async fn test_evaluation_is_deterministic() {
    let dataset = load_fixture().await;
    let engine = RecommendationEngine::new();
    let pipeline = AnalysisPipeline::new(&dataset, &engine);

    let resolved = pipeline.resolve(&request("b-tsinghua")).unwrap();
    let first = pipeline.evaluate(&resolved);
    let second = pipeline.evaluate(&resolved);

    assert_eq!(first.output, second.output);
    assert_eq!(first.recommendations, second.recommendations);
    assert!(first.output.wai_score <= 100);
    assert!((0.0..=1.0).contains(&first.output.overall_similarity));
}

#[tokio::test]
async fn test_inactive_courses_do_not_affect_scores() {
    let dataset = load_fixture().await;
    let engine = RecommendationEngine::new();

    let mut active_only = (*dataset).clone();
    active_only.courses.retain(|course| course.is_active);

    let with_inactive = AnalysisPipeline::new(&dataset, &engine);
    let without_inactive = AnalysisPipeline::new(&active_only, &engine);

    let a = with_inactive.evaluate(&with_inactive.resolve(&request("b-mit")).unwrap());
    let b = without_inactive.evaluate(&without_inactive.resolve(&request("b-mit")).unwrap());

    assert_eq!(a.output, b.output);
    assert!(a
        .output
        .redundant_courses
        .iter()
        .all(|pair| pair.course1 != "c6" && pair.course2 != "c6"));
}

#[tokio::test]
async fn test_gaps_drive_recommendations() {
    let dataset = load_fixture().await;
    let engine = RecommendationEngine::new();
    let pipeline = AnalysisPipeline::new(&dataset, &engine);

    let evaluation = pipeline.evaluate(&pipeline.resolve(&request("b-mit")).unwrap());

    let ml_gap = evaluation
        .output
        .gaps
        .iter()
        .find(|gap| gap.skill_id == "ml")
        .unwrap();
    assert_eq!(ml_gap.coverage, 0);
    assert_eq!(ml_gap.gap, 90);

    let missing_ml = evaluation
        .recommendations
        .iter()
        .find(|r| r.title == "Add coverage for: Machine Learning")
        .unwrap();
    assert_eq!(missing_ml.recommendation_type, RecommendationType::MissingSkill);
    assert_eq!(missing_ml.priority, Priority::Critical);

    let aws = evaluation
        .recommendations
        .iter()
        .find(|r| r.title == "Professional Certification: AWS Solutions Architect (AWS)")
        .unwrap();
    assert!(aws.linked_skill_ids.contains(&"cloud".to_string()));

    let tensorflow = evaluation
        .recommendations
        .iter()
        .find(|r| r.title.contains("Google TensorFlow Developer"))
        .unwrap();
    assert!(tensorflow.linked_skill_ids.contains(&"ml".to_string()));
}

#[tokio::test]
async fn test_redundant_database_courses_detected() {
    let dataset = load_fixture().await;
    let engine = RecommendationEngine::new();
    let pipeline = AnalysisPipeline::new(&dataset, &engine);

    let evaluation = pipeline.evaluate(&pipeline.resolve(&request("b-mit")).unwrap());

    assert!(evaluation
        .output
        .redundant_courses
        .iter()
        .any(|pair| pair.course1 == "c1" && pair.course2 == "c2"));
    assert!(evaluation.output.redundancy_score > 0);
}

#[tokio::test]
async fn test_program_mode_shifts_cluster_scores() {
    let dataset = load_fixture().await;
    let engine = RecommendationEngine::new();
    let pipeline = AnalysisPipeline::new(&dataset, &engine);

    let score = |mode: ProgramMode| {
        let request = AnalysisRequest {
            program_mode: Some(mode),
            ..request("b-mit")
        };
        pipeline.evaluate(&pipeline.resolve(&request).unwrap()).output
    };

    let teaching = score(ProgramMode::Teaching);
    let research = score(ProgramMode::Research);

    assert!(teaching.market_skills_score >= research.market_skills_score);
    assert!(research.future_skills_score >= teaching.future_skills_score);
    assert_eq!(teaching.core_skills_score, research.core_skills_score);
    assert_eq!(teaching.coverage_by_cluster, research.coverage_by_cluster);
}

#[tokio::test]
async fn test_report_renders_in_every_format() {
    let dataset = load_fixture().await;
    let engine = RecommendationEngine::new();
    let pipeline = AnalysisPipeline::new(&dataset, &engine);
    let resolved = pipeline.resolve(&request("b-mit")).unwrap();
    let evaluation = pipeline.evaluate(&resolved);

    let context = ReportContext {
        program: resolved.program,
        courses: &resolved.courses,
        benchmark: resolved.benchmark,
        weights: resolved.weights,
        program_mode: resolved.program_mode,
        catalog_version: engine.catalog().version(),
        analysis_id: None,
    };
    let report = AnalysisReport::build(&context, evaluation.output, evaluation.recommendations);
    assert_eq!(report.metadata.course_count, 5);

    let generator = ReportGenerator::with_options(false, true, true, true, true);

    let console = generator.generate_report(&report, &OutputFormat::Console).unwrap();
    assert!(console.contains("BSc Information Technology"));

    let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["summary"]["program_id"], "p-it");

    let markdown = generator.generate_report(&report, &OutputFormat::Markdown).unwrap();
    assert!(markdown.contains("MIT"));

    let html = generator.generate_report(&report, &OutputFormat::Html).unwrap();
    assert!(html.contains("<html"));
    assert!(html.contains("BSc Information Technology"));
}
