//! Curriculum aligner: academic program to labor-market alignment scoring

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use curriculum_aligner::cli::{Cli, Commands, ConfigAction, DataArgs, HistoryAction};
use curriculum_aligner::config::Config;
use curriculum_aligner::input::{Dataset, DatasetLoader};
use curriculum_aligner::model::{ActiveCourse, BenchmarkSource, Course, SkillCluster};
use curriculum_aligner::output::{
    save_report_to_file, suggest_filename, AnalysisReport, ReportContext, ReportGenerator,
};
use curriculum_aligner::pipeline::{AnalysisPipeline, AnalysisRequest};
use curriculum_aligner::processing::{detect_redundancy, AnalysisEngine, SkillExtractor};
use curriculum_aligner::recommendations::{
    CertificationCatalog, RecommendationEngine, StaticCertificationCatalog,
};
use curriculum_aligner::store::{AnalysisStore, FileStore};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::Path;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            data,
            program,
            benchmark,
            weights,
            mode,
            output,
            save,
            detailed,
            no_store,
            goal,
            degree_level,
        } => {
            let dataset = load_dataset(&data).await?;
            let engine = recommendation_engine(&config)?;
            let pipeline = AnalysisPipeline::new(&dataset, &engine)
                .with_default_mode(config.scoring.default_program_mode);

            let request = AnalysisRequest {
                program_id: program,
                benchmark_id: benchmark,
                weights_profile: weights.or_else(|| config.scoring.weights_profile.clone()),
                program_mode: mode,
                degree_level,
                analysis_goal: goal,
            };
            let resolved = pipeline
                .resolve(&request)
                .context("Cannot start analysis")?;

            let (evaluation, analysis_id) = if no_store {
                (pipeline.evaluate(&resolved), None)
            } else {
                let store = FileStore::new(config.data_dir())
                    .with_context(|| format!("Cannot open store at {}", config.data_dir().display()))?;
                let completed = pipeline.run(&request, &store).context("Analysis failed")?;
                (completed.evaluation, Some(completed.record.id))
            };

            let recommendations = if config.output.include_recommendations {
                evaluation.recommendations
            } else {
                Vec::new()
            };

            let context = ReportContext {
                program: resolved.program,
                courses: &resolved.courses,
                benchmark: resolved.benchmark,
                weights: resolved.weights,
                program_mode: resolved.program_mode,
                catalog_version: engine.catalog().version(),
                analysis_id: analysis_id.as_deref(),
            };
            let report = AnalysisReport::build(&context, evaluation.output, recommendations);

            let format = output.unwrap_or(config.output.format);
            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(
                use_colors,
                detailed || config.output.detailed,
                true,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, &format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&format, &resolved.program.name, true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Compare {
            data,
            program,
            source,
            weights,
            mode,
        } => {
            let dataset = load_dataset(&data).await?;
            let engine = recommendation_engine(&config)?;
            let pipeline = AnalysisPipeline::new(&dataset, &engine)
                .with_default_mode(config.scoring.default_program_mode);

            let benchmarks = match source {
                Some(source) => dataset.benchmarks_by_source(source),
                None => dataset.benchmarks.iter().collect(),
            };
            if benchmarks.is_empty() {
                bail!("No benchmark universities to compare against");
            }

            let progress = ProgressBar::new(benchmarks.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            let mut rows: Vec<(String, BenchmarkSource, u32, f64, usize)> = Vec::new();
            for benchmark in benchmarks {
                progress.set_message(benchmark.name.clone());
                let request = AnalysisRequest {
                    program_id: program.clone(),
                    benchmark_id: benchmark.id.clone(),
                    weights_profile: weights.clone().or_else(|| config.scoring.weights_profile.clone()),
                    program_mode: mode,
                    ..Default::default()
                };
                let resolved = pipeline.resolve(&request)?;
                let evaluation = pipeline.evaluate(&resolved);
                rows.push((
                    benchmark.name.clone(),
                    benchmark.ranking_source,
                    evaluation.output.wai_score,
                    evaluation.output.overall_similarity,
                    evaluation.output.gaps.len(),
                ));
                progress.inc(1);
            }
            progress.finish_and_clear();

            rows.sort_by(|a, b| b.2.cmp(&a.2));

            println!("{}", "📊 WAI by benchmark".bold());
            println!("{:<4} {:<32} {:<14} {:>5} {:>10} {:>5}", "#", "Benchmark", "Source", "WAI", "Similarity", "Gaps");
            for (i, (name, source, wai, similarity, gaps)) in rows.iter().enumerate() {
                let wai_text = format!("{:>5}", wai);
                let wai_text = if !config.output.color_output {
                    wai_text.normal()
                } else if *wai >= 75 {
                    wai_text.green()
                } else if *wai >= 50 {
                    wai_text.yellow()
                } else {
                    wai_text.red()
                };
                println!(
                    "{:<4} {:<32} {:<14} {} {:>10.3} {:>5}",
                    i + 1,
                    name,
                    source.to_string(),
                    wai_text,
                    similarity,
                    gaps
                );
            }
        }

        Commands::Extract {
            data,
            course,
            program,
        } => {
            let dataset = load_dataset(&data).await?;
            let extractor = SkillExtractor::new(&dataset.skills);

            let courses = match (&course, &program) {
                (Some(course_id), _) => vec![dataset.course(course_id)?.clone()],
                (None, Some(program_id)) => {
                    dataset.program(program_id)?;
                    dataset.courses_for_program(program_id)
                }
                (None, None) => bail!("Pass --course or --program"),
            };

            for course in &courses {
                let Some(active) = ActiveCourse::new(course) else {
                    println!("{} {} (inactive, skipped)", "○".dimmed(), course.title);
                    continue;
                };
                let matches = extractor.extract(&active);
                println!("{} {} ({} skills)", "●".cyan(), course.title.bold(), matches.len());
                for skill_match in matches {
                    let name = skill_name(&dataset, &skill_match.skill_id);
                    println!("    {:<40} {:.2}", name, skill_match.score);
                }
            }

            if let Some(program_id) = &program {
                let vector = AnalysisEngine::new(&dataset.skills).program_vector(&courses);
                let mut covered: Vec<(&String, &f64)> =
                    vector.iter().filter(|(_, value)| **value > 0.0).collect();
                covered.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));

                println!("\n{} {}", "Program coverage:".bold(), program_id);
                for (skill_id, value) in covered {
                    println!("    {:<40} {:>3}%", skill_name(&dataset, skill_id), (value * 100.0).round());
                }
            }
        }

        Commands::Redundancy { data, program } => {
            let dataset = load_dataset(&data).await?;
            dataset.program(&program)?;
            let courses = dataset.courses_for_program(&program);
            let active = ActiveCourse::filter(&courses);

            let pairs = detect_redundancy(&active, &dataset.skills);
            if pairs.is_empty() {
                println!("✅ No redundant course pairs found");
            }
            for pair in pairs {
                println!(
                    "{:.2}  {} / {}",
                    pair.overlap,
                    course_title(&courses, &pair.course1),
                    course_title(&courses, &pair.course2)
                );
            }
        }

        Commands::Certifications { cluster } => {
            let catalog = certification_catalog(&config)?;
            println!("{} {}", "Certification catalog".bold(), catalog.version());

            let clusters: Vec<SkillCluster> = match cluster {
                Some(cluster) => vec![cluster],
                None => SkillCluster::ALL.to_vec(),
            };
            for cluster in clusters {
                println!("\n{}", cluster.label().green().bold());
                for cert in catalog.for_cluster(cluster) {
                    println!("  • {} ({})  [{}]", cert.name, cert.provider, cert.skills.join(", "));
                }
            }
        }

        Commands::History { action } => {
            let store = FileStore::new(config.data_dir())?;
            match action {
                HistoryAction::List { limit } => {
                    let records = store.list()?;
                    if records.is_empty() {
                        println!("No stored analyses in {}", store.root().display());
                    }
                    for record in records.into_iter().take(limit) {
                        let wai = store
                            .load(&record.id)?
                            .result
                            .map(|r| r.output.wai_score.to_string())
                            .unwrap_or_else(|| "-".to_string());
                        println!(
                            "{}  {}  {:<10} program={} benchmark={} goal={} WAI={}",
                            record.id,
                            record.created_at.format("%Y-%m-%d %H:%M"),
                            record.status.to_string(),
                            record.program_id,
                            record.benchmark_id,
                            record.analysis_goal.as_deref().unwrap_or("-"),
                            wai
                        );
                    }
                }
                HistoryAction::Show { id } => {
                    let stored = store.load(&id)?;
                    println!("{}", serde_json::to_string_pretty(&stored)?);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Default program mode: {}", config.scoring.default_program_mode);
                println!(
                    "Weights profile: {}",
                    config.scoring.weights_profile.as_deref().unwrap_or("(dataset default)")
                );
                println!("Data directory: {}", config.data_dir().display());
                println!("Output format: {}", config.output.format);
                println!("Detailed: {}", config.output.detailed);
                println!("Include recommendations: {}", config.output.include_recommendations);
                println!("Color output: {}", config.output.color_output);
                println!(
                    "Certification catalog: {}",
                    config
                        .recommendations
                        .certification_catalog
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(built-in)".to_string())
                );
            }
            Some(ConfigAction::Path) => println!("{}", config_path.display()),
            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }
            Some(ConfigAction::Set { key, value }) => {
                let mut config = config;
                config.set(&key, &value)?;
                config.save_to(config_path)?;
                println!("✅ {} = {}", key, value);
            }
        },
    }

    Ok(())
}

async fn load_dataset(data: &DataArgs) -> Result<Arc<Dataset>> {
    let mut loader = DatasetLoader::new();
    let dataset = loader
        .load(&data.data)
        .await
        .with_context(|| format!("Failed to load dataset {}", data.data.display()))?;
    Ok(dataset)
}

fn certification_catalog(config: &Config) -> Result<StaticCertificationCatalog> {
    match &config.recommendations.certification_catalog {
        Some(path) => StaticCertificationCatalog::load(path)
            .with_context(|| format!("Failed to load certification catalog {}", path.display())),
        None => Ok(StaticCertificationCatalog::builtin()),
    }
}

fn recommendation_engine(config: &Config) -> Result<RecommendationEngine> {
    let catalog = certification_catalog(config)?;
    info!("Using certification catalog {}", catalog.version());
    Ok(RecommendationEngine::with_catalog(Box::new(catalog)))
}

fn skill_name(dataset: &Dataset, skill_id: &str) -> String {
    dataset
        .skills
        .iter()
        .find(|s| s.id == skill_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| skill_id.to_string())
}

fn course_title(courses: &[Course], course_id: &str) -> String {
    courses
        .iter()
        .find(|c| c.id == course_id)
        .map(|c| {
            if c.code.is_empty() {
                c.title.clone()
            } else {
                format!("{} {}", c.code, c.title)
            }
        })
        .unwrap_or_else(|| course_id.to_string())
}
