//! CLI interface for the curriculum aligner

use crate::config::OutputFormat;
use crate::model::{BenchmarkSource, ProgramMode, SkillCluster};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "curriculum-aligner")]
#[command(about = "Academic curriculum to labor-market alignment scoring")]
#[command(long_about = "Score a degree program's courses against benchmark universities, \
find skill gaps and redundant courses, and draft recommendations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct DataArgs {
    /// Dataset file (JSON or TOML)
    #[arg(short, long)]
    pub data: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a program against one benchmark university
    Analyze {
        #[command(flatten)]
        data: DataArgs,

        /// Program id
        #[arg(short, long)]
        program: String,

        /// Benchmark university id
        #[arg(short, long)]
        benchmark: String,

        /// Scoring weights profile (name or id)
        #[arg(short, long)]
        weights: Option<String>,

        /// Program mode: teaching, research, hybrid
        #[arg(short, long, value_parser = parse_program_mode)]
        mode: Option<ProgramMode>,

        /// Output format: console, json, markdown, html
        #[arg(short, long, value_parser = parse_output_format)]
        output: Option<OutputFormat>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Output detailed analysis
        #[arg(long)]
        detailed: bool,

        /// Do not record the analysis in the history store
        #[arg(long)]
        no_store: bool,

        /// Purpose recorded with the analysis, e.g. academic or market
        #[arg(long)]
        goal: Option<String>,

        /// Degree level recorded with the analysis; defaults to the program's
        #[arg(long)]
        degree_level: Option<String>,
    },

    /// Score a program against every benchmark and rank the results
    Compare {
        #[command(flatten)]
        data: DataArgs,

        /// Program id
        #[arg(short, long)]
        program: String,

        /// Only benchmarks from this ranking source
        #[arg(short, long, value_parser = parse_benchmark_source)]
        source: Option<BenchmarkSource>,

        /// Scoring weights profile (name or id)
        #[arg(short, long)]
        weights: Option<String>,

        /// Program mode: teaching, research, hybrid
        #[arg(short, long, value_parser = parse_program_mode)]
        mode: Option<ProgramMode>,
    },

    /// Show the skills matched in a course or a whole program
    Extract {
        #[command(flatten)]
        data: DataArgs,

        /// Course id
        #[arg(long, conflicts_with = "program", required_unless_present = "program")]
        course: Option<String>,

        /// Program id
        #[arg(short, long)]
        program: Option<String>,
    },

    /// List near-duplicate course pairs in a program
    Redundancy {
        #[command(flatten)]
        data: DataArgs,

        /// Program id
        #[arg(short, long)]
        program: String,
    },

    /// List the certification catalog
    Certifications {
        /// Only this skill cluster
        #[arg(long, value_parser = parse_skill_cluster)]
        cluster: Option<SkillCluster>,
    },

    /// Browse stored analyses
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List stored analyses, newest first
    List {
        /// Maximum number of analyses to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show one stored analysis
    Show {
        /// Analysis id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "output.format")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    format.parse()
}

pub fn parse_program_mode(mode: &str) -> Result<ProgramMode, String> {
    mode.parse()
}

pub fn parse_benchmark_source(source: &str) -> Result<BenchmarkSource, String> {
    source.parse()
}

pub fn parse_skill_cluster(cluster: &str) -> Result<SkillCluster, String> {
    cluster.parse()
}
