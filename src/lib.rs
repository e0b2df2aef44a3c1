//! Curriculum aligner library
//!
//! Scores how well a degree program's courses cover the skills that
//! benchmark universities and the labor market expect, and turns the gaps
//! into recommendations.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod recommendations;
pub mod store;

pub use config::Config;
pub use error::{AlignerError, Result};
pub use processing::{run_analysis, AnalysisInput, AnalysisOutput};
pub use recommendations::generate_recommendations;
