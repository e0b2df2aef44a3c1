//! Skill extraction and alignment scoring

pub mod text_processor;
pub mod skill_extractor;
pub mod vector_builder;
pub mod redundancy;
pub mod similarity;
pub mod analyzer;

pub use analyzer::{run_analysis, AnalysisEngine, AnalysisInput, AnalysisOutput, GapItem};
pub use redundancy::{detect_redundancy, RedundantPair};
pub use similarity::{compute_coverage_by_cluster, cosine_similarity};
pub use skill_extractor::{extract_skills_from_course, SkillExtractor, SkillMatch};
pub use vector_builder::build_program_skill_vector;
