//! Alignment scoring engine
//!
//! Combines the program skill vector, benchmark similarity, cluster coverage,
//! redundancy and course structure into a single `AnalysisOutput`. The whole
//! computation is synchronous and deterministic: the same input always yields
//! the same numbers.

use crate::model::{
    ActiveCourse, BenchmarkUniversity, Course, CourseCategory, CourseLevel, ProgramMode,
    ScoringWeights, Skill, SkillCluster, SkillCoverageVector,
};
use crate::processing::redundancy::{detect_with_extractor, RedundantPair};
use crate::processing::similarity::{compute_coverage_by_cluster, cosine_similarity};
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::vector_builder::build_with_extractor;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A gap is reported only when coverage is below this share of the benchmark.
pub const GAP_THRESHOLD: f64 = 0.7;
/// At most this many gaps are kept, largest first.
pub const MAX_GAPS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapItem {
    pub skill_id: String,
    pub skill_name: String,
    pub cluster: SkillCluster,
    /// Program coverage, percent.
    pub coverage: u32,
    /// Benchmark expectation, percent.
    pub benchmark_expected: u32,
    pub gap: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthProfile {
    pub basic: u32,
    pub applied: u32,
    pub advanced: u32,
}

impl Default for DepthProfile {
    fn default() -> Self {
        Self {
            basic: 33,
            applied: 34,
            advanced: 33,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheoryPracticeRatio {
    pub theory: u32,
    pub practice: u32,
}

impl Default for TheoryPracticeRatio {
    fn default() -> Self {
        Self {
            theory: 50,
            practice: 50,
        }
    }
}

/// Per-mode bias applied to cluster scores.
///
/// Only `future` and `market` feed the index; `theory` and `practice` are
/// carried for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeMultipliers {
    pub theory: f64,
    pub practice: f64,
    pub future: f64,
    pub market: f64,
}

impl ModeMultipliers {
    pub fn for_mode(mode: ProgramMode) -> Self {
        match mode {
            ProgramMode::Research => Self {
                theory: 1.2,
                practice: 0.8,
                future: 1.3,
                market: 0.7,
            },
            ProgramMode::Hybrid => Self {
                theory: 1.0,
                practice: 1.0,
                future: 1.1,
                market: 0.9,
            },
            ProgramMode::Teaching => Self {
                theory: 0.8,
                practice: 1.2,
                future: 0.9,
                market: 1.3,
            },
        }
    }
}

/// Everything one scoring run needs.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    /// Raw course rows; inactive ones are dropped before scoring.
    pub courses: &'a [Course],
    pub skills: &'a [Skill],
    pub benchmark: &'a BenchmarkUniversity,
    pub weights: &'a ScoringWeights,
    pub program_mode: ProgramMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub wai_score: u32,
    pub market_skills_score: u32,
    pub core_skills_score: u32,
    pub future_skills_score: u32,
    pub soft_skills_score: u32,
    /// Raw cosine similarity to the benchmark vector.
    pub overall_similarity: f64,
    pub coverage_by_cluster: BTreeMap<SkillCluster, u32>,
    pub gaps: Vec<GapItem>,
    pub redundancy_score: u32,
    pub theory_practice_ratio: TheoryPracticeRatio,
    pub depth_profile: DepthProfile,
    pub redundant_courses: Vec<RedundantPair>,
}

impl AnalysisOutput {
    pub fn cluster_score(&self, cluster: SkillCluster) -> u32 {
        match cluster {
            SkillCluster::MarketSkills => self.market_skills_score,
            SkillCluster::CoreAcademic => self.core_skills_score,
            SkillCluster::FutureSkills => self.future_skills_score,
            SkillCluster::SoftSkills => self.soft_skills_score,
        }
    }
}

/// Scoring engine bound to one skill catalog.
pub struct AnalysisEngine<'a> {
    skills: &'a [Skill],
    extractor: SkillExtractor,
}

impl<'a> AnalysisEngine<'a> {
    pub fn new(skills: &'a [Skill]) -> Self {
        Self {
            skills,
            extractor: SkillExtractor::new(skills),
        }
    }

    /// Score a program's courses against one benchmark.
    pub fn analyze(
        &self,
        courses: &[Course],
        benchmark: &BenchmarkUniversity,
        weights: &ScoringWeights,
        program_mode: ProgramMode,
    ) -> AnalysisOutput {
        let active_courses = ActiveCourse::filter(courses);
        if active_courses.len() < courses.len() {
            log::warn!(
                "Skipping {} inactive courses",
                courses.len() - active_courses.len()
            );
        }

        let multipliers = ModeMultipliers::for_mode(program_mode);

        let program_vector = build_with_extractor(&self.extractor, &active_courses, self.skills);
        let benchmark_vector = &benchmark.skill_profile_json;

        let overall_similarity = cosine_similarity(&program_vector, benchmark_vector);
        let coverage_by_cluster = compute_coverage_by_cluster(&program_vector, self.skills);

        let coverage = |cluster: SkillCluster| -> f64 {
            f64::from(coverage_by_cluster.get(&cluster).copied().unwrap_or(0))
        };

        let market_skills_score =
            scaled_score(coverage(SkillCluster::MarketSkills), multipliers.market);
        let core_skills_score = scaled_score(coverage(SkillCluster::CoreAcademic), 1.0);
        let future_skills_score =
            scaled_score(coverage(SkillCluster::FutureSkills), multipliers.future);
        let soft_skills_score = scaled_score(coverage(SkillCluster::SoftSkills), 1.0);

        let cluster_composite = cluster_composite(
            weights,
            [
                (SkillCluster::MarketSkills, market_skills_score),
                (SkillCluster::CoreAcademic, core_skills_score),
                (SkillCluster::FutureSkills, future_skills_score),
                (SkillCluster::SoftSkills, soft_skills_score),
            ],
        );
        let wai_score = blend_wai_score(cluster_composite, overall_similarity, weights.wai_top_weight);

        let gaps = compute_gaps(&program_vector, benchmark_vector, self.skills);

        let redundant_courses = detect_with_extractor(&self.extractor, &active_courses);
        let redundancy_score = if redundant_courses.is_empty() {
            0
        } else {
            let mean = redundant_courses.iter().map(|r| r.overlap).sum::<f64>()
                / redundant_courses.len() as f64;
            (mean * 100.0).round() as u32
        };

        let depth_profile = compute_depth_profile(&active_courses);
        let theory_practice_ratio = compute_theory_practice_ratio(&active_courses);

        log::info!(
            "Scored {} active courses against {}: WAI {} (similarity {:.3}, {} gaps, {} redundant pairs)",
            active_courses.len(),
            benchmark.name,
            wai_score,
            overall_similarity,
            gaps.len(),
            redundant_courses.len()
        );

        AnalysisOutput {
            wai_score,
            market_skills_score,
            core_skills_score,
            future_skills_score,
            soft_skills_score,
            overall_similarity,
            coverage_by_cluster,
            gaps,
            redundancy_score,
            theory_practice_ratio,
            depth_profile,
            redundant_courses,
        }
    }

    /// The program vector for a set of courses, inactive ones dropped.
    pub fn program_vector(&self, courses: &[Course]) -> SkillCoverageVector {
        build_with_extractor(&self.extractor, &ActiveCourse::filter(courses), self.skills)
    }
}

/// Run one full analysis.
pub fn run_analysis(input: &AnalysisInput<'_>) -> AnalysisOutput {
    AnalysisEngine::new(input.skills).analyze(
        input.courses,
        input.benchmark,
        input.weights,
        input.program_mode,
    )
}

fn scaled_score(coverage_percent: f64, multiplier: f64) -> u32 {
    ((coverage_percent * multiplier).round() as u32).min(100)
}

/// Weighted mean of the cluster scores.
///
/// Normalizes by the actual sum of the four weights. A weight set that sums to
/// zero or less falls back to an unweighted mean.
pub fn cluster_composite(weights: &ScoringWeights, scores: [(SkillCluster, u32); 4]) -> f64 {
    let total_weight = weights.cluster_weight_sum();

    if !total_weight.is_finite() || total_weight <= 0.0 {
        log::warn!(
            "Scoring weights '{}' sum to {}; using equal cluster weights",
            weights.name,
            total_weight
        );
        return scores.iter().map(|(_, s)| f64::from(*s)).sum::<f64>() / scores.len() as f64;
    }

    scores
        .iter()
        .map(|(cluster, score)| f64::from(*score) * weights.cluster_weight(*cluster))
        .sum::<f64>()
        / total_weight
}

/// Blend the cluster composite with benchmark similarity into a 0-100 index.
pub fn blend_wai_score(cluster_composite: f64, overall_similarity: f64, wai_top_weight: f64) -> u32 {
    let top_weight = if wai_top_weight.is_finite() {
        wai_top_weight.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let similarity_component = overall_similarity * 100.0;

    let blended = ((cluster_composite * (100.0 - top_weight) + similarity_component * top_weight)
        / 100.0)
        .round();

    // NaN casts to 0
    blended.clamp(0.0, 100.0) as u32
}

/// Skills where the program covers less than 70% of the benchmark expectation.
pub fn compute_gaps(
    program_vector: &SkillCoverageVector,
    benchmark_vector: &SkillCoverageVector,
    skills: &[Skill],
) -> Vec<GapItem> {
    let mut gaps: Vec<GapItem> = skills
        .iter()
        .filter_map(|skill| {
            let coverage = program_vector.get(&skill.id).copied().unwrap_or(0.0);
            let expected = benchmark_vector.get(&skill.id).copied().unwrap_or(0.0);

            if expected > 0.0 && coverage < expected * GAP_THRESHOLD {
                Some(GapItem {
                    skill_id: skill.id.clone(),
                    skill_name: skill.name.clone(),
                    cluster: skill.cluster,
                    coverage: to_percent(coverage),
                    benchmark_expected: to_percent(expected),
                    gap: to_percent(expected - coverage),
                })
            } else {
                None
            }
        })
        .collect();

    gaps.sort_by(|a, b| b.gap.cmp(&a.gap));
    gaps.truncate(MAX_GAPS);
    gaps
}

fn to_percent(value: f64) -> u32 {
    (value * 100.0).round().max(0.0) as u32
}

/// Share of credits at each course level.
pub fn compute_depth_profile(courses: &[ActiveCourse<'_>]) -> DepthProfile {
    let total_credits: u64 = courses.iter().map(|c| u64::from(c.credits)).sum();
    if total_credits == 0 {
        return DepthProfile::default();
    }

    let credits_at = |level: CourseLevel| -> u64 {
        courses
            .iter()
            .filter(|c| c.level == level)
            .map(|c| u64::from(c.credits))
            .sum()
    };
    let share = |credits: u64| -> u32 {
        (credits as f64 / total_credits as f64 * 100.0).round() as u32
    };

    DepthProfile {
        basic: share(credits_at(CourseLevel::Basic)),
        applied: share(credits_at(CourseLevel::Applied)),
        advanced: share(credits_at(CourseLevel::Advanced)),
    }
}

/// Heuristic split of credits into theory and practice.
pub fn compute_theory_practice_ratio(courses: &[ActiveCourse<'_>]) -> TheoryPracticeRatio {
    let mut theory_credits = 0.0;
    let mut practice_credits = 0.0;

    for course in courses {
        let credits = f64::from(course.credits);
        let (theory, practice) =
            if course.level == CourseLevel::Basic || course.category == CourseCategory::Core {
                (0.7, 0.3)
            } else if course.level == CourseLevel::Applied {
                (0.4, 0.6)
            } else {
                (0.5, 0.5)
            };
        theory_credits += credits * theory;
        practice_credits += credits * practice;
    }

    let total = theory_credits + practice_credits;
    if total == 0.0 {
        return TheoryPracticeRatio::default();
    }

    TheoryPracticeRatio {
        theory: (theory_credits / total * 100.0).round() as u32,
        practice: (practice_credits / total * 100.0).round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BenchmarkSource;

    fn course(id: &str, title: &str, credits: u32, level: CourseLevel, category: CourseCategory) -> Course {
        Course {
            id: id.to_string(),
            program_id: "p1".to_string(),
            code: String::new(),
            title: title.to_string(),
            title_ar: String::new(),
            description: String::new(),
            credits,
            level,
            semester: None,
            category,
            is_active: true,
        }
    }

    fn skill(id: &str, cluster: SkillCluster, keywords: &[&str]) -> Skill {
        Skill {
            id: id.to_string(),
            name: id.to_string(),
            name_ar: String::new(),
            cluster,
            description: String::new(),
            source: String::new(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            weight_default: 1.0,
        }
    }

    fn benchmark(profile: &[(&str, f64)]) -> BenchmarkUniversity {
        BenchmarkUniversity {
            id: "b1".to_string(),
            name: "Benchmark U".to_string(),
            country: String::new(),
            ranking_source: BenchmarkSource::QS,
            discipline: String::new(),
            skill_profile_json: profile.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    fn weights(market: f64, core: f64, future: f64, soft: f64, top: f64) -> ScoringWeights {
        ScoringWeights {
            id: "w".to_string(),
            name: "test".to_string(),
            market_skills_weight: market,
            core_skills_weight: core,
            future_skills_weight: future,
            soft_skills_weight: soft,
            wai_top_weight: top,
            is_default: true,
        }
    }

    fn catalog() -> Vec<Skill> {
        vec![
            skill("python", SkillCluster::MarketSkills, &["python", "programming"]),
            skill("cloud", SkillCluster::MarketSkills, &["cloud", "aws"]),
            skill("algorithms", SkillCluster::CoreAcademic, &["algorithms", "data structures"]),
            skill("ml", SkillCluster::FutureSkills, &["machine learning"]),
            skill("teamwork", SkillCluster::SoftSkills, &["teamwork", "communication"]),
        ]
    }

    #[test]
    fn test_weighted_blend_scenario() {
        let w = weights(40.0, 30.0, 20.0, 10.0, 40.0);
        let composite = cluster_composite(
            &w,
            [
                (SkillCluster::MarketSkills, 50),
                (SkillCluster::CoreAcademic, 50),
                (SkillCluster::FutureSkills, 50),
                (SkillCluster::SoftSkills, 50),
            ],
        );

        assert!((composite - 50.0).abs() < 1e-9);
        assert_eq!(blend_wai_score(composite, 0.5, w.wai_top_weight), 50);
    }

    #[test]
    fn test_weights_normalized_by_actual_sum() {
        let w = weights(1.0, 1.0, 0.0, 0.0, 0.0);
        let composite = cluster_composite(
            &w,
            [
                (SkillCluster::MarketSkills, 80),
                (SkillCluster::CoreAcademic, 40),
                (SkillCluster::FutureSkills, 0),
                (SkillCluster::SoftSkills, 0),
            ],
        );
        assert!((composite - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weights_fall_back_to_mean() {
        let w = weights(0.0, 0.0, 0.0, 0.0, 0.0);
        let composite = cluster_composite(
            &w,
            [
                (SkillCluster::MarketSkills, 100),
                (SkillCluster::CoreAcademic, 0),
                (SkillCluster::FutureSkills, 50),
                (SkillCluster::SoftSkills, 50),
            ],
        );
        assert!((composite - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_wai_clamped() {
        assert_eq!(blend_wai_score(250.0, 1.0, 0.0), 100);
        assert_eq!(blend_wai_score(-40.0, 0.0, 0.0), 0);
        assert_eq!(blend_wai_score(50.0, 1.0, 500.0), 100);
        assert_eq!(blend_wai_score(50.0, 0.0, -20.0), 50);
        assert_eq!(blend_wai_score(f64::NAN, 0.5, 40.0), 0);
    }

    #[test]
    fn test_gap_scenario() {
        let skills = vec![skill("skillA", SkillCluster::MarketSkills, &["x"])];
        let program: SkillCoverageVector = [("skillA".to_string(), 0.2)].into_iter().collect();
        let bench: SkillCoverageVector = [("skillA".to_string(), 0.9)].into_iter().collect();

        let gaps = compute_gaps(&program, &bench, &skills);

        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].coverage, 20);
        assert_eq!(gaps[0].benchmark_expected, 90);
        assert_eq!(gaps[0].gap, 70);
    }

    #[test]
    fn test_no_gap_at_parity_or_without_expectation() {
        let skills = vec![
            skill("a", SkillCluster::MarketSkills, &[]),
            skill("b", SkillCluster::MarketSkills, &[]),
            skill("c", SkillCluster::MarketSkills, &[]),
        ];
        let program: SkillCoverageVector =
            [("a".to_string(), 0.5), ("b".to_string(), 0.0), ("c".to_string(), 0.64)]
                .into_iter()
                .collect();
        let bench: SkillCoverageVector =
            [("a".to_string(), 0.5), ("c".to_string(), 0.9)].into_iter().collect();

        // c: 0.64 >= 0.63, so no gap either
        assert!(compute_gaps(&program, &bench, &skills).is_empty());
    }

    #[test]
    fn test_gap_grows_as_coverage_falls() {
        let skills = vec![skill("a", SkillCluster::MarketSkills, &[])];
        let bench: SkillCoverageVector = [("a".to_string(), 0.8)].into_iter().collect();

        let mut previous = None;
        for coverage in [0.5, 0.4, 0.2, 0.0] {
            let program: SkillCoverageVector = [("a".to_string(), coverage)].into_iter().collect();
            let gap = compute_gaps(&program, &bench, &skills)[0].gap;
            if let Some(prev) = previous {
                assert!(gap > prev);
            }
            previous = Some(gap);
        }
    }

    #[test]
    fn test_gaps_capped_and_sorted() {
        let skills: Vec<Skill> = (0..30)
            .map(|i| skill(&format!("s{}", i), SkillCluster::CoreAcademic, &[]))
            .collect();
        let bench: SkillCoverageVector = (0..30)
            .map(|i| (format!("s{}", i), 0.1 + i as f64 * 0.03))
            .collect();

        let gaps = compute_gaps(&SkillCoverageVector::new(), &bench, &skills);

        assert_eq!(gaps.len(), MAX_GAPS);
        assert_eq!(gaps[0].skill_id, "s29");
        for window in gaps.windows(2) {
            assert!(window[0].gap >= window[1].gap);
        }
    }

    #[test]
    fn test_depth_and_theory_practice() {
        let courses = vec![
            course("c1", "A", 3, CourseLevel::Basic, CourseCategory::Core),
            course("c2", "B", 3, CourseLevel::Applied, CourseCategory::Elective),
            course("c3", "C", 4, CourseLevel::Advanced, CourseCategory::Elective),
        ];
        let active = ActiveCourse::filter(&courses);

        let depth = compute_depth_profile(&active);
        assert_eq!(depth, DepthProfile { basic: 30, applied: 30, advanced: 40 });

        // theory: 2.1 + 1.2 + 2.0 = 5.3 of 10
        let ratio = compute_theory_practice_ratio(&active);
        assert_eq!(ratio, TheoryPracticeRatio { theory: 53, practice: 47 });
    }

    #[test]
    fn test_depth_profile_handles_huge_credit_totals() {
        let credits = u32::MAX / 2 + 1;
        let courses = vec![
            course("c1", "A", credits, CourseLevel::Basic, CourseCategory::Core),
            course("c2", "B", credits, CourseLevel::Advanced, CourseCategory::Elective),
        ];

        let depth = compute_depth_profile(&ActiveCourse::filter(&courses));
        assert_eq!(depth, DepthProfile { basic: 50, applied: 0, advanced: 50 });
    }

    #[test]
    fn test_advanced_core_course_is_theory_heavy() {
        let courses = vec![course("c1", "A", 3, CourseLevel::Advanced, CourseCategory::Core)];
        let ratio = compute_theory_practice_ratio(&ActiveCourse::filter(&courses));
        assert_eq!(ratio, TheoryPracticeRatio { theory: 70, practice: 30 });
    }

    #[test]
    fn test_zero_active_courses() {
        let skills = catalog();
        let mut inactive = course("c1", "Python Programming", 3, CourseLevel::Basic, CourseCategory::Core);
        inactive.is_active = false;
        let courses = vec![inactive];
        let bench = benchmark(&[("python", 0.8), ("ml", 0.6)]);
        let w = weights(40.0, 30.0, 20.0, 10.0, 40.0);

        let output = run_analysis(&AnalysisInput {
            courses: &courses,
            skills: &skills,
            benchmark: &bench,
            weights: &w,
            program_mode: ProgramMode::Hybrid,
        });

        assert!(output.coverage_by_cluster.values().all(|v| *v == 0));
        assert_eq!(output.coverage_by_cluster.len(), 4);
        assert_eq!(output.depth_profile, DepthProfile { basic: 33, applied: 34, advanced: 33 });
        assert_eq!(output.theory_practice_ratio, TheoryPracticeRatio { theory: 50, practice: 50 });
        assert_eq!(output.redundancy_score, 0);
        assert_eq!(output.overall_similarity, 0.0);
        assert_eq!(output.wai_score, 0);
        assert_eq!(output.gaps.len(), 2);
    }

    #[test]
    fn test_mode_multipliers_bias_cluster_scores() {
        let skills = catalog();
        let courses = vec![
            course("c1", "Python Programming", 3, CourseLevel::Basic, CourseCategory::Core),
            course("c2", "Machine Learning", 3, CourseLevel::Advanced, CourseCategory::Elective),
        ];
        let bench = benchmark(&[("python", 0.8), ("ml", 0.8)]);
        let w = weights(25.0, 25.0, 25.0, 25.0, 40.0);

        let engine = AnalysisEngine::new(&skills);
        let teaching = engine.analyze(&courses, &bench, &w, ProgramMode::Teaching);
        let research = engine.analyze(&courses, &bench, &w, ProgramMode::Research);

        assert!(teaching.market_skills_score > research.market_skills_score);
        assert!(research.future_skills_score > teaching.future_skills_score);
        assert_eq!(teaching.core_skills_score, research.core_skills_score);
        assert_eq!(teaching.soft_skills_score, research.soft_skills_score);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let skills = catalog();
        let courses = vec![
            course("c1", "Python Programming", 3, CourseLevel::Basic, CourseCategory::Core),
            course("c2", "Python Programming", 3, CourseLevel::Basic, CourseCategory::Core),
            course("c3", "Cloud Computing with AWS", 4, CourseLevel::Applied, CourseCategory::Elective),
            course("c4", "Algorithms and Data Structures", 3, CourseLevel::Basic, CourseCategory::Core),
        ];
        let bench = benchmark(&[("python", 0.9), ("cloud", 0.7), ("ml", 0.8), ("teamwork", 0.5)]);
        let w = weights(40.0, 30.0, 20.0, 10.0, 40.0);
        let input = AnalysisInput {
            courses: &courses,
            skills: &skills,
            benchmark: &bench,
            weights: &w,
            program_mode: ProgramMode::Teaching,
        };

        let first = run_analysis(&input);
        let second = run_analysis(&input);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert!(first.wai_score <= 100);
        assert_eq!(first.redundant_courses.len(), 1);
        assert_eq!(first.redundancy_score, 100);
    }
}
