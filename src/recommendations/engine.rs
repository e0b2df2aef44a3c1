//! Turns coverage gaps into typed, prioritized recommendations

use crate::model::{Skill, SkillCluster};
use crate::processing::analyzer::GapItem;
use crate::recommendations::certifications::{
    Certification, CertificationCatalog, StaticCertificationCatalog,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gaps below this coverage count as an absent skill.
const MISSING_SKILL_COVERAGE: u32 = 10;
/// Gaps below this coverage (and at least `MISSING_SKILL_COVERAGE`) get a micro-module.
const LOW_COVERAGE: u32 = 40;
const MAX_PER_KIND: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    MissingSkill,
    MicroModule,
    Certification,
    CurriculumChange,
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecommendationType::MissingSkill => "missing_skill",
            RecommendationType::MicroModule => "micro_module",
            RecommendationType::Certification => "certification",
            RecommendationType::CurriculumChange => "curriculum_change",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// A recommendation before it is attached to a stored analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationDraft {
    #[serde(rename = "type")]
    pub recommendation_type: RecommendationType,
    pub title: String,
    pub title_ar: String,
    pub description: String,
    pub priority: Priority,
    pub linked_skill_ids: Vec<String>,
}

pub struct RecommendationInput<'a> {
    pub gaps: &'a [GapItem],
    pub skills: &'a [Skill],
    pub wai_score: u32,
}

pub struct RecommendationEngine {
    catalog: Box<dyn CertificationCatalog>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    /// Engine backed by the built-in certification catalog
    pub fn new() -> Self {
        Self::with_catalog(Box::new(StaticCertificationCatalog::builtin()))
    }

    pub fn with_catalog(catalog: Box<dyn CertificationCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &dyn CertificationCatalog {
        self.catalog.as_ref()
    }

    /// Recommendations in generation order: missing skills, micro-modules,
    /// certifications by cluster, then at most one curriculum change.
    pub fn generate(&self, input: &RecommendationInput<'_>) -> Vec<RecommendationDraft> {
        let mut recommendations = Vec::new();

        recommendations.extend(
            input
                .gaps
                .iter()
                .filter(|g| g.coverage < MISSING_SKILL_COVERAGE)
                .take(MAX_PER_KIND)
                .map(missing_skill),
        );

        recommendations.extend(
            input
                .gaps
                .iter()
                .filter(|g| g.coverage >= MISSING_SKILL_COVERAGE && g.coverage < LOW_COVERAGE)
                .take(MAX_PER_KIND)
                .map(micro_module),
        );

        for (cluster, cluster_gaps) in group_by_cluster(input.gaps) {
            for cert in self.catalog.for_cluster(cluster) {
                let related: Vec<&GapItem> = cluster_gaps
                    .iter()
                    .copied()
                    .filter(|gap| {
                        input
                            .skills
                            .iter()
                            .find(|s| s.id == gap.skill_id)
                            .is_some_and(|skill| certification_covers(cert, skill))
                    })
                    .collect();

                if !related.is_empty() {
                    recommendations.push(certification(cert, &related));
                }
            }
        }

        if let Some(change) = curriculum_change(input.gaps, input.wai_score) {
            recommendations.push(change);
        }

        log::info!(
            "Generated {} recommendations from {} gaps (catalog {})",
            recommendations.len(),
            input.gaps.len(),
            self.catalog.version()
        );

        recommendations
    }
}

/// Generate recommendations with the built-in certification catalog.
pub fn generate_recommendations(input: &RecommendationInput<'_>) -> Vec<RecommendationDraft> {
    RecommendationEngine::new().generate(input)
}

fn missing_skill(gap: &GapItem) -> RecommendationDraft {
    RecommendationDraft {
        recommendation_type: RecommendationType::MissingSkill,
        title: format!("Add coverage for: {}", gap.skill_name),
        title_ar: format!("إضافة تغطية لمهارة: {}", gap.skill_name),
        description: format!(
            "This skill has {}% coverage but the benchmark expects {}%. Consider adding dedicated course content or integrating it into existing courses.",
            gap.coverage, gap.benchmark_expected
        ),
        priority: if gap.gap > 50 {
            Priority::Critical
        } else {
            Priority::High
        },
        linked_skill_ids: vec![gap.skill_id.clone()],
    }
}

fn micro_module(gap: &GapItem) -> RecommendationDraft {
    RecommendationDraft {
        recommendation_type: RecommendationType::MicroModule,
        title: format!("Micro-module: {} Enhancement", gap.skill_name),
        title_ar: format!("وحدة قصيرة: تعزيز {}", gap.skill_name),
        description: format!(
            "Create a focused micro-module (2-4 weeks) to strengthen coverage of {}. Current coverage: {}%, target: {}%.",
            gap.skill_name, gap.coverage, gap.benchmark_expected
        ),
        priority: if gap.gap > 30 {
            Priority::High
        } else {
            Priority::Medium
        },
        linked_skill_ids: vec![gap.skill_id.clone()],
    }
}

fn certification(cert: &Certification, related: &[&GapItem]) -> RecommendationDraft {
    RecommendationDraft {
        recommendation_type: RecommendationType::Certification,
        title: format!("Professional Certification: {} ({})", cert.name, cert.provider),
        title_ar: format!("شهادة مهنية: {} ({})", cert.name, cert.provider),
        description: format!(
            "Students completing this program could benefit from {} certification by {}, which covers {} identified skill gaps.",
            cert.name,
            cert.provider,
            related.len()
        ),
        priority: Priority::Medium,
        linked_skill_ids: related.iter().map(|g| g.skill_id.clone()).collect(),
    }
}

fn curriculum_change(gaps: &[GapItem], wai_score: u32) -> Option<RecommendationDraft> {
    let linked = |n: usize| -> Vec<String> {
        gaps.iter().take(n).map(|g| g.skill_id.clone()).collect()
    };

    if wai_score < 50 {
        Some(RecommendationDraft {
            recommendation_type: RecommendationType::CurriculumChange,
            title: "Major Curriculum Restructuring Recommended".to_string(),
            title_ar: "يُوصى بإعادة هيكلة المنهج بشكل جذري".to_string(),
            description: format!(
                "The WAI score of {} indicates significant misalignment with market needs. A comprehensive curriculum review involving industry stakeholders is recommended.",
                wai_score
            ),
            priority: Priority::Critical,
            linked_skill_ids: linked(5),
        })
    } else if wai_score < 70 {
        Some(RecommendationDraft {
            recommendation_type: RecommendationType::CurriculumChange,
            title: "Targeted Curriculum Updates Needed".to_string(),
            title_ar: "تحديثات مستهدفة مطلوبة في المنهج".to_string(),
            description: format!(
                "The WAI score of {} suggests moderate alignment gaps. Focus on the top {} skill gaps to improve the score significantly.",
                wai_score,
                gaps.len().min(5)
            ),
            priority: Priority::High,
            linked_skill_ids: linked(3),
        })
    } else {
        None
    }
}

/// Gaps grouped by cluster, clusters in order of first appearance.
fn group_by_cluster(gaps: &[GapItem]) -> Vec<(SkillCluster, Vec<&GapItem>)> {
    let mut groups: Vec<(SkillCluster, Vec<&GapItem>)> = Vec::new();
    for gap in gaps {
        match groups.iter_mut().find(|(cluster, _)| *cluster == gap.cluster) {
            Some((_, members)) => members.push(gap),
            None => groups.push((gap.cluster, vec![gap])),
        }
    }
    groups
}

/// Substring overlap, either direction, between a skill's keywords (plus its
/// lower-cased name) and the certification's keywords.
fn certification_covers(cert: &Certification, skill: &Skill) -> bool {
    let skill_keywords: Vec<String> = skill
        .keywords
        .iter()
        .map(|k| k.to_lowercase())
        .chain(std::iter::once(skill.name.to_lowercase()))
        .collect();

    cert.skills.iter().any(|cert_keyword| {
        skill_keywords.iter().any(|skill_keyword| {
            skill_keyword.contains(cert_keyword.as_str())
                || cert_keyword.contains(skill_keyword.as_str())
        })
    })
}
