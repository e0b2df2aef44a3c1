//! Program-wide skill coverage vector

use crate::model::{ActiveCourse, Skill, SkillCoverageVector};
use crate::processing::skill_extractor::SkillExtractor;

/// Credit load that counts as a weight of 1.0.
pub const BASELINE_CREDITS: f64 = 3.0;

/// Fold per-course matches into one coverage value per skill.
///
/// Every catalog skill gets an entry, starting at 0. Each course adds
/// `score * credits / 3` and the running total saturates at 1.0.
pub fn build_program_skill_vector(
    courses: &[ActiveCourse<'_>],
    skills: &[Skill],
) -> SkillCoverageVector {
    let extractor = SkillExtractor::new(skills);
    build_with_extractor(&extractor, courses, skills)
}

pub(crate) fn build_with_extractor(
    extractor: &SkillExtractor,
    courses: &[ActiveCourse<'_>],
    skills: &[Skill],
) -> SkillCoverageVector {
    let mut vector: SkillCoverageVector = skills
        .iter()
        .map(|skill| (skill.id.clone(), 0.0))
        .collect();

    for course in courses {
        let credit_weight = f64::from(course.credits) / BASELINE_CREDITS;

        for matched in extractor.extract(course) {
            let entry = vector.entry(matched.skill_id).or_insert(0.0);
            *entry = (*entry + matched.score * credit_weight).min(1.0);
        }
    }

    vector
}
