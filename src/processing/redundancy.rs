//! Near-duplicate course detection

use crate::model::{ActiveCourse, Skill};
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Matches at or below this score are incidental and ignored.
pub const SIGNIFICANT_SKILL_SCORE: f64 = 0.2;
/// Pairs must exceed this combined overlap to be reported.
pub const REDUNDANCY_THRESHOLD: f64 = 0.4;
const SKILL_OVERLAP_WEIGHT: f64 = 0.7;
const TITLE_SIMILARITY_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedundantPair {
    pub course1: String,
    pub course2: String,
    /// Combined overlap rounded to two decimals.
    pub overlap: f64,
}

/// Flag course pairs whose significant skills and titles overlap.
///
/// Pairs are `(earlier, later)` in input order; the result is sorted by
/// overlap, highest first. Courses with no significant skill never pair.
pub fn detect_redundancy(courses: &[ActiveCourse<'_>], skills: &[Skill]) -> Vec<RedundantPair> {
    let extractor = SkillExtractor::new(skills);
    detect_with_extractor(&extractor, courses)
}

pub(crate) fn detect_with_extractor(
    extractor: &SkillExtractor,
    courses: &[ActiveCourse<'_>],
) -> Vec<RedundantPair> {
    let processor = TextProcessor::new();

    let skill_sets: Vec<BTreeSet<String>> = courses
        .iter()
        .map(|course| {
            extractor
                .extract(course)
                .into_iter()
                .filter(|m| m.score > SIGNIFICANT_SKILL_SCORE)
                .map(|m| m.skill_id)
                .collect()
        })
        .collect();

    let mut pairs = Vec::new();

    for i in 0..courses.len() {
        for j in (i + 1)..courses.len() {
            let (skills1, skills2) = (&skill_sets[i], &skill_sets[j]);
            if skills1.is_empty() || skills2.is_empty() {
                continue;
            }

            let intersection = skills1.intersection(skills2).count();
            let union = skills1.union(skills2).count();
            let skill_overlap = intersection as f64 / union as f64;

            let title_similarity =
                processor.token_similarity(&courses[i].title, &courses[j].title);

            let combined =
                skill_overlap * SKILL_OVERLAP_WEIGHT + title_similarity * TITLE_SIMILARITY_WEIGHT;

            if combined > REDUNDANCY_THRESHOLD {
                pairs.push(RedundantPair {
                    course1: courses[i].id.clone(),
                    course2: courses[j].id.clone(),
                    overlap: (combined * 100.0).round() / 100.0,
                });
            }
        }
    }

    pairs.sort_by(|a, b| b.overlap.partial_cmp(&a.overlap).unwrap_or(Ordering::Equal));

    if !pairs.is_empty() {
        log::debug!("Found {} redundant course pairs", pairs.len());
    }

    pairs
}
