//! Keyword-overlap skill extraction for a single course

use crate::model::{ActiveCourse, Skill};
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const SUBSTRING_IN_TEXT_POINTS: f64 = 1.0;
const EXACT_TOKEN_POINTS: f64 = 2.0;
const PARTIAL_TOKEN_POINTS: f64 = 0.5;

/// One skill detected in a course, with a score in `(0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill_id: String,
    pub score: f64,
}

/// Matching tokens prepared once per skill.
#[derive(Debug, Clone)]
struct SkillPattern {
    skill_id: String,
    /// Number of candidate keywords (normalized keywords plus name tokens).
    candidate_count: usize,
    /// Every token of every candidate, duplicates kept.
    tokens: Vec<String>,
}

/// Scores courses against a skill catalog.
///
/// The catalog is tokenized once up front so that scoring many courses only
/// tokenizes the course text.
pub struct SkillExtractor {
    processor: TextProcessor,
    patterns: Vec<SkillPattern>,
}

impl SkillExtractor {
    pub fn new(skills: &[Skill]) -> Self {
        let processor = TextProcessor::new();
        let patterns = skills
            .iter()
            .map(|skill| Self::build_pattern(&processor, skill))
            .collect();

        Self {
            processor,
            patterns,
        }
    }

    fn build_pattern(processor: &TextProcessor, skill: &Skill) -> SkillPattern {
        let mut candidates: Vec<String> = skill
            .keywords
            .iter()
            .map(|keyword| processor.normalize(keyword))
            .collect();
        candidates.extend(processor.tokenize(&format!("{} {}", skill.name, skill.name_ar)));

        let tokens = candidates
            .iter()
            .flat_map(|candidate| processor.tokenize(candidate))
            .collect();

        SkillPattern {
            skill_id: skill.id.clone(),
            candidate_count: candidates.len(),
            tokens,
        }
    }

    /// Skills with a positive score for this course, best first.
    pub fn extract(&self, course: &ActiveCourse<'_>) -> Vec<SkillMatch> {
        let course_text = self.processor.normalize(&format!(
            "{} {} {} {}",
            course.title, course.title_ar, course.description, course.code
        ));
        let course_tokens = self.processor.tokenize(&course_text);

        let mut matches: Vec<SkillMatch> = self
            .patterns
            .iter()
            .filter_map(|pattern| {
                let raw = Self::raw_score(pattern, &course_text, &course_tokens);
                if raw > 0.0 {
                    let score = (raw / (pattern.candidate_count as f64 * 2.0)).min(1.0);
                    Some(SkillMatch {
                        skill_id: pattern.skill_id.clone(),
                        score,
                    })
                } else {
                    None
                }
            })
            .collect();

        // stable sort: equal scores keep catalog order
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        log::debug!(
            "Course {} matched {} of {} skills",
            course.id,
            matches.len(),
            self.patterns.len()
        );

        matches
    }

    fn raw_score(pattern: &SkillPattern, course_text: &str, course_tokens: &[String]) -> f64 {
        let mut score = 0.0;

        for keyword_token in &pattern.tokens {
            if course_text.contains(keyword_token.as_str()) {
                score += SUBSTRING_IN_TEXT_POINTS;
            }

            for course_token in course_tokens {
                if course_token == keyword_token {
                    score += EXACT_TOKEN_POINTS;
                } else if course_token.contains(keyword_token.as_str())
                    || keyword_token.contains(course_token.as_str())
                {
                    score += PARTIAL_TOKEN_POINTS;
                }
            }
        }

        score
    }

    pub fn skill_count(&self) -> usize {
        self.patterns.len()
    }
}

/// Score one course against the full catalog.
pub fn extract_skills_from_course(course: &ActiveCourse<'_>, skills: &[Skill]) -> Vec<SkillMatch> {
    SkillExtractor::new(skills).extract(course)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Course, CourseCategory, CourseLevel, SkillCluster};

    fn course(title: &str, description: &str) -> Course {
        Course {
            id: "c1".to_string(),
            program_id: "p1".to_string(),
            code: "CS101".to_string(),
            title: title.to_string(),
            title_ar: String::new(),
            description: description.to_string(),
            credits: 3,
            level: CourseLevel::Basic,
            semester: Some(1),
            category: CourseCategory::Core,
            is_active: true,
        }
    }

    fn skill(id: &str, name: &str, keywords: &[&str]) -> Skill {
        Skill {
            id: id.to_string(),
            name: name.to_string(),
            name_ar: String::new(),
            cluster: SkillCluster::MarketSkills,
            description: String::new(),
            source: String::new(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            weight_default: 1.0,
        }
    }

    #[test]
    fn test_python_course_matches_python_skill() {
        let c = course("Introduction to Python Programming", "");
        let active = ActiveCourse::new(&c).unwrap();
        let skills = vec![skill("s1", "", &["python", "programming"])];

        let matches = extract_skills_from_course(&active, &skills);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].skill_id, "s1");
        assert!(matches[0].score > 0.0);
        assert!(matches[0].score <= 1.0);
    }

    #[test]
    fn test_raw_score_points() {
        // "python" appears in the text (+1) and equals one course token (+2)
        let c = course("Python", "");
        let active = ActiveCourse::new(&c).unwrap();
        let skills = vec![skill("s1", "", &["python", "statistics"])];

        let matches = extract_skills_from_course(&active, &skills);

        // 3 points over 2 candidates * 2
        assert_eq!(matches.len(), 1);
        assert!((matches[0].score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_partial_token_overlap() {
        // "network" is a substring of "networks" (+1 in text, +0.5 token overlap)
        let c = course("Computer Networks", "");
        let active = ActiveCourse::new(&c).unwrap();
        let skills = vec![skill("s1", "", &["network"])];

        let matches = extract_skills_from_course(&active, &skills);
        assert!((matches[0].score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_skill_without_candidates_is_skipped() {
        let c = course("Anything at all", "with a description");
        let active = ActiveCourse::new(&c).unwrap();
        let skills = vec![skill("empty", "", &[])];

        assert!(extract_skills_from_course(&active, &skills).is_empty());
    }

    #[test]
    fn test_sorted_descending() {
        let c = course("Machine Learning", "Neural networks and deep learning with Python");
        let active = ActiveCourse::new(&c).unwrap();
        let skills = vec![
            skill("weak", "Statistics", &["python", "regression", "probability", "inference"]),
            skill("strong", "Machine Learning", &["machine learning", "deep learning"]),
            skill("none", "Accounting", &["ledger"]),
        ];

        let matches = extract_skills_from_course(&active, &skills);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].skill_id, "strong");
        assert!(matches[0].score >= matches[1].score);
        assert!(matches.iter().all(|m| m.score > 0.0 && m.score <= 1.0));
    }

    #[test]
    fn test_arabic_keywords() {
        let mut c = course("", "");
        c.title_ar = "أمن المعلومات".to_string();
        let active = ActiveCourse::new(&c).unwrap();
        let mut s = skill("sec", "", &[]);
        s.name_ar = "أمن المعلومات".to_string();

        let matches = extract_skills_from_course(&active, &[s]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].score, 1.0);
    }
}
