//! Record shapes read from the record store
//!
//! These mirror the rows the platform persists for programs, courses, the
//! skill vocabulary, benchmark universities and scoring weights. The scoring
//! core only reads them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Skill id to coverage in `[0, 1]`.
///
/// Ordered so that anything derived from it iterates the same way on every run.
pub type SkillCoverageVector = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCluster {
    MarketSkills,
    CoreAcademic,
    FutureSkills,
    SoftSkills,
}

impl SkillCluster {
    pub const ALL: [SkillCluster; 4] = [
        SkillCluster::MarketSkills,
        SkillCluster::CoreAcademic,
        SkillCluster::FutureSkills,
        SkillCluster::SoftSkills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCluster::MarketSkills => "market_skills",
            SkillCluster::CoreAcademic => "core_academic",
            SkillCluster::FutureSkills => "future_skills",
            SkillCluster::SoftSkills => "soft_skills",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillCluster::MarketSkills => "Market Skills",
            SkillCluster::CoreAcademic => "Core Academic",
            SkillCluster::FutureSkills => "Future Skills",
            SkillCluster::SoftSkills => "Soft Skills",
        }
    }
}

impl fmt::Display for SkillCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillCluster {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "market_skills" | "market" => Ok(SkillCluster::MarketSkills),
            "core_academic" | "core" => Ok(SkillCluster::CoreAcademic),
            "future_skills" | "future" => Ok(SkillCluster::FutureSkills),
            "soft_skills" | "soft" => Ok(SkillCluster::SoftSkills),
            _ => Err(format!(
                "Invalid skill cluster: {}. Supported: market_skills, core_academic, future_skills, soft_skills",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Basic,
    Applied,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseCategory {
    Core,
    Elective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramMode {
    #[default]
    Teaching,
    Research,
    Hybrid,
}

impl fmt::Display for ProgramMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProgramMode::Teaching => "teaching",
            ProgramMode::Research => "research",
            ProgramMode::Hybrid => "hybrid",
        };
        f.write_str(name)
    }
}

impl FromStr for ProgramMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "teaching" => Ok(ProgramMode::Teaching),
            "research" => Ok(ProgramMode::Research),
            "hybrid" => Ok(ProgramMode::Hybrid),
            _ => Err(format!(
                "Invalid program mode: {}. Supported: teaching, research, hybrid",
                s
            )),
        }
    }
}

/// Ranking family a benchmark university was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BenchmarkSource {
    QS,
    Shanghai,
    GlobalTop5,
    SectorLeaders,
}

impl fmt::Display for BenchmarkSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BenchmarkSource::QS => "QS",
            BenchmarkSource::Shanghai => "Shanghai",
            BenchmarkSource::GlobalTop5 => "GlobalTop5",
            BenchmarkSource::SectorLeaders => "SectorLeaders",
        };
        f.write_str(name)
    }
}

impl FromStr for BenchmarkSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "qs" => Ok(BenchmarkSource::QS),
            "shanghai" => Ok(BenchmarkSource::Shanghai),
            "globaltop5" | "global_top5" => Ok(BenchmarkSource::GlobalTop5),
            "sectorleaders" | "sector_leaders" => Ok(BenchmarkSource::SectorLeaders),
            _ => Err(format!(
                "Invalid benchmark source: {}. Supported: QS, Shanghai, GlobalTop5, SectorLeaders",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_ar: String,
    pub cluster: SkillCluster,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Carried for future weighting; the current score does not read it.
    #[serde(default = "default_skill_weight")]
    pub weight_default: f64,
}

fn default_skill_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    #[serde(default)]
    pub program_id: String,
    #[serde(default)]
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub title_ar: String,
    #[serde(default)]
    pub description: String,
    pub credits: u32,
    pub level: CourseLevel,
    #[serde(default)]
    pub semester: Option<u32>,
    pub category: CourseCategory,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// A course that is known to be active.
///
/// Extraction, vector building and redundancy detection only accept this type,
/// so inactive rows cannot leak into a computation by accident.
#[derive(Debug, Clone, Copy)]
pub struct ActiveCourse<'a>(&'a Course);

impl<'a> ActiveCourse<'a> {
    pub fn new(course: &'a Course) -> Option<Self> {
        course.is_active.then_some(ActiveCourse(course))
    }

    /// Keep the active courses, preserving input order.
    pub fn filter(courses: &'a [Course]) -> Vec<ActiveCourse<'a>> {
        courses.iter().filter_map(ActiveCourse::new).collect()
    }

    pub fn course(&self) -> &'a Course {
        self.0
    }
}

impl Deref for ActiveCourse<'_> {
    type Target = Course;

    fn deref(&self) -> &Course {
        self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    #[serde(default)]
    pub university_id: String,
    pub name: String,
    #[serde(default)]
    pub name_ar: String,
    #[serde(default)]
    pub degree_level: String,
    #[serde(default)]
    pub discipline: String,
    #[serde(default)]
    pub mode: Option<ProgramMode>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkUniversity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub ranking_source: BenchmarkSource,
    #[serde(default)]
    pub discipline: String,
    /// Expected coverage per skill for a top program in this discipline.
    #[serde(default)]
    pub skill_profile_json: SkillCoverageVector,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub market_skills_weight: f64,
    pub core_skills_weight: f64,
    pub future_skills_weight: f64,
    pub soft_skills_weight: f64,
    /// Share (0-100) of the index driven by raw benchmark similarity.
    pub wai_top_weight: f64,
    #[serde(default)]
    pub is_default: bool,
}

impl ScoringWeights {
    pub fn cluster_weight(&self, cluster: SkillCluster) -> f64 {
        match cluster {
            SkillCluster::MarketSkills => self.market_skills_weight,
            SkillCluster::CoreAcademic => self.core_skills_weight,
            SkillCluster::FutureSkills => self.future_skills_weight,
            SkillCluster::SoftSkills => self.soft_skills_weight,
        }
    }

    pub fn cluster_weight_sum(&self) -> f64 {
        SkillCluster::ALL
            .iter()
            .map(|c| self.cluster_weight(*c))
            .sum()
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            name: "Default".to_string(),
            market_skills_weight: 30.0,
            core_skills_weight: 30.0,
            future_skills_weight: 25.0,
            soft_skills_weight: 15.0,
            wai_top_weight: 40.0,
            is_default: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, active: bool) -> Course {
        Course {
            id: id.to_string(),
            program_id: "p1".to_string(),
            code: String::new(),
            title: "Course".to_string(),
            title_ar: String::new(),
            description: String::new(),
            credits: 3,
            level: CourseLevel::Basic,
            semester: None,
            category: CourseCategory::Core,
            is_active: active,
        }
    }

    #[test]
    fn test_active_course_filter() {
        let courses = vec![course("a", true), course("b", false), course("c", true)];
        let active = ActiveCourse::filter(&courses);

        let ids: Vec<&str> = active.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(ActiveCourse::new(&courses[1]).is_none());
    }

    #[test]
    fn test_cluster_serialization() {
        let json = serde_json::to_string(&SkillCluster::CoreAcademic).unwrap();
        assert_eq!(json, "\"core_academic\"");

        let parsed: SkillCluster = "future".parse().unwrap();
        assert_eq!(parsed, SkillCluster::FutureSkills);
    }

    #[test]
    fn test_course_defaults() {
        let json = r#"{"id":"c1","title":"Databases","credits":3,"level":"applied","category":"elective"}"#;
        let course: Course = serde_json::from_str(json).unwrap();

        assert!(course.is_active);
        assert_eq!(course.title_ar, "");
        assert_eq!(course.level, CourseLevel::Applied);
    }

    #[test]
    fn test_weight_sum() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.cluster_weight_sum(), 100.0);
        assert_eq!(weights.cluster_weight(SkillCluster::SoftSkills), 15.0);
    }
}
