//! Vector similarity and per-cluster coverage

use crate::model::{Skill, SkillCluster, SkillCoverageVector};
use std::collections::{BTreeMap, BTreeSet};

/// Cosine similarity over the union of both key sets.
///
/// Absent keys count as 0. Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &SkillCoverageVector, b: &SkillCoverageVector) -> f64 {
    let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();

    let mut dot_product = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for key in keys {
        let x = a.get(key).copied().unwrap_or(0.0);
        let y = b.get(key).copied().unwrap_or(0.0);
        dot_product += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let norm_a = norm_a.sqrt();
    let norm_b = norm_b.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        // rounding can push identical directions a hair past 1
        (dot_product / (norm_a * norm_b)).min(1.0)
    }
}

/// Average coverage of each cluster's skills, as a rounded percentage.
///
/// Clusters with no skills in the catalog are absent from the result.
pub fn compute_coverage_by_cluster(
    program_vector: &SkillCoverageVector,
    skills: &[Skill],
) -> BTreeMap<SkillCluster, u32> {
    let mut totals: BTreeMap<SkillCluster, (f64, usize)> = BTreeMap::new();

    for skill in skills {
        let entry = totals.entry(skill.cluster).or_insert((0.0, 0));
        entry.0 += program_vector.get(&skill.id).copied().unwrap_or(0.0);
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(cluster, (total, count))| {
            let percentage = (total / count as f64 * 100.0).round() as u32;
            (cluster, percentage)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(&str, f64)]) -> SkillCoverageVector {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn skill(id: &str, cluster: SkillCluster) -> Skill {
        Skill {
            id: id.to_string(),
            name: id.to_string(),
            name_ar: String::new(),
            cluster,
            description: String::new(),
            source: String::new(),
            keywords: Vec::new(),
            weight_default: 1.0,
        }
    }

    #[test]
    fn test_self_similarity_is_one() {
        let a = vector(&[("x", 0.3), ("y", 0.9), ("z", 0.1)]);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_similarity() {
        let a = vector(&[("x", 0.3)]);
        let zero = vector(&[("x", 0.0), ("y", 0.0)]);

        assert_eq!(cosine_similarity(&a, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &a), 0.0);
        assert_eq!(cosine_similarity(&SkillCoverageVector::new(), &a), 0.0);
    }

    #[test]
    fn test_disjoint_keys() {
        let a = vector(&[("x", 1.0)]);
        let b = vector(&[("y", 1.0)]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_similarity_bounds() {
        let samples = [
            vector(&[("x", 0.2), ("y", 0.0), ("z", 1.0)]),
            vector(&[("x", 0.9), ("w", 0.4)]),
            vector(&[("y", 0.5), ("z", 0.5), ("w", 0.5)]),
        ];

        for a in &samples {
            for b in &samples {
                let s = cosine_similarity(a, b);
                assert!((0.0..=1.0).contains(&s));
            }
        }
    }

    #[test]
    fn test_coverage_by_cluster() {
        let skills = vec![
            skill("a", SkillCluster::MarketSkills),
            skill("b", SkillCluster::MarketSkills),
            skill("c", SkillCluster::SoftSkills),
        ];
        let program = vector(&[("a", 1.0), ("b", 0.5), ("c", 0.333)]);

        let coverage = compute_coverage_by_cluster(&program, &skills);

        assert_eq!(coverage.get(&SkillCluster::MarketSkills), Some(&75));
        assert_eq!(coverage.get(&SkillCluster::SoftSkills), Some(&33));
        assert!(!coverage.contains_key(&SkillCluster::FutureSkills));
    }

    #[test]
    fn test_coverage_missing_entries_default_to_zero() {
        let skills = vec![skill("a", SkillCluster::CoreAcademic)];
        let coverage = compute_coverage_by_cluster(&SkillCoverageVector::new(), &skills);
        assert_eq!(coverage.get(&SkillCluster::CoreAcademic), Some(&0));
    }
}
