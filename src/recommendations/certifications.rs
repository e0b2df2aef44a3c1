//! Professional certification catalog
//!
//! The catalog is an editorial table, not user data. The built-in version
//! ships with the binary; a TOML file with the same shape can replace it
//! without a rebuild.

use crate::error::{AlignerError, Result};
use crate::model::SkillCluster;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const BUILTIN_CATALOG_VERSION: &str = "builtin-2024.1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub provider: String,
    /// Lower-case keywords compared against skill keywords.
    pub skills: Vec<String>,
}

/// Lookup of certifications by skill cluster.
pub trait CertificationCatalog: Send + Sync {
    fn version(&self) -> &str;

    /// Certifications for a cluster, in catalog order.
    fn for_cluster(&self, cluster: SkillCluster) -> &[Certification];

    fn all(&self) -> Vec<(SkillCluster, &Certification)> {
        SkillCluster::ALL
            .iter()
            .flat_map(|cluster| self.for_cluster(*cluster).iter().map(move |c| (*cluster, c)))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    version: String,
    #[serde(default)]
    certifications: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogEntry {
    cluster: SkillCluster,
    name: String,
    provider: String,
    skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StaticCertificationCatalog {
    version: String,
    entries: BTreeMap<SkillCluster, Vec<Certification>>,
}

fn cert(name: &str, provider: &str, skills: &[&str]) -> Certification {
    Certification {
        name: name.to_string(),
        provider: provider.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

impl StaticCertificationCatalog {
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();

        entries.insert(
            SkillCluster::MarketSkills,
            vec![
                cert("AWS Solutions Architect", "AWS", &["cloud computing", "aws", "cloud architecture", "infrastructure"]),
                cert("Google Cloud Professional", "Google", &["cloud computing", "google cloud", "gcp", "machine learning"]),
                cert("Azure Administrator", "Microsoft", &["cloud computing", "azure", "microsoft cloud"]),
                cert("CCNA", "Cisco", &["networking", "network security", "cisco", "routing"]),
                cert("CompTIA Security+", "CompTIA", &["cybersecurity", "security", "information security"]),
                cert("CompTIA A+", "CompTIA", &["hardware", "troubleshooting", "technical support"]),
            ],
        );
        entries.insert(
            SkillCluster::CoreAcademic,
            vec![
                cert("ISACA CISA", "ISACA", &["auditing", "information systems", "governance"]),
                cert("ISACA CRISC", "ISACA", &["risk management", "it risk", "control"]),
                cert("CompTIA Network+", "CompTIA", &["networking", "network fundamentals"]),
            ],
        );
        entries.insert(
            SkillCluster::FutureSkills,
            vec![
                cert("Google TensorFlow Developer", "Google", &["machine learning", "deep learning", "ai", "tensorflow"]),
                cert("AWS Machine Learning Specialty", "AWS", &["machine learning", "ai", "data science"]),
                cert("Microsoft AI Engineer", "Microsoft", &["artificial intelligence", "ai", "cognitive services"]),
            ],
        );
        entries.insert(
            SkillCluster::SoftSkills,
            vec![
                cert("PMP", "PMI", &["project management", "leadership", "team management"]),
                cert("PMI-ACP", "PMI", &["agile", "scrum", "project management"]),
                cert("CAPM", "PMI", &["project management", "planning"]),
            ],
        );

        Self {
            version: BUILTIN_CATALOG_VERSION.to_string(),
            entries,
        }
    }

    /// Parse a catalog from TOML. Keywords are lower-cased on load.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        if file.version.trim().is_empty() {
            return Err(AlignerError::Configuration(
                "Certification catalog must declare a version".to_string(),
            ));
        }

        let mut entries: BTreeMap<SkillCluster, Vec<Certification>> = BTreeMap::new();
        for entry in file.certifications {
            entries.entry(entry.cluster).or_default().push(Certification {
                name: entry.name,
                provider: entry.provider,
                skills: entry.skills.iter().map(|s| s.to_lowercase()).collect(),
            });
        }

        Ok(Self {
            version: file.version,
            entries,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded certification catalog {} from {}",
            catalog.version,
            path.display()
        );
        Ok(catalog)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let file = CatalogFile {
            version: self.version.clone(),
            certifications: self
                .all()
                .into_iter()
                .map(|(cluster, c)| CatalogEntry {
                    cluster,
                    name: c.name.clone(),
                    provider: c.provider.clone(),
                    skills: c.skills.clone(),
                })
                .collect(),
        };
        toml::to_string_pretty(&file)
            .map_err(|e| AlignerError::Configuration(format!("Failed to serialize catalog: {}", e)))
    }
}

impl Default for StaticCertificationCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CertificationCatalog for StaticCertificationCatalog {
    fn version(&self) -> &str {
        &self.version
    }

    fn for_cluster(&self, cluster: SkillCluster) -> &[Certification] {
        self.entries
            .get(&cluster)
            .map(|certs| certs.as_slice())
            .unwrap_or(&[])
    }
}
