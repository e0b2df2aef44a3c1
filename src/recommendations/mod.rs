pub mod certifications;
pub mod engine;

pub use certifications::{
    Certification, CertificationCatalog, StaticCertificationCatalog, BUILTIN_CATALOG_VERSION,
};
pub use engine::{
    generate_recommendations, Priority, RecommendationDraft, RecommendationEngine,
    RecommendationInput, RecommendationType,
};
