// Résumé scoring engine: normalization, experience extraction, skill matching,
// TF-IDF similarity, and the composite score that combines them.
// Pure and synchronous — callers own I/O and concurrency.

pub mod engine;
pub mod experience;
pub mod lemmatizer;
pub mod normalize;
pub mod similarity;
pub mod skills;
pub mod stopwords;

pub use engine::{JobProfile, ScoreBreakdown, ScoringConfig, ScoringEngine};
pub use skills::{SkillMatchMode, SkillSet};
