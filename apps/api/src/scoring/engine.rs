//! Composite scoring — combines skill coverage, experience, and textual
//! similarity into one bounded match score with diagnostics.
//!
//! Every weight, threshold, and bound lives in `ScoringConfig` so one engine
//! reproduces both the capped (88) and the plain (100) scoring profiles.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::scoring::experience::extract_experience;
use crate::scoring::normalize::{normalize, EnglishAnalyzer, TextAnalyzer};
use crate::scoring::similarity::{SimilarityScorer, TfIdfCosine};
use crate::scoring::skills::{match_skills, SkillMatchMode, SkillSet};

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Points each component contributes at full strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub required: f64,
    pub optional: f64,
    pub experience: f64,
    /// Flat experience score when the job states no minimum.
    pub neutral_experience: f64,
    pub similarity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            required: 40.0,
            optional: 15.0,
            experience: 25.0,
            neutral_experience: 15.0,
            similarity: 20.0,
        }
    }
}

/// Keyword-stuffing heuristic: too many occurrences of one keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordStuffingRule {
    pub keyword: String,
    /// Penalize when the count is strictly greater than this.
    pub max_occurrences: usize,
    pub points: f64,
}

/// Too-short heuristic: fewer words than `min_words`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortResumeRule {
    pub min_words: usize,
    pub points: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PenaltyRules {
    pub keyword_stuffing: Option<KeywordStuffingRule>,
    pub short_resume: Option<ShortResumeRule>,
}

impl PenaltyRules {
    pub fn standard() -> Self {
        Self {
            keyword_stuffing: Some(KeywordStuffingRule {
                keyword: "python".to_string(),
                max_occurrences: 15,
                points: 5.0,
            }),
            short_resume: Some(ShortResumeRule {
                min_words: 150,
                points: 5.0,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    /// Upper bound on the final score. The capped profile never reports a
    /// near-perfect match.
    pub ceiling: f64,
    /// Lower bound on the final score; `None` lets penalties drive it negative.
    pub floor: Option<f64>,
    pub penalties: PenaltyRules,
    pub skill_match: SkillMatchMode,
}

impl ScoringConfig {
    /// Ceiling 88 with both penalty heuristics enabled.
    pub fn capped() -> Self {
        Self {
            weights: ScoringWeights::default(),
            ceiling: 88.0,
            floor: Some(0.0),
            penalties: PenaltyRules::standard(),
            skill_match: SkillMatchMode::Substring,
        }
    }

    /// Ceiling 100, no penalties.
    pub fn uncapped() -> Self {
        Self {
            ceiling: 100.0,
            penalties: PenaltyRules::default(),
            ..Self::capped()
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::capped()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Input / output data models
// ────────────────────────────────────────────────────────────────────────────

/// What the recruiter supplies: role text, skill lists, minimum experience.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobProfile {
    pub job_text: String,
    pub required: SkillSet,
    pub optional: SkillSet,
    /// 0 means "unspecified".
    pub min_experience_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedPenalty {
    pub rule: String,
    pub points: f64,
}

/// Degraded-but-defined inputs. Scoring proceeds; these explain why a
/// component may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreWarning {
    EmptyJobText,
    NoSkillsConfigured,
    NoResumeText,
}

/// Full result of one scoring call. Components are rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub required_score: f64,
    pub optional_score: f64,
    pub experience_score: f64,
    pub similarity_score: f64,
    pub penalty: f64,
    pub final_score: f64,
    pub matched_required: SkillSet,
    pub missing_required: SkillSet,
    pub matched_optional: SkillSet,
    pub missing_optional: SkillSet,
    pub experience_detected: f64,
    pub penalties_applied: Vec<AppliedPenalty>,
    pub warnings: Vec<ScoreWarning>,
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

/// Stateless apart from read-only configuration; share it as
/// `Arc<ScoringEngine>` across concurrent scoring calls.
#[derive(Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
    analyzer: Arc<dyn TextAnalyzer>,
    similarity: Arc<dyn SimilarityScorer>,
}

impl ScoringEngine {
    /// Engine with the bundled English analyzer and TF-IDF cosine scorer.
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_capabilities(
            config,
            Arc::new(EnglishAnalyzer),
            Arc::new(TfIdfCosine::default()),
        )
    }

    pub fn with_capabilities(
        config: ScoringConfig,
        analyzer: Arc<dyn TextAnalyzer>,
        similarity: Arc<dyn SimilarityScorer>,
    ) -> Self {
        Self {
            config,
            analyzer,
            similarity,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores raw résumé text against a job profile. Never fails: empty
    /// skill lists, empty texts, and zero experience all produce a defined
    /// result.
    pub fn score(&self, resume_text: &str, job: &JobProfile) -> ScoreBreakdown {
        let weights = &self.config.weights;
        let resume_raw = resume_text.to_lowercase();
        let resume = normalize(&resume_raw, self.analyzer.as_ref());
        let job_norm = normalize(&job.job_text, self.analyzer.as_ref());

        let mut warnings = Vec::new();
        if job_norm.is_empty() {
            warnings.push(ScoreWarning::EmptyJobText);
        }
        if job.required.is_empty() && job.optional.is_empty() {
            warnings.push(ScoreWarning::NoSkillsConfigured);
        }
        if resume.is_empty() {
            warnings.push(ScoreWarning::NoResumeText);
        }
        if !warnings.is_empty() {
            warn!(?warnings, "Scoring with degraded inputs");
        }

        let experience_detected = extract_experience(&resume_raw);

        let analyzer = self.analyzer.as_ref();
        let mode = self.config.skill_match;
        let required = match_skills(&resume_raw, &resume, &job.required, mode, analyzer);
        let optional = match_skills(&resume_raw, &resume, &job.optional, mode, analyzer);
        let required_score = coverage(required.matched.len(), job.required.len()) * weights.required;
        let optional_score = coverage(optional.matched.len(), job.optional.len()) * weights.optional;

        let experience_score = if job.min_experience_years > 0.0 {
            (experience_detected / job.min_experience_years).min(1.0) * weights.experience
        } else {
            weights.neutral_experience
        };

        let similarity_score =
            self.similarity.similarity(job_norm.as_str(), resume.as_str()) * weights.similarity;

        let penalties_applied = self.evaluate_penalties(&resume_raw);
        let penalty: f64 = penalties_applied.iter().map(|p| p.points).sum();

        let raw_total =
            required_score + optional_score + experience_score + similarity_score - penalty;
        let final_score = self.bound(round2(raw_total));

        debug!(
            required_score,
            optional_score,
            experience_score,
            similarity_score,
            penalty,
            final_score,
            "Scored résumé"
        );

        ScoreBreakdown {
            required_score: round2(required_score),
            optional_score: round2(optional_score),
            experience_score: round2(experience_score),
            similarity_score: round2(similarity_score),
            penalty: round2(penalty),
            final_score,
            matched_required: required.matched,
            missing_required: required.missing,
            matched_optional: optional.matched,
            missing_optional: optional.missing,
            experience_detected,
            penalties_applied,
            warnings,
        }
    }

    fn evaluate_penalties(&self, resume_lower: &str) -> Vec<AppliedPenalty> {
        let rules = &self.config.penalties;
        let mut applied = Vec::new();

        if let Some(rule) = &rules.keyword_stuffing {
            let keyword = rule.keyword.to_lowercase();
            let occurrences = if keyword.is_empty() {
                0
            } else {
                resume_lower.matches(keyword.as_str()).count()
            };
            if occurrences > rule.max_occurrences {
                applied.push(AppliedPenalty {
                    rule: format!("keyword_stuffing:{keyword}"),
                    points: rule.points,
                });
            }
        }

        if let Some(rule) = &rules.short_resume {
            if resume_lower.split_whitespace().count() < rule.min_words {
                applied.push(AppliedPenalty {
                    rule: "short_resume".to_string(),
                    points: rule.points,
                });
            }
        }

        applied
    }

    fn bound(&self, score: f64) -> f64 {
        let capped = score.min(self.config.ceiling);
        match self.config.floor {
            Some(floor) => capped.max(floor),
            None => capped,
        }
    }
}

/// Fraction of a vocabulary matched; an empty vocabulary contributes nothing.
fn coverage(matched: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
