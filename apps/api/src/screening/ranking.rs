//! Batch evaluation — extracts and scores every uploaded résumé in parallel
//! on the blocking pool, then ranks the survivors.
//!
//! One candidate's failure (corrupt document, panicking parser) becomes a
//! `FailedCandidate` row; it never aborts the batch.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::extraction::{self, ExtractionError, RawDocument};
use crate::scoring::{JobProfile, ScoreBreakdown, ScoringEngine};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateScore {
    pub candidate_id: String,
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedCandidate {
    pub candidate_id: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingReport {
    /// Sorted by `final_score` descending; ties keep upload order.
    pub candidates: Vec<CandidateScore>,
    /// In upload order.
    pub failures: Vec<FailedCandidate>,
}

/// Extracts and scores one document.
pub fn evaluate_document(
    engine: &ScoringEngine,
    job: &JobProfile,
    document: &RawDocument,
) -> Result<CandidateScore, ExtractionError> {
    let text = extraction::extract(document)?;
    Ok(CandidateScore {
        candidate_id: document.filename.clone(),
        breakdown: engine.score(&text, job),
    })
}

pub async fn rank_candidates(
    engine: Arc<ScoringEngine>,
    job: Arc<JobProfile>,
    documents: Vec<RawDocument>,
) -> RankingReport {
    let candidate_ids: Vec<String> = documents.iter().map(|d| d.filename.clone()).collect();
    info!(candidates = documents.len(), "Ranking résumé batch");

    let mut tasks = JoinSet::new();
    for (index, document) in documents.into_iter().enumerate() {
        let engine = Arc::clone(&engine);
        let job = Arc::clone(&job);
        tasks.spawn_blocking(move || (index, evaluate_document(&engine, &job, &document)));
    }

    let mut outcomes: Vec<Option<Result<CandidateScore, String>>> =
        candidate_ids.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => outcomes[index] = Some(result.map_err(|e| e.to_string())),
            Err(e) => warn!("Scoring task did not complete: {e}"),
        }
    }

    // Slots still empty belong to tasks that panicked
    let outcomes = outcomes
        .into_iter()
        .zip(candidate_ids)
        .map(|(outcome, candidate_id)| {
            outcome.unwrap_or_else(|| {
                Err(format!("scoring of {candidate_id} aborted unexpectedly"))
            })
            .map_err(|error| FailedCandidate {
                candidate_id,
                error,
            })
        })
        .collect();

    let report = rank(outcomes);
    info!(
        scored = report.candidates.len(),
        failed = report.failures.len(),
        "Ranking complete"
    );
    report
}

/// Splits per-candidate outcomes (in upload order) into a ranked list and a
/// failure list.
pub fn rank(outcomes: Vec<Result<CandidateScore, FailedCandidate>>) -> RankingReport {
    let mut report = RankingReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(candidate) => report.candidates.push(candidate),
            Err(failure) => {
                warn!(
                    candidate_id = %failure.candidate_id,
                    error = %failure.error,
                    "Candidate excluded from ranking"
                );
                report.failures.push(failure);
            }
        }
    }

    // sort_by is stable: equal scores stay in upload order
    report
        .candidates
        .sort_by(|a, b| b.breakdown.final_score.total_cmp(&a.breakdown.final_score));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::docx::fixtures::docx_with_paragraphs;
    use crate::scoring::{ScoringConfig, SkillSet};

    fn scored(id: &str, final_score: f64) -> Result<CandidateScore, FailedCandidate> {
        let engine = ScoringEngine::new(ScoringConfig::default());
        let mut breakdown = engine.score("", &JobProfile::default());
        breakdown.final_score = final_score;
        Ok(CandidateScore {
            candidate_id: id.to_string(),
            breakdown,
        })
    }

    fn failed(id: &str) -> Result<CandidateScore, FailedCandidate> {
        Err(FailedCandidate {
            candidate_id: id.to_string(),
            error: "corrupt".to_string(),
        })
    }

    #[test]
    fn test_rank_sorts_descending() {
        let report = rank(vec![scored("a", 10.0), scored("b", 50.0), scored("c", 30.0)]);
        let ids: Vec<&str> = report.candidates.iter().map(|c| c.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let report = rank(vec![
            scored("first", 40.0),
            scored("top", 70.0),
            scored("second", 40.0),
            scored("third", 40.0),
        ]);
        let ids: Vec<&str> = report.candidates.iter().map(|c| c.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_rank_separates_failures_in_upload_order() {
        let report = rank(vec![failed("x"), scored("a", 1.0), failed("y")]);
        assert_eq!(report.candidates.len(), 1);
        let failed_ids: Vec<&str> = report.failures.iter().map(|f| f.candidate_id.as_str()).collect();
        assert_eq!(failed_ids, vec!["x", "y"]);
    }

    #[tokio::test]
    async fn test_rank_candidates_mixed_batch() {
        let engine = Arc::new(ScoringEngine::new(ScoringConfig::default()));
        let job = Arc::new(JobProfile {
            job_text: "python developer with sql".to_string(),
            required: SkillSet::parse_csv("python, sql"),
            optional: SkillSet::new(),
            min_experience_years: 0.0,
        });
        let documents = vec![
            RawDocument::new("weak.docx", docx_with_paragraphs(&["carpentry and woodwork"])),
            RawDocument::new("broken.pdf", b"not a pdf at all".to_vec()),
            RawDocument::new("strong.docx", docx_with_paragraphs(&["python developer, sql, 4 years"])),
            RawDocument::new("notes.txt", b"python sql".to_vec()),
        ];

        let report = rank_candidates(engine, job, documents).await;

        let ids: Vec<&str> = report.candidates.iter().map(|c| c.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["strong.docx", "weak.docx", "notes.txt"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].candidate_id, "broken.pdf");

        // Unsupported format is scored as empty text, not failed
        let notes = &report.candidates[2];
        assert_eq!(notes.breakdown.required_score, 0.0);
    }

    #[test]
    fn test_candidate_score_flattens_breakdown() {
        let candidate = scored("cv.pdf", 42.0).unwrap();
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["candidate_id"], "cv.pdf");
        assert_eq!(json["final_score"], 42.0);
        assert!(json.get("breakdown").is_none());
    }
}
