// Screening API: the thin caller around the scoring engine.
// Accepts job configuration and résumé uploads, returns scores and rankings.

pub mod handlers;
pub mod ranking;
pub mod upload;
