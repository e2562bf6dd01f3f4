use std::str::FromStr;

use anyhow::{Context, Result};

use crate::scoring::engine::{KeywordStuffingRule, ShortResumeRule};
use crate::scoring::{ScoringConfig, SkillMatchMode};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub scoring: ScoringConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mut scoring = ScoringConfig::default();

        if let Some(ceiling) = optional_env::<f64>("ATS_SCORE_CEILING")? {
            scoring.ceiling = ceiling;
        }
        if let Ok(floor) = std::env::var("ATS_SCORE_FLOOR") {
            scoring.floor = parse_floor(&floor)?;
        }
        if let Some(mode) = optional_env::<SkillMatchMode>("ATS_SKILL_MATCH")? {
            scoring.skill_match = mode;
        }

        let stuffing_threshold =
            optional_env::<usize>("ATS_STUFFING_THRESHOLD")?.unwrap_or(15);
        scoring.penalties.keyword_stuffing = match std::env::var("ATS_STUFFING_KEYWORD") {
            Ok(keyword) if keyword.trim().is_empty() => None,
            Ok(keyword) => Some(KeywordStuffingRule {
                keyword: keyword.trim().to_lowercase(),
                max_occurrences: stuffing_threshold,
                points: 5.0,
            }),
            Err(_) => scoring.penalties.keyword_stuffing.take().map(|rule| KeywordStuffingRule {
                max_occurrences: stuffing_threshold,
                ..rule
            }),
        };

        if let Some(min_words) = optional_env::<usize>("ATS_MIN_WORD_COUNT")? {
            scoring.penalties.short_resume = (min_words > 0).then_some(ShortResumeRule {
                min_words,
                points: 5.0,
            });
        }

        let max_upload_mb = optional_env::<usize>("ATS_MAX_UPLOAD_MB")?.unwrap_or(20);

        Ok(Config {
            port: optional_env::<u16>("PORT")
                .context("PORT must be a valid port number")?
                .unwrap_or(8080),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            scoring,
        })
    }
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(None),
    }
}

/// "none" (or empty) disables the floor.
fn parse_floor(raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .with_context(|| format!("ATS_SCORE_FLOOR must be a number or 'none', got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_floor_accepts_none() {
        assert_eq!(parse_floor("none").unwrap(), None);
        assert_eq!(parse_floor("  ").unwrap(), None);
        assert_eq!(parse_floor("NONE").unwrap(), None);
    }

    #[test]
    fn test_parse_floor_number() {
        assert_eq!(parse_floor("0").unwrap(), Some(0.0));
        assert_eq!(parse_floor("-10.5").unwrap(), Some(-10.5));
    }

    #[test]
    fn test_parse_floor_rejects_garbage() {
        let err = parse_floor("low").unwrap_err();
        assert!(err.to_string().contains("ATS_SCORE_FLOOR"));
    }

    #[test]
    fn test_optional_env_missing_is_none() {
        let value = optional_env::<f64>("ATS_TEST_SURELY_UNSET_VARIABLE").unwrap();
        assert!(value.is_none());
    }
}
