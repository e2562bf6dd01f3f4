use axum::extract::Multipart;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::RawDocument;
use crate::scoring::{JobProfile, SkillSet};

/// Job configuration plus the résumé files from one multipart form.
pub struct ScreeningForm {
    pub job: JobProfile,
    pub documents: Vec<RawDocument>,
}

/// Skill lists arrive either as a JSON array or as one comma-separated string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillListInput {
    List(Vec<String>),
    Csv(String),
}

impl Default for SkillListInput {
    fn default() -> Self {
        SkillListInput::List(Vec::new())
    }
}

impl From<SkillListInput> for SkillSet {
    fn from(input: SkillListInput) -> Self {
        match input {
            SkillListInput::List(items) => items.into_iter().collect(),
            SkillListInput::Csv(raw) => SkillSet::parse_csv(&raw),
        }
    }
}

/// Minimum experience must be a finite, non-negative number of years.
pub fn validate_min_experience(years: f64) -> Result<f64, AppError> {
    if !years.is_finite() || years < 0.0 {
        return Err(AppError::Validation(format!(
            "min_experience_years must be a non-negative number, got {years}"
        )));
    }
    Ok(years)
}

fn parse_min_experience(raw: &str) -> Result<f64, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let years = trimmed.parse::<f64>().map_err(|_| {
        AppError::Validation(format!(
            "min_experience_years must be a number, got '{trimmed}'"
        ))
    })?;
    validate_min_experience(years)
}

/// Parses a multipart screening form. Résumés come from one or more `resume`
/// file fields; unknown fields are ignored.
pub async fn parse_screening_form(mut multipart: Multipart) -> Result<ScreeningForm, AppError> {
    let mut job = JobProfile::default();
    let mut documents = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "resume" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|f| !f.trim().is_empty())
                    .unwrap_or_else(|| format!("resume-{}", documents.len() + 1));
                let data = field.bytes().await?;
                documents.push(RawDocument::new(filename, data));
            }
            "job_text" => job.job_text = field.text().await?,
            "required_skills" => job.required = SkillSet::parse_csv(&field.text().await?),
            "optional_skills" => job.optional = SkillSet::parse_csv(&field.text().await?),
            "min_experience_years" => {
                job.min_experience_years = parse_min_experience(&field.text().await?)?;
            }
            _ => {
                // Drain unknown fields
                field.bytes().await?;
            }
        }
    }

    Ok(ScreeningForm { job, documents })
}
