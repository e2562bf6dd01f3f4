//! Skill vocabularies and matching against a normalized résumé.

use std::collections::HashSet;

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::scoring::normalize::{normalize, NormalizedText, TextAnalyzer};

/// How a skill phrase is located in the résumé.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMatchMode {
    /// Substring containment on the normalized résumé string. Multi-word
    /// skills match as phrases; "java" also matches inside "javascript".
    #[default]
    Substring,
    /// Every letters-only word of the skill must appear as a whole word in
    /// the case-folded résumé.
    WholeWord,
}

impl std::str::FromStr for SkillMatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(SkillMatchMode::Substring),
            "whole_word" | "whole-word" | "word" => Ok(SkillMatchMode::WholeWord),
            other => Err(format!(
                "unknown skill match mode '{other}' (expected 'substring' or 'whole_word')"
            )),
        }
    }
}

/// An ordered, duplicate-free set of normalized skill strings
/// (lowercase, trimmed, hyphens replaced with spaces).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list such as `"python, sql , ,NLP"`.
    pub fn parse_csv(input: &str) -> Self {
        input.split(',').collect()
    }

    pub fn normalize_skill(raw: &str) -> String {
        raw.to_lowercase()
            .replace('-', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.iter().any(|s| s == skill)
    }

    fn push_normalized(&mut self, raw: &str) {
        let skill = Self::normalize_skill(raw);
        if !skill.is_empty() && !self.contains(&skill) {
            self.0.push(skill);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for raw in iter {
            set.push_normalized(raw.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(raw: Vec<String>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.0
    }
}

/// Partition of a skill vocabulary against one résumé.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub matched: SkillSet,
    pub missing: SkillSet,
}

/// Case-folded letters-only words; every other character separates words.
fn letter_words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_lowercase())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn has_every_word(skill: &str, resume_words: &HashSet<String>) -> bool {
    let words = letter_words(skill);
    !words.is_empty() && words.iter().all(|w| resume_words.contains(w))
}

/// Splits `skills` into matched and missing, preserving vocabulary order.
/// `matched ∪ missing == skills` and the two never overlap.
///
/// `resume_raw` is the résumé before normalization and `resume` its
/// normalized form. In substring mode each skill goes through the same
/// analyzer as the résumé; a skill that normalizes to nothing ("c++", "go")
/// falls back to a whole-word lookup.
pub fn match_skills(
    resume_raw: &str,
    resume: &NormalizedText,
    skills: &SkillSet,
    mode: SkillMatchMode,
    analyzer: &dyn TextAnalyzer,
) -> SkillMatch {
    let resume_words: OnceCell<HashSet<String>> = OnceCell::new();
    let whole_words_present = |skill: &str| {
        has_every_word(skill, resume_words.get_or_init(|| letter_words(resume_raw)))
    };

    let mut result = SkillMatch::default();
    for skill in skills.iter() {
        let found = match mode {
            SkillMatchMode::Substring => {
                let needle = normalize(skill, analyzer);
                if needle.is_empty() {
                    whole_words_present(skill)
                } else {
                    resume.as_str().contains(needle.as_str())
                }
            }
            SkillMatchMode::WholeWord => whole_words_present(skill),
        };
        if found {
            result.matched.0.push(skill.to_string());
        } else {
            result.missing.0.push(skill.to_string());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::normalize::EnglishAnalyzer;

    fn run(resume_text: &str, skills: &str, mode: SkillMatchMode) -> SkillMatch {
        let resume = normalize(resume_text, &EnglishAnalyzer);
        match_skills(
            resume_text,
            &resume,
            &SkillSet::parse_csv(skills),
            mode,
            &EnglishAnalyzer,
        )
    }

    fn names(set: &SkillSet) -> Vec<&str> {
        set.iter().collect()
    }

    #[test]
    fn test_parse_csv_normalizes_and_dedups() {
        let set = SkillSet::parse_csv("Python, sql , ,NLP, python,Machine-Learning");
        assert_eq!(names(&set), vec!["python", "sql", "nlp", "machine learning"]);
    }

    #[test]
    fn test_parse_csv_empty_input() {
        assert!(SkillSet::parse_csv("").is_empty());
        assert!(SkillSet::parse_csv(" , ,").is_empty());
    }

    #[test]
    fn test_serde_round_trips_as_plain_list() {
        let set: SkillSet = serde_json::from_str(r#"["AWS", "aws", "Docker"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["aws","docker"]"#);
    }

    #[test]
    fn test_substring_matches_multi_word_skill() {
        let m = run(
            "Applied machine learning to fraud detection",
            "machine learning, fraud, kafka",
            SkillMatchMode::Substring,
        );
        assert_eq!(names(&m.matched), vec!["machine learning", "fraud"]);
        assert_eq!(names(&m.missing), vec!["kafka"]);
    }

    #[test]
    fn test_substring_matches_skills_written_as_in_resume() {
        let m = run(
            "Built microservices with Keras and Rails",
            "microservices, keras, rails",
            SkillMatchMode::Substring,
        );
        assert_eq!(names(&m.matched), vec!["microservices", "keras", "rails"]);
        assert!(m.missing.is_empty());
    }

    #[test]
    fn test_substring_lemmatizes_skill_like_resume() {
        let m = run(
            "Designed a relational database",
            "databases, data pipelines",
            SkillMatchMode::Substring,
        );
        assert_eq!(names(&m.matched), vec!["databases"]);
        assert_eq!(names(&m.missing), vec!["data pipelines"]);
    }

    #[test]
    fn test_substring_handles_punctuated_skills() {
        let m = run(
            "Built REST APIs in Node.js; systems programming in C++",
            "node.js, c++, f#",
            SkillMatchMode::Substring,
        );
        assert_eq!(names(&m.matched), vec!["node.js", "c++"]);
        assert_eq!(names(&m.missing), vec!["f#"]);
    }

    #[test]
    fn test_substring_false_positive_is_known_limitation() {
        let m = run("Frontend work in JavaScript", "java", SkillMatchMode::Substring);
        assert!(m.matched.contains("java"));
    }

    #[test]
    fn test_whole_word_rejects_partial_word() {
        let m = run(
            "Frontend work in JavaScript",
            "java, javascript",
            SkillMatchMode::WholeWord,
        );
        assert_eq!(names(&m.matched), vec!["javascript"]);
        assert_eq!(names(&m.missing), vec!["java"]);
    }

    #[test]
    fn test_whole_word_matches_short_skills() {
        let m = run(
            "Go and R developer, AI and ML work",
            "go, r, ai, ml, rust",
            SkillMatchMode::WholeWord,
        );
        assert_eq!(names(&m.matched), vec!["go", "r", "ai", "ml"]);
        assert_eq!(names(&m.missing), vec!["rust"]);
    }

    #[test]
    fn test_whole_word_compares_unlemmatized_words() {
        let m = run(
            "Maintained data pipelines and the company website",
            "pipelines, companies",
            SkillMatchMode::WholeWord,
        );
        assert_eq!(names(&m.matched), vec!["pipelines"]);
        assert_eq!(names(&m.missing), vec!["companies"]);
    }

    #[test]
    fn test_whole_word_multi_word_skill_needs_every_word() {
        let m = run(
            "Deep learning research, machine vision",
            "machine learning, computer vision",
            SkillMatchMode::WholeWord,
        );
        assert_eq!(names(&m.matched), vec!["machine learning"]);
        assert_eq!(names(&m.missing), vec!["computer vision"]);
    }

    #[test]
    fn test_partition_property() {
        let text = "Python and SQL developer with Docker experience";
        let skills = SkillSet::parse_csv("python, sql, nlp, docker, aws, rust, c++");
        for mode in [SkillMatchMode::Substring, SkillMatchMode::WholeWord] {
            let m = run(text, "python, sql, nlp, docker, aws, rust, c++", mode);
            assert_eq!(m.matched.len() + m.missing.len(), skills.len());
            for skill in skills.iter() {
                assert!(
                    m.matched.contains(skill) ^ m.missing.contains(skill),
                    "{skill} must be in exactly one side"
                );
            }
        }
    }

    #[test]
    fn test_empty_vocabulary_yields_empty_partition() {
        let m = run("anything at all", "", SkillMatchMode::Substring);
        assert!(m.matched.is_empty());
        assert!(m.missing.is_empty());
    }

    #[test]
    fn test_match_mode_parses_from_str() {
        assert_eq!("substring".parse::<SkillMatchMode>().unwrap(), SkillMatchMode::Substring);
        assert_eq!("Whole_Word".parse::<SkillMatchMode>().unwrap(), SkillMatchMode::WholeWord);
        assert!("fuzzy".parse::<SkillMatchMode>().is_err());
    }
}
