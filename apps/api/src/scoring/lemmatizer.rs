//! Rule-based noun lemmatizer.
//!
//! Mirrors dictionary-backed noun lemmatization: irregular plurals come from a
//! table, and a regular plural is only reduced when the singular it would
//! produce is a known noun. Anything else, including unknown technical terms
//! such as "keras" or "microservices", is returned unchanged.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

static IRREGULAR_PLURALS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("people", "person"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("analyses", "analysis"),
        ("bases", "basis"),
        ("crises", "crisis"),
        ("diagnoses", "diagnosis"),
        ("hypotheses", "hypothesis"),
        ("theses", "thesis"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("vertices", "vertex"),
        ("appendices", "appendix"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("curricula", "curriculum"),
        ("leaves", "leaf"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("halves", "half"),
        ("shelves", "shelf"),
    ])
});

/// Singular nouns whose regular plurals may be reduced.
const KNOWN_NOUNS: &[&str] = &[
    "ability", "account", "achievement", "activity", "agent", "alert", "algorithm", "analyst",
    "api", "application", "approach", "architect", "article", "asset", "award", "backend",
    "batch", "benchmark", "branch", "budget", "bug", "business", "campaign", "candidate",
    "capability", "category", "certificate", "certification", "challenge", "change", "channel",
    "class", "client", "cloud", "cluster", "colleague", "community", "company", "component",
    "conference", "container", "contract", "contributor", "cost", "country", "course",
    "customer", "dashboard", "dash", "database", "dataset", "day", "deadline", "decision",
    "degree", "deliverable", "delivery", "department", "dependency", "deployment", "design",
    "developer", "device", "document", "employee", "endpoint", "engineer", "entry",
    "environment", "event", "experiment", "facility", "feature", "file", "fix", "framework",
    "function", "goal", "grade", "guideline", "hire", "hobby", "hour", "idea", "improvement",
    "incident", "industry", "initiative", "insight", "instance", "integration", "interest",
    "interface", "intern", "interview", "inventory", "invoice", "issue", "item", "job",
    "journal", "kpi", "label", "language", "lead", "library", "line", "location", "log",
    "manager", "market", "match", "member", "method", "metric", "milestone", "model", "module",
    "month", "network", "node", "objective", "office", "operation", "opportunity", "order",
    "organization", "page", "paper", "partner", "patch", "patent", "pattern", "payment", "peer",
    "pipeline", "platform", "policy", "practice", "prediction", "presentation", "priority",
    "problem", "procedure", "process", "product", "program", "project", "protocol",
    "publication", "quality", "query", "question", "record", "reference", "region", "release",
    "report", "repository", "request", "requirement", "resource", "response", "responsibility",
    "result", "review", "risk", "role", "sale", "scenario", "schema", "script", "search",
    "server", "service", "skill", "solution", "specification", "sprint", "stakeholder",
    "standard", "step", "store", "story", "strategy", "structure", "student", "study",
    "summary", "survey", "system", "table", "task", "tax", "team", "technology", "test",
    "ticket", "tie", "tool", "transaction", "unit", "university", "update", "user", "utility",
    "vendor", "version", "week", "workflow", "workshop", "year",
];

static KNOWN_NOUN_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| KNOWN_NOUNS.iter().copied().collect());

/// Plural suffix and the ending that replaces it, tried in order.
const PLURAL_RULES: &[(&str, &str)] = &[("ies", "y"), ("es", ""), ("s", "")];

pub fn lemmatize_noun(token: &str) -> String {
    if let Some(lemma) = IRREGULAR_PLURALS.get(token) {
        return (*lemma).to_string();
    }
    if token.len() <= 3 || KNOWN_NOUN_SET.contains(token) {
        return token.to_string();
    }

    PLURAL_RULES
        .iter()
        .filter_map(|(suffix, ending)| {
            token
                .strip_suffix(suffix)
                .map(|stem| format!("{stem}{ending}"))
        })
        .find(|candidate| KNOWN_NOUN_SET.contains(candidate.as_str()))
        .unwrap_or_else(|| token.to_string())
}
