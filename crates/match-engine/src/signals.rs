//! Job-description signal extraction.
//!
//! Turns raw JD text into [`JobSignals`]: must-have and nice-to-have terms,
//! required years, degree requirements, role keywords and the target role.
//! Must-have and nice-to-have lines are recognized by marker phrases, so the
//! JD is scanned line by line.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::{self, MUST_HAVE_MARKERS, NICE_TO_HAVE_MARKERS, ROLE_KEYWORDS};
use crate::model::DegreeKind;
use crate::text::{normalize, normalize_lines};

static ACRONYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{2,}\b").unwrap());
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());
static YEARS_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*[-–]\s*(\d+)\s*years?").unwrap());
static YEARS_SINGLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\+?\s*years?").unwrap());

/// Structured requirement signals extracted from a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSignals {
    pub must_have: Vec<String>,
    pub nice_to_have: Vec<String>,
    pub years_required: Option<u32>,
    pub degrees: Vec<DegreeKind>,
    pub role_keywords: Vec<String>,
    pub target_role: String,
}

impl JobSignals {
    pub fn extract(jd_text: &str) -> Self {
        Self {
            must_have: extract_must_haves(jd_text),
            nice_to_have: extract_nice_to_haves(jd_text),
            years_required: extract_years_required(jd_text),
            degrees: extract_degree_requirements(jd_text),
            role_keywords: extract_role_keywords(jd_text),
            target_role: target_role(jd_text),
        }
    }
}

/// Ordered set: keeps the first occurrence of every term.
#[derive(Default)]
struct TermSet {
    seen: HashSet<String>,
    terms: Vec<String>,
}

impl TermSet {
    fn insert(&mut self, term: String) {
        if self.seen.insert(term.clone()) {
            self.terms.push(term);
        }
    }

    fn extend(&mut self, terms: impl IntoIterator<Item = String>) {
        for term in terms {
            self.insert(term);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.terms
    }
}

fn has_marker(normalized_line: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| normalized_line.contains(marker))
}

/// Terms from every JD line carrying a must-have marker, plus quoted phrases.
pub fn extract_must_haves(jd_text: &str) -> Vec<String> {
    let mut must_haves = TermSet::default();
    for (line, normalized) in jd_text.lines().zip(normalize_lines(jd_text)) {
        if !has_marker(&normalized, MUST_HAVE_MARKERS) {
            continue;
        }
        must_haves.extend(extract_tech_terms(line));
        must_haves.extend(
            QUOTED
                .captures_iter(&normalized)
                .map(|caps| caps[1].to_string()),
        );
    }
    must_haves.into_vec()
}

/// Terms from every JD line carrying a nice-to-have marker. No quote capture.
pub fn extract_nice_to_haves(jd_text: &str) -> Vec<String> {
    let mut nice_to_haves = TermSet::default();
    for (line, normalized) in jd_text.lines().zip(normalize_lines(jd_text)) {
        if has_marker(&normalized, NICE_TO_HAVE_MARKERS) {
            nice_to_haves.extend(extract_tech_terms(line));
        }
    }
    nice_to_haves.into_vec()
}

/// Lexicon terms found as substrings, then every uppercase acronym token
/// (lowercased). Shouted words such as `REQUIRED` count as acronyms too.
pub fn extract_tech_terms(text: &str) -> Vec<String> {
    let mut terms = TermSet::default();
    let lower = text.to_lowercase();
    terms.extend(lexicon::tech_terms_in(&lower).into_iter().map(String::from));
    terms.extend(
        ACRONYM
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase()),
    );
    terms.into_vec()
}

/// Years of experience asked for. A range yields its lower bound; ranges are
/// tried before single values.
pub fn extract_years_required(jd_text: &str) -> Option<u32> {
    let normalized = normalize(jd_text);
    if let Some(years) = YEARS_RANGE
        .captures(&normalized)
        .and_then(|caps| caps[1].parse().ok())
    {
        return Some(years);
    }
    YEARS_SINGLE
        .captures(&normalized)
        .and_then(|caps| caps[1].parse().ok())
}

pub fn extract_degree_requirements(jd_text: &str) -> Vec<DegreeKind> {
    DegreeKind::found_in(&normalize(jd_text))
}

pub fn extract_role_keywords(jd_text: &str) -> Vec<String> {
    let normalized = normalize(jd_text);
    ROLE_KEYWORDS
        .iter()
        .filter(|role| normalized.contains(*role))
        .map(|role| role.to_string())
        .collect()
}

/// The role the JD is hiring for: its first line, lowercased.
///
/// This depends on JD formatting. Scorers go through this helper only, so a
/// better heuristic can replace it without touching them.
pub fn target_role(jd_text: &str) -> String {
    jd_text
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}
