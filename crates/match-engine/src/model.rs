//! Output records of an analysis. Plain values, owned by the caller.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actions::Actions;
use crate::categories::{Category, CategoryScore};
use crate::weights::Weights;

/// Degree and certification vocabulary shared by JD requirements and resume
/// education entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeKind {
    Bachelor,
    Master,
    Phd,
    Certificate,
    Certification,
    Degree,
}

impl DegreeKind {
    pub const ALL: [DegreeKind; 6] = [
        DegreeKind::Bachelor,
        DegreeKind::Master,
        DegreeKind::Phd,
        DegreeKind::Certificate,
        DegreeKind::Certification,
        DegreeKind::Degree,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DegreeKind::Bachelor => "bachelor",
            DegreeKind::Master => "master",
            DegreeKind::Phd => "phd",
            DegreeKind::Certificate => "certificate",
            DegreeKind::Certification => "certification",
            DegreeKind::Degree => "degree",
        }
    }

    /// Every kind whose word occurs as a substring of already-lowercased text.
    pub fn found_in(lowercase_text: &str) -> Vec<DegreeKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| lowercase_text.contains(kind.as_str()))
            .collect()
    }
}

impl fmt::Display for DegreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordCategory {
    #[serde(rename = "must-have")]
    MustHave,
    #[serde(rename = "nice-to-have")]
    NiceToHave,
}

/// Whether one extracted JD keyword appears in the resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub term: String,
    pub matched: bool,
    /// Context snippet from the resume; empty when unmatched.
    pub evidence: String,
    pub category: KeywordCategory,
}

/// Qualitative label derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchLabel {
    StrongMatch,
    MediumMatch,
    WeakMatch,
}

impl MatchLabel {
    pub const STRONG_THRESHOLD: f64 = 75.0;
    pub const MEDIUM_THRESHOLD: f64 = 50.0;

    /// Thresholds are inclusive on the lower bound.
    pub fn from_score(overall_score: f64) -> Self {
        if overall_score >= Self::STRONG_THRESHOLD {
            MatchLabel::StrongMatch
        } else if overall_score >= Self::MEDIUM_THRESHOLD {
            MatchLabel::MediumMatch
        } else {
            MatchLabel::WeakMatch
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchLabel::StrongMatch => "STRONG_MATCH",
            MatchLabel::MediumMatch => "MEDIUM_MATCH",
            MatchLabel::WeakMatch => "WEAK_MATCH",
        }
    }
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsUsed {
    pub strict_mode: bool,
    pub weights: Weights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub settings_used: SettingsUsed,
}

/// Complete result of one resume / job-description analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: f64,
    pub label: MatchLabel,
    /// Exactly one score per [`Category`], in presentation order.
    pub categories: BTreeMap<Category, CategoryScore>,
    pub must_have: Vec<KeywordMatch>,
    pub nice_to_have: Vec<KeywordMatch>,
    pub red_flags: Vec<String>,
    pub actions: Actions,
    pub metadata: Metadata,
}

impl AnalysisResult {
    pub fn category(&self, category: Category) -> Option<&CategoryScore> {
        self.categories.get(&category)
    }

    pub fn matched_must_haves(&self) -> usize {
        self.must_have.iter().filter(|k| k.matched).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_boundaries_are_inclusive() {
        assert_eq!(MatchLabel::from_score(75.0), MatchLabel::StrongMatch);
        assert_eq!(MatchLabel::from_score(50.0), MatchLabel::MediumMatch);
        assert_eq!(MatchLabel::from_score(49.999), MatchLabel::WeakMatch);
        assert_eq!(MatchLabel::from_score(85.0), MatchLabel::StrongMatch);
        assert_eq!(MatchLabel::from_score(60.0), MatchLabel::MediumMatch);
        assert_eq!(MatchLabel::from_score(0.0), MatchLabel::WeakMatch);
    }

    #[test]
    fn test_label_serializes_screaming_snake() {
        let json = serde_json::to_string(&MatchLabel::StrongMatch).unwrap();
        assert_eq!(json, r#""STRONG_MATCH""#);
        let label: MatchLabel = serde_json::from_str(r#""WEAK_MATCH""#).unwrap();
        assert_eq!(label, MatchLabel::WeakMatch);
    }

    #[test]
    fn test_keyword_category_serde_names() {
        let json = serde_json::to_string(&KeywordCategory::NiceToHave).unwrap();
        assert_eq!(json, r#""nice-to-have""#);
        let category: KeywordCategory = serde_json::from_str(r#""must-have""#).unwrap();
        assert_eq!(category, KeywordCategory::MustHave);
    }

    #[test]
    fn test_degree_kind_found_in() {
        let kinds = DegreeKind::found_in("phd in physics, aws certification");
        assert_eq!(kinds, vec![DegreeKind::Phd, DegreeKind::Certification]);
        assert!(DegreeKind::found_in("").is_empty());
    }
}
