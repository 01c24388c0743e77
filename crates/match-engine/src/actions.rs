//! Tailoring recommendations derived from category scores and JD signals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::categories::{Category, CategoryScore};

const GOOD_FIT_THRESHOLD: f64 = 70.0;
const MAX_NICE_TO_HAVE_SUGGESTIONS: usize = 3;
const MAX_ATS_KEYWORDS: usize = 5;

/// Categories that earn a good-fit line, with the line they earn.
const GOOD_FIT_LINES: [(Category, &str); 3] = [
    (Category::KeywordSkills, "Strong keyword and skills alignment"),
    (Category::ExperienceRelevance, "Relevant professional experience"),
    (Category::RoleMatch, "Matching role background"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actions {
    pub good_fit_summary: Vec<String>,
    pub gaps: Vec<String>,
    pub resume_tailoring_suggestions: Vec<String>,
    pub ats_keywords_to_add: Vec<String>,
}

pub fn generate_actions(
    resume_text: &str,
    must_haves: &[String],
    nice_to_haves: &[String],
    scores: &BTreeMap<Category, CategoryScore>,
) -> Actions {
    let resume_lower = resume_text.to_lowercase();
    let absent = |terms: &[String]| -> Vec<String> {
        terms
            .iter()
            .filter(|kw| !resume_lower.contains(&kw.to_lowercase()))
            .cloned()
            .collect()
    };

    let good_fit_summary = GOOD_FIT_LINES
        .iter()
        .filter(|(category, _)| {
            scores
                .get(category)
                .is_some_and(|s| s.score >= GOOD_FIT_THRESHOLD)
        })
        .map(|(_, line)| line.to_string())
        .collect();

    let missing_must = absent(must_haves);
    let gaps = missing_must
        .iter()
        .map(|kw| format!("Missing required skill: {kw}"))
        .collect();

    let mut resume_tailoring_suggestions = Vec::new();
    let missing_nice = absent(nice_to_haves);
    if !missing_nice.is_empty() {
        let listed: Vec<&str> = missing_nice
            .iter()
            .take(MAX_NICE_TO_HAVE_SUGGESTIONS)
            .map(String::as_str)
            .collect();
        resume_tailoring_suggestions.push(format!(
            "Add nice-to-have skills if applicable: {}",
            listed.join(", ")
        ));
    }

    let below_required_years = scores
        .get(&Category::SeniorityMatch)
        .and_then(CategoryScore::seniority_gap)
        .is_some_and(|gap| gap < 0.0);
    if below_required_years {
        resume_tailoring_suggestions
            .push("Highlight achievements to demonstrate advanced capability".to_string());
    }

    let ats_keywords_to_add = missing_must.into_iter().take(MAX_ATS_KEYWORDS).collect();

    Actions {
        good_fit_summary,
        gaps,
        resume_tailoring_suggestions,
        ats_keywords_to_add,
    }
}
