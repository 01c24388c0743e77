//! Aggregation: runs the extractors and scorers and assembles the result.

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::actions::generate_actions;
use crate::categories::{Category, CategoryScore, ScoringContext};
use crate::model::{
    AnalysisResult, KeywordCategory, KeywordMatch, MatchLabel, Metadata, SettingsUsed,
};
use crate::red_flags::detect_red_flags;
use crate::resume::ResumeProfile;
use crate::signals::JobSignals;
use crate::text::{snippet, SNIPPET_CONTEXT_WORDS};
use crate::weights::Weights;

/// Points taken off the overall score in strict mode when any red flag fired.
pub const STRICT_MODE_PENALTY: f64 = 20.0;

/// Per-call settings. Both fields are optional when deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub weights: Weights,
    pub strict_mode: bool,
}

/// Immutable scoring configuration, shareable across threads.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: AnalysisConfig,
    reference_year: Option<i32>,
}

impl ScoringEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            reference_year: None,
        }
    }

    /// Pins the year recency and open-ended roles are measured against.
    /// Without it the current UTC year is used.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn analyze(&self, resume_text: &str, jd_text: &str) -> AnalysisResult {
        let reference_year = self.reference_year.unwrap_or_else(|| Utc::now().year());

        let signals = JobSignals::extract(jd_text);
        let profile = ResumeProfile::extract(resume_text, reference_year);

        let red_flags: Vec<String> =
            detect_red_flags(resume_text, &profile.experiences, &signals.must_have)
                .iter()
                .map(ToString::to_string)
                .collect();

        let ctx = ScoringContext {
            resume_text,
            jd_text,
            signals: &signals,
            profile: &profile,
            red_flags: &red_flags,
        };
        let categories: BTreeMap<Category, CategoryScore> = Category::ALL
            .into_iter()
            .map(|category| (category, category.score(&ctx)))
            .collect();

        let mut overall_score = self.weighted_score(&categories);
        if self.config.strict_mode && !red_flags.is_empty() {
            overall_score = (overall_score - STRICT_MODE_PENALTY).max(0.0);
        }
        let label = MatchLabel::from_score(overall_score);

        let actions = generate_actions(
            resume_text,
            &signals.must_have,
            &signals.nice_to_have,
            &categories,
        );

        let must_have = keyword_matches(resume_text, &signals.must_have, KeywordCategory::MustHave);
        let nice_to_have =
            keyword_matches(resume_text, &signals.nice_to_have, KeywordCategory::NiceToHave);

        tracing::debug!(
            overall_score,
            %label,
            must_haves = must_have.len(),
            nice_to_haves = nice_to_have.len(),
            experiences = profile.experiences.len(),
            red_flags = red_flags.len(),
            "analysis complete"
        );

        AnalysisResult {
            overall_score,
            label,
            categories,
            must_have,
            nice_to_have,
            red_flags,
            actions,
            metadata: Metadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: Utc::now(),
                settings_used: SettingsUsed {
                    strict_mode: self.config.strict_mode,
                    weights: self.config.weights.clone(),
                },
            },
        }
    }

    /// Weighted sum rounded to one decimal, kept within 0..=100.
    fn weighted_score(&self, categories: &BTreeMap<Category, CategoryScore>) -> f64 {
        let total: f64 = categories
            .iter()
            .map(|(category, score)| self.config.weights.get(*category) * score.score)
            .sum();
        let rounded = (total * 10.0).round() / 10.0;
        if rounded.is_finite() {
            rounded.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// One-shot analysis with the given configuration.
pub fn analyze(resume_text: &str, jd_text: &str, config: &AnalysisConfig) -> AnalysisResult {
    ScoringEngine::new(config.clone()).analyze(resume_text, jd_text)
}

fn keyword_matches(
    resume_text: &str,
    terms: &[String],
    category: KeywordCategory,
) -> Vec<KeywordMatch> {
    let resume_lower = resume_text.to_lowercase();
    terms
        .iter()
        .map(|term| {
            let matched = resume_lower.contains(&term.to_lowercase());
            let evidence = if matched {
                snippet(resume_text, term, SNIPPET_CONTEXT_WORDS)
            } else {
                String::new()
            };
            KeywordMatch {
                term: term.clone(),
                matched,
                evidence,
                category,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{SAMPLE_JD, SAMPLE_RESUME, SAMPLE_YEAR};
    use proptest::prelude::*;

    const SCENARIO_JD: &str =
        "Senior Data Engineer\nMust have 5+ years. Required: Python and Spark. Preferred: AWS.";
    const SCENARIO_RESUME: &str = "PROFESSIONAL EXPERIENCE\n\
        Senior Data Engineer, 2018–2024, Python and Spark pipelines\n\
        Built batch and streaming jobs on AWS.\n\
        \n\
        EDUCATION\n\
        Bachelor of Science in Computer Science";

    fn engine(strict_mode: bool) -> ScoringEngine {
        ScoringEngine::new(AnalysisConfig {
            strict_mode,
            ..AnalysisConfig::default()
        })
        .with_reference_year(SAMPLE_YEAR)
    }

    fn score_of(result: &AnalysisResult, category: Category) -> f64 {
        result.category(category).map(|s| s.score).unwrap_or(-1.0)
    }

    #[test]
    fn test_scenario_senior_data_engineer() {
        let result = engine(false).analyze(SCENARIO_RESUME, SCENARIO_JD);

        assert!(score_of(&result, Category::RoleMatch) >= 90.0);
        assert!(result.matched_must_haves() >= 2);
        assert!(result.overall_score >= 60.0);
        assert!(matches!(
            result.label,
            MatchLabel::StrongMatch | MatchLabel::MediumMatch
        ));
    }

    #[test]
    fn test_sample_resume_against_sample_jd() {
        let result = engine(false).analyze(SAMPLE_RESUME, SAMPLE_JD);

        assert_eq!(result.categories.len(), 8);
        assert_eq!(score_of(&result, Category::RoleMatch), 95.0);
        assert_eq!(score_of(&result, Category::SeniorityMatch), 94.0);
        assert_eq!(score_of(&result, Category::EducationMatch), 100.0);
        assert_eq!(score_of(&result, Category::RecencyMatch), 50.0);
        assert!(result.red_flags.is_empty());
        assert_eq!(score_of(&result, Category::RedFlags), 100.0);
        assert!(result.overall_score >= 60.0 && result.overall_score <= 85.0);
        assert!(result.actions.gaps.is_empty());
        assert!(result
            .actions
            .good_fit_summary
            .contains(&"Matching role background".to_string()));
    }

    #[test]
    fn test_keyword_matches_carry_snippets() {
        let result = engine(false).analyze(SAMPLE_RESUME, SAMPLE_JD);
        let python = result
            .must_have
            .iter()
            .find(|k| k.term == "python")
            .expect("python is a must-have");
        assert!(python.matched);
        assert!(python.evidence.starts_with("..."));
        assert_eq!(python.category, KeywordCategory::MustHave);

        let gcp = result
            .nice_to_have
            .iter()
            .find(|k| k.term == "gcp")
            .expect("gcp is a nice-to-have");
        assert!(!gcp.matched);
        assert!(gcp.evidence.is_empty());
    }

    #[test]
    fn test_empty_resume_is_a_valid_weak_match() {
        let result = engine(false).analyze("", "Senior Engineer\nRequired: Python");
        assert!(result.overall_score >= 0.0);
        assert_eq!(result.label, MatchLabel::WeakMatch);
        assert_eq!(score_of(&result, Category::ExperienceRelevance), 0.0);
        assert_eq!(score_of(&result, Category::RoleMatch), 20.0);
        assert!(!result.red_flags.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let result = engine(true).analyze("", "");
        assert_eq!(result.categories.len(), 8);
        assert!(result.must_have.is_empty());
        assert!((0.0..=100.0).contains(&result.overall_score));
    }

    #[test]
    fn test_strict_mode_penalty() {
        let resume = "EXPERIENCE\nDeveloper, 2019 - 2020\nJava";
        let jd = "Developer\nRequired: Python and Kafka";
        let lenient = engine(false).analyze(resume, jd);
        let strict = engine(true).analyze(resume, jd);
        assert!(!lenient.red_flags.is_empty());
        let expected = (lenient.overall_score - STRICT_MODE_PENALTY).max(0.0);
        assert!((strict.overall_score - expected).abs() < 1e-9);
        assert!(strict.metadata.settings_used.strict_mode);
    }

    #[test]
    fn test_custom_weights_are_applied() {
        let weights = Weights::from_keys([("role_match", 1.0)]).unwrap();
        let config = AnalysisConfig {
            weights: weights.clone(),
            strict_mode: false,
        };
        let result = ScoringEngine::new(config)
            .with_reference_year(SAMPLE_YEAR)
            .analyze(SCENARIO_RESUME, SCENARIO_JD);
        assert_eq!(result.overall_score, 95.0);
        assert_eq!(result.metadata.settings_used.weights, weights);
    }

    #[test]
    fn test_oversized_weights_are_clamped() {
        let weights = Weights::from_keys([("red_flags", 5.0)]).unwrap();
        let config = AnalysisConfig {
            weights,
            strict_mode: false,
        };
        let result = ScoringEngine::new(config)
            .with_reference_year(SAMPLE_YEAR)
            .analyze(SAMPLE_RESUME, SAMPLE_JD);
        assert_eq!(result.overall_score, 100.0);
    }

    #[test]
    fn test_free_function_matches_engine() {
        let config = AnalysisConfig::default();
        let result = analyze(SCENARIO_RESUME, SCENARIO_JD, &config);
        assert_eq!(result.metadata.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(result.metadata.settings_used.weights, Weights::default());
        assert!(!result.metadata.settings_used.strict_mode);
    }

    #[test]
    fn test_result_serializes_with_contract_field_names() {
        let result = engine(false).analyze(SCENARIO_RESUME, SCENARIO_JD);
        let json = serde_json::to_value(&result).unwrap();
        for field in [
            "overall_score",
            "label",
            "categories",
            "must_have",
            "nice_to_have",
            "red_flags",
            "actions",
            "metadata",
        ] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
        let keys: Vec<&String> = json["categories"].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 8);
        assert!(json["categories"]["keyword_skills"]["score"].is_number());
        assert!(json["metadata"]["settings_used"]["weights"]["red_flags"].is_number());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"strict_mode": true}"#).unwrap();
        assert!(config.strict_mode);
        assert_eq!(config.weights, Weights::default());

        let empty: AnalysisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, AnalysisConfig::default());
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScoringEngine>();
    }

    const LINES: &[&str] = &[
        "Senior Data Engineer",
        "Must have 5+ years of Python",
        "Required: Spark, Kafka and SQL",
        "Preferred: AWS or GCP",
        "3-5 years of experience",
        "Bachelor's degree required",
        "PROFESSIONAL EXPERIENCE",
        "Data Engineer, 2019 - 2021, ETL with Airflow",
        "Analyst, 2015 - 2015",
        "Intern, 2014 - 2014",
        "Developer (2008 - Present)",
        "Familiar with Docker, basic Kubernetes",
        "EDUCATION",
        "Master of Science, 2012",
        "SKILLS",
        "",
    ];

    fn document() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::collection::vec(prop::sample::select(LINES), 0..12).prop_map(|l| l.join("\n")),
            "[A-Za-z0-9 ,.:+()\"\n-]{0,200}",
        ]
    }

    proptest! {
        #[test]
        fn prop_scores_stay_in_bounds(resume in document(), jd in document(), strict in any::<bool>()) {
            let result = engine(strict).analyze(&resume, &jd);
            prop_assert!((0.0..=100.0).contains(&result.overall_score));
            prop_assert_eq!(result.categories.len(), 8);
            for score in result.categories.values() {
                prop_assert!((0.0..=100.0).contains(&score.score));
            }
            prop_assert_eq!(result.label, MatchLabel::from_score(result.overall_score));
        }

        #[test]
        fn prop_analysis_is_deterministic(resume in document(), jd in document()) {
            let first = engine(false).analyze(&resume, &jd);
            let second = engine(false).analyze(&resume, &jd);
            prop_assert_eq!(first.overall_score, second.overall_score);
            prop_assert_eq!(first.label, second.label);
            prop_assert_eq!(first.categories, second.categories);
        }

        #[test]
        fn prop_strict_mode_never_raises_the_score(resume in document(), jd in document()) {
            let lenient = engine(false).analyze(&resume, &jd);
            let strict = engine(true).analyze(&resume, &jd);
            prop_assert!(strict.overall_score <= lenient.overall_score);
            if lenient.red_flags.is_empty() {
                prop_assert_eq!(strict.overall_score, lenient.overall_score);
            }
        }
    }
}
