//! The eight match categories and their scorers.
//!
//! Each category is a variant of [`Category`]; `Category::score` dispatches to
//! one scoring function with the uniform contract
//! `(&ScoringContext) -> CategoryScore`. Scores are always within 0..=100.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexicon::{self, ADJACENT_ROLE_KEYWORDS};
use crate::model::DegreeKind;
use crate::resume::{EducationRecord, ResumeProfile, WorkExperience};
use crate::signals::JobSignals;
use crate::text::{snippet, SNIPPET_CONTEXT_WORDS};

/// Roles that ended this many years ago or less count as recent.
pub const RECENT_YEARS: i32 = 3;
const MID_RECENCY_YEARS: i32 = 7;

const MUST_HAVE_SHARE: f64 = 70.0;
const NICE_TO_HAVE_SHARE: f64 = 30.0;

const EXACT_ROLE_SCORE: f64 = 95.0;
const ADJACENT_ROLE_SCORE: f64 = 70.0;
const NO_ROLE_SCORE: f64 = 20.0;

const NEUTRAL_SCORE: f64 = 50.0;
const NO_DEGREE_REQUIREMENT_SCORE: f64 = 75.0;
const MISSING_EDUCATION_SCORE: f64 = 30.0;

const RED_FLAG_PENALTY: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    KeywordSkills,
    ExperienceRelevance,
    RoleMatch,
    SeniorityMatch,
    EducationMatch,
    ToolingStackMatch,
    RecencyMatch,
    RedFlags,
}

impl Category {
    /// Presentation order.
    pub const ALL: [Category; 8] = [
        Category::KeywordSkills,
        Category::ExperienceRelevance,
        Category::RoleMatch,
        Category::SeniorityMatch,
        Category::EducationMatch,
        Category::ToolingStackMatch,
        Category::RecencyMatch,
        Category::RedFlags,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::KeywordSkills => "keyword_skills",
            Category::ExperienceRelevance => "experience_relevance",
            Category::RoleMatch => "role_match",
            Category::SeniorityMatch => "seniority_match",
            Category::EducationMatch => "education_match",
            Category::ToolingStackMatch => "tooling_stack_match",
            Category::RecencyMatch => "recency_match",
            Category::RedFlags => "red_flags",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }

    /// Heading used by rendered reports.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::KeywordSkills => "A) Keyword & Skills Match",
            Category::ExperienceRelevance => "B) Experience Relevance Match",
            Category::RoleMatch => "C) Role/Title Match",
            Category::SeniorityMatch => "D) Seniority/Years Match",
            Category::EducationMatch => "E) Education/Certs Match",
            Category::ToolingStackMatch => "F) Tooling/Stack Match",
            Category::RecencyMatch => "G) Recency Match",
            Category::RedFlags => "H) Red Flag Detection",
        }
    }

    pub fn score(self, ctx: &ScoringContext<'_>) -> CategoryScore {
        match self {
            Category::KeywordSkills => score_keyword_skills(
                ctx.resume_text,
                &ctx.signals.must_have,
                &ctx.signals.nice_to_have,
            ),
            Category::ExperienceRelevance => {
                score_experience_relevance(&ctx.profile.experiences, &ctx.signals.role_keywords)
            }
            Category::RoleMatch => {
                score_role_match(&ctx.profile.experiences, &ctx.signals.target_role)
            }
            Category::SeniorityMatch => {
                score_seniority_match(ctx.profile.total_years, ctx.signals.years_required)
            }
            Category::EducationMatch => {
                score_education_match(&ctx.profile.education, &ctx.signals.degrees)
            }
            Category::ToolingStackMatch => score_tooling_stack_match(ctx.resume_text, ctx.jd_text),
            Category::RecencyMatch => score_recency_match(&ctx.profile.experiences),
            Category::RedFlags => score_red_flags(ctx.red_flags),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Structured facts every scorer may read.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub resume_text: &'a str,
    pub jd_text: &'a str,
    pub signals: &'a JobSignals,
    pub profile: &'a ResumeProfile,
    pub red_flags: &'a [String],
}

/// Category-specific diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryDetails {
    KeywordSkills {
        matched_must: usize,
        total_must: usize,
        matched_nice: usize,
        total_nice: usize,
    },
    ExperienceRelevance {
        experience_count: usize,
        relevant_experiences: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    RoleMatch {
        resume_roles: Vec<String>,
        target_role: String,
    },
    SeniorityMatch {
        resume_years: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required_years: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gap: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        warning: Option<String>,
    },
    EducationMatch {
        required_degrees: Vec<DegreeKind>,
        found_degrees: Vec<DegreeKind>,
        no_requirement: bool,
        missing_education: bool,
    },
    ToolingStackMatch {
        matched_tools: usize,
        required_tools: usize,
        no_tools_in_jd: bool,
    },
    RecencyMatch {
        recent_experience_count: usize,
        no_experience: bool,
    },
    RedFlags {
        flags_count: usize,
    },
}

/// One category's score with its supporting evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: f64,
    pub details: CategoryDetails,
    pub evidence: Vec<String>,
}

impl CategoryScore {
    /// Clamps `score` into 0..=100.
    pub fn new(score: f64, details: CategoryDetails, evidence: Vec<String>) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 100.0)
        };
        Self {
            score,
            details,
            evidence,
        }
    }

    /// Resume years minus required years, when both were known.
    pub fn seniority_gap(&self) -> Option<f64> {
        match &self.details {
            CategoryDetails::SeniorityMatch { gap, .. } => *gap,
            _ => None,
        }
    }
}

fn ratio(matched: usize, total: usize) -> f64 {
    matched as f64 / total.max(1) as f64
}

pub fn score_keyword_skills(
    resume_text: &str,
    must_haves: &[String],
    nice_to_haves: &[String],
) -> CategoryScore {
    let resume_lower = resume_text.to_lowercase();
    let is_present = |kw: &&String| resume_lower.contains(&kw.to_lowercase());

    let matched_must: Vec<&String> = must_haves.iter().filter(is_present).collect();
    let matched_nice = nice_to_haves.iter().filter(is_present).count();

    let nice_ratio = ratio(matched_nice, nice_to_haves.len());
    let score = if must_haves.is_empty() {
        nice_ratio * 100.0
    } else {
        ratio(matched_must.len(), must_haves.len()) * MUST_HAVE_SHARE
            + nice_ratio * NICE_TO_HAVE_SHARE
    };

    let evidence = matched_must
        .iter()
        .map(|kw| format!("✓ {kw}: {}", snippet(resume_text, kw, SNIPPET_CONTEXT_WORDS)))
        .collect();

    CategoryScore::new(
        score,
        CategoryDetails::KeywordSkills {
            matched_must: matched_must.len(),
            total_must: must_haves.len(),
            matched_nice,
            total_nice: nice_to_haves.len(),
        },
        evidence,
    )
}

fn recency_weight(recency: i32) -> f64 {
    if recency <= RECENT_YEARS {
        1.0
    } else if recency <= MID_RECENCY_YEARS {
        0.7
    } else {
        0.4
    }
}

pub fn score_experience_relevance(
    experiences: &[WorkExperience],
    role_keywords: &[String],
) -> CategoryScore {
    if experiences.is_empty() {
        return CategoryScore::new(
            0.0,
            CategoryDetails::ExperienceRelevance {
                experience_count: 0,
                relevant_experiences: 0,
                error: Some("No experience found".to_string()),
            },
            vec![],
        );
    }

    let candidate_count = (role_keywords.len() + lexicon::tech_term_count()).max(1);
    let mut total_relevance = 0.0;
    let mut evidence = Vec::new();

    for exp in experiences {
        let haystack = format!("{} {}", exp.description, exp.title).to_lowercase();
        let role_hits = role_keywords
            .iter()
            .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
            .count();
        let tech_hits = lexicon::tech_terms()
            .filter(|term| haystack.contains(term))
            .count();
        let hits = role_hits + tech_hits;

        total_relevance += hits as f64 / candidate_count as f64 * recency_weight(exp.recency);

        if hits > 0 {
            evidence.push(format!(
                "✓ {} ({}-{}): {hits} relevant keywords",
                exp.title, exp.start_year, exp.end_year
            ));
        }
    }

    let score = (total_relevance / experiences.len() as f64 * 100.0).min(100.0);
    let relevant_experiences = experiences
        .iter()
        .filter(|e| e.recency <= RECENT_YEARS)
        .count();

    CategoryScore::new(
        score,
        CategoryDetails::ExperienceRelevance {
            experience_count: experiences.len(),
            relevant_experiences,
            error: None,
        },
        evidence,
    )
}

pub fn score_role_match(experiences: &[WorkExperience], target_role: &str) -> CategoryScore {
    let resume_roles: Vec<String> = experiences
        .iter()
        .map(|e| e.title.trim().to_lowercase())
        .filter(|title| !title.is_empty())
        .collect();
    let target_role = target_role.trim().to_lowercase();

    let mut score: f64 = 0.0;
    let mut evidence = Vec::new();

    for role in &resume_roles {
        let exact = !target_role.is_empty()
            && (target_role.contains(role.as_str()) || role.contains(target_role.as_str()));
        if exact {
            score = score.max(EXACT_ROLE_SCORE);
            evidence.push(format!("✓ Exact role match: {role}"));
        } else if ADJACENT_ROLE_KEYWORDS.iter().any(|kw| role.contains(kw)) {
            score = score.max(ADJACENT_ROLE_SCORE);
            evidence.push(format!("~ Adjacent role: {role}"));
        }
    }

    if evidence.is_empty() {
        score = NO_ROLE_SCORE;
        evidence.push("✗ Limited role overlap".to_string());
    }

    CategoryScore::new(
        score,
        CategoryDetails::RoleMatch {
            resume_roles,
            target_role,
        },
        evidence,
    )
}

/// Scores total resume years against the JD's required years.
pub fn score_seniority_match(total_years: f64, required_years: Option<u32>) -> CategoryScore {
    let Some(required) = required_years else {
        return CategoryScore::new(
            NEUTRAL_SCORE,
            CategoryDetails::SeniorityMatch {
                resume_years: total_years,
                required_years: None,
                gap: None,
                warning: Some("Could not extract required years".to_string()),
            },
            vec!["Unable to determine exact requirement".to_string()],
        );
    };

    let gap = total_years - f64::from(required);
    let score = if gap >= 0.0 {
        (90.0 + 2.0 * gap).min(100.0)
    } else if gap >= -1.0 {
        70.0 + 15.0 * gap
    } else {
        (60.0 + 20.0 * gap).max(0.0)
    };

    CategoryScore::new(
        score,
        CategoryDetails::SeniorityMatch {
            resume_years: total_years,
            required_years: Some(required),
            gap: Some(gap),
            warning: None,
        },
        vec![format!(
            "Resume: {total_years:.1} years, Required: {required} years"
        )],
    )
}

pub fn score_education_match(
    education: &[EducationRecord],
    required_degrees: &[DegreeKind],
) -> CategoryScore {
    let found_degrees: Vec<DegreeKind> = education
        .iter()
        .map(|e| e.kind)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let details = |no_requirement: bool, missing_education: bool| CategoryDetails::EducationMatch {
        required_degrees: required_degrees.to_vec(),
        found_degrees: found_degrees.clone(),
        no_requirement,
        missing_education,
    };

    if required_degrees.is_empty() {
        return CategoryScore::new(
            NO_DEGREE_REQUIREMENT_SCORE,
            details(true, false),
            vec!["No specific degree requirement in JD".to_string()],
        );
    }

    if found_degrees.is_empty() {
        return CategoryScore::new(
            MISSING_EDUCATION_SCORE,
            details(false, true),
            vec!["No education found in resume".to_string()],
        );
    }

    let matched = required_degrees
        .iter()
        .filter(|req| {
            found_degrees
                .iter()
                .any(|found| found.as_str().contains(req.as_str()))
        })
        .count();
    let score = ratio(matched, required_degrees.len()) * 100.0;

    let found_list = found_degrees
        .iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    CategoryScore::new(
        score,
        details(false, false),
        vec![format!("Found: {found_list}")],
    )
}

pub fn score_tooling_stack_match(resume_text: &str, jd_text: &str) -> CategoryScore {
    let jd_tools = lexicon::tech_terms_in(&jd_text.to_lowercase());
    if jd_tools.is_empty() {
        return CategoryScore::new(
            NEUTRAL_SCORE,
            CategoryDetails::ToolingStackMatch {
                matched_tools: 0,
                required_tools: 0,
                no_tools_in_jd: true,
            },
            vec!["No specific tools mentioned in JD".to_string()],
        );
    }

    let resume_tools = lexicon::tech_terms_in(&resume_text.to_lowercase());
    let matched = jd_tools
        .iter()
        .filter(|tool| resume_tools.contains(tool))
        .count();
    let score = ratio(matched, jd_tools.len()) * 100.0;

    CategoryScore::new(
        score,
        CategoryDetails::ToolingStackMatch {
            matched_tools: matched,
            required_tools: jd_tools.len(),
            no_tools_in_jd: false,
        },
        vec![format!("Matched {matched}/{} required tools", jd_tools.len())],
    )
}

pub fn score_recency_match(experiences: &[WorkExperience]) -> CategoryScore {
    if experiences.is_empty() {
        return CategoryScore::new(
            0.0,
            CategoryDetails::RecencyMatch {
                recent_experience_count: 0,
                no_experience: true,
            },
            vec![],
        );
    }

    let recent = experiences
        .iter()
        .filter(|e| e.recency <= RECENT_YEARS)
        .count();

    CategoryScore::new(
        ratio(recent, experiences.len()) * 100.0,
        CategoryDetails::RecencyMatch {
            recent_experience_count: recent,
            no_experience: false,
        },
        vec![format!("{recent} roles within last {RECENT_YEARS} years")],
    )
}

pub fn score_red_flags(red_flags: &[String]) -> CategoryScore {
    CategoryScore::new(
        100.0 - RED_FLAG_PENALTY * red_flags.len() as f64,
        CategoryDetails::RedFlags {
            flags_count: red_flags.len(),
        },
        red_flags.to_vec(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::SAMPLE_RESUME;

    fn terms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn job(title: &str, start: i32, end: i32, description: &str, reference_year: i32) -> WorkExperience {
        WorkExperience::new(title, start, Some(end), description, reference_year)
    }

    #[test]
    fn test_category_keys_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
        assert_eq!(Category::from_key("charisma"), None);
    }

    #[test]
    fn test_category_order_is_presentation_order() {
        let mut sorted = Category::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Category::ALL.to_vec());
    }

    #[test]
    fn test_score_keyword_skills() {
        let score = score_keyword_skills(
            SAMPLE_RESUME,
            &terms(&["python", "spark", "sql"]),
            &terms(&["kubernetes"]),
        );
        assert!((0.0..=100.0).contains(&score.score));
        assert!((score.score - 100.0).abs() < 1e-9);
        assert_eq!(score.evidence.len(), 3);
        assert!(score.evidence[0].starts_with("✓ python: ..."));
        assert!(matches!(
            score.details,
            CategoryDetails::KeywordSkills { matched_must: 3, total_must: 3, .. }
        ));
    }

    #[test]
    fn test_keyword_skills_split_seventy_thirty() {
        let score = score_keyword_skills(
            "Python only",
            &terms(&["python", "rust"]),
            &terms(&["python", "go"]),
        );
        // 70 * 1/2 + 30 * 1/2
        assert!((score.score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_skills_without_must_haves() {
        let score = score_keyword_skills("Docker", &[], &terms(&["docker", "jenkins"]));
        assert!((score.score - 50.0).abs() < 1e-9);

        let empty = score_keyword_skills("Docker", &[], &[]);
        assert_eq!(empty.score, 0.0);
    }

    #[test]
    fn test_experience_relevance_no_experience() {
        let score = score_experience_relevance(&[], &terms(&["engineer"]));
        assert_eq!(score.score, 0.0);
        assert!(matches!(
            score.details,
            CategoryDetails::ExperienceRelevance { error: Some(_), .. }
        ));
    }

    #[test]
    fn test_experience_relevance_decays_with_recency() {
        let roles = terms(&["engineer"]);
        let recent = [job("Data Engineer", 2020, 2024, "Python and Spark", 2025)];
        let old = [job("Data Engineer", 2000, 2010, "Python and Spark", 2025)];

        let recent_score = score_experience_relevance(&recent, &roles);
        let old_score = score_experience_relevance(&old, &roles);
        assert!(recent_score.score > old_score.score);
        assert!((old_score.score / recent_score.score - 0.4).abs() < 1e-9);
        assert_eq!(recent_score.evidence.len(), 1);
    }

    #[test]
    fn test_score_role_match_exact() {
        let experiences = [job("Senior Data Engineer", 2018, 2024, "", 2025)];
        let score = score_role_match(&experiences, "senior data engineer");
        assert_eq!(score.score, 95.0);
        assert!(score.evidence[0].contains("Exact role match"));
    }

    #[test]
    fn test_score_role_match_adjacent() {
        let experiences = [job("Backend Developer", 2018, 2024, "", 2025)];
        let score = score_role_match(&experiences, "senior data engineer");
        assert_eq!(score.score, 70.0);
    }

    #[test]
    fn test_score_role_match_takes_best_title() {
        let experiences = [
            job("Backend Developer", 2020, 2024, "", 2025),
            job("Data Engineer", 2016, 2020, "", 2025),
        ];
        let score = score_role_match(&experiences, "Data Engineer");
        assert_eq!(score.score, 95.0);
        assert_eq!(score.evidence.len(), 2);
    }

    #[test]
    fn test_score_role_match_limited_overlap() {
        let score = score_role_match(&[], "senior data engineer");
        assert_eq!(score.score, 20.0);
        assert_eq!(score.evidence, vec!["✗ Limited role overlap"]);

        let chef = [job("Chef", 2018, 2024, "", 2025)];
        assert_eq!(score_role_match(&chef, "").score, 20.0);
    }

    #[test]
    fn test_score_seniority_match() {
        assert!(score_seniority_match(7.0, Some(5)).score >= 90.0);
        assert!(score_seniority_match(5.0, Some(5)).score >= 85.0);
        assert!(score_seniority_match(3.0, Some(5)).score < 70.0);
    }

    #[test]
    fn test_seniority_bands() {
        assert_eq!(score_seniority_match(10.0, Some(2)).score, 100.0);
        assert_eq!(score_seniority_match(4.0, Some(5)).score, 55.0);
        assert_eq!(score_seniority_match(4.5, Some(5)).score, 62.5);
        assert_eq!(score_seniority_match(0.0, Some(10)).score, 0.0);
    }

    #[test]
    fn test_seniority_unknown_requirement_is_neutral() {
        let score = score_seniority_match(3.0, None);
        assert_eq!(score.score, 50.0);
        assert_eq!(score.seniority_gap(), None);
        assert!(matches!(
            score.details,
            CategoryDetails::SeniorityMatch { warning: Some(_), .. }
        ));
    }

    #[test]
    fn test_seniority_gap_accessor() {
        assert_eq!(score_seniority_match(3.0, Some(5)).seniority_gap(), Some(-2.0));
        assert_eq!(score_role_match(&[], "x").seniority_gap(), None);
    }

    #[test]
    fn test_education_scoring() {
        let education = [EducationRecord {
            kind: DegreeKind::Bachelor,
        }];
        let score = score_education_match(&education, &[DegreeKind::Bachelor]);
        assert_eq!(score.score, 100.0);

        let partial =
            score_education_match(&education, &[DegreeKind::Bachelor, DegreeKind::Master]);
        assert_eq!(partial.score, 50.0);
    }

    #[test]
    fn test_education_defaults() {
        assert_eq!(score_education_match(&[], &[]).score, 75.0);
        assert_eq!(score_education_match(&[], &[DegreeKind::Phd]).score, 30.0);
    }

    #[test]
    fn test_tooling_stack_match() {
        let score = score_tooling_stack_match(
            "Docker and Kubernetes",
            "We use docker, kubernetes and jenkins",
        );
        // "r" matches inside "docker" on both sides.
        assert_eq!(score.score, 75.0);
        assert!(matches!(
            score.details,
            CategoryDetails::ToolingStackMatch {
                matched_tools: 3,
                required_tools: 4,
                no_tools_in_jd: false,
            }
        ));
    }

    #[test]
    fn test_tooling_without_jd_tools_is_neutral() {
        let score = score_tooling_stack_match("Docker", "Lovely team");
        assert_eq!(score.score, 50.0);
    }

    #[test]
    fn test_recency_match() {
        let experiences = [
            job("Engineer", 2020, 2025, "", 2025),
            job("Engineer", 2010, 2015, "", 2025),
        ];
        assert_eq!(score_recency_match(&experiences).score, 50.0);
        assert_eq!(score_recency_match(&[]).score, 0.0);
    }

    #[test]
    fn test_red_flag_score_floors_at_zero() {
        let flags: Vec<String> = (0..8).map(|i| format!("flag {i}")).collect();
        assert_eq!(score_red_flags(&flags).score, 0.0);
        assert_eq!(score_red_flags(&flags[..2]).score, 70.0);
        assert_eq!(score_red_flags(&[]).score, 100.0);
    }

    #[test]
    fn test_category_score_clamps() {
        let details = CategoryDetails::RedFlags { flags_count: 0 };
        assert_eq!(CategoryScore::new(140.0, details.clone(), vec![]).score, 100.0);
        assert_eq!(CategoryScore::new(-3.0, details.clone(), vec![]).score, 0.0);
        assert_eq!(CategoryScore::new(f64::NAN, details, vec![]).score, 0.0);
    }

    #[test]
    fn test_details_serialize_with_kind_tag() {
        let score = score_recency_match(&[]);
        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["details"]["kind"], "recency_match");
        assert_eq!(json["details"]["no_experience"], true);
    }
}
