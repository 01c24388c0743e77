//! Red-flag detection.
//!
//! Detections are independent; a resume can raise any combination of them.
//! Flags are rendered to strings for the result, and their count drives the
//! `red_flags` category score.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexicon::WEAK_QUALIFIERS;
use crate::resume::WorkExperience;

const MISSING_EXAMPLES: usize = 3;
const JOB_HOPPING_MIN_ROLES: usize = 2;
const MAX_UNEXPLAINED_GAP_YEARS: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RedFlag {
    MissingMustHaves { count: usize, examples: Vec<String> },
    JobHopping { short_roles: usize },
    EmploymentGap { years: i32, from: i32, to: i32 },
    WeakClaim { qualifier: String },
}

impl fmt::Display for RedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedFlag::MissingMustHaves { count, examples } => write!(
                f,
                "Missing {count} must-have keywords: {}",
                examples.join(", ")
            ),
            RedFlag::JobHopping { short_roles } => {
                write!(f, "Potential job hopping: {short_roles} positions < 1 year")
            }
            RedFlag::EmploymentGap { years, from, to } => {
                write!(f, "Employment gap: {years} years ({from}-{to})")
            }
            RedFlag::WeakClaim { qualifier } => {
                write!(f, "Weak claim detected: '{qualifier}' used for required skills")
            }
        }
    }
}

/// Runs every detection in a fixed order: missing must-haves, job hopping,
/// gaps, weak claims.
///
/// Gap detection compares each entry's start year with the next entry's end
/// year, so it assumes entries are listed most recent first. Resumes in
/// chronological order produce no gap flags even when gaps exist.
pub fn detect_red_flags(
    resume_text: &str,
    experiences: &[WorkExperience],
    must_haves: &[String],
) -> Vec<RedFlag> {
    let resume_lower = resume_text.to_lowercase();
    let mut flags = Vec::new();

    let missing: Vec<&String> = must_haves
        .iter()
        .filter(|kw| !resume_lower.contains(&kw.to_lowercase()))
        .collect();
    if !missing.is_empty() {
        flags.push(RedFlag::MissingMustHaves {
            count: missing.len(),
            examples: missing
                .iter()
                .take(MISSING_EXAMPLES)
                .map(|kw| kw.to_string())
                .collect(),
        });
    }

    let short_roles = experiences.iter().filter(|e| e.years < 1).count();
    if short_roles >= JOB_HOPPING_MIN_ROLES {
        flags.push(RedFlag::JobHopping { short_roles });
    }

    for pair in experiences.windows(2) {
        let (newer, older) = (&pair[0], &pair[1]);
        let years = newer.start_year - older.end_year;
        if years > MAX_UNEXPLAINED_GAP_YEARS {
            flags.push(RedFlag::EmploymentGap {
                years,
                from: older.end_year,
                to: newer.start_year,
            });
        }
    }

    let claims_required_skill = must_haves
        .iter()
        .any(|kw| resume_lower.contains(&kw.to_lowercase()));
    if claims_required_skill {
        flags.extend(
            WEAK_QUALIFIERS
                .iter()
                .filter(|qualifier| resume_lower.contains(*qualifier))
                .map(|qualifier| RedFlag::WeakClaim {
                    qualifier: qualifier.to_string(),
                }),
        );
    }

    flags
}
