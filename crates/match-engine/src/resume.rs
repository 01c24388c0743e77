//! Resume structuring: work-experience and education sections.
//!
//! Sections are found by header lines and end at the next all-caps header
//! line. Within the experience section each line that starts with a title
//! followed by a year opens a new entry; the lines after it, up to the next
//! entry, form its description.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::{EDUCATION_HEADERS, EXPERIENCE_HEADERS};
use crate::model::DegreeKind;

static EXPERIENCE_HEADER: Lazy<Regex> = Lazy::new(|| header_pattern(EXPERIENCE_HEADERS));
static EDUCATION_HEADER: Lazy<Regex> = Lazy::new(|| header_pattern(EDUCATION_HEADERS));

static ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?P<title>[A-Za-z][A-Za-z .,&/'()|@:–—-]*?)\s*[,(|@:–—-]*\s*(?P<start>(?:19|20)\d{2})(?:\s*(?:-|–|—|to)\s*(?:[A-Za-z]+\.?\s+)?(?P<end>(?:19|20)\d{2}))?(?P<tail>.*)$",
    )
    .unwrap()
});

static OPEN_ENDED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:present|current|now)\b").unwrap());

/// Separators that end the title part of an entry line.
const TITLE_TERMINATORS: &[char] = &[',', '(', '|', '@'];

/// Punctuation stripped from the front of the text trailing the years.
const TAIL_SEPARATORS: &[char] = &[' ', ',', ';', ':', '|', ')', '-', '–', '—'];

/// Maximum number of words in a section header line.
const MAX_HEADER_WORDS: usize = 4;

fn header_pattern(keywords: &[&str]) -> Regex {
    let alternatives = keywords
        .iter()
        .map(|keyword| keyword.split(' ').map(regex::escape).collect::<Vec<_>>().join(r"\s*"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)({alternatives})")).unwrap()
}

/// One job extracted from the experience section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub title: String,
    pub start_year: i32,
    pub end_year: i32,
    /// `end_year - start_year`, never negative.
    pub years: i32,
    pub description: String,
    /// Years since the role ended, relative to the reference year. Never negative.
    pub recency: i32,
}

impl WorkExperience {
    /// Builds an entry; an open-ended role ends in `reference_year`.
    pub fn new(
        title: impl Into<String>,
        start_year: i32,
        end_year: Option<i32>,
        description: impl Into<String>,
        reference_year: i32,
    ) -> Self {
        let end_year = end_year.unwrap_or(reference_year);
        Self {
            title: title.into(),
            start_year,
            end_year,
            years: (end_year - start_year).max(0),
            description: description.into(),
            recency: (reference_year - end_year).max(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    #[serde(rename = "type")]
    pub kind: DegreeKind,
}

/// Everything the scorers need from the resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub experiences: Vec<WorkExperience>,
    pub education: Vec<EducationRecord>,
    pub total_years: f64,
}

impl ResumeProfile {
    pub fn extract(resume_text: &str, reference_year: i32) -> Self {
        let experiences = extract_work_experience(resume_text, reference_year);
        let total_years = total_years(&experiences);
        Self {
            experiences,
            education: extract_education(resume_text),
            total_years,
        }
    }
}

/// Experience entries from every experience section, in document order.
///
/// Any line that starts with words and then a year opens an entry, so a
/// description line such as `Migrated platform to AWS in 2019` becomes an
/// open-ended role of its own. Such entries inflate `total_years` and can
/// raise gap or job-hopping flags.
pub fn extract_work_experience(resume_text: &str, reference_year: i32) -> Vec<WorkExperience> {
    let mut experiences = Vec::new();
    for section in find_sections(resume_text, &EXPERIENCE_HEADER) {
        experiences.extend(parse_entries(&section, reference_year));
    }
    experiences
}

/// One record per degree word in the first education section.
pub fn extract_education(resume_text: &str) -> Vec<EducationRecord> {
    let Some(section) = find_sections(resume_text, &EDUCATION_HEADER).into_iter().next() else {
        return Vec::new();
    };
    let body = section.join("\n").to_lowercase();
    DegreeKind::found_in(&body)
        .into_iter()
        .map(|kind| EducationRecord { kind })
        .collect()
}

pub fn total_years(experiences: &[WorkExperience]) -> f64 {
    experiences.iter().map(|e| f64::from(e.years)).sum()
}

/// A line made only of uppercase ASCII letters and whitespace, e.g. `SKILLS`.
fn is_all_caps_header(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with(|c: char| c.is_ascii_uppercase())
        && trimmed
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_whitespace())
}

/// Returns the text following the header keyword when `line` is a header:
/// either a short line without digits (`PROFESSIONAL EXPERIENCE`) or a line
/// that opens with the keyword and a colon (`Education: BS in CS`).
fn header_remainder<'a>(line: &'a str, header: &Regex) -> Option<&'a str> {
    let found = header.find(line)?;
    let rest = &line[found.end()..];

    let short = line.split_whitespace().count() <= MAX_HEADER_WORDS
        && !line.chars().any(|c| c.is_ascii_digit());
    let labelled = line[..found.start()].trim().is_empty() && rest.trim_start().starts_with(':');

    if short || labelled {
        Some(rest.trim_start_matches(|c: char| c == ':' || c.is_whitespace()))
    } else {
        None
    }
}

/// Each section is the remainder of its header line followed by the lines up
/// to the next all-caps header.
fn find_sections<'a>(text: &'a str, header: &Regex) -> Vec<Vec<&'a str>> {
    let lines: Vec<&str> = text.lines().collect();
    let mut sections = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(remainder) = header_remainder(lines[i], header) else {
            i += 1;
            continue;
        };

        let mut body = vec![remainder];
        let mut j = i + 1;
        while j < lines.len() && !is_all_caps_header(lines[j]) {
            body.push(lines[j]);
            j += 1;
        }
        sections.push(body);
        i = j;
    }

    sections
}

struct PendingEntry {
    title: String,
    start_year: i32,
    end_year: Option<i32>,
    description: Vec<String>,
}

impl PendingEntry {
    fn finish(self, reference_year: i32) -> WorkExperience {
        let description = self.description.join("\n").trim().to_string();
        WorkExperience::new(
            self.title,
            self.start_year,
            self.end_year,
            description,
            reference_year,
        )
    }
}

/// Drops separators and an open-ended marker (`- Present`) from the text
/// after the years.
fn clean_tail(tail: &str) -> &str {
    let tail = tail.trim_start_matches(TAIL_SEPARATORS);
    let tail = match OPEN_ENDED.find(tail) {
        Some(marker) => &tail[marker.end()..],
        None => tail,
    };
    tail.trim_start_matches(TAIL_SEPARATORS).trim()
}

fn parse_entries(section: &[&str], reference_year: i32) -> Vec<WorkExperience> {
    let mut entries = Vec::new();
    let mut pending: Option<PendingEntry> = None;

    for line in section {
        if let Some(caps) = ENTRY.captures(line) {
            if let Some(done) = pending.take() {
                entries.push(done.finish(reference_year));
            }

            let title = caps["title"]
                .split(TITLE_TERMINATORS)
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            let start_year = caps["start"].parse().unwrap_or(reference_year);
            let end_year = caps.name("end").and_then(|m| m.as_str().parse().ok());
            let tail = clean_tail(&caps["tail"]);

            let mut description = Vec::new();
            if !tail.is_empty() {
                description.push(tail.to_string());
            }
            pending = Some(PendingEntry {
                title,
                start_year,
                end_year,
                description,
            });
        } else if let Some(entry) = pending.as_mut() {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                entry.description.push(trimmed.to_string());
            }
        }
    }

    if let Some(done) = pending {
        entries.push(done.finish(reference_year));
    }
    entries
}
