//! Resume / job-description match scoring.
//!
//! [`analyze`] (or a reusable [`ScoringEngine`]) extracts requirement signals
//! from the job description, structures the resume, scores eight match
//! categories and aggregates them into an [`AnalysisResult`]. The engine is
//! synchronous and keeps no state between calls.

pub mod actions;
pub mod categories;
pub mod engine;
pub mod lexicon;
pub mod model;
pub mod red_flags;
pub mod resume;
pub mod signals;
pub mod text;
pub mod weights;

#[cfg(test)]
mod fixtures;

pub use actions::Actions;
pub use categories::{Category, CategoryDetails, CategoryScore};
pub use engine::{analyze, AnalysisConfig, ScoringEngine};
pub use model::{AnalysisResult, DegreeKind, KeywordCategory, KeywordMatch, MatchLabel, Metadata};
pub use red_flags::RedFlag;
pub use weights::{Weights, WeightsError};
