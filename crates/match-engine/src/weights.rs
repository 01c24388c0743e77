use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::categories::Category;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    #[error("unknown scoring category '{0}'")]
    UnknownCategory(String),

    #[error("weight for '{category}' must be a non-negative finite number, got {value}")]
    InvalidWeight { category: Category, value: f64 },
}

/// Per-category weights for the overall score.
///
/// A category missing from the table weighs 0. Weights are expected to sum to
/// 1.0 for a normalized overall score; the engine does not enforce that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weights(BTreeMap<Category, f64>);

impl Default for Weights {
    fn default() -> Self {
        Self(BTreeMap::from([
            (Category::KeywordSkills, 0.30),
            (Category::ExperienceRelevance, 0.20),
            (Category::RoleMatch, 0.10),
            (Category::SeniorityMatch, 0.10),
            (Category::EducationMatch, 0.10),
            (Category::ToolingStackMatch, 0.10),
            (Category::RecencyMatch, 0.05),
            (Category::RedFlags, 0.05),
        ]))
    }
}

impl Weights {
    pub fn new(weights: BTreeMap<Category, f64>) -> Self {
        Self(weights)
    }

    /// Builds a table from category keys such as `"keyword_skills"`.
    pub fn from_keys<K: AsRef<str>>(
        weights: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<Self, WeightsError> {
        let mut table = BTreeMap::new();
        for (key, value) in weights {
            let key = key.as_ref();
            let category = Category::from_key(key)
                .ok_or_else(|| WeightsError::UnknownCategory(key.to_string()))?;
            table.insert(category, value);
        }
        Ok(Self(table))
    }

    pub fn get(&self, category: Category) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().map(|(category, weight)| (*category, *weight))
    }

    /// Rejects negative, NaN and infinite weights.
    pub fn validate(&self) -> Result<(), WeightsError> {
        for (category, value) in self.iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::InvalidWeight { category, value });
            }
        }
        Ok(())
    }
}
