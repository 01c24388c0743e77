use std::collections::BTreeMap;

use match_engine::{AnalysisConfig, Weights, WeightsError};
use serde::{Deserialize, Serialize};

/// Client-supplied analysis settings. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_mode: Option<bool>,
    /// Category key → weight. Categories left out weigh 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<String, f64>>,
}

impl AnalysisSettings {
    /// Parses the multipart `settings` field. Malformed JSON is logged and
    /// replaced by defaults.
    pub fn from_form_field(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str(raw) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Invalid settings JSON, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn into_config(self, default_strict_mode: bool) -> Result<AnalysisConfig, WeightsError> {
        let weights = match self.weights {
            Some(table) => Weights::from_keys(table)?,
            None => Weights::default(),
        };
        weights.validate()?;

        Ok(AnalysisConfig {
            weights,
            strict_mode: self.strict_mode.unwrap_or(default_strict_mode),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match_engine::Category;

    #[test]
    fn test_missing_or_malformed_field_uses_defaults() {
        assert_eq!(AnalysisSettings::from_form_field(None), AnalysisSettings::default());
        assert_eq!(AnalysisSettings::from_form_field(Some("  ")), AnalysisSettings::default());
        assert_eq!(
            AnalysisSettings::from_form_field(Some("{not json")),
            AnalysisSettings::default()
        );
    }

    #[test]
    fn test_form_field_ignores_unknown_keys() {
        let settings = AnalysisSettings::from_form_field(Some(
            r#"{"strict_mode": true, "toggle_synonyms": false}"#,
        ));
        assert_eq!(settings.strict_mode, Some(true));
        assert_eq!(settings.weights, None);
    }

    #[test]
    fn test_into_config_applies_server_default() {
        let config = AnalysisSettings::default().into_config(true).unwrap();
        assert!(config.strict_mode);
        assert_eq!(config.weights, Weights::default());

        let explicit = AnalysisSettings {
            strict_mode: Some(false),
            weights: None,
        };
        assert!(!explicit.into_config(true).unwrap().strict_mode);
    }

    #[test]
    fn test_into_config_builds_custom_weights() {
        let settings = AnalysisSettings {
            strict_mode: None,
            weights: Some(BTreeMap::from([
                ("keyword_skills".to_string(), 0.6),
                ("role_match".to_string(), 0.4),
            ])),
        };
        let config = settings.into_config(false).unwrap();
        assert_eq!(config.weights.get(Category::KeywordSkills), 0.6);
        assert_eq!(config.weights.get(Category::RedFlags), 0.0);
    }

    #[test]
    fn test_into_config_rejects_bad_weights() {
        let unknown = AnalysisSettings {
            strict_mode: None,
            weights: Some(BTreeMap::from([("charisma".to_string(), 1.0)])),
        };
        assert!(matches!(
            unknown.into_config(false),
            Err(WeightsError::UnknownCategory(_))
        ));

        let negative = AnalysisSettings {
            strict_mode: None,
            weights: Some(BTreeMap::from([("role_match".to_string(), -1.0)])),
        };
        assert!(matches!(
            negative.into_config(false),
            Err(WeightsError::InvalidWeight { .. })
        ));
    }
}
