use serde::{Deserialize, Serialize};
use svo_protocol::taxonomy::DEFAULT_SKIPPABLE;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid extractor configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables of the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Labels the descending object search may pass through.
    pub skippable_labels: Vec<String>,
    /// How many skippable levels the descending object search may enter.
    pub max_search_depth: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            skippable_labels: DEFAULT_SKIPPABLE.iter().map(|l| l.to_string()).collect(),
            max_search_depth: 64,
        }
    }
}

impl ExtractorConfig {
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn is_skippable(&self, label: &str) -> bool {
        self.skippable_labels.iter().any(|l| l == label)
    }

    /// Adds labels to the skippable set, ignoring ones already present.
    pub fn with_skippable<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for label in labels {
            let label = label.into();
            if !self.is_skippable(&label) {
                self.skippable_labels.push(label);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ExtractorConfig::from_json(r#"{ "max_search_depth": 8 }"#).unwrap();
        assert_eq!(config.max_search_depth, 8);
        assert!(config.is_skippable("prep"));
        assert!(!config.is_skippable("conj"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = ExtractorConfig::from_json(r#"{ "skippable_labels": "prep" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_with_skippable_deduplicates() {
        let config = ExtractorConfig::default().with_skippable(["conj", "prep"]);
        assert_eq!(config.skippable_labels.iter().filter(|l| *l == "prep").count(), 1);
        assert!(config.is_skippable("conj"));
    }
}
