use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SelectorError;

const ALLOWED_KEYS: &[&str] = &["max_chars", "window_size", "max_matches", "respect_ignore"];

/// Knobs for one selection pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionProfile {
    /// Character budget shared by every added item
    pub max_chars: usize,
    /// Lines per Jaccard window when ranking snippets
    pub window_size: usize,
    /// Snippets kept per document
    pub max_matches: usize,
    /// Drop items the ignore engine rejects
    pub respect_ignore: bool,
}

impl Default for SelectionProfile {
    fn default() -> Self {
        Self {
            max_chars: 20_000,
            window_size: 50,
            max_matches: 5,
            respect_ignore: true,
        }
    }
}

impl SelectionProfile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read selection profile {}", path.display()))?;
        Self::from_bytes(&bytes)
            .with_context(|| format!("Invalid selection profile {}", path.display()))
    }

    /// Parse a JSON or TOML profile. Missing keys take their defaults;
    /// unknown keys are an error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value = match serde_json::from_slice(bytes) {
            Ok(value) => value,
            Err(json_err) => {
                let utf8 =
                    std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
                let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                    anyhow!(
                        "Profile is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}"
                    )
                })?;
                serde_json::to_value(toml_value)
                    .map_err(|err| anyhow!("Failed to convert TOML profile to JSON: {err}"))?
            }
        };

        let serde_json::Value::Object(root) = &value else {
            return Err(anyhow!("Selection profile must be an object"));
        };
        let unknown: Vec<&str> = root
            .keys()
            .map(String::as_str)
            .filter(|key| !ALLOWED_KEYS.contains(key))
            .collect();
        if !unknown.is_empty() {
            return Err(anyhow!(
                "Selection profile has unknown fields: {}",
                unknown.join(", ")
            ));
        }

        let profile: Self =
            serde_json::from_value(value).map_err(|err| anyhow!("Profile parse error: {err}"))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.window_size < 1 {
            return Err(SelectorError::InvalidArgument(
                "window_size must be at least 1".to_string(),
            ));
        }
        if self.max_chars == 0 {
            return Err(SelectorError::InvalidArgument(
                "max_chars must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
