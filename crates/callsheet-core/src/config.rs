//! Extraction configuration loaded from `.env` / environment or a TOML file.

use crate::error::{CallsheetError, CallsheetResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_true() -> bool {
    true
}

fn default_min_statement_chars() -> usize {
    100
}

/// How repeated operator introductions of the same analyst inside one transcript resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionPolicy {
    /// Later matches overwrite earlier ones (pattern order, then position).
    #[default]
    LastMatchWins,
    /// The first match recorded for a name is kept.
    FirstMatchWins,
}

impl std::str::FromStr for AttributionPolicy {
    type Err = CallsheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "last_match_wins" | "last" => Ok(Self::LastMatchWins),
            "first_match_wins" | "first" => Ok(Self::FirstMatchWins),
            other => Err(CallsheetError::Config(format!(
                "unknown attribution policy: {}",
                other
            ))),
        }
    }
}

/// Extraction configuration.
///
/// | Env | Default | Description |
/// |-----|---------|-------------|
/// | CALLSHEET_MIN_STATEMENT_CHARS | 100 | Prepared statements must be longer than this (trimmed, in chars). |
/// | CALLSHEET_ATTRIBUTION_POLICY | last_match_wins | "last_match_wins" \| "first_match_wins" |
/// | CALLSHEET_REQUIRE_QUESTION | true | If false, every analyst turn is kept, question or not. |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default = "default_min_statement_chars")]
    pub min_statement_chars: usize,
    #[serde(default)]
    pub attribution_policy: AttributionPolicy,
    #[serde(default = "default_true")]
    pub require_question: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_statement_chars: default_min_statement_chars(),
            attribution_policy: AttributionPolicy::default(),
            require_question: true,
        }
    }
}

impl ExtractionConfig {
    /// Load from environment. Unset or invalid => defaults.
    pub fn from_env() -> Self {
        Self {
            min_statement_chars: env_usize(
                "CALLSHEET_MIN_STATEMENT_CHARS",
                default_min_statement_chars(),
            ),
            attribution_policy: std::env::var("CALLSHEET_ATTRIBUTION_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            require_question: env_bool("CALLSHEET_REQUIRE_QUESTION", true),
        }
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> CallsheetResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: ExtractionConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => match v.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

fn env_usize(name: &str, default: usize) -> usize {
    match std::env::var(name) {
        Ok(v) => v.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn policy_parses_short_and_long_forms() {
        assert_eq!("first".parse::<AttributionPolicy>().unwrap(), AttributionPolicy::FirstMatchWins);
        assert_eq!(
            "Last-Match-Wins".parse::<AttributionPolicy>().unwrap(),
            AttributionPolicy::LastMatchWins
        );
        assert!("whichever".parse::<AttributionPolicy>().is_err());
    }

    // The only test in this crate that touches CALLSHEET_* variables.
    #[test]
    fn env_overrides_and_falls_back() {
        const VARS: [&str; 3] = [
            "CALLSHEET_MIN_STATEMENT_CHARS",
            "CALLSHEET_ATTRIBUTION_POLICY",
            "CALLSHEET_REQUIRE_QUESTION",
        ];
        std::env::set_var(VARS[0], "250");
        std::env::set_var(VARS[1], "first");
        std::env::set_var(VARS[2], "no");
        let config = ExtractionConfig::from_env();
        assert_eq!(config.min_statement_chars, 250);
        assert_eq!(config.attribution_policy, AttributionPolicy::FirstMatchWins);
        assert!(!config.require_question);

        std::env::set_var(VARS[0], "lots");
        std::env::set_var(VARS[1], "whichever");
        std::env::set_var(VARS[2], "maybe");
        assert_eq!(ExtractionConfig::from_env(), ExtractionConfig::default());

        for var in VARS {
            std::env::remove_var(var);
        }
        assert_eq!(ExtractionConfig::from_env(), ExtractionConfig::default());
    }

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("callsheet.toml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "attribution_policy = \"first_match_wins\"").unwrap();

        let config = ExtractionConfig::load_from_path(&path).unwrap();
        assert_eq!(config.attribution_policy, AttributionPolicy::FirstMatchWins);
        assert_eq!(config.min_statement_chars, 100);
        assert!(config.require_question);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExtractionConfig::load_from_path(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, ExtractionConfig::default());
    }
}
