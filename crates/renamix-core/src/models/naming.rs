use serde::{Deserialize, Serialize};

/// How new names are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamingMode {
    /// Ask the content analyzer for a suggestion; fall back to the token
    /// pattern when it cannot help.
    #[serde(rename = "content")]
    ContentAnalysis,
    /// Deterministic token substitution over the configured template.
    #[serde(rename = "pattern")]
    TokenPattern,
}

/// The active renaming strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    pub mode: NamingMode,
    /// Template with placeholder tokens; required for TokenPattern mode. An
    /// empty or absent template falls back to a synthesized default.
    pub pattern: Option<String>,
}

impl NamingConfig {
    pub fn content_analysis() -> Self {
        Self {
            mode: NamingMode::ContentAnalysis,
            pattern: None,
        }
    }

    pub fn token_pattern(pattern: impl Into<String>) -> Self {
        Self {
            mode: NamingMode::TokenPattern,
            pattern: Some(pattern.into()),
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self::content_analysis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_content_analysis() {
        let config = NamingConfig::default();
        assert_eq!(config.mode, NamingMode::ContentAnalysis);
        assert_eq!(config.pattern, None);
    }

    #[test]
    fn test_mode_serde_tags() {
        assert_eq!(
            serde_json::to_string(&NamingMode::ContentAnalysis).unwrap(),
            "\"content\""
        );
        assert_eq!(
            serde_json::to_string(&NamingMode::TokenPattern).unwrap(),
            "\"pattern\""
        );
    }

    #[test]
    fn test_token_pattern_constructor() {
        let config = NamingConfig::token_pattern("{date}_{original}");
        assert_eq!(config.mode, NamingMode::TokenPattern);
        assert_eq!(config.pattern.as_deref(), Some("{date}_{original}"));
    }
}
