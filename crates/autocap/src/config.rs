//! Capture Configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

/// How sibling tags are compared when counting `nth_of_type`
///
/// `tag_name` in a fingerprint is always lowercased; this only affects
/// the sibling comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagMatch {
    /// Compare raw tag identifiers byte for byte
    #[default]
    Exact,
    /// Compare tag identifiers ignoring ASCII case
    IgnoreAsciiCase,
}

impl TagMatch {
    #[inline]
    pub fn matches(self, a: &str, b: &str) -> bool {
        match self {
            Self::Exact => a == b,
            Self::IgnoreAsciiCase => a.eq_ignore_ascii_case(b),
        }
    }
}

/// Capture configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    /// Sibling tag comparison for `nth_of_type`
    pub tag_match: TagMatch,

    /// Maximum characters kept from each text node
    pub max_text_len: usize,

    /// Class that opts an element and its subtree out of text capture
    pub opt_out_class: String,

    /// Capture chains stop after the element with this tag
    pub stop_tag: String,
}

impl CaptureConfig {
    /// Parse a configuration from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            tag_match: TagMatch::Exact,
            max_text_len: 255,
            opt_out_class: "ph-no-capture".to_string(),
            stop_tag: "html".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CaptureConfig::from_json(r#"{"tag_match": "ignore_ascii_case"}"#).unwrap();
        assert_eq!(config.tag_match, TagMatch::IgnoreAsciiCase);
        assert_eq!(config.max_text_len, 255);
        assert_eq!(config.opt_out_class, "ph-no-capture");
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(CaptureConfig::from_json(r#"{"tag_mtach": "exact"}"#).is_err());
    }

    #[test]
    fn test_tag_match() {
        assert!(TagMatch::Exact.matches("div", "div"));
        assert!(!TagMatch::Exact.matches("DIV", "div"));
        assert!(TagMatch::IgnoreAsciiCase.matches("DIV", "div"));
    }
}
