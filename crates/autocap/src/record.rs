//! Stored element shape
//!
//! The ingestion side keeps a few properties of every captured element in
//! dedicated fields (`href`, `attr_id`, `attr_class`, ...) and the full
//! attribute set alongside. [`ElementRecord`] is that normalized shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chain::CapturedElement;
use crate::fingerprint::ATTR_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub tag_name: String,
    pub text: Option<String>,
    pub href: Option<String>,
    pub attr_id: Option<String>,
    pub attr_class: Option<Vec<String>>,
    pub nth_child: u32,
    pub nth_of_type: u32,
    /// Every captured attribute, keyed with its `attr__` prefix
    pub attributes: BTreeMap<String, String>,
    pub order: usize,
}

impl ElementRecord {
    pub fn from_captured(captured: &CapturedElement) -> Self {
        let fp = &captured.fingerprint;
        Self {
            tag_name: fp.tag_name.clone(),
            text: fp.text.clone(),
            href: fp.attribute("href").map(str::to_string),
            attr_id: fp.attribute("id").map(str::to_string),
            attr_class: (!fp.classes.is_empty()).then(|| fp.classes.clone()),
            nth_child: fp.nth_child,
            nth_of_type: fp.nth_of_type,
            attributes: fp
                .attributes
                .iter()
                .map(|(name, value)| (format!("{ATTR_PREFIX}{name}"), value.clone()))
                .collect(),
            order: captured.order,
        }
    }
}

impl From<&CapturedElement> for ElementRecord {
    fn from(captured: &CapturedElement) -> Self {
        Self::from_captured(captured)
    }
}
