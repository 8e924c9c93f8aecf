//! Element fingerprinting
//!
//! A fingerprint is the flat property set recorded for an element when a
//! user interacts with it:
//!
//! ```text
//! { "tag_name": "a", "$el_text": "Sign up", "classes": ["btn"],
//!   "attr__href": "/signup", "nth_child": 2, "nth_of_type": 1 }
//! ```

use std::convert::Infallible;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::CaptureConfig;
use crate::handle::{ElementHandle, resolve_class};
use crate::safe_text::{PrivacyText, SafeText};

pub const TAG_NAME_KEY: &str = "tag_name";
pub const TEXT_KEY: &str = "$el_text";
pub const CLASSES_KEY: &str = "classes";
pub const ATTR_PREFIX: &str = "attr__";
pub const NTH_CHILD_KEY: &str = "nth_child";
pub const NTH_OF_TYPE_KEY: &str = "nth_of_type";

const FIXED_KEYS: &[&str] = &[TAG_NAME_KEY, TEXT_KEY, CLASSES_KEY, NTH_CHILD_KEY, NTH_OF_TYPE_KEY];

/// Structural descriptor of one element at capture time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementFingerprint {
    /// Lowercased tag identifier
    pub tag_name: String,
    /// Safe text; `None` when the extractor returned nothing
    pub text: Option<String>,
    /// Class tokens; empty means the key is absent
    pub classes: Vec<String>,
    /// Non-empty attributes as `(name, value)`, unprefixed, in reverse
    /// declaration order
    pub attributes: Vec<(String, String)>,
    /// 1-based position among element siblings
    pub nth_child: u32,
    /// 1-based position among element siblings with the same tag
    pub nth_of_type: u32,
}

impl ElementFingerprint {
    /// A fingerprint with only a tag, as for a first child with nothing else
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            text: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            nth_child: 1,
            nth_of_type: 1,
        }
    }

    /// Value of a captured attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite an attribute; an overwrite keeps its position
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Property keys in serialization order
    pub fn keys(&self) -> Vec<String> {
        let mut keys = vec![TAG_NAME_KEY.to_string()];
        if self.text.is_some() {
            keys.push(TEXT_KEY.to_string());
        }
        if !self.classes.is_empty() {
            keys.push(CLASSES_KEY.to_string());
        }
        keys.extend(self.attributes.iter().map(|(n, _)| format!("{ATTR_PREFIX}{n}")));
        keys.push(NTH_CHILD_KEY.to_string());
        keys.push(NTH_OF_TYPE_KEY.to_string());
        keys
    }
}

impl Serialize for ElementFingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(TAG_NAME_KEY, &self.tag_name)?;
        if let Some(text) = &self.text {
            map.serialize_entry(TEXT_KEY, text)?;
        }
        if !self.classes.is_empty() {
            map.serialize_entry(CLASSES_KEY, &self.classes)?;
        }
        for (name, value) in &self.attributes {
            map.serialize_entry(&format!("{ATTR_PREFIX}{name}"), value)?;
        }
        map.serialize_entry(NTH_CHILD_KEY, &self.nth_child)?;
        map.serialize_entry(NTH_OF_TYPE_KEY, &self.nth_of_type)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for ElementFingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FingerprintVisitor)
    }
}

struct FingerprintVisitor;

impl<'de> Visitor<'de> for FingerprintVisitor {
    type Value = ElementFingerprint;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an element fingerprint object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut tag_name = None;
        let mut fp = ElementFingerprint::new(String::new());

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                TAG_NAME_KEY => tag_name = Some(map.next_value::<String>()?),
                TEXT_KEY => fp.text = Some(map.next_value()?),
                CLASSES_KEY => fp.classes = map.next_value()?,
                NTH_CHILD_KEY => fp.nth_child = map.next_value()?,
                NTH_OF_TYPE_KEY => fp.nth_of_type = map.next_value()?,
                other => match other.strip_prefix(ATTR_PREFIX) {
                    Some(name) => {
                        let value: String = map.next_value()?;
                        fp.set_attribute(name, &value);
                    }
                    None => return Err(de::Error::unknown_field(other, FIXED_KEYS)),
                },
            }
        }

        fp.tag_name = tag_name.ok_or_else(|| de::Error::missing_field(TAG_NAME_KEY))?;
        if fp.nth_child == 0 || fp.nth_of_type == 0 || fp.nth_of_type > fp.nth_child {
            return Err(de::Error::custom(format_args!(
                "invalid sibling position: nth_child {}, nth_of_type {}",
                fp.nth_child, fp.nth_of_type
            )));
        }
        Ok(fp)
    }
}

/// Computes fingerprints with a given configuration and text extractor
#[derive(Debug, Clone)]
pub struct Fingerprinter<X = PrivacyText> {
    config: CaptureConfig,
    text: X,
}

impl Fingerprinter<PrivacyText> {
    /// Fingerprinter using the default privacy-aware text extractor
    pub fn new(config: CaptureConfig) -> Self {
        let text = PrivacyText::new(&config);
        Self { config, text }
    }
}

impl Default for Fingerprinter<PrivacyText> {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}

impl<X> Fingerprinter<X> {
    pub fn with_text_extractor(config: CaptureConfig, text: X) -> Self {
        Self { config, text }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Fingerprint one element
    ///
    /// Only an error from the text extractor can fail this.
    pub fn fingerprint<E>(&self, element: &E) -> Result<ElementFingerprint, <X as SafeText<E>>::Error>
    where
        E: ElementHandle,
        X: SafeText<E>,
    {
        let raw_tag = element.tag_name();
        let mut fp = ElementFingerprint::new(raw_tag.to_lowercase());

        let text = self.text.safe_text(element)?;
        if !text.is_empty() {
            fp.text = Some(text);
        }

        fp.classes = resolve_class(element)
            .split_whitespace()
            .map(str::to_string)
            .collect();

        for (name, value) in element.attributes().rev() {
            if !value.is_empty() {
                fp.set_attribute(name, value);
            }
        }

        let (nth_child, nth_of_type) = self.sibling_position(element);
        fp.nth_child = nth_child;
        fp.nth_of_type = nth_of_type;

        tracing::trace!(
            tag = %fp.tag_name,
            nth_child,
            nth_of_type,
            "fingerprinted element"
        );
        Ok(fp)
    }

    /// `(nth_child, nth_of_type)` counted over preceding element siblings
    fn sibling_position<E: ElementHandle>(&self, element: &E) -> (u32, u32) {
        let tag = element.tag_name();
        let mut nth_child = 1;
        let mut nth_of_type = 1;

        let mut current = element.previous_element_sibling();
        while let Some(sibling) = current {
            nth_child += 1;
            if self.config.tag_match.matches(sibling.tag_name(), tag) {
                nth_of_type += 1;
            }
            current = sibling.previous_element_sibling();
        }

        (nth_child, nth_of_type)
    }
}

/// Fingerprint an element with the default configuration
pub fn fingerprint<E: ElementHandle>(element: &E) -> ElementFingerprint {
    let result: Result<_, Infallible> = Fingerprinter::default().fingerprint(element);
    match result {
        Ok(fp) => fp,
        Err(never) => match never {},
    }
}
