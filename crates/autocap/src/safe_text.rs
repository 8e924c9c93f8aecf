//! Safe text extraction
//!
//! The text stored in a fingerprint comes from a [`SafeText`] extractor.
//! [`PrivacyText`] is the default: it refuses to read text from form
//! fields, from anything that looks like a payment or credentials field,
//! and from subtrees that opted out of capture. It also drops words that
//! look like card or social-security numbers.

use std::convert::Infallible;

use crate::config::CaptureConfig;
use crate::handle::{ElementHandle, resolve_class};

/// Produces the privacy-safe text summary of an element
pub trait SafeText<E: ElementHandle> {
    type Error;

    fn safe_text(&self, element: &E) -> Result<String, Self::Error>;
}

impl<E, F, Err> SafeText<E> for F
where
    E: ElementHandle,
    F: Fn(&E) -> Result<String, Err>,
{
    type Error = Err;

    fn safe_text(&self, element: &E) -> Result<String, Err> {
        self(element)
    }
}

/// Default privacy-aware extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivacyText {
    max_text_len: usize,
    opt_out_class: String,
}

impl PrivacyText {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            max_text_len: config.max_text_len,
            opt_out_class: config.opt_out_class.clone(),
        }
    }

    /// Whether any text may be read from this element at all
    pub fn should_capture<E: ElementHandle>(&self, element: &E) -> bool {
        let mut current = Some(element.clone());
        while let Some(el) = current {
            if resolve_class(&el)
                .split_whitespace()
                .any(|c| c == self.opt_out_class)
            {
                tracing::debug!(tag = el.tag_name(), "text capture opted out");
                return false;
            }
            current = el.parent_element();
        }

        if element.tag_name().eq_ignore_ascii_case("input") {
            let kind = element.attribute("type").unwrap_or("");
            if kind.eq_ignore_ascii_case("hidden") || kind.eq_ignore_ascii_case("password") {
                return false;
            }
        }

        for attr in ["name", "id"] {
            if element.attribute(attr).is_some_and(is_sensitive_name) {
                tracing::debug!(tag = element.tag_name(), attr, "sensitive field name");
                return false;
            }
        }

        true
    }

    fn extract<E: ElementHandle>(&self, element: &E) -> String {
        if !self.should_capture(element) || is_sensitive_element(element) {
            return String::new();
        }

        let mut text = String::new();
        for content in element.child_texts() {
            text.push_str(&self.clean(content));
        }
        text.trim().to_string()
    }

    /// Clean one text node: drop sensitive words, flatten newlines,
    /// collapse spaces and truncate.
    fn clean(&self, content: &str) -> String {
        let kept = split_keeping_whitespace(content.trim())
            .filter(|token| should_capture_value(token))
            .collect::<String>()
            .replace(['\r', '\n'], " ");

        let mut collapsed = String::with_capacity(kept.len());
        let mut prev_space = false;
        for c in kept.chars() {
            if c == ' ' {
                if !prev_space {
                    collapsed.push(c);
                }
                prev_space = true;
            } else {
                collapsed.push(c);
                prev_space = false;
            }
        }

        collapsed.chars().take(self.max_text_len).collect()
    }
}

impl Default for PrivacyText {
    fn default() -> Self {
        Self::new(&CaptureConfig::default())
    }
}

impl<E: ElementHandle> SafeText<E> for PrivacyText {
    type Error = Infallible;

    fn safe_text(&self, element: &E) -> Result<String, Infallible> {
        Ok(self.extract(element))
    }
}

/// Form fields and editable regions never contribute text
fn is_sensitive_element<E: ElementHandle>(element: &E) -> bool {
    let tag = element.tag_name();
    ["input", "select", "textarea"]
        .iter()
        .any(|t| tag.eq_ignore_ascii_case(t))
        || element
            .attribute("contenteditable")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

const SENSITIVE_NAME_PARTS: &[&str] = &[
    "cardnum", "ccnum", "creditcard", "csc", "cvc", "cvv", "exp", "pass", "pwd", "routing",
    "seccode", "securitycode", "securitynum", "socialsec", "socsec", "ssn",
];

/// Names like `cc-number`, `user_password` or `SSN`
fn is_sensitive_name(name: &str) -> bool {
    let normalized: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    normalized.starts_with("cc") || SENSITIVE_NAME_PARTS.iter().any(|p| normalized.contains(p))
}

/// Whether a single word may be kept in captured text
pub fn should_capture_value(value: &str) -> bool {
    let value = value.trim();
    !(looks_like_card_number(value) || looks_like_ssn(value))
}

/// Major card number formats, ignoring spaces and dashes
pub fn looks_like_card_number(value: &str) -> bool {
    let digits: String = value.chars().filter(|c| *c != '-' && *c != ' ').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let len = digits.len();
    let starts = |prefixes: &[&str]| prefixes.iter().any(|p| digits.starts_with(p));

    // Visa
    (starts(&["4"]) && (len == 13 || len == 16))
        // MasterCard
        || (starts(&["51", "52", "53", "54", "55"]) && len == 16)
        // Discover
        || (starts(&["6011", "65"]) && len == 16)
        // American Express
        || (starts(&["34", "37"]) && len == 15)
        // Diners Club
        || (starts(&["300", "301", "302", "303", "304", "305", "36", "38"]) && len == 14)
        // JCB
        || (starts(&["2131", "1800"]) && len == 15)
        || (starts(&["35"]) && len == 16)
}

/// `123-45-6789` or `123456789`, dashes optional per group
pub fn looks_like_ssn(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut pos = 0;
    for (i, group) in [3usize, 2, 4].into_iter().enumerate() {
        if i > 0 && bytes.get(pos) == Some(&b'-') {
            pos += 1;
        }
        let end = pos + group;
        if end > bytes.len() || !bytes[pos..end].iter().all(u8::is_ascii_digit) {
            return false;
        }
        pos = end;
    }
    pos == bytes.len()
}

/// Split into alternating word and whitespace-run tokens
fn split_keeping_whitespace(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let is_space = first.is_whitespace();
        let end = rest
            .char_indices()
            .find(|&(_, c)| c.is_whitespace() != is_space)
            .map_or(rest.len(), |(i, _)| i);
        let (token, tail) = rest.split_at(end);
        rest = tail;
        Some(token)
    })
}
