//! autocap
//!
//! Element fingerprinting for client-side event capture.
//!
//! When a user interacts with an element, autocapture records a compact
//! descriptor of that element: its tag, privacy-safe text, classes,
//! non-empty attributes and its position among its siblings. This crate
//! computes that descriptor over any DOM-like tree that implements
//! [`ElementHandle`], and ships an adapter for the arena DOM in
//! [`autocap_dom`].
//!
//! # Example
//! ```rust,ignore
//! use autocap::{DomElement, Fingerprinter, CaptureConfig};
//!
//! let tree = autocap::html::parse(r#"<ul><li>a</li><li id="b" class="x">b</li></ul>"#)?;
//! let target = DomElement::by_id(&tree, "b")?;
//! let fp = autocap::fingerprint(&target);
//! assert_eq!(fp.nth_child, 2);
//! ```

mod chain;
mod config;
mod dom;
mod error;
mod filter;
mod fingerprint;
mod handle;
mod record;
pub mod safe_text;

pub use chain::CapturedElement;
pub use config::{CaptureConfig, TagMatch};
pub use dom::{DomElement, DomNode};
pub use error::{Error, Result};
pub use filter::{ElementFilter, chain_matches, count_matching, volumes};
pub use fingerprint::{
    ATTR_PREFIX, CLASSES_KEY, ElementFingerprint, Fingerprinter, NTH_CHILD_KEY, NTH_OF_TYPE_KEY,
    TAG_NAME_KEY, TEXT_KEY, fingerprint,
};
pub use handle::{ClassValue, ElementHandle, NodeHandle, resolve_class};
pub use record::ElementRecord;
pub use safe_text::{PrivacyText, SafeText};

// Re-export sub-crates for callers that build their own trees
pub use autocap_dom as dom_tree;
pub use autocap_html as html;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
