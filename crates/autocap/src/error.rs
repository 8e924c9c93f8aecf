//! Error types for the capture adapters and I/O surfaces.
//!
//! Fingerprinting itself never fails; only the safe-text extractor can, and
//! its error type flows through [`crate::Fingerprinter`] unchanged.

use autocap_dom::{DomError, NodeId};
use autocap_html::HtmlError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("No element matches {0}")]
    ElementNotFound(String),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
