//! autocap HTML loader
//!
//! Parses HTML with html5ever and converts the result into an
//! [`autocap_dom::DomTree`].

mod loader;

pub use loader::HtmlLoader;

use autocap_dom::DomTree;

/// Parse an HTML string into a DOM tree
pub fn parse(html: &str) -> Result<DomTree, HtmlError> {
    HtmlLoader::new().parse(html)
}

/// HTML loading error
///
/// Markup errors never fail a parse; html5ever recovers the way browsers do.
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("I/O error reading HTML: {0}")]
    Io(#[from] std::io::Error),

    #[error("DOM construction failed: {0}")]
    Dom(#[from] autocap_dom::DomError),
}
