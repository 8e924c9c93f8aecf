//! Capture chains
//!
//! An interaction is recorded with the fingerprint of the target element
//! and of each of its ancestors, target first.

use serde::{Deserialize, Serialize};

use crate::fingerprint::{ElementFingerprint, Fingerprinter};
use crate::handle::ElementHandle;
use crate::safe_text::SafeText;

/// One element of a capture chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedElement {
    /// Distance from the target; 0 is the target itself
    pub order: usize,
    #[serde(flatten)]
    pub fingerprint: ElementFingerprint,
}

impl<X> Fingerprinter<X> {
    /// Fingerprint `target` and its ancestors
    ///
    /// Walks up until the element whose tag matches the configured stop tag
    /// (included) or until no parent element is left.
    pub fn capture_chain<E>(
        &self,
        target: &E,
    ) -> Result<Vec<CapturedElement>, <X as SafeText<E>>::Error>
    where
        E: ElementHandle,
        X: SafeText<E>,
    {
        let mut chain = Vec::new();
        let mut current = Some(target.clone());

        while let Some(element) = current {
            let fingerprint = self.fingerprint(&element)?;
            chain.push(CapturedElement {
                order: chain.len(),
                fingerprint,
            });

            if element.tag_name().eq_ignore_ascii_case(&self.config().stop_tag) {
                break;
            }
            current = element.parent_element();
        }

        tracing::debug!(len = chain.len(), "captured element chain");
        Ok(chain)
    }
}
