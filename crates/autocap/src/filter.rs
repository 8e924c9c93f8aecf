//! Element filters over capture chains
//!
//! A filter list describes an element path: filter `i` constrains the
//! chain element with `order == i`. Counting the chains that match gives
//! the volume of an element selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chain::CapturedElement;
use crate::record::ElementRecord;

/// Constraints on one element; unset fields match anything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementFilter {
    pub tag_name: Option<String>,
    pub text: Option<String>,
    pub href: Option<String>,
    pub attr_id: Option<String>,
    /// Exact class list, order included
    pub attr_class: Option<Vec<String>>,
    pub nth_child: Option<u32>,
    pub nth_of_type: Option<u32>,
    /// `attr__`-prefixed pairs that must all be present with these values
    pub attributes: BTreeMap<String, String>,
}

impl ElementFilter {
    pub fn matches(&self, record: &ElementRecord) -> bool {
        fn field<T: PartialEq + ?Sized>(want: Option<&T>, have: Option<&T>) -> bool {
            want.is_none_or(|w| have == Some(w))
        }

        field(self.tag_name.as_deref(), Some(record.tag_name.as_str()))
            && field(self.text.as_deref(), record.text.as_deref())
            && field(self.href.as_deref(), record.href.as_deref())
            && field(self.attr_id.as_deref(), record.attr_id.as_deref())
            && field(self.attr_class.as_deref(), record.attr_class.as_deref())
            && field(self.nth_child.as_ref(), Some(&record.nth_child))
            && field(self.nth_of_type.as_ref(), Some(&record.nth_of_type))
            && self
                .attributes
                .iter()
                .all(|(k, v)| record.attributes.get(k) == Some(v))
    }
}

/// Whether every filter matches the chain element at its index
pub fn chain_matches(chain: &[CapturedElement], filters: &[ElementFilter]) -> bool {
    filters.iter().enumerate().all(|(index, filter)| {
        chain
            .iter()
            .find(|c| c.order == index)
            .is_some_and(|c| filter.matches(&ElementRecord::from_captured(c)))
    })
}

/// Number of chains matching the filter list
pub fn count_matching<'a, I>(chains: I, filters: &[ElementFilter]) -> usize
where
    I: IntoIterator<Item = &'a [CapturedElement]>,
{
    chains
        .into_iter()
        .filter(|chain| chain_matches(chain, filters))
        .count()
}

/// Matching chain count for each named filter list
pub fn volumes<'a, I>(
    chains: I,
    queries: &BTreeMap<String, Vec<ElementFilter>>,
) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a [CapturedElement]>,
{
    let chains: Vec<&[CapturedElement]> = chains.into_iter().collect();
    queries
        .iter()
        .map(|(name, filters)| {
            let count = count_matching(chains.iter().copied(), filters);
            tracing::debug!(query = %name, count, "element volume");
            (name.clone(), count)
        })
        .collect()
}
