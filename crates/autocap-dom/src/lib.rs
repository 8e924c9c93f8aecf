//! autocap DOM - Document Object Model
//!
//! Arena-allocated DOM tree used as the host tree for element capture.
//! Nodes reference each other by [`NodeId`] instead of pointers, and tag and
//! attribute names are interned.

mod error;
mod interner;
mod node;
mod tree;

pub use error::{DomError, DomResult};
pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Namespace, Node, NodeData};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for a missing link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index of this node
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Convert a link into an `Option`
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}
