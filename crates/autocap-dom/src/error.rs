//! DOM operation errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    /// Appending would create a cycle or put a child under a leaf node
    #[error("Hierarchy request error")]
    HierarchyRequest,

    #[error("Node {0:?} already has a parent")]
    AlreadyAttached(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    /// Every index below `NodeId::NONE` is in use
    #[error("DOM arena is full")]
    ArenaFull,
}
