//! DOM Tree (arena-based allocation)

use crate::node::{ElementData, Namespace, Node, NodeData};
use crate::{DomError, DomResult, InternedString, NodeId, StringInterner};

/// Arena-based DOM tree
///
/// Node 0 is always the document node.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            interner: StringInterner::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree, including the document node
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned name
    #[inline]
    pub fn resolve(&self, id: InternedString) -> &str {
        self.interner.get(id)
    }

    fn push(&mut self, node: Node) -> DomResult<NodeId> {
        let id = id_for_index(self.nodes.len())?;
        self.nodes.push(node);
        Ok(id)
    }

    /// Create a detached HTML element
    pub fn create_element(&mut self, tag: &str) -> DomResult<NodeId> {
        self.create_element_ns(tag, Namespace::Html)
    }

    /// Create a detached element in the given namespace
    pub fn create_element_ns(&mut self, tag: &str, namespace: Namespace) -> DomResult<NodeId> {
        let tag = self.interner.intern(tag);
        self.push(Node::new(NodeData::Element(ElementData::new(tag, namespace))))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> DomResult<NodeId> {
        self.push(Node::new(NodeData::Text(content.to_string())))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> DomResult<NodeId> {
        self.push(Node::new(NodeData::Comment(content.to_string())))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str) -> DomResult<NodeId> {
        self.push(Node::new(NodeData::Doctype {
            name: name.to_string(),
        }))
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        if !parent_node.is_container() {
            return Err(DomError::HierarchyRequest);
        }
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;
        if matches!(child_node.data, NodeData::Document) {
            return Err(DomError::HierarchyRequest);
        }
        if child_node.parent.is_valid() {
            return Err(DomError::AlreadyAttached(child));
        }

        // Refuse to make a node its own ancestor; a leaf can only be its own
        if parent == child {
            return Err(DomError::HierarchyRequest);
        }
        if child_node.first_child.is_valid() {
            let mut ancestor = parent;
            while ancestor.is_valid() {
                if ancestor == child {
                    return Err(DomError::HierarchyRequest);
                }
                ancestor = self.nodes[ancestor.index()].parent;
            }
        }

        let last = self.nodes[parent.index()].last_child;
        let prev_element = match self.get(last) {
            Some(node) if node.is_element() => last,
            Some(node) => node.prev_element_sibling,
            None => NodeId::NONE,
        };

        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
            node.prev_element_sibling = prev_element;
        }

        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;

        tracing::trace!(
            parent = parent.index(),
            child = child.index(),
            prev_element = ?prev_element.to_option(),
            "append_child"
        );
        Ok(child)
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> DomResult<()> {
        let name = self.interner.intern(name);
        let node = self.get_mut(element).ok_or(DomError::NotFound(element))?;
        let elem = node.as_element_mut().ok_or(DomError::NotAnElement(element))?;
        elem.set_attr(name, value.to_string());
        Ok(())
    }

    /// Get an attribute value by name
    pub fn get_attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        let name = self.interner.lookup(name)?;
        self.get(element)?.as_element()?.get_attr(name)
    }

    /// Tag name of an element, as written in the source
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        Some(self.resolve(elem.tag))
    }

    /// Attributes of an element as `(name, value)` pairs in declaration order
    pub fn attributes(&self, id: NodeId) -> impl DoubleEndedIterator<Item = (&str, &str)> + '_ {
        self.get(id)
            .and_then(Node::as_element)
            .map(|e| e.attrs.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |a| (self.resolve(a.name), a.value.as_str()))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.to_option()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.prev_sibling.to_option()
    }

    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.prev_element_sibling.to_option()
    }

    /// Iterate the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Iterate all descendants of a node in document order (node excluded)
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// First element in document order whose `id` attribute equals `value`
    pub fn find_by_id(&self, value: &str) -> Option<NodeId> {
        let id_attr = self.interner.lookup("id")?;
        self.descendants(self.root())
            .find(|&(_, node)| {
                node.as_element()
                    .and_then(|e| e.get_attr(id_attr))
                    .is_some_and(|v| v == value)
            })
            .map(|(id, _)| id)
    }

    /// All elements with the given tag (ASCII case-insensitive), in document order
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .filter(|&(_, node)| {
                node.as_element()
                    .is_some_and(|e| self.resolve(e.tag).eq_ignore_ascii_case(tag))
            })
            .map(|(id, _)| id)
            .collect()
    }
}

/// Id for the node stored at arena index `index`; never the `NONE` sentinel
fn id_for_index(index: usize) -> DomResult<NodeId> {
    u32::try_from(index)
        .ok()
        .map(NodeId)
        .filter(|id| id.is_valid())
        .ok_or(DomError::ArenaFull)
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over the descendants of a node
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut cur = id;
            loop {
                if cur == self.root {
                    break NodeId::NONE;
                }
                let Some(cur_node) = self.tree.get(cur) else {
                    break NodeId::NONE;
                };
                if cur_node.next_sibling.is_valid() {
                    break cur_node.next_sibling;
                }
                cur = cur_node.parent;
            }
        };

        Some((id, node))
    }
}
