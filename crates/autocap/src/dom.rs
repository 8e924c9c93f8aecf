//! Element handles over the arena DOM

use autocap_dom::{DomTree, ElementData, Namespace, NodeId};

use crate::handle::{ClassValue, ElementHandle, NodeHandle};
use crate::{Error, Result};

/// Any node of a [`DomTree`]
#[derive(Debug, Clone, Copy)]
pub struct DomNode<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl<'a> DomNode<'a> {
    pub fn new(tree: &'a DomTree, id: NodeId) -> Option<Self> {
        tree.get(id).map(|_| Self { tree, id })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<'a> NodeHandle for DomNode<'a> {
    type Element = DomElement<'a>;

    fn as_element(&self) -> Option<DomElement<'a>> {
        DomElement::new(self.tree, self.id).ok()
    }

    fn previous_sibling(&self) -> Option<Self> {
        let prev = self.tree.prev_sibling(self.id)?;
        Some(Self {
            tree: self.tree,
            id: prev,
        })
    }
}

/// An element of a [`DomTree`]
#[derive(Debug, Clone, Copy)]
pub struct DomElement<'a> {
    tree: &'a DomTree,
    id: NodeId,
    data: &'a ElementData,
}

impl<'a> DomElement<'a> {
    /// Wrap a node, failing if it is missing or not an element
    pub fn new(tree: &'a DomTree, id: NodeId) -> Result<Self> {
        let node = tree
            .get(id)
            .ok_or_else(|| Error::ElementNotFound(format!("node {}", id.index())))?;
        let data = node.as_element().ok_or(Error::NotAnElement(id))?;
        Ok(Self { tree, id, data })
    }

    /// First element whose `id` attribute equals `value`
    pub fn by_id(tree: &'a DomTree, value: &str) -> Result<Self> {
        let id = tree
            .find_by_id(value)
            .ok_or_else(|| Error::ElementNotFound(format!("#{value}")))?;
        Self::new(tree, id)
    }

    /// The `index`-th element (0-based, document order) with the given tag
    pub fn by_tag(tree: &'a DomTree, tag: &str, index: usize) -> Result<Self> {
        let id = tree
            .elements_by_tag(tag)
            .get(index)
            .copied()
            .ok_or_else(|| Error::ElementNotFound(format!("{tag}[{index}]")))?;
        Self::new(tree, id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a DomTree {
        self.tree
    }
}

impl<'a> ElementHandle for DomElement<'a> {
    type Node = DomNode<'a>;

    fn tag_name(&self) -> &str {
        self.tree.resolve(self.data.tag)
    }

    fn class_value(&self) -> ClassValue<'_> {
        let class = self.tree.get_attribute(self.id, "class");
        match self.data.namespace {
            Namespace::Svg => ClassValue::Animated { base_val: class },
            Namespace::Html | Namespace::MathMl | Namespace::Other => {
                ClassValue::Plain(class.unwrap_or(""))
            }
        }
    }

    fn attributes(&self) -> impl DoubleEndedIterator<Item = (&str, &str)> {
        let tree = self.tree;
        self.data
            .attrs
            .iter()
            .map(move |a| (tree.resolve(a.name), a.value.as_str()))
    }

    fn as_node(&self) -> DomNode<'a> {
        DomNode {
            tree: self.tree,
            id: self.id,
        }
    }

    fn parent_element(&self) -> Option<Self> {
        let parent = self.tree.parent(self.id)?;
        Self::new(self.tree, parent).ok()
    }

    fn child_texts(&self) -> impl Iterator<Item = &str> {
        self.tree.children(self.id).filter_map(|(_, node)| node.as_text())
    }

    fn direct_previous_element_sibling(&self) -> Option<Self> {
        let prev = self.tree.prev_element_sibling(self.id)?;
        Self::new(self.tree, prev).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve_class;

    fn sample() -> (DomTree, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div").unwrap();
        tree.append_child(tree.root(), div).unwrap();
        let text = tree.create_text("hello").unwrap();
        tree.append_child(div, text).unwrap();
        let svg = tree.create_element_ns("svg", Namespace::Svg).unwrap();
        tree.append_child(div, svg).unwrap();
        (tree, div, svg)
    }

    #[test]
    fn test_text_node_is_not_an_element() {
        let (tree, div, _) = sample();
        let text = tree.get(div).unwrap().first_child;
        assert!(matches!(
            DomElement::new(&tree, text),
            Err(Error::NotAnElement(id)) if id == text
        ));
    }

    #[test]
    fn test_svg_class_is_animated() {
        let (mut tree, _, svg) = sample();
        tree.set_attribute(svg, "class", "icon big").unwrap();
        let el = DomElement::new(&tree, svg).unwrap();
        assert_eq!(
            el.class_value(),
            ClassValue::Animated {
                base_val: Some("icon big")
            }
        );
        assert_eq!(resolve_class(&el), "icon big");
    }

    #[test]
    fn test_html_class_without_attribute_is_empty() {
        let (tree, div, _) = sample();
        let el = DomElement::new(&tree, div).unwrap();
        assert_eq!(el.class_value(), ClassValue::Plain(""));
    }

    #[test]
    fn test_navigation() {
        let (tree, div, svg) = sample();
        let el = DomElement::new(&tree, svg).unwrap();
        assert_eq!(el.parent_element().map(|p| p.id()), Some(div));
        assert!(el.previous_element_sibling().is_none());

        let parent = DomElement::new(&tree, div).unwrap();
        assert_eq!(parent.child_texts().collect::<Vec<_>>(), vec!["hello"]);
        // The document node is not an element
        assert!(parent.parent_element().is_none());
    }

    #[test]
    fn test_lookup_errors() {
        let (tree, _, _) = sample();
        assert!(matches!(
            DomElement::by_id(&tree, "nope"),
            Err(Error::ElementNotFound(s)) if s == "#nope"
        ));
        assert!(DomElement::by_tag(&tree, "div", 1).is_err());
        assert!(DomElement::by_tag(&tree, "DIV", 0).is_ok());
    }
}
