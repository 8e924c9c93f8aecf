//! Element handle capability
//!
//! The fingerprinter reads the host tree only through these two traits, so
//! any DOM-like structure can be captured: the arena DOM in this workspace,
//! a test fixture, or a binding to a live document.

/// Shape of an element's class attribute as the host exposes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassValue<'a> {
    /// Plain class string (HTML elements)
    Plain(&'a str),
    /// Reflected/animated value whose base value may be missing (SVG elements)
    Animated { base_val: Option<&'a str> },
    /// Any other representation; resolves to no classes
    Unsupported,
}

/// Any node in the host tree: element, text, comment, ...
pub trait NodeHandle: Clone {
    type Element: ElementHandle;

    /// The element behind this node, if it is one
    fn as_element(&self) -> Option<Self::Element>;

    /// Previous sibling of any node type
    fn previous_sibling(&self) -> Option<Self>;
}

/// An element node in the host tree
pub trait ElementHandle: Clone {
    type Node: NodeHandle<Element = Self>;

    /// Tag identifier exactly as the host reports it
    fn tag_name(&self) -> &str;

    fn class_value(&self) -> ClassValue<'_>;

    /// Attributes in declaration order
    fn attributes(&self) -> impl DoubleEndedIterator<Item = (&str, &str)>;

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes().find(|&(n, _)| n == name).map(|(_, v)| v)
    }

    fn as_node(&self) -> Self::Node;

    fn parent_element(&self) -> Option<Self>;

    /// Contents of the direct child text nodes, in order
    fn child_texts(&self) -> impl Iterator<Item = &str>;

    /// Direct link to the previous element sibling, for hosts that keep one
    fn direct_previous_element_sibling(&self) -> Option<Self> {
        None
    }

    /// Previous sibling that is an element
    ///
    /// Uses the direct link when the host provides one, otherwise walks raw
    /// previous siblings and skips non-element nodes.
    fn previous_element_sibling(&self) -> Option<Self> {
        if let Some(el) = self.direct_previous_element_sibling() {
            return Some(el);
        }
        let mut node = self.as_node().previous_sibling();
        while let Some(current) = node {
            if let Some(el) = current.as_element() {
                return Some(el);
            }
            node = current.previous_sibling();
        }
        None
    }
}

/// Resolve an element's class attribute to a single string
pub fn resolve_class<E: ElementHandle>(element: &E) -> &str {
    match element.class_value() {
        ClassValue::Plain(s) => s,
        ClassValue::Animated { base_val } => base_val
            .filter(|s| !s.is_empty())
            .or_else(|| element.attribute("class"))
            .unwrap_or(""),
        ClassValue::Unsupported => "",
    }
}
