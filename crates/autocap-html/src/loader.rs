//! HTML5 loader implementation
//!
//! Uses html5ever's RcDom and converts it to the arena DOM.

use std::io::Read;

use autocap_dom::{DomTree, Namespace, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::{Namespace as Html5Namespace, ns, parse_document};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::HtmlError;

/// HTML5 loader
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlLoader;

impl HtmlLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse an HTML string into a DOM tree
    pub fn parse(&self, html: &str) -> Result<DomTree, HtmlError> {
        self.parse_reader(&mut html.as_bytes())
    }

    /// Parse UTF-8 HTML from a reader
    pub fn parse_reader<R: Read>(&self, reader: &mut R) -> Result<DomTree, HtmlError> {
        tracing::debug!("Parsing HTML document");

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(reader)?;

        let tree = self.convert(&dom.document)?;
        tracing::debug!("Parsed {} nodes", tree.len());
        Ok(tree)
    }

    /// Convert an RcDom document into the arena DOM
    ///
    /// Uses an explicit work stack, so nesting depth is bounded only by memory.
    fn convert(&self, document: &Handle) -> Result<DomTree, HtmlError> {
        let mut tree = DomTree::new();
        let mut stack: Vec<(Handle, NodeId)> = Vec::new();
        push_children(&mut stack, document, tree.root());

        while let Some((handle, parent)) = stack.pop() {
            match &handle.data {
                RcNodeData::Document => push_children(&mut stack, &handle, parent),
                RcNodeData::Doctype { name, .. } => {
                    let id = tree.create_doctype(name)?;
                    tree.append_child(parent, id)?;
                }
                RcNodeData::Text { contents } => {
                    let text = contents.borrow();
                    // Whitespace-only text carries nothing for capture
                    if !text.trim().is_empty() {
                        let id = tree.create_text(&text)?;
                        tree.append_child(parent, id)?;
                    }
                }
                RcNodeData::Comment { contents } => {
                    let id = tree.create_comment(contents)?;
                    tree.append_child(parent, id)?;
                }
                RcNodeData::Element { name, attrs, .. } => {
                    let id = tree.create_element_ns(&name.local, namespace_of(&name.ns))?;
                    for attr in attrs.borrow().iter() {
                        tree.set_attribute(id, &attr.name.local, &attr.value)?;
                    }
                    tree.append_child(parent, id)?;
                    push_children(&mut stack, &handle, id);
                }
                RcNodeData::ProcessingInstruction { .. } => {}
            }
        }

        Ok(tree)
    }
}

/// Queue the children of `handle` so they pop in document order
fn push_children(stack: &mut Vec<(Handle, NodeId)>, handle: &Handle, parent: NodeId) {
    stack.extend(
        handle
            .children
            .borrow()
            .iter()
            .rev()
            .map(|child| (child.clone(), parent)),
    );
}

fn namespace_of(ns: &Html5Namespace) -> Namespace {
    if *ns == ns!(html) {
        Namespace::Html
    } else if *ns == ns!(svg) {
        Namespace::Svg
    } else if *ns == ns!(mathml) {
        Namespace::MathMl
    } else {
        Namespace::Other
    }
}
