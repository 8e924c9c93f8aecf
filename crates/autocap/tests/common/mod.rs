//! Minimal host tree without a previous-element-sibling link
//!
//! Sibling navigation over this tree always takes the generic walk, which
//! is the path hosts without a direct link depend on.

#![allow(dead_code)]

use autocap::{ClassValue, ElementHandle, NodeHandle};

#[derive(Debug, Clone)]
pub enum Class {
    Plain(String),
    Animated(Option<String>),
    Unsupported,
}

#[derive(Debug)]
enum Kind {
    Element {
        tag: String,
        class: Class,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Comment,
}

#[derive(Debug)]
struct FixtureNode {
    parent: Option<usize>,
    prev: Option<usize>,
    last_child: Option<usize>,
    children: Vec<usize>,
    kind: Kind,
}

#[derive(Debug)]
pub struct Fixture {
    nodes: Vec<FixtureNode>,
}

impl Fixture {
    /// A tree whose root is a `<body>` element (index 0)
    pub fn new() -> Self {
        let mut fixture = Self { nodes: Vec::new() };
        fixture.push(None, Kind::Element {
            tag: "body".into(),
            class: Class::Plain(String::new()),
            attrs: Vec::new(),
        });
        fixture
    }

    fn push(&mut self, parent: Option<usize>, kind: Kind) -> usize {
        let idx = self.nodes.len();
        let prev = parent.and_then(|p| self.nodes[p].last_child);
        self.nodes.push(FixtureNode {
            parent,
            prev,
            last_child: None,
            children: Vec::new(),
            kind,
        });
        if let Some(p) = parent {
            self.nodes[p].last_child = Some(idx);
            self.nodes[p].children.push(idx);
        }
        idx
    }

    pub fn element(&mut self, parent: usize, tag: &str) -> usize {
        self.element_with(parent, tag, Class::Plain(String::new()), &[])
    }

    pub fn element_with(
        &mut self,
        parent: usize,
        tag: &str,
        class: Class,
        attrs: &[(&str, &str)],
    ) -> usize {
        self.push(Some(parent), Kind::Element {
            tag: tag.into(),
            class,
            attrs: attrs
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        })
    }

    pub fn text(&mut self, parent: usize, content: &str) -> usize {
        self.push(Some(parent), Kind::Text(content.into()))
    }

    pub fn comment(&mut self, parent: usize) -> usize {
        self.push(Some(parent), Kind::Comment)
    }

    pub fn get(&self, idx: usize) -> FixtureElement<'_> {
        assert!(matches!(self.nodes[idx].kind, Kind::Element { .. }));
        FixtureElement { fixture: self, idx }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixtureNodeRef<'a> {
    fixture: &'a Fixture,
    idx: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct FixtureElement<'a> {
    fixture: &'a Fixture,
    idx: usize,
}

impl<'a> FixtureElement<'a> {
    fn node(&self) -> &'a FixtureNode {
        &self.fixture.nodes[self.idx]
    }
}

impl<'a> NodeHandle for FixtureNodeRef<'a> {
    type Element = FixtureElement<'a>;

    fn as_element(&self) -> Option<FixtureElement<'a>> {
        matches!(self.fixture.nodes[self.idx].kind, Kind::Element { .. }).then_some(
            FixtureElement {
                fixture: self.fixture,
                idx: self.idx,
            },
        )
    }

    fn previous_sibling(&self) -> Option<Self> {
        let prev = self.fixture.nodes[self.idx].prev?;
        Some(Self {
            fixture: self.fixture,
            idx: prev,
        })
    }
}

impl<'a> ElementHandle for FixtureElement<'a> {
    type Node = FixtureNodeRef<'a>;

    fn tag_name(&self) -> &str {
        match &self.node().kind {
            Kind::Element { tag, .. } => tag.as_str(),
            _ => "",
        }
    }

    fn class_value(&self) -> ClassValue<'_> {
        match &self.node().kind {
            Kind::Element { class, .. } => match class {
                Class::Plain(s) => ClassValue::Plain(s),
                Class::Animated(base) => ClassValue::Animated {
                    base_val: base.as_deref(),
                },
                Class::Unsupported => ClassValue::Unsupported,
            },
            _ => ClassValue::Unsupported,
        }
    }

    fn attributes(&self) -> impl DoubleEndedIterator<Item = (&str, &str)> {
        let attrs: &'a [(String, String)] = match &self.node().kind {
            Kind::Element { attrs, .. } => attrs,
            _ => &[],
        };
        attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    fn as_node(&self) -> FixtureNodeRef<'a> {
        FixtureNodeRef {
            fixture: self.fixture,
            idx: self.idx,
        }
    }

    fn parent_element(&self) -> Option<Self> {
        let parent = self.node().parent?;
        FixtureNodeRef {
            fixture: self.fixture,
            idx: parent,
        }
        .as_element()
    }

    fn child_texts(&self) -> impl Iterator<Item = &str> {
        let fixture = self.fixture;
        self.node()
            .children
            .iter()
            .filter_map(move |&c| match &fixture.nodes[c].kind {
                Kind::Text(t) => Some(t.as_str()),
                _ => None,
            })
    }
}
