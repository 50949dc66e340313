//! Minimal document-tree values and their canonical text form.

use std::collections::BTreeMap;

/// A node of a markup document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmlNode {
    Document {
        root: Box<XmlNode>,
    },
    Element {
        name: String,
        attributes: BTreeMap<String, String>,
        children: Vec<XmlNode>,
    },
    Text(String),
}

impl XmlNode {
    pub fn document(root: XmlNode) -> Self {
        XmlNode::Document {
            root: Box::new(root),
        }
    }

    pub fn element(name: impl Into<String>) -> Self {
        XmlNode::Element {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        XmlNode::Text(text.into())
    }

    /// Builder: set an attribute. No-op on non-element nodes.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let XmlNode::Element { attributes, .. } = &mut self {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Builder: append a child. No-op on non-element nodes.
    pub fn child(mut self, node: XmlNode) -> Self {
        if let XmlNode::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    pub fn is_document(&self) -> bool {
        matches!(self, XmlNode::Document { .. })
    }

    /// Canonical markup: attributes sorted, whitespace-only text dropped,
    /// one element per line indented by two spaces, text-only content inline.
    /// Any other text is kept verbatim, surrounding whitespace included.
    pub fn canonical_text(&self) -> String {
        let mut out = String::new();
        match self {
            XmlNode::Document { root } => {
                out.push_str("<?xml version=\"1.0\"?>\n");
                write_node(root, 0, &mut out);
            }
            node => write_node(node, 0, &mut out),
        }
        out
    }
}

fn write_node(node: &XmlNode, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    match node {
        XmlNode::Document { root } => write_node(root, depth, out),
        XmlNode::Text(text) => {
            out.push_str(&pad);
            out.push_str(&escape(text, false));
        }
        XmlNode::Element {
            name,
            attributes,
            children,
        } => {
            out.push_str(&pad);
            out.push('<');
            out.push_str(name);
            for (key, value) in attributes {
                out.push_str(&format!(" {key}=\"{}\"", escape(value, true)));
            }
            out.push('>');
            let children: Vec<&XmlNode> = children
                .iter()
                .filter(|c| !matches!(c, XmlNode::Text(t) if t.trim().is_empty()))
                .collect();
            if children.iter().all(|c| matches!(c, XmlNode::Text(_))) {
                for child in children {
                    if let XmlNode::Text(text) = child {
                        out.push_str(&escape(text, false));
                    }
                }
            } else {
                for child in children {
                    out.push('\n');
                    write_node(child, depth + 1, out);
                }
                out.push('\n');
                out.push_str(&pad);
            }
            out.push_str(&format!("</{name}>"));
        }
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
