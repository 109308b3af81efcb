//! Schema-less document trees.
//!
//! [`parse_tree`](crate::parse_tree) reads any well-formed ATV document into [`Node`]s
//! without an object store, which is handy for inspecting files, normalizing their layout
//! and dumping them to other formats through `serde`.
//!
//! ```rust
//! use atv::{parse_tree, Content};
//!
//! let nodes = parse_tree("win = TWindow { width = 640 }").unwrap();
//! assert_eq!(nodes[0].attribute.as_deref(), Some("win"));
//! match &nodes[0].content {
//!     Content::Group { type_name, children } => {
//!         assert_eq!(type_name.as_deref(), Some("TWindow"));
//!         assert_eq!(children[0].as_value(), Some("640"));
//!     }
//!     Content::Value(_) => panic!("expected a group"),
//! }
//! ```

use crate::parser::{Event, Interpreter, Parser};
use crate::{OutputStream, Result};
use serde::Serialize;

/// One entry of a document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(flatten)]
    pub content: Content,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Content {
    Value(String),
    Group {
        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        type_name: Option<String>,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn value(attribute: Option<&str>, value: &str) -> Self {
        Node {
            attribute: attribute.map(str::to_string),
            content: Content::Value(value.to_string()),
        }
    }

    pub fn group(attribute: Option<&str>, type_name: Option<&str>, children: Vec<Node>) -> Self {
        Node {
            attribute: attribute.map(str::to_string),
            content: Content::Group {
                type_name: type_name.map(str::to_string),
                children,
            },
        }
    }

    pub fn as_value(&self) -> Option<&str> {
        match &self.content {
            Content::Value(value) => Some(value),
            Content::Group { .. } => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match &self.content {
            Content::Group { children, .. } => children,
            Content::Value(_) => &[],
        }
    }

    /// First child whose attribute is `name`.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children()
            .iter()
            .find(|child| child.attribute.as_deref() == Some(name))
    }

    /// Renders this node and its children.
    pub fn store(&self, out: &mut OutputStream) {
        match &self.content {
            Content::Value(value) => match &self.attribute {
                Some(attribute) => out.store(attribute, value),
                None => out.store_value(value),
            },
            Content::Group {
                type_name,
                children,
            } => {
                out.start_group(self.attribute.as_deref(), type_name.as_deref());
                for child in children {
                    child.store(out);
                }
                out.end_group();
            }
        }
    }
}

/// Interpreter collecting the entries of one scope; nested groups are handed to a fresh
/// builder each.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

impl Interpreter for TreeBuilder {
    fn interpret(&mut self, parser: &mut Parser) -> Result<bool> {
        match parser.what() {
            Event::Start | Event::Finished => {}
            Event::Value => {
                let node = Node::value(parser.attribute(), parser.value().unwrap_or(""));
                self.nodes.push(node);
            }
            Event::Group => {
                let attribute = parser.attribute().map(str::to_string);
                let type_name = parser.type_name().map(str::to_string);
                let mut nested = TreeBuilder::new();
                parser.parse(&mut nested)?;
                self.nodes.push(Node::group(
                    attribute.as_deref(),
                    type_name.as_deref(),
                    nested.nodes,
                ));
            }
        }
        Ok(true)
    }
}
