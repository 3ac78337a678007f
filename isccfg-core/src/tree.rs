//! The configuration tree.
//!
//! Every `{ }` scope and every path component becomes a [`ConfigNode`]. A
//! node holds named children (in first-seen order) and the values recorded
//! directly at it.
//!
//! # Example
//!
//! ```
//! use isccfg_core::parse;
//!
//! let input = b"subnet 10.0.0.0 netmask 255.255.255.0 {\n  option domain-name-servers ns1.example.org, ns2.example.org;\n}\n";
//! let root = parse(input).unwrap();
//!
//! let subnet = root.lookup(&["subnet", "10.0.0.0", "netmask", "255.255.255.0"]).unwrap();
//! let servers = subnet.lookup(&["option", "domain-name-servers"]).unwrap();
//! assert_eq!(servers.values(), ["ns1.example.org", "ns2.example.org"]);
//! assert_eq!(
//!     root.unroll(),
//!     ["subnet", "10.0.0.0", "netmask", "255.255.255.0", "option", "domain-name-servers"]
//! );
//! ```

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Reserved JSON key holding a node's values.
pub const VALUE_KEY: &str = "_value";

/// One scope level of the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigNode {
    pub(crate) children: IndexMap<String, ConfigNode>,
    pub(crate) values: Vec<String>,
}

impl ConfigNode {
    /// Create an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Values recorded directly at this node, in source order.
    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Named child, or [`Error::NoSuchChild`].
    pub fn child(&self, name: &str) -> Result<&ConfigNode> {
        self.get(name).ok_or_else(|| Error::NoSuchChild {
            name: name.to_string(),
        })
    }

    /// Named child, if present.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&ConfigNode> {
        self.children.get(name)
    }

    /// Follow a path of child names.
    ///
    /// Fails with [`Error::NoSuchChild`] naming the first missing component.
    pub fn lookup(&self, path: &[&str]) -> Result<&ConfigNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Children in first-seen order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &ConfigNode)> + '_ {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Child at `index` in first-seen order.
    pub fn child_at(&self, index: usize) -> Option<(&str, &ConfigNode)> {
        self.children
            .get_index(index)
            .map(|(name, node)| (name.as_str(), node))
    }

    /// The first child and its name.
    ///
    /// Only meaningful for nodes known to have exactly one child, such as
    /// `zone "example.com" { ... }` headers. With several children this is
    /// the first one declared; use [`child_at`](Self::child_at) or
    /// [`children`](Self::children) to choose explicitly.
    pub fn unwrap_single(&self) -> Option<(&str, &ConfigNode)> {
        self.child_at(0)
    }

    /// Names along the chain of single-child nodes starting here.
    ///
    /// Stops at the first node with zero or several children. For
    /// `a b c { x 1; }` unrolling the root gives `["a", "b", "c", "x"]`.
    pub fn unroll(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut node = self;
        while node.children.len() == 1 {
            let Some((name, child)) = node.unwrap_single() else {
                break;
            };
            names.push(name.to_string());
            node = child;
        }
        names
    }

    /// Depth-first, pre-order traversal of all descendants.
    ///
    /// The visitor receives the path from this node (excluding this node)
    /// and the descendant. This node itself is visited first with an empty
    /// path.
    pub fn walk<'n, F>(&'n self, mut visit: F)
    where
        F: FnMut(&[&'n str], &'n ConfigNode),
    {
        let mut path: Vec<&'n str> = Vec::new();
        self.walk_inner(&mut path, &mut visit);
    }

    fn walk_inner<'n, F>(&'n self, path: &mut Vec<&'n str>, visit: &mut F)
    where
        F: FnMut(&[&'n str], &'n ConfigNode),
    {
        visit(path.as_slice(), self);
        for (name, child) in &self.children {
            path.push(name);
            child.walk_inner(path, visit);
            path.pop();
        }
    }

    /// Number of direct children.
    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when the node has neither children nor values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.values.is_empty()
    }
}

impl std::str::FromStr for ConfigNode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::builder::parse(s.as_bytes())
    }
}
