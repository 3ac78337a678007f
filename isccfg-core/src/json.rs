//! JSON output.
//!
//! Each node becomes an object. Values go under the reserved `"_value"` key
//! as an array of strings (omitted when empty), and each child becomes a
//! key holding its own object:
//!
//! ```text
//! option domain-name "example.com";      {"option": {"domain-name": {"_value": ["example.com"]}}}
//! ```
//!
//! Output is deterministic. Keys come out in first-seen order with
//! `"_value"` first, or byte-sorted with [`KeyOrder::Sorted`].

use std::io::Write;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Result;
use crate::tree::{ConfigNode, VALUE_KEY};

/// Order of keys within each JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOrder {
    /// `"_value"` first, then children in the order they first appeared.
    #[default]
    Insertion,
    /// All keys, `"_value"` included, sorted by byte value.
    Sorted,
}

/// Output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonStyle {
    /// Two-space indentation and a trailing newline.
    pub pretty: bool,
    pub key_order: KeyOrder,
}

impl Default for JsonStyle {
    fn default() -> Self {
        JsonStyle {
            pretty: true,
            key_order: KeyOrder::Insertion,
        }
    }
}

impl JsonStyle {
    /// Single-line output, insertion order.
    pub fn compact() -> Self {
        JsonStyle {
            pretty: false,
            ..Self::default()
        }
    }

    pub fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }
}

impl Serialize for ConfigNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Styled {
            node: self,
            order: KeyOrder::Insertion,
        }
        .serialize(serializer)
    }
}

/// A node paired with the key order to serialize it in.
struct Styled<'n> {
    node: &'n ConfigNode,
    order: KeyOrder,
}

enum Entry<'n> {
    Values(&'n [String]),
    Child(&'n ConfigNode),
}

impl Serialize for Styled<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let node = self.node;
        let mut entries: Vec<(&str, Entry<'_>)> = Vec::with_capacity(node.children.len() + 1);
        if !node.values.is_empty() {
            entries.push((VALUE_KEY, Entry::Values(&node.values)));
        }
        entries.extend(
            node.children
                .iter()
                .map(|(name, child)| (name.as_str(), Entry::Child(child))),
        );
        if self.order == KeyOrder::Sorted {
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        }

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, entry) in entries {
            match entry {
                Entry::Values(values) => map.serialize_entry(key, values)?,
                Entry::Child(child) => map.serialize_entry(
                    key,
                    &Styled {
                        node: child,
                        order: self.order,
                    },
                )?,
            }
        }
        map.end()
    }
}

/// Render a tree as a JSON string.
///
/// Pretty output has no trailing newline here; [`write_json`] adds one.
pub fn to_json_string(node: &ConfigNode, style: JsonStyle) -> Result<String> {
    let styled = Styled {
        node,
        order: style.key_order,
    };
    let json = if style.pretty {
        serde_json::to_string_pretty(&styled)
    } else {
        serde_json::to_string(&styled)
    };
    Ok(json.map_err(std::io::Error::from)?)
}

/// Write a tree as JSON to `writer`, followed by a newline.
pub fn write_json<W: Write>(node: &ConfigNode, mut writer: W, style: JsonStyle) -> Result<()> {
    let styled = Styled {
        node,
        order: style.key_order,
    };
    if style.pretty {
        serde_json::to_writer_pretty(&mut writer, &styled).map_err(std::io::Error::from)?;
    } else {
        serde_json::to_writer(&mut writer, &styled).map_err(std::io::Error::from)?;
    }
    writer.write_all(b"\n")?;
    Ok(())
}

/// Convert a tree into a `serde_json::Value`, keys in first-seen order.
pub fn to_value(node: &ConfigNode) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(node).map_err(std::io::Error::from)?)
}
