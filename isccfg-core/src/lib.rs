//! ISC Config Core Parser
//!
//! Parses configuration files in the ISC family syntax (ISC-DHCP-Server
//! `dhcpd.conf`, ISC-BIND9 `named.conf`) into a tree of named scopes and
//! values, and renders that tree as JSON.
//!
//! # Architecture
//!
//! - **lexer.rs** - Pull-based tokenizer (words, `{ } ; ,`, comments skipped)
//! - **builder.rs** - Tree builder: scope stack, path/value split, comma lists
//! - **tree.rs** - `ConfigNode` and its accessors
//! - **json.rs** - Deterministic JSON serialization
//! - **span.rs** - Span/Location types
//! - **options.rs** - Strictness switches
//!
//! # Example
//!
//! ```
//! use isccfg_core::{parse, to_json_string, JsonStyle};
//!
//! let root = parse(b"host printer { fixed-address 10.0.0.7; }").unwrap();
//! let json = to_json_string(&root, JsonStyle::compact()).unwrap();
//! assert_eq!(json, r#"{"host":{"printer":{"fixed-address":{"_value":["10.0.0.7"]}}}}"#);
//! ```

pub mod builder;
pub mod error;
pub mod json;
pub mod lexer;
pub mod options;
pub mod span;
pub mod token;
pub mod tree;

pub use builder::{parse, parse_reader, parse_reader_with, parse_with};
pub use error::{Error, ErrorCode, Result};
pub use json::{to_json_string, to_value, write_json, JsonStyle, KeyOrder};
pub use lexer::Lexer;
pub use options::ParseOptions;
pub use span::{Location, Span};
pub use token::{Token, TokenKind};
pub use tree::{ConfigNode, VALUE_KEY};
