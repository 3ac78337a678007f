//! Tree builder: turns the token stream into a [`ConfigNode`] tree.
//!
//! # Statement shapes
//!
//! ```text
//! a b c;              path [a b], value "c"
//! a b { ... }         open scope a, then scope b inside it
//! a b c, d, e;        path [a b], values "c" "d" "e"
//! a b c d, e f;       path [a b], values "c d" "e f"  (two words per item)
//! ```
//!
//! A comma turns the statement into a list. The builder then scans ahead to
//! the terminating `;`, and the word count of the first item after the comma
//! decides how many trailing words before the comma belong to the head
//! item. All items must have that same width.
//!
//! Scopes live in an index-based arena while building, so the scope stack
//! is a stack of plain indices. The arena is folded into an owned tree once
//! the input is exhausted.

use std::io::Read;
use std::mem;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::options::ParseOptions;
use crate::span::Span;
use crate::token::{Token, TokenKind};
use crate::tree::{ConfigNode, VALUE_KEY};

/// Parse ISC configuration text with default options.
pub fn parse(input: &[u8]) -> Result<ConfigNode> {
    parse_with(input, &ParseOptions::default())
}

/// Parse ISC configuration text.
pub fn parse_with(input: &[u8], options: &ParseOptions) -> Result<ConfigNode> {
    TreeBuilder::new(input, *options).build()
}

/// Read a whole stream, then parse it with default options.
pub fn parse_reader<R: Read>(reader: R) -> Result<ConfigNode> {
    parse_reader_with(reader, &ParseOptions::default())
}

/// Read a whole stream, then parse it.
pub fn parse_reader_with<R: Read>(mut reader: R, options: &ParseOptions) -> Result<ConfigNode> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    parse_with(&input, options)
}

// ============================================================================
// Scope arena
// ============================================================================

/// Index into the builder's scope arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ScopeId(usize);

impl ScopeId {
    const ROOT: ScopeId = ScopeId(0);

    fn new(index: usize) -> Self {
        ScopeId(index)
    }

    fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Default)]
struct ScopeData {
    children: IndexMap<String, ScopeId>,
    values: Vec<String>,
}

// ============================================================================
// TreeBuilder
// ============================================================================

/// Parser state for a single parse.
struct TreeBuilder<'a> {
    lexer: Lexer<'a>,
    options: ParseOptions,
    scopes: Vec<ScopeData>,
    /// Open scopes, root first. Never empty.
    stack: Vec<ScopeId>,
    /// Words since the last statement boundary.
    accumulated: Vec<Token<'a>>,
    /// Words per list item for the statement being finished.
    words_per_value: usize,
}

impl<'a> TreeBuilder<'a> {
    fn new(input: &'a [u8], options: ParseOptions) -> Self {
        TreeBuilder {
            lexer: Lexer::new(input),
            options,
            scopes: vec![ScopeData::default()],
            stack: vec![ScopeId::ROOT],
            accumulated: Vec::new(),
            words_per_value: 1,
        }
    }

    fn build(mut self) -> Result<ConfigNode> {
        while let Some(token) = self.lexer.next().transpose()? {
            match token.kind {
                TokenKind::Word => self.accumulated.push(token),
                TokenKind::OpenBrace => self.open_scope()?,
                TokenKind::CloseBrace => self.close_scope(token.span)?,
                TokenKind::Semicolon => self.end_statement(token.span)?,
                TokenKind::Comma => self.end_list(token.span)?,
            }
        }
        self.end_of_input()?;

        debug!(
            "parsed {} bytes into {} scopes",
            self.lexer.input().len(),
            self.scopes.len()
        );
        Ok(self.into_tree())
    }

    /// Scope every statement starts from.
    fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(ScopeId::ROOT)
    }

    /// Walk `path` from the current scope, creating missing children.
    fn descend(&mut self, path: Vec<Token<'a>>) -> Result<ScopeId> {
        let mut scope = self.current();
        for word in path {
            if word.text == VALUE_KEY {
                return Err(Error::ReservedName {
                    location: word.span.location(self.lexer.input()),
                });
            }
            scope = self.child_of(scope, word.into_text());
        }
        Ok(scope)
    }

    fn child_of(&mut self, parent: ScopeId, name: String) -> ScopeId {
        if let Some(&id) = self.scopes[parent.index()].children.get(&name) {
            return id;
        }
        let id = ScopeId::new(self.scopes.len());
        self.scopes.push(ScopeData::default());
        self.scopes[parent.index()].children.insert(name, id);
        id
    }

    fn malformed(&self, at: Span, words: usize, width: usize) -> Error {
        Error::MalformedStatement {
            location: at.location(self.lexer.input()),
            words,
            width,
        }
    }

    // ---- Token handlers ----

    fn open_scope(&mut self) -> Result<()> {
        let path = mem::take(&mut self.accumulated);
        let scope = self.descend(path)?;
        self.stack.push(scope);
        self.words_per_value = 1;
        trace!("open scope {:?} at depth {}", scope, self.stack.len() - 1);
        Ok(())
    }

    fn close_scope(&mut self, at: Span) -> Result<()> {
        if self.stack.len() <= 1 {
            return Err(Error::UnbalancedBraces {
                location: at.location(self.lexer.input()),
            });
        }
        if self.options.strict_statements && !self.accumulated.is_empty() {
            return Err(self.malformed(at, self.accumulated.len(), self.words_per_value));
        }
        let closed = self.stack.pop();
        self.words_per_value = 1;
        trace!("close scope {:?}", closed);
        Ok(())
    }

    fn end_statement(&mut self, at: Span) -> Result<()> {
        if !self.accumulated.is_empty() {
            self.commit(at, Vec::new())?;
        }
        self.words_per_value = 1;
        Ok(())
    }

    /// Handle a comma: scan the rest of the list up to `;`, then record the
    /// head item and every scanned item at the statement's path.
    fn end_list(&mut self, comma: Span) -> Result<()> {
        let mut items = Vec::new();
        let mut item: Vec<Token<'a>> = Vec::new();
        let mut width: Option<usize> = None;

        loop {
            let Some(token) = self.lexer.next().transpose()? else {
                return Err(Error::UnterminatedList {
                    location: comma.location(self.lexer.input()),
                });
            };
            match token.kind {
                TokenKind::Word => item.push(token),
                TokenKind::Comma | TokenKind::Semicolon => {
                    let words = item.len();
                    let expected = *width.get_or_insert(words);
                    if words == 0 || words != expected {
                        return Err(self.malformed(token.span, words, expected.max(1)));
                    }
                    items.push(join_words(&item));
                    item.clear();
                    if token.kind == TokenKind::Semicolon {
                        break;
                    }
                }
                TokenKind::OpenBrace | TokenKind::CloseBrace => {
                    return Err(Error::UnexpectedTokenInList {
                        found: token.kind,
                        location: token.span.location(self.lexer.input()),
                    });
                }
            }
        }

        self.words_per_value = width.unwrap_or(1);
        // A multi-word head item needs a path in front of it, otherwise the
        // split between path and head is a guess.
        if self.words_per_value > 1 && self.accumulated.len() == self.words_per_value {
            return Err(self.malformed(comma, self.accumulated.len(), self.words_per_value));
        }
        self.commit(comma, items)?;
        self.words_per_value = 1;
        Ok(())
    }

    /// Split `accumulated` into a path and a trailing value of
    /// `words_per_value` words, then append the value and `rest` to the
    /// node the path leads to.
    fn commit(&mut self, at: Span, rest: Vec<String>) -> Result<()> {
        let width = self.words_per_value;
        let words = self.accumulated.len();
        if words < width {
            return Err(self.malformed(at, words, width));
        }
        let mut path = mem::take(&mut self.accumulated);
        let value = join_words(&path.split_off(words - width));
        let target = self.descend(path)?;

        let values = &mut self.scopes[target.index()].values;
        values.push(value);
        values.extend(rest);
        Ok(())
    }

    fn end_of_input(&mut self) -> Result<()> {
        if let Some(first) = self.accumulated.first() {
            if self.options.strict_statements {
                return Err(self.malformed(first.span, self.accumulated.len(), self.words_per_value));
            }
            debug!("dropping {} unterminated word(s) at end of input", self.accumulated.len());
        }

        let open = self.stack.len() - 1;
        if open > 0 {
            if self.options.strict_scopes {
                return Err(Error::UnterminatedScope { depth: open });
            }
            debug!("end of input with {} scope(s) still open", open);
        }
        Ok(())
    }

    // ---- Finish ----

    fn into_tree(self) -> ConfigNode {
        let mut scopes = self.scopes;
        fold(&mut scopes, ScopeId::ROOT)
    }
}

/// Move a scope and its descendants out of the arena into an owned node.
fn fold(scopes: &mut [ScopeData], id: ScopeId) -> ConfigNode {
    let data = mem::take(&mut scopes[id.index()]);
    let children = data
        .children
        .into_iter()
        .map(|(name, child)| (name, fold(scopes, child)))
        .collect();
    ConfigNode {
        children,
        values: data.values,
    }
}

fn join_words(words: &[Token<'_>]) -> String {
    let mut joined = String::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            joined.push(' ');
        }
        joined.push_str(&word.text);
    }
    joined
}

// ============================================================================
// Tests
// ============================================================================
