//! Tokens - the output of the lexer.
//!
//! ISC configuration syntax has only five token kinds: words (bare or
//! quoted) and four punctuation characters. Tokens borrow their text from
//! the input buffer whenever possible.

use std::borrow::Cow;
use std::fmt;

use crate::span::Span;

/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Bareword or de-quoted string.
    Word,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
}

impl TokenKind {
    /// Human-readable name, used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::OpenBrace => "'{'",
            Self::CloseBrace => "'}'",
            Self::Semicolon => "';'",
            Self::Comma => "','",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single token.
///
/// For quoted words `text` excludes the surrounding quotes but keeps any
/// backslash escapes verbatim. `span` always covers the full lexeme,
/// quotes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: Cow<'a, str>,
    pub span: Span,
}

impl<'a> Token<'a> {
    #[inline]
    pub fn new(kind: TokenKind, text: Cow<'a, str>, span: Span) -> Self {
        Token { kind, text, span }
    }

    /// Take the token text as an owned string.
    pub fn into_text(self) -> String {
        self.text.into_owned()
    }
}
