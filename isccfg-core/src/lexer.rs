//! Tokenizer for ISC-style configuration text.
//!
//! Pull-based: the tree builder asks for one token at a time. Comments and
//! whitespace never surface as tokens.
//!
//! Rules, tried in order at every position:
//!
//! 1. `# ...` / `// ...` to end of line - skipped
//! 2. whitespace (space, tab, CR, LF) - skipped
//! 3. `{` `}` `;` `,` - punctuation
//! 4. `"..."` - quoted word, quotes stripped, escapes kept verbatim
//! 5. `[A-Za-z0-9_.=-]+` - bareword
//!
//! Anything else is [`Error::UnexpectedCharacter`].

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::span::{Location, Span};
use crate::token::{Token, TokenKind};

static PUNCTUATION: phf::Map<u8, TokenKind> = phf::phf_map! {
    b'{' => TokenKind::OpenBrace,
    b'}' => TokenKind::CloseBrace,
    b';' => TokenKind::Semicolon,
    b',' => TokenKind::Comma,
};

const fn bareword_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut b = 0;
    while b < 256 {
        let c = b as u8;
        table[b] = c.is_ascii_alphanumeric() || matches!(c, b'_' | b'-' | b'.' | b'=');
        b += 1;
    }
    table
}

static BAREWORD: [bool; 256] = bareword_table();

#[inline]
fn is_bareword_byte(b: u8) -> bool {
    BAREWORD[b as usize]
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Lazy token stream over an input buffer.
///
/// Yields `Ok(Token)` until the input is exhausted. After the first error
/// the lexer is finished and only yields `None`.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Lexer {
            input,
            pos: 0,
            failed: false,
        }
    }

    /// The full input this lexer reads from.
    #[inline]
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// Resolve a byte offset to a line/column location.
    pub fn location(&self, offset: usize) -> Location {
        Location::from_offset(self.input, offset)
    }

    /// Skip comments and whitespace. Returns once `pos` is at a
    /// significant byte or at end of input.
    fn skip_trivia(&mut self) {
        while let Some(&b) = self.input.get(self.pos) {
            if is_whitespace(b) {
                self.pos += 1;
            } else if b == b'#' || (b == b'/' && self.input.get(self.pos + 1) == Some(&b'/')) {
                let rest = &self.input[self.pos..];
                self.pos += memchr::memchr(b'\n', rest).map_or(rest.len(), |nl| nl + 1);
            } else {
                break;
            }
        }
    }

    /// Scan a quoted word starting at the opening quote.
    fn quoted(&mut self) -> Result<Token<'a>> {
        let start = self.pos;
        let mut i = start + 1;
        loop {
            match memchr::memchr2(b'"', b'\\', &self.input[i..]) {
                Some(rel) if self.input[i + rel] == b'\\' => {
                    // The escaped byte is part of the word whatever it is.
                    i += rel + 2;
                    if i > self.input.len() {
                        break;
                    }
                }
                Some(rel) => {
                    let end = i + rel + 1;
                    self.pos = end;
                    let text = bytes_to_cow(&self.input[start + 1..end - 1]);
                    return Ok(Token::new(TokenKind::Word, text, Span::new(start, end)));
                }
                None => break,
            }
        }
        Err(self.unexpected(start))
    }

    fn bareword(&mut self) -> Token<'a> {
        let start = self.pos;
        let len = self.input[start..]
            .iter()
            .position(|&b| !is_bareword_byte(b))
            .unwrap_or(self.input.len() - start);
        self.pos = start + len;
        let text = bytes_to_cow(&self.input[start..self.pos]);
        Token::new(TokenKind::Word, text, Span::new(start, self.pos))
    }

    fn unexpected(&self, offset: usize) -> Error {
        // A UTF-8 character is at most 4 bytes; take the longest valid prefix.
        let tail = &self.input[offset..self.input.len().min(offset + 4)];
        let ch = (1..=tail.len())
            .rev()
            .find_map(|n| std::str::from_utf8(&tail[..n]).ok())
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        Error::UnexpectedCharacter {
            ch,
            location: self.location(offset),
        }
    }

    fn next_token(&mut self) -> Option<Result<Token<'a>>> {
        self.skip_trivia();
        let &b = self.input.get(self.pos)?;

        if let Some(&kind) = PUNCTUATION.get(&b) {
            let start = self.pos;
            self.pos += 1;
            let text = bytes_to_cow(&self.input[start..self.pos]);
            return Some(Ok(Token::new(kind, text, Span::new(start, self.pos))));
        }
        if b == b'"' {
            return Some(self.quoted());
        }
        if is_bareword_byte(b) {
            return Some(Ok(self.bareword()));
        }
        Some(Err(self.unexpected(self.pos)))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_token();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Convert bytes to Cow<str>, using borrowed if valid UTF-8.
fn bytes_to_cow(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
