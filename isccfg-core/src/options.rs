//! Parse policy.
//!
//! The defaults are lenient: a file may end with scopes still open, and
//! words missing their `;` are not reported. The strict flags turn those
//! leniencies into errors.

/// Options controlling how permissive the tree builder is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Reject input that ends with scopes still open
    /// ([`Error::UnterminatedScope`](crate::Error::UnterminatedScope)).
    pub strict_scopes: bool,

    /// Reject words left without a terminating `;`, either before a `}` or
    /// at end of input
    /// ([`Error::MalformedStatement`](crate::Error::MalformedStatement)).
    ///
    /// When off, words before a `}` carry over into the next statement and
    /// words at end of input are dropped.
    pub strict_statements: bool,
}

impl ParseOptions {
    /// Permissive defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Both strict checks enabled.
    pub fn strict() -> Self {
        ParseOptions {
            strict_scopes: true,
            strict_statements: true,
        }
    }

    pub fn with_strict_scopes(mut self, strict: bool) -> Self {
        self.strict_scopes = strict;
        self
    }

    pub fn with_strict_statements(mut self, strict: bool) -> Self {
        self.strict_statements = strict;
        self
    }
}
