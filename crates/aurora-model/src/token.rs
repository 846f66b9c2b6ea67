//! Formula tokens produced by the highlighter lexer.

use serde::{Deserialize, Serialize};

/// Classification of a formula substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Built-in function name, or an identifier followed by `(`.
    Function,
    /// Column reference in braces, e.g. `{price}`.
    Column,
    /// Quoted string literal, quotes included.
    #[serde(rename = "string")]
    Str,
    /// Numeric literal.
    Number,
    /// Arithmetic, comparison, or logical operator.
    Operator,
    /// Parenthesis or bracket.
    Paren,
    /// Whitespace, separators, and anything unrecognized.
    Text,
}

/// A classified substring of a formula with its exact position.
///
/// `start`/`end` are half-open character offsets into the source formula.
/// Tokens are contiguous: each token's `end` equals the next token's
/// `start`, and concatenating all values reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token classification.
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// The exact substring matched.
    pub value: String,
    /// Character offset of the first character.
    pub start: usize,
    /// Character offset one past the last character.
    pub end: usize,
}

impl Token {
    /// Number of characters covered by this token.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
