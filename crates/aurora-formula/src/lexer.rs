//! Formula lexer for syntax highlighting.
//!
//! The lexer performs a single left-to-right scan and classifies every
//! character of the input; it never fails. Unrecognized characters
//! degrade to single-character [`TokenType::Text`] tokens, so the token
//! stream always covers the input exactly and editors can reconstruct
//! the original text from token offsets.

use aurora_model::{Token, TokenType};

use crate::functions::is_builtin;

/// Operators, longest first so `<=` wins over `<` and `&&` over `&`.
const OPERATORS: [&str; 17] = [
    "!=", "<>", "<=", ">=", "&&", "||", "+", "-", "*", "/", "%", "^", "=", "<", ">", "&", "!",
];

/// Tokenize a formula into contiguous, typed tokens.
///
/// Offsets are character offsets, half-open. Empty input yields an
/// empty vector.
#[must_use]
pub fn tokenize(formula: &str) -> Vec<Token> {
    let chars: Vec<char> = formula.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];

        // Whitespace runs are kept as text so layout survives.
        if ch.is_whitespace() {
            let end = scan_while(&chars, pos, char::is_whitespace);
            push(&mut tokens, TokenType::Text, &chars, pos, end);
            pos = end;
            continue;
        }

        // Column reference: `{` followed by at least one non-`}` char,
        // then `}`. Unterminated references fall through.
        if ch == '{'
            && let Some(end) = scan_column_ref(&chars, pos)
        {
            push(&mut tokens, TokenType::Column, &chars, pos, end);
            pos = end;
            continue;
        }

        // Quoted string with backslash escapes. Unterminated strings
        // fall through to the single-character fallback.
        if (ch == '"' || ch == '\'')
            && let Some(end) = scan_string(&chars, pos, ch)
        {
            push(&mut tokens, TokenType::Str, &chars, pos, end);
            pos = end;
            continue;
        }

        // Number: digits with an optional fractional part. No sign and
        // no exponent; a leading `-` lexes as an operator.
        if ch.is_ascii_digit() {
            let end = scan_number(&chars, pos);
            push(&mut tokens, TokenType::Number, &chars, pos, end);
            pos = end;
            continue;
        }

        // Identifier: a function when it precedes `(` or names a
        // built-in, plain text otherwise.
        if ch.is_ascii_alphabetic() || ch == '_' {
            let end = scan_while(&chars, pos, is_ident_continue);
            let word: String = chars[pos..end].iter().collect();
            let token_type = if followed_by_paren(&chars, end) || is_builtin(&word) {
                TokenType::Function
            } else {
                TokenType::Text
            };
            tokens.push(Token {
                token_type,
                value: word,
                start: pos,
                end,
            });
            pos = end;
            continue;
        }

        if let Some(op) = match_operator(&chars, pos) {
            let end = pos + op.chars().count();
            push(&mut tokens, TokenType::Operator, &chars, pos, end);
            pos = end;
            continue;
        }

        if matches!(ch, '(' | ')' | '[' | ']') {
            push(&mut tokens, TokenType::Paren, &chars, pos, pos + 1);
            pos += 1;
            continue;
        }

        // Commas, semicolons, and anything else: one character of text.
        push(&mut tokens, TokenType::Text, &chars, pos, pos + 1);
        pos += 1;
    }

    tokens
}

fn push(tokens: &mut Vec<Token>, token_type: TokenType, chars: &[char], start: usize, end: usize) {
    tokens.push(Token {
        token_type,
        value: chars[start..end].iter().collect(),
        start,
        end,
    });
}

fn scan_while(chars: &[char], start: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut end = start;
    while end < chars.len() && pred(chars[end]) {
        end += 1;
    }
    end
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Scan `{...}` starting at the opening brace. Returns the offset past
/// the closing brace, or `None` when the reference is empty or never
/// closed.
fn scan_column_ref(chars: &[char], start: usize) -> Option<usize> {
    let mut end = start + 1;
    while end < chars.len() && chars[end] != '}' {
        end += 1;
    }
    if end < chars.len() && end > start + 1 {
        Some(end + 1)
    } else {
        None
    }
}

/// Scan a quoted string starting at the opening quote. Escaped
/// characters (`\x`) never terminate the literal. Returns the offset
/// past the closing quote, or `None` when unterminated.
fn scan_string(chars: &[char], start: usize, quote: char) -> Option<usize> {
    let mut i = start + 1;
    while i < chars.len() {
        let ch = chars[i];
        if ch == quote {
            return Some(i + 1);
        }
        if ch == '\\' {
            if i + 1 >= chars.len() {
                return None;
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    None
}

fn scan_number(chars: &[char], start: usize) -> usize {
    let mut end = scan_while(chars, start, |c| c.is_ascii_digit());
    if end < chars.len()
        && chars[end] == '.'
        && end + 1 < chars.len()
        && chars[end + 1].is_ascii_digit()
    {
        end = scan_while(chars, end + 1, |c| c.is_ascii_digit());
    }
    end
}

/// True when the next non-whitespace character at or after `pos` is `(`.
fn followed_by_paren(chars: &[char], pos: usize) -> bool {
    let next = scan_while(chars, pos, char::is_whitespace);
    next < chars.len() && chars[next] == '('
}

fn match_operator(chars: &[char], pos: usize) -> Option<&'static str> {
    OPERATORS.iter().copied().find(|op| {
        op.chars()
            .enumerate()
            .all(|(i, ch)| chars.get(pos + i) == Some(&ch))
    })
}
