//! HTML rendering of tokenized formulas.

use aurora_model::{TokenType, token::Token};

use crate::lexer::tokenize;

/// CSS classes per token type. The class names are styling detail; the
/// type-to-class assignment is stable.
#[must_use]
pub fn token_color(token_type: TokenType) -> &'static str {
    match token_type {
        TokenType::Function => "text-blue-600 dark:text-blue-400",
        TokenType::Column => "text-green-600 dark:text-green-400",
        TokenType::Str => "text-orange-600 dark:text-orange-400",
        TokenType::Number => "text-purple-600 dark:text-purple-400",
        TokenType::Operator => "text-gray-600 dark:text-gray-400",
        TokenType::Paren => "text-gray-500 dark:text-gray-500",
        TokenType::Text => "text-gray-900 dark:text-gray-100",
    }
}

/// Render a formula as an HTML fragment, one `<span>` per token.
///
/// Token values are HTML-escaped; empty input produces an empty string.
#[must_use]
pub fn highlight(formula: &str) -> String {
    tokenize(formula)
        .iter()
        .map(render_span)
        .collect::<Vec<_>>()
        .join("")
}

fn render_span(token: &Token) -> String {
    format!(
        "<span class=\"{}\">{}</span>",
        token_color(token.token_type),
        escape_html(&token.value)
    )
}

/// Escape the five HTML-significant characters.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
