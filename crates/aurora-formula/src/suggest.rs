//! Autocomplete suggestions for the formula editor.

use aurora_model::ColumnSchema;

use crate::functions::FUNCTIONS;

/// Suggestions for the cursor position in a formula.
///
/// Inside an unclosed `{…}` reference, column names matching the
/// current word are offered in schema order. Elsewhere, built-in
/// function names are offered uppercased; with no current word, every
/// column is additionally offered in `{name}` form after the functions.
#[must_use]
pub fn suggestions(formula: &str, cursor: usize, columns: &[ColumnSchema]) -> Vec<String> {
    let before_cursor: String = formula.chars().take(cursor).collect();
    let current_word = current_word(&before_cursor);

    if in_column_context(&before_cursor) {
        return columns
            .iter()
            .filter(|col| col.name.to_lowercase().starts_with(&current_word))
            .map(|col| col.name.clone())
            .collect();
    }

    let mut out: Vec<String> = FUNCTIONS
        .iter()
        .filter(|f| f.name.to_lowercase().starts_with(&current_word))
        .map(|f| f.name.to_string())
        .collect();

    if current_word.is_empty() {
        out.extend(columns.iter().map(|col| format!("{{{}}}", col.name)));
    }

    out
}

/// Longest identifier suffix of the prefix before the cursor,
/// lowercased. Leading digits cannot start an identifier, so a trailing
/// run like `1a2b` yields `a2b`.
fn current_word(before_cursor: &str) -> String {
    let chars: Vec<char> = before_cursor.chars().collect();
    let mut start = chars.len();
    while start > 0 && is_ident_continue(chars[start - 1]) {
        start -= 1;
    }
    while start < chars.len() && !is_ident_start(chars[start]) {
        start += 1;
    }
    chars[start..].iter().collect::<String>().to_lowercase()
}

/// True when an unclosed `{` precedes the cursor.
fn in_column_context(before_cursor: &str) -> bool {
    let last_open = before_cursor.rfind('{');
    let last_close = before_cursor.rfind('}');
    match (last_open, last_close) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        _ => false,
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
