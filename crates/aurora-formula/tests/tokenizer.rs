//! Coverage properties of the highlighter lexer.
//!
//! Whatever the input, the token stream must cover it exactly: spans
//! contiguous and non-overlapping, concatenated values equal to the
//! input. The fallback path guarantees this even for garbage.

use aurora_formula::tokenize;
use proptest::prelude::*;

fn assert_covers(input: &str) {
    let tokens = tokenize(input);
    let mut offset = 0;
    for token in &tokens {
        assert_eq!(token.start, offset, "gap before token {token:?} in {input:?}");
        assert!(token.end > token.start, "empty token in {input:?}");
        offset = token.end;
    }
    assert_eq!(offset, input.chars().count(), "input not fully covered: {input:?}");
    let rebuilt: String = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(rebuilt, input);
}

proptest! {
    #[test]
    fn any_input_is_covered(input in ".*") {
        assert_covers(&input);
    }

    #[test]
    fn formula_like_input_is_covered(
        input in "[a-zA-Z0-9_{}()\\[\\]\"'\\\\ +*/%^=<>&|!.,;-]{0,60}"
    ) {
        assert_covers(&input);
    }
}

#[test]
fn hostile_fixed_inputs_are_covered() {
    for input in [
        "",
        "{",
        "{}",
        "{unclosed",
        "\"unterminated",
        "'mixed\"quotes",
        "\"ends with escape\\",
        "1..2...3",
        "<<>>==!=!",
        "&&&",
        "||| ",
        "{a}{b}{c}",
        "SUM(MIN(1,2),MAX(3,4))",
        "émoji 🙂 non-ascii",
    ] {
        assert_covers(input);
    }
}
