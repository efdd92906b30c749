//! Splits license expressions into tokens.
//!
//! Whitespace separates most tokens, but parentheses and the or-later `+`
//! are routinely written flush against identifiers (`(MIT`, `GPL-2.0+)`), so
//! each whitespace fragment is peeled further: opening parens from the front,
//! closing parens and `+` from the back. Classification is left to the
//! parser.

/// Split `expression` into tokens.
///
/// Never fails; malformed input is reported by the parser.
///
/// # Examples
/// ```
/// use spdx_expression::tokenize;
/// assert_eq!(
///     tokenize("(MIT OR GPL-2.0+)"),
///     vec!["(", "MIT", "OR", "GPL-2.0", "+", ")"]
/// );
/// ```
#[must_use]
pub fn tokenize(expression: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for fragment in expression.split_whitespace() {
        peel_fragment(fragment, &mut tokens);
    }
    tokens
}

fn peel_fragment<'a>(fragment: &'a str, tokens: &mut Vec<&'a str>) {
    let mut rest = fragment;
    // Stop at the first non-paren: `(a(b` keeps `a(b` as one identifier.
    while let Some(inner) = rest.strip_prefix('(') {
        tokens.push("(");
        rest = inner;
    }

    // Suffix tokens are discovered back to front.
    let mut suffix = Vec::new();
    loop {
        let (token, inner) = match (rest.strip_suffix(')'), rest.strip_suffix('+')) {
            (Some(inner), _) => (")", inner),
            (None, Some(inner)) => ("+", inner),
            (None, None) => break,
        };
        suffix.push(token);
        rest = inner;
    }

    if !rest.is_empty() {
        tokens.push(rest);
    }
    tokens.extend(suffix.into_iter().rev());
}
