//! Lexical helpers shared by the text rewriters.
//!
//! Only recognizes what the rewriters need: identifiers, number literals,
//! bracketed call arguments and bare `=` signs. Everything else is passed
//! through untouched.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// An identifier at the start of the input.
    static ref LEADING_IDENT: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").expect("identifier pattern is valid");

    /// The rest of a number literal after its first digit, exponent included.
    static ref NUMBER_TAIL: Regex =
        Regex::new(r"^[0-9.]*(?:[eE][+-]?[0-9]+)?").expect("number pattern is valid");

    /// A whole number literal: `12`, `1.5`, `.5`, `2e5`, `3.1E-2`.
    static ref NUMBER: Regex =
        Regex::new(r"^(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
            .expect("number pattern is valid");
}

/// True for chars that can continue an identifier.
pub fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Split a leading identifier off `text`.
///
/// Returns `(identifier, rest)`, or `None` if `text` does not start with one.
pub fn leading_identifier(text: &str) -> Option<(&str, &str)> {
    LEADING_IDENT
        .find(text)
        .map(|m| (m.as_str(), &text[m.end()..]))
}

/// Length in bytes of the number literal continuing after a digit.
///
/// Keeps exponents such as the `e5` of `2e5` from being read as names.
pub fn number_tail_len(after_digit: &str) -> usize {
    NUMBER_TAIL.find(after_digit).map_or(0, |m| m.end())
}

/// Length in bytes of the number literal at the start of `text`, 0 if none.
pub fn number_len(text: &str) -> usize {
    NUMBER.find(text).map_or(0, |m| m.end())
}

/// Length in bytes of one operand at the start of `text`.
///
/// An operand is a bracketed group, a number literal, or a name with an
/// optional call argument list. Leading whitespace is included. `None` if
/// `text` does not start with an operand.
pub fn operand_len(text: &str) -> Option<usize> {
    let body = text.trim_start();
    let skipped = text.len() - body.len();

    if let Some(inner) = body.strip_prefix('(') {
        let close = matching_close(inner)?;
        return Some(skipped + close + 2);
    }

    let number = number_len(body);
    if number > 0 {
        return Some(skipped + number);
    }

    let (name, rest) = leading_identifier(body)?;
    let call = call_argument(rest).map_or(0, |(_, after)| rest.len() - after.len());
    Some(skipped + name.len() + call)
}

/// Byte index of the last bare `=` in `text`.
///
/// Comparison operators (`==`, `!=`, `<=`, `>=`) do not count.
pub fn equation_sign(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    (0..bytes.len()).rev().find(|&i| {
        if bytes[i] != b'=' {
            return false;
        }
        let prev = i.checked_sub(1).map(|p| bytes[p]);
        let next = bytes.get(i + 1).copied();
        !matches!(prev, Some(b'=' | b'!' | b'<' | b'>')) && next != Some(b'=')
    })
}

/// True if `text` is an equation rather than an expression.
pub fn has_equation_sign(text: &str) -> bool {
    equation_sign(text).is_some()
}

/// Parse a call argument list right after a function name.
///
/// `after_name` may start with whitespace, then must start with `(`.
/// Returns `(argument, rest)` where `argument` is the text between the
/// brackets and `rest` follows the matching `)`. `None` if there is no call
/// or the brackets never balance.
pub fn call_argument(after_name: &str) -> Option<(&str, &str)> {
    let open = after_name.trim_start().strip_prefix('(')?;
    let close = matching_close(open)?;
    Some((&open[..close], &open[close + 1..]))
}

/// Byte index of the `)` closing an already-opened bracket.
fn matching_close(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(idx),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// True if every `(` has a matching `)` and no `)` comes first.
pub fn is_balanced(text: &str) -> bool {
    let mut depth = 0usize;
    for ch in text.chars() {
        match ch {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
