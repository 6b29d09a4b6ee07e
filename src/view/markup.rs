//! Lexical markup for the display surface.
//!
//! Turns expression text into LaTeX-style markup with a fixed substitution
//! table. No parsing beyond identifiers and the brackets of `sqrt(...)`.

use crate::engine::scan::{call_argument, leading_identifier};

/// LaTeX spelling of known identifiers.
fn latex_identifier(name: &str) -> Option<&'static str> {
    match name {
        "pi" => Some(r"\pi"),
        "sin" => Some(r"\sin"),
        "cos" => Some(r"\cos"),
        "tan" => Some(r"\tan"),
        "asin" => Some(r"\arcsin"),
        "acos" => Some(r"\arccos"),
        "atan" => Some(r"\arctan"),
        "sinh" => Some(r"\sinh"),
        "cosh" => Some(r"\cosh"),
        "tanh" => Some(r"\tanh"),
        "ln" => Some(r"\ln"),
        "log" => Some(r"\log"),
        "exp" => Some(r"\exp"),
        _ => None,
    }
}

/// Build display markup for expression `text`.
///
/// Substitutions, in order: `**` → `^`, `sqrt(a)` → `\sqrt{a}`,
/// `pi` → `\pi`, `*`/`×` → `\times`, `/`/`÷` → `\div`, and trig/log names
/// to their LaTeX operators. Identifiers only match whole words.
pub fn to_markup(text: &str) -> String {
    let normalized = text.replace("**", "^");
    let mut out = String::with_capacity(normalized.len() + 8);
    render_into(&normalized, &mut out);
    out
}

fn render_into(text: &str, out: &mut String) {
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if let Some((name, after)) = leading_identifier(rest) {
            if name == "sqrt" {
                if let Some((argument, tail)) = call_argument(after) {
                    out.push_str(r"\sqrt{");
                    render_into(argument, out);
                    out.push('}');
                    rest = tail;
                    continue;
                }
            }
            out.push_str(latex_identifier(name).unwrap_or(name));
            rest = after;
            continue;
        }

        match ch {
            '*' | '×' => out.push_str(r" \times "),
            '/' | '÷' => out.push_str(r" \div "),
            'π' => out.push_str(r"\pi"),
            other => out.push(other),
        }
        rest = &rest[ch.len_utf8()..];
    }
}
