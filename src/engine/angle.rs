//! Degree/radian rewriting of trig calls.
//!
//! The engine always works in radians. In degree mode the expression text is
//! rewritten once, right before it is handed to the engine:
//!
//! - `sin(a)`, `cos(a)`, `tan(a)` become `sin(pi/180*(a))`
//! - `asin(a)`, `acos(a)`, `atan(a)` become `((180/pi)*asin(a))`
//!
//! The transform is one-shot: applying it twice in degree mode converts twice.

use crate::engine::scan::{call_argument, leading_identifier, number_tail_len};
use crate::model::AngleMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrigCall {
    /// Argument is an angle.
    Forward,
    /// Result is an angle.
    Inverse,
}

fn classify(name: &str) -> Option<TrigCall> {
    match name {
        "sin" | "cos" | "tan" => Some(TrigCall::Forward),
        "asin" | "acos" | "atan" => Some(TrigCall::Inverse),
        _ => None,
    }
}

/// Produce engine input for `text` under `mode`.
///
/// Identity in radian mode. Calls with unbalanced brackets are left as they
/// are so the engine reports the parse error.
pub fn rewrite(text: &str, mode: AngleMode) -> String {
    match mode {
        AngleMode::Rad => text.to_string(),
        AngleMode::Deg => rewrite_degrees(text),
    }
}

fn rewrite_degrees(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        let Some((name, after)) = leading_identifier(rest) else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
            if ch.is_ascii_digit() {
                let tail = number_tail_len(rest);
                out.push_str(&rest[..tail]);
                rest = &rest[tail..];
            }
            continue;
        };

        match (classify(name), call_argument(after)) {
            (Some(kind), Some((argument, tail))) => {
                let argument = rewrite_degrees(argument);
                match kind {
                    TrigCall::Forward => {
                        out.push_str(&format!("{name}(pi/180*({argument}))"));
                    }
                    TrigCall::Inverse => {
                        out.push_str(&format!("((180/pi)*{name}({argument}))"));
                    }
                }
                rest = tail;
            }
            _ => {
                out.push_str(name);
                rest = after;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn radians_pass_through() {
        assert_eq!(rewrite("sin(30)+asin(1)", AngleMode::Rad), "sin(30)+asin(1)");
    }

    #[test]
    fn degrees_scale_forward_arguments() {
        assert_eq!(rewrite("sin(30)", AngleMode::Deg), "sin(pi/180*(30))");
        assert_eq!(
            rewrite("cos(45+15)", AngleMode::Deg),
            "cos(pi/180*(45+15))"
        );
    }

    #[test]
    fn degrees_scale_inverse_results() {
        assert_eq!(rewrite("atan(1)", AngleMode::Deg), "((180/pi)*atan(1))");
    }

    #[test]
    fn nested_calls_convert_once_each() {
        assert_eq!(
            rewrite("sin(asin(0.5))", AngleMode::Deg),
            "sin(pi/180*(((180/pi)*asin(0.5))))"
        );
    }

    #[test]
    fn other_identifiers_are_untouched() {
        assert_eq!(rewrite("sinh(1)+cosine", AngleMode::Deg), "sinh(1)+cosine");
        assert_eq!(rewrite("2e3*tan(x)", AngleMode::Deg), "2e3*tan(pi/180*(x))");
    }

    #[test]
    fn whitespace_before_bracket_is_allowed() {
        assert_eq!(rewrite("tan (45)", AngleMode::Deg), "tan(pi/180*(45))");
    }

    #[test]
    fn unbalanced_call_is_left_for_the_engine() {
        assert_eq!(rewrite("sin(30", AngleMode::Deg), "sin(30");
    }

    #[test]
    fn degree_mode_is_not_idempotent() {
        let once = rewrite("sin(90)", AngleMode::Deg);
        let twice = rewrite(&once, AngleMode::Deg);
        assert_ne!(once, twice);
    }

    proptest! {
        #[test]
        fn radian_mode_is_identity(text in ".{0,40}") {
            prop_assert_eq!(rewrite(&text, AngleMode::Rad), text);
        }

        #[test]
        fn degree_mode_keeps_text_without_trig(text in "[0-9+*/^() .xyz]{0,30}") {
            prop_assert_eq!(rewrite(&text, AngleMode::Deg), text);
        }
    }
}
