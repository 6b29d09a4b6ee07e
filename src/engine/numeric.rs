//! Numeric engine backed by fasteval.
//!
//! Evaluates real-valued expressions. Symbolic transforms are not available
//! and report `EvalError::Unsupported` through the trait default.
//!
//! Text goes through a few rewrites before fasteval sees it, so that it reads
//! the way a calculator user means it:
//!
//! - `2pi`, `2(1+1)` and `(1)(2)` are products.
//! - `-2^2` is `-(2^2)`. fasteval folds a leading sign into the literal.
//! - Unit suffixes (`5m`, `2k`) are rejected rather than scaled.
//! - `sin`, `cos` and `tan` snap floating-point noise, so `cos(pi/2)` is 0 and
//!   `tan(pi/2)` is infinite.

use crate::engine::scan::{
    call_argument, has_equation_sign, is_balanced, is_identifier_char, leading_identifier,
    number_len, operand_len,
};
use crate::engine::{MathEngine, Scope};
use crate::model::{EvalError, ParseError, Value};
use fasteval::Evaler;
use std::f64::consts::{E, PI};
use std::fmt;

/// Slab capacity for parsed expressions; fasteval's default of 64 is too
/// small for long expressions after degree rewriting.
const SLAB_CAPACITY: usize = 1024;

/// Suffixes fasteval would read as SI scale factors after a number.
const UNIT_SUFFIXES: [&str; 10] = ["k", "K", "M", "G", "T", "m", "u", "µ", "n", "p"];

/// Trig results within this many ulps (scaled by the argument) of zero are zero.
const TRIG_NOISE_ULPS: f64 = 4.0;

/// Expression parsed by [`NumericEngine`].
pub struct NumericExpr {
    source: String,
    slab: fasteval::Slab,
    root: fasteval::ExpressionI,
}

impl NumericExpr {
    /// Text the expression was parsed from, with alternative spellings mapped.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for NumericExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumericExpr")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Real-valued evaluator.
///
/// Accepts `^` or `**` for powers, `×`/`÷` as aliases of `*`/`/`, and `π` as
/// an alias of `pi`. Knows the constants `pi` and `e`, the answer register
/// `ans`, fasteval's builtin functions, plus `sqrt`, `cbrt`, `ln`, `exp`,
/// `log10` and `log2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericEngine;

impl NumericEngine {
    /// A new engine. It holds no state.
    pub fn new() -> Self {
        Self
    }
}

impl MathEngine for NumericEngine {
    type Expr = NumericExpr;

    fn parse(&self, text: &str) -> Result<NumericExpr, ParseError> {
        let spelled = respell(text);
        let trimmed = spelled.trim();

        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }
        if has_equation_sign(trimmed) {
            return Err(ParseError::Equation(trimmed.to_string()));
        }
        if !is_balanced(trimmed) {
            return Err(ParseError::Unbalanced(trimmed.to_string()));
        }

        let malformed = |message: String| ParseError::Malformed {
            input: trimmed.to_string(),
            message,
        };
        let products = explicit_products(trimmed).map_err(malformed)?;
        let prepared = snapping_trig(&group_negated_powers(&products));

        let mut slab = fasteval::Slab::with_capacity(SLAB_CAPACITY);
        let root = fasteval::Parser::new()
            .parse(&prepared, &mut slab.ps)
            .map_err(|e| malformed(describe(&e)))?;

        Ok(NumericExpr {
            source: trimmed.to_string(),
            slab,
            root,
        })
    }

    fn evaluate(&self, expr: &NumericExpr, scope: &Scope) -> Result<Value, EvalError> {
        let mut namespace = |name: &str, args: Vec<f64>| -> Option<f64> {
            resolve(name, &args, scope)
        };

        let raw = expr
            .root
            .from(&expr.slab.ps)
            .eval(&expr.slab, &mut namespace)
            .map_err(|e| match e {
                fasteval::Error::Undefined(name) => EvalError::UndefinedName(name),
                other => EvalError::Engine(describe(&other)),
            })?;

        Value::new(raw)
    }

    fn display(&self, expr: &NumericExpr) -> String {
        expr.source.clone()
    }
}

/// Names resolved outside fasteval's builtins.
fn resolve(name: &str, args: &[f64], scope: &Scope) -> Option<f64> {
    match (name, args) {
        ("pi", []) => Some(PI),
        ("e", []) => Some(E),
        ("ans" | "Ans", []) => scope.ans.map(Value::as_f64),
        ("sqrt", [x]) => Some(x.sqrt()),
        ("cbrt", [x]) => Some(x.cbrt()),
        ("ln", [x]) => Some(x.ln()),
        ("exp", [x]) => Some(x.exp()),
        ("log10", [x]) => Some(x.log10()),
        ("log2", [x]) => Some(x.log2()),
        (SNAPPED_SIN, [x]) => Some(snap(x.sin(), *x)),
        (SNAPPED_COS, [x]) => Some(snap(x.cos(), *x)),
        (SNAPPED_TAN, [x]) => {
            let (sin, cos) = (snap(x.sin(), *x), snap(x.cos(), *x));
            Some(if cos == 0.0 { f64::INFINITY } else { sin / cos })
        }
        _ => None,
    }
}

/// Zero out a trig result that is only rounding noise around a root.
///
/// The error of `sin(x)` near a root grows with `|x|`, so the cutoff does too.
fn snap(result: f64, x: f64) -> f64 {
    let cutoff = TRIG_NOISE_ULPS * f64::EPSILON * x.abs().max(1.0);
    if result.abs() < cutoff {
        0.0
    } else {
        result
    }
}

const SNAPPED_SIN: &str = "snapped_sin";
const SNAPPED_COS: &str = "snapped_cos";
const SNAPPED_TAN: &str = "snapped_tan";

/// Map alternative spellings onto fasteval syntax.
fn respell(text: &str) -> String {
    text.replace("**", "^")
        .replace('×', "*")
        .replace('÷', "/")
        .replace('−', "-")
        .replace('π', "pi")
}

/// Write implicit products out: `2pi` → `2*pi`, `2(3)` → `2*(3)`,
/// `(1)(2)` → `(1)*(2)`, `(2)3` → `(2)*3`.
///
/// A number followed by a unit suffix such as `5m` is an error, since fasteval
/// would otherwise read it as `0.005`.
fn explicit_products(text: &str) -> Result<String, String> {
    let mut out = String::with_capacity(text.len() + 8);
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        let starts_number = !out.chars().next_back().is_some_and(is_identifier_char);
        let number = if starts_number { number_len(rest) } else { 0 };

        if number > 0 {
            let (literal, after) = rest.split_at(number);
            let suffix = leading_identifier(after)
                .map(|(name, _)| name)
                .or_else(|| after.starts_with('µ').then_some("µ"));
            if let Some(suffix) = suffix.filter(|name| UNIT_SUFFIXES.contains(name)) {
                return Err(format!("'{literal}{suffix}': unit suffixes are not supported"));
            }
            out.push_str(literal);
            if starts_operand(after) {
                out.push('*');
            }
            rest = after;
            continue;
        }

        out.push(ch);
        rest = &rest[ch.len_utf8()..];
        if ch == ')' && (starts_operand(rest) || rest.starts_with(|c: char| c.is_ascii_digit())) {
            out.push('*');
        }
    }

    Ok(out)
}

/// True if `text` starts with a name or an opening bracket.
fn starts_operand(text: &str) -> bool {
    text.starts_with('(') || leading_identifier(text).is_some()
}

/// Rewrite `-a^b` as `(0-a^b)` wherever the `-` is a sign, not a subtraction.
///
/// fasteval reads a leading `-` as part of the literal, so `-2^2` would be 4.
/// The exponent chain is rewritten recursively, so `2^-3^2` is `2^(0-3^2)`.
fn group_negated_powers(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if ch == '-' && is_sign_position(&out) {
            let after = &rest[1..];
            if let Some(len) = power_chain_len(after) {
                out.push_str("(0-");
                out.push_str(&group_negated_powers(after[..len].trim_start()));
                out.push(')');
                rest = &after[len..];
                continue;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}

/// True if a `-` written after `before` is a sign.
fn is_sign_position(before: &str) -> bool {
    match before.trim_end().chars().next_back() {
        None => true,
        Some(prev) => "(,+-*/%^<>=!&|".contains(prev),
    }
}

/// Length of `operand ^ [signs] operand ^ ...` at the start of `text`.
///
/// `None` unless at least one `^` follows the first operand.
fn power_chain_len(text: &str) -> Option<usize> {
    let mut len = operand_len(text)?;
    let mut powers = 0;

    loop {
        let rest = &text[len..];
        let Some(exponent) = rest.trim_start().strip_prefix('^') else {
            break;
        };
        let unsigned = exponent.trim_start_matches(|c: char| matches!(c, ' ' | '+' | '-'));
        let signs = exponent.len() - unsigned.len();
        let Some(operand) = operand_len(&exponent[signs..]) else {
            break;
        };
        len += rest.len() - exponent.len() + signs + operand;
        powers += 1;
    }

    (powers > 0).then_some(len)
}

/// Route `sin`, `cos` and `tan` calls through the noise-snapping versions.
fn snapping_trig(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        let at_boundary = !out.chars().next_back().is_some_and(is_identifier_char);
        if at_boundary {
            if let Some((name, after)) = leading_identifier(rest) {
                let snapped = match name {
                    "sin" => Some(SNAPPED_SIN),
                    "cos" => Some(SNAPPED_COS),
                    "tan" => Some(SNAPPED_TAN),
                    _ => None,
                };
                match snapped {
                    Some(snapped) if call_argument(after).is_some() => out.push_str(snapped),
                    _ => out.push_str(name),
                }
                rest = after;
                continue;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}

/// Readable text for a fasteval error.
fn describe(error: &fasteval::Error) -> String {
    use fasteval::Error;

    match error {
        Error::EOF | Error::EofWhileParsing(_) => "expression ends too early".to_string(),
        Error::UnparsedTokensRemaining(rest) => format!("unexpected '{rest}'"),
        Error::InvalidValue => "expected a number, a name or a bracket".to_string(),
        Error::ParseF64(literal) => format!("'{literal}' is not a number"),
        Error::Expected(what) => format!("expected {what}"),
        Error::WrongArgs(call) => format!("wrong number of arguments: {call}"),
        Error::Undefined(name) => format!("undefined name '{name}'"),
        Error::TooLong => "expression is too long".to_string(),
        Error::TooDeep => "expression is nested too deeply".to_string(),
        Error::SlabOverflow => "expression is too large".to_string(),
        other => format!("{other:?}"),
    }
}
