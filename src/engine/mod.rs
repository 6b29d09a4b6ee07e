//! Math engine adapter.
//!
//! The session never looks inside the engine. It hands over text, gets back
//! an opaque expression, and asks for a value or a transform. Any failure
//! comes back as a [`ParseError`] or [`EvalError`].
//!
//! [`NumericEngine`] is the bundled implementation; symbolic engines plug in
//! through the same [`MathEngine`] trait.

pub mod angle;
pub mod format;
pub mod numeric;
pub(crate) mod scan;
pub mod stats;

pub use numeric::{NumericEngine, NumericExpr};

use crate::model::{EvalError, ParseError, Transform, Value};
use std::fmt;

/// Names the engine resolves from the session rather than from its own tables.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scope {
    /// The answer register, visible as `ans`.
    pub ans: Option<Value>,
}

impl Scope {
    /// Scope exposing `ans` as the answer register, if there is one.
    pub fn with_ans(ans: Option<Value>) -> Self {
        Self { ans }
    }
}

/// External computer-algebra collaborator.
pub trait MathEngine {
    /// Parsed expression, opaque to the session.
    type Expr: fmt::Debug;

    /// Parse engine input text.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for malformed text.
    fn parse(&self, text: &str) -> Result<Self::Expr, ParseError>;

    /// Evaluate an expression to a finite number.
    ///
    /// # Errors
    ///
    /// Returns `EvalError` for undefined names, non-finite results and other
    /// engine failures.
    fn evaluate(&self, expr: &Self::Expr, scope: &Scope) -> Result<Value, EvalError>;

    /// Apply a symbolic transform.
    ///
    /// Engines without symbolic support keep the default, which reports the
    /// transform as unsupported.
    fn transform(&self, transform: &Transform, expr: &Self::Expr) -> Result<Self::Expr, EvalError> {
        let _ = expr;
        Err(EvalError::Unsupported(transform.clone()))
    }

    /// Expression as plain text, used for history results of transforms.
    fn display(&self, expr: &Self::Expr) -> String;

    /// Engine-provided markup for the display surface.
    ///
    /// `None` means the caller should build markup from the text itself.
    fn notation(&self, expr: &Self::Expr) -> Option<String> {
        let _ = expr;
        None
    }
}
