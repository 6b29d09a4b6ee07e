//! Error types for scical.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose
//! via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`CalcError`] - Umbrella for everything a session operation can fail with
//!   - [`ParseError`] - Expression text the engine cannot parse
//!   - [`EvalError`] - Engine-side failures (division by zero, unsupported transform)
//!   - [`InputError`] - Invalid user-supplied data (statistics input, replay index, files)
//! - [`AppError`] - Binary-level failures (configuration, logging, terminal I/O)
//!
//! # Error Recovery Strategy
//!
//! Session errors are **never fatal**. The session controller catches every
//! [`CalcError`] at the triggering action, logs it and turns it into a
//! user-visible message. The expression buffer stays in its pre-failure state.
//! Only [`AppError`] reaches `main`.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::Transform;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for the `scical` binary.
///
/// Session-level failures never show up here; they are turned into messages
/// by the session. This type only covers setup and terminal I/O.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Startup input (e.g. `--load`) could not be read.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Reading commands or writing output failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Any failure of a single session operation.
///
/// # Examples
///
/// ```
/// use scical::model::error::{CalcError, ParseError};
///
/// let err: CalcError = ParseError::Empty.into();
/// assert!(err.to_string().contains("empty"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// The expression text is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The engine failed while evaluating or transforming.
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// User-supplied data was invalid.
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Malformed expression text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing to parse after trimming whitespace.
    #[error("Parse error: expression is empty")]
    Empty,

    /// The engine's parser rejected the text.
    ///
    /// # Examples
    ///
    /// ```
    /// use scical::model::error::ParseError;
    ///
    /// let err = ParseError::Malformed {
    ///     input: "2+".to_string(),
    ///     message: "EofWhileParsing".to_string(),
    /// };
    /// assert!(err.to_string().contains("2+"));
    /// ```
    #[error("Parse error in '{input}': {message}")]
    Malformed {
        /// Text handed to the engine (after angle rewriting).
        input: String,
        /// Parser message from the engine.
        message: String,
    },

    /// The text is an equation (`lhs = rhs`), which cannot be evaluated to a value.
    #[error("Parse error: '{0}' is an equation, not an expression")]
    Equation(String),

    /// Brackets do not balance.
    #[error("Parse error: unbalanced brackets in '{0}'")]
    Unbalanced(String),
}

/// Engine-side evaluation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The result is infinite or not a number (division by zero, domain error).
    #[error("Math error: result is {0}")]
    NonFinite(String),

    /// The expression references a name the engine does not know.
    #[error("Math error: undefined name '{0}'")]
    UndefinedName(String),

    /// The engine cannot perform the requested transform.
    #[error("Math error: {} is not supported by this engine", .0.name())]
    Unsupported(Transform),

    /// Any other engine failure.
    #[error("Math error: {0}")]
    Engine(String),
}

/// Invalid user-supplied data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Required input was empty.
    #[error("Input error: {0} is empty")]
    Empty(&'static str),

    /// A token that should be a number is not one.
    ///
    /// # Examples
    ///
    /// ```
    /// use scical::model::error::InputError;
    ///
    /// let err = InputError::NotANumber("abc".to_string());
    /// assert_eq!(err.to_string(), "Input error: 'abc' is not a number");
    /// ```
    #[error("Input error: '{0}' is not a number")]
    NotANumber(String),

    /// A history index outside the log.
    #[error("Input error: no history entry {index} (history has {len} entries)")]
    HistoryIndex {
        /// Requested 0-based index.
        index: usize,
        /// Number of entries in the log.
        len: usize,
    },

    /// `Ans` was requested before any successful evaluation.
    #[error("Input error: no answer yet")]
    NoAnswer,

    /// The given file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Other I/O failure while reading or writing expression files.
    ///
    /// Stored as a message so that the error stays `Clone` and comparable.
    #[error("IO error on {path}: {message}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error message.
        message: String,
    },
}
