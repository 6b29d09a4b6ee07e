//! Shell command parsing.
//!
//! A line starting with `:` is a command; anything else is an expression to
//! evaluate. Parsing is pure; execution lives in the parent module.

use crate::model::{AngleMode, Transform, TransformKind};
use std::path::PathBuf;
use thiserror::Error;

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Blank line
    Empty,
    /// Evaluate this expression text
    Evaluate(String),
    /// Press buttons by label, in order
    Press(Vec<String>),
    /// Evaluate the current buffer
    Eval,
    /// Show the buffer with its cursor
    Buffer,
    /// Show the buffer markup
    Latex,
    /// Set the angle mode
    SetMode(AngleMode),
    /// Show the angle mode and shift state
    Mode,
    /// List the history
    History,
    /// Load a history entry into the buffer (0-based)
    Replay(usize),
    /// Drop the history
    ClearHistory,
    /// Show the answer register
    Ans,
    /// Summarize a list of numbers
    Stats(String),
    /// Symbolic transform of the buffer
    Transform(Transform),
    /// Load the buffer from a file
    Import(PathBuf),
    /// Save the buffer to a file
    Export(PathBuf),
    /// Save the history dump to a file
    SaveHistory(PathBuf),
    /// Show help
    Help,
    /// Leave the shell
    Quit,
}

/// A command line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command name is not known.
    #[error("unknown command ':{0}' (try :help)")]
    Unknown(String),

    /// A required argument is missing.
    #[error(":{command} needs {argument}")]
    MissingArgument {
        /// Command name, without the colon.
        command: &'static str,
        /// What was expected.
        argument: &'static str,
    },

    /// An argument could not be parsed.
    #[error(":{command}: invalid {argument} '{value}'")]
    InvalidArgument {
        /// Command name, without the colon.
        command: &'static str,
        /// What the argument should have been.
        argument: &'static str,
        /// The text given.
        value: String,
    },

    /// The command takes no further arguments.
    #[error(":{command}: unexpected argument '{value}'")]
    UnexpectedArgument {
        /// Command name, without the colon.
        command: &'static str,
        /// The extra text.
        value: String,
    },
}

impl ReplCommand {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` for unknown commands and bad arguments.
    /// Expression lines never fail here; the engine judges them later.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ReplCommand::Empty);
        }
        let Some(command_line) = line.strip_prefix(':') else {
            return Ok(ReplCommand::Evaluate(line.to_string()));
        };

        let (name, rest) = match command_line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command_line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        match name {
            "press" | "p" => {
                if args.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "press",
                        argument: "at least one button label",
                    });
                }
                Ok(ReplCommand::Press(args.iter().map(|s| s.to_string()).collect()))
            }
            "eval" => no_args("eval", &args, ReplCommand::Eval),
            "buffer" | "b" => no_args("buffer", &args, ReplCommand::Buffer),
            "latex" => no_args("latex", &args, ReplCommand::Latex),
            "deg" => no_args("deg", &args, ReplCommand::SetMode(AngleMode::Deg)),
            "rad" => no_args("rad", &args, ReplCommand::SetMode(AngleMode::Rad)),
            "mode" => no_args("mode", &args, ReplCommand::Mode),
            "history" | "h" => no_args("history", &args, ReplCommand::History),
            "replay" | "r" => parse_replay(&args),
            "clear-history" => no_args("clear-history", &args, ReplCommand::ClearHistory),
            "ans" => no_args("ans", &args, ReplCommand::Ans),
            "stats" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "stats",
                        argument: "a list of numbers",
                    });
                }
                Ok(ReplCommand::Stats(rest.to_string()))
            }
            "import" => Ok(ReplCommand::Import(path_arg("import", rest)?)),
            "export" => Ok(ReplCommand::Export(path_arg("export", rest)?)),
            "save-history" => Ok(ReplCommand::SaveHistory(path_arg("save-history", rest)?)),
            "help" | "?" => Ok(ReplCommand::Help),
            "quit" | "q" | "exit" => Ok(ReplCommand::Quit),
            other => match TransformKind::from_name(other) {
                Some(kind) => parse_transform(kind, &args).map(ReplCommand::Transform),
                None => Err(CommandError::Unknown(other.to_string())),
            },
        }
    }
}

fn no_args(
    command: &'static str,
    args: &[&str],
    parsed: ReplCommand,
) -> Result<ReplCommand, CommandError> {
    match args.first() {
        Some(extra) => Err(CommandError::UnexpectedArgument {
            command,
            value: extra.to_string(),
        }),
        None => Ok(parsed),
    }
}

fn path_arg(command: &'static str, rest: &str) -> Result<PathBuf, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a file path",
        });
    }
    Ok(PathBuf::from(rest))
}

/// `:replay n` is 1-based, as listed by `:history`.
fn parse_replay(args: &[&str]) -> Result<ReplCommand, CommandError> {
    let [raw] = args else {
        return Err(CommandError::MissingArgument {
            command: "replay",
            argument: "one entry number",
        });
    };

    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(ReplCommand::Replay(n - 1)),
        _ => Err(CommandError::InvalidArgument {
            command: "replay",
            argument: "entry number",
            value: raw.to_string(),
        }),
    }
}

/// Build a transform from positional arguments.
///
/// Omitted arguments keep the kind's defaults (variable `x`, point `0`).
fn parse_transform(kind: TransformKind, args: &[&str]) -> Result<Transform, CommandError> {
    let command = kind.name();
    let mut transform = kind.with_defaults();

    let max_args = match kind {
        TransformKind::Factor | TransformKind::Expand | TransformKind::Simplify => 0,
        TransformKind::Solve => 1,
        TransformKind::Differentiate | TransformKind::Limit => 2,
        TransformKind::Integrate | TransformKind::Series => 3,
    };
    if let Some(extra) = args.get(max_args) {
        return Err(CommandError::UnexpectedArgument {
            command,
            value: extra.to_string(),
        });
    }

    match &mut transform {
        Transform::Factor | Transform::Expand | Transform::Simplify => {}
        Transform::Solve { variable } => set_string(variable, args.first()),
        Transform::Differentiate { variable, order } => {
            set_string(variable, args.first());
            if let Some(raw) = args.get(1) {
                *order = parse_order(command, raw)?;
            }
        }
        Transform::Integrate { variable, bounds } => {
            set_string(variable, args.first());
            match args {
                [_, lo, hi] => *bounds = Some((lo.to_string(), hi.to_string())),
                [_, _] => {
                    return Err(CommandError::MissingArgument {
                        command,
                        argument: "both bounds",
                    })
                }
                _ => {}
            }
        }
        Transform::Limit { variable, point } => {
            set_string(variable, args.first());
            set_string(point, args.get(1));
        }
        Transform::Series {
            variable,
            point,
            order,
        } => {
            set_string(variable, args.first());
            set_string(point, args.get(1));
            if let Some(raw) = args.get(2) {
                *order = parse_order(command, raw)?;
            }
        }
    }

    Ok(transform)
}

fn set_string(slot: &mut String, value: Option<&&str>) {
    if let Some(value) = value {
        *slot = value.to_string();
    }
}

fn parse_order(command: &'static str, raw: &str) -> Result<u32, CommandError> {
    match raw.parse::<u32>() {
        Ok(order) if order >= 1 => Ok(order),
        _ => Err(CommandError::InvalidArgument {
            command,
            argument: "order",
            value: raw.to_string(),
        }),
    }
}
