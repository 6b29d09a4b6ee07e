//! Line-oriented shell over a [`Session`].
//!
//! Reads commands from any `BufRead` and writes replies to any `Write`, so
//! the same loop serves an interactive terminal, a pipe, and the tests.

pub mod command;

pub use command::{CommandError, ReplCommand};

use crate::config::ButtonMap;
use crate::engine::MathEngine;
use crate::source;
use crate::state::{ExpressionBuffer, Feedback, Session};
use crate::view::DisplayRenderer;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

const HELP: &str = "\
Type an expression to evaluate it. Commands:
  :press <button>...        press buttons by label (see list below)
  :eval                     evaluate the buffer
  :buffer                   show the buffer and cursor
  :latex                    show the buffer markup
  :deg | :rad | :mode       set or show the angle mode
  :history                  list results, numbered from 1
  :replay <n>               load entry n into the buffer
  :clear-history            drop all results
  :ans                      show the last answer
  :stats <numbers>          count, sum, mean, median, deviations
  :simplify :factor :expand
  :diff [var [order]]       :integrate [var [lo hi]]
  :solve [var]              :limit [var [point]]
  :series [var [point [order]]]
  :import <path>            load the buffer from a file
  :export <path>            save the buffer to a file
  :save-history <path>      save the history to a file
  :help | :quit";

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop reading input.
    Quit,
}

/// Shell settings and the button table used by `:press`.
#[derive(Debug, Clone)]
pub struct Shell {
    buttons: ButtonMap,
    prompt: bool,
}

impl Shell {
    /// Shell pressing buttons from `buttons`, without a prompt.
    pub fn new(buttons: ButtonMap) -> Self {
        Self {
            buttons,
            prompt: false,
        }
    }

    /// Print a `[RAD]> ` prompt before each line.
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Run until `:quit` or end of input.
    ///
    /// Returns the number of lines that ended in an error.
    ///
    /// # Errors
    ///
    /// Only I/O errors on `input` or `output` end the loop early.
    pub fn run<E, R>(
        &self,
        session: &mut Session<E, R>,
        input: impl BufRead,
        mut output: impl Write,
    ) -> io::Result<usize>
    where
        E: MathEngine,
        R: DisplayRenderer,
    {
        let mut errors = 0;
        let mut lines = input.lines();

        loop {
            if self.prompt {
                write!(output, "[{}]> ", session.state().angle_mode)?;
                output.flush()?;
            }
            let Some(line) = lines.next().transpose()? else {
                break;
            };

            let (flow, failed) = match ReplCommand::parse(&line) {
                Ok(command) => self.execute(session, command, &mut output)?,
                Err(e) => {
                    writeln!(output, "{e}")?;
                    (Flow::Continue, true)
                }
            };
            if failed {
                errors += 1;
            }
            if flow == Flow::Quit {
                break;
            }
        }

        info!(errors, "shell finished");
        Ok(errors)
    }

    /// Execute one parsed command. Returns the loop flow and whether the
    /// command failed.
    ///
    /// # Errors
    ///
    /// Only write failures on `out`.
    pub fn execute<E, R>(
        &self,
        session: &mut Session<E, R>,
        command: ReplCommand,
        out: &mut impl Write,
    ) -> io::Result<(Flow, bool)>
    where
        E: MathEngine,
        R: DisplayRenderer,
    {
        debug!(?command, "execute");

        let feedback = match command {
            ReplCommand::Empty => Feedback::None,
            ReplCommand::Evaluate(text) => session.evaluate_text(&text),
            ReplCommand::Press(labels) => self.press(session, &labels),
            ReplCommand::Eval => session.evaluate(),
            ReplCommand::Buffer => {
                write_buffer(session.buffer(), out)?;
                Feedback::None
            }
            ReplCommand::Latex => Feedback::Message(session.buffer_markup()),
            ReplCommand::SetMode(mode) => session.set_angle_mode(mode),
            ReplCommand::Mode => {
                let state = session.state();
                let shift = if state.second { " 2nd" } else { "" };
                Feedback::Message(format!("{}{shift}", state.angle_mode))
            }
            ReplCommand::History => {
                write_history(session, out)?;
                Feedback::None
            }
            ReplCommand::Replay(index) => session.replay(index),
            ReplCommand::ClearHistory => session.clear_history(),
            ReplCommand::Ans => match session.ans() {
                Some(value) => Feedback::Message(value.to_string()),
                None => Feedback::Message("no answer yet".to_string()),
            },
            ReplCommand::Stats(text) => session.statistics(&text),
            ReplCommand::Transform(transform) => session.apply_transform(&transform),
            ReplCommand::Import(path) => match source::import_expression(&path) {
                Ok(text) => session.load_text(&text),
                Err(e) => Feedback::Error(e.to_string()),
            },
            ReplCommand::Export(path) => {
                match source::export_expression(&path, session.buffer().text()) {
                    Ok(()) => Feedback::Message(format!("saved {}", path.display())),
                    Err(e) => Feedback::Error(e.to_string()),
                }
            }
            ReplCommand::SaveHistory(path) => {
                match source::export_history(&path, session.history()) {
                    Ok(()) => Feedback::Message(format!("saved {}", path.display())),
                    Err(e) => Feedback::Error(e.to_string()),
                }
            }
            ReplCommand::Help => {
                writeln!(out, "{HELP}")?;
                write_buttons(&self.buttons, out)?;
                Feedback::None
            }
            ReplCommand::Quit => return Ok((Flow::Quit, false)),
        };

        let failed = feedback.is_error();
        if feedback == Feedback::Edited {
            write_buffer(session.buffer(), out)?;
        }
        write_feedback(&feedback, out)?;
        Ok((Flow::Continue, failed))
    }

    /// Dispatch each label through the button map. Stops at the first
    /// unknown label or failing action; reports the last action's feedback.
    fn press<E, R>(&self, session: &mut Session<E, R>, labels: &[String]) -> Feedback
    where
        E: MathEngine,
        R: DisplayRenderer,
    {
        let mut last = Feedback::None;

        for label in labels {
            let Some(action) = self.buttons.get(label) else {
                return Feedback::Error(format!("unknown button '{label}'"));
            };
            last = session.dispatch(action);
            if last.is_error() {
                break;
            }
        }

        last
    }
}

fn write_feedback(feedback: &Feedback, out: &mut impl Write) -> io::Result<()> {
    match feedback {
        Feedback::None | Feedback::Edited => Ok(()),
        Feedback::Result { display, .. } => writeln!(out, "= {display}"),
        Feedback::Message(text) => writeln!(out, "{text}"),
        Feedback::Error(message) => writeln!(out, "{message}"),
    }
}

fn write_buffer(buffer: &ExpressionBuffer, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", buffer.text())?;
    writeln!(out, "{}", cursor_marker(buffer))
}

fn write_history<E, R>(session: &Session<E, R>, out: &mut impl Write) -> io::Result<()>
where
    E: MathEngine,
    R: DisplayRenderer,
{
    let history = session.history();
    if history.is_empty() {
        return writeln!(out, "(history is empty)");
    }
    let width = history.len().to_string().len();
    for (i, entry) in history.all().iter().enumerate() {
        writeln!(out, "{:>width$}  {entry}", i + 1)?;
    }
    Ok(())
}

fn write_buttons(buttons: &ButtonMap, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Buttons:")?;
    for (label, action) in buttons.sorted() {
        writeln!(out, "  {label:<8} {}", action.name())?;
    }
    Ok(())
}

/// Marker line placed under the buffer text: `^` at the cursor, `~` under
/// a selection. Columns follow display width, so wide glyphs line up.
pub fn cursor_marker(buffer: &ExpressionBuffer) -> String {
    let column = |chars: usize| -> usize {
        let prefix: String = buffer.text().chars().take(chars).collect();
        UnicodeWidthStr::width(prefix.as_str())
    };

    match buffer.selection() {
        Some(sel) => {
            let start = column(sel.start);
            let end = column(sel.end);
            format!("{}{}", " ".repeat(start), "~".repeat(end - start))
        }
        None => format!("{}^", " ".repeat(column(buffer.cursor()))),
    }
}

#[cfg(test)]
#[path = "repl_tests.rs"]
mod tests;
