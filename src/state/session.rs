//! Session controller.
//!
//! Owns the expression buffer, the history, the answer register and the
//! [`SessionState`], and routes every [`ButtonAction`] through a single
//! `match`. The math engine and the display surface are collaborators
//! passed in at construction.
//!
//! # Error policy
//!
//! No session operation fails outward. Each public entry point catches the
//! [`CalcError`] of its fallible core, logs it and returns
//! [`Feedback::Error`]. Buffer, history and `Ans` stay as they were before
//! the failing action.

use crate::engine::format::{format_grouped, format_plain, DEFAULT_PRECISION};
use crate::engine::{angle, stats, MathEngine, Scope};
use crate::model::{AngleMode, ButtonAction, CalcError, InputError, Transform, Value};
use crate::state::buffer::ExpressionBuffer;
use crate::state::history::{HistoryEntry, HistoryLog};
use crate::view::{to_markup, DisplayRenderer};
use tracing::{debug, info, warn};

/// Mode flags that affect how future actions are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Angle unit for trig calls in the next evaluation.
    pub angle_mode: AngleMode,
    /// "2nd" shift: the next function button inserts its inverse.
    pub second: bool,
}

/// Result formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Decimal places for non-integral results.
    pub precision: usize,
    /// Show thousands separators in displayed results. History keeps the
    /// plain form.
    pub group_digits: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            group_digits: false,
        }
    }
}

/// What an action produced, for the caller to show.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    /// Nothing happened.
    None,
    /// The buffer changed.
    Edited,
    /// A new history entry.
    Result {
        /// The appended entry.
        entry: HistoryEntry,
        /// The result as it should be shown, grouped if configured.
        display: String,
    },
    /// Informational text (mode changes, statistics).
    Message(String),
    /// A caught error, already formatted for the user.
    Error(String),
}

impl Feedback {
    /// True for [`Feedback::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}

/// Calculator session over engine `E` and display `R`.
#[derive(Debug)]
pub struct Session<E: MathEngine, R: DisplayRenderer> {
    engine: E,
    renderer: R,
    buffer: ExpressionBuffer,
    history: HistoryLog,
    ans: Option<Value>,
    state: SessionState,
    options: SessionOptions,
}

impl<E: MathEngine, R: DisplayRenderer> Session<E, R> {
    /// Session with default options and an empty buffer and history.
    pub fn new(engine: E, renderer: R) -> Self {
        Self::with_options(engine, renderer, SessionState::default(), SessionOptions::default())
    }

    /// Session with explicit display options and initial mode.
    pub fn with_options(
        engine: E,
        renderer: R,
        state: SessionState,
        options: SessionOptions,
    ) -> Self {
        Self {
            engine,
            renderer,
            buffer: ExpressionBuffer::new(),
            history: HistoryLog::new(),
            ans: None,
            state,
            options,
        }
    }

    // ===== Accessors =====

    /// The expression being edited.
    pub fn buffer(&self) -> &ExpressionBuffer {
        &self.buffer
    }

    /// Direct buffer access for cursor and selection placement.
    ///
    /// Changes made here do not refresh the display; call
    /// [`refresh`](Self::refresh) afterwards.
    pub fn buffer_mut(&mut self) -> &mut ExpressionBuffer {
        &mut self.buffer
    }

    /// Evaluations so far, oldest first.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The answer register.
    pub fn ans(&self) -> Option<Value> {
        self.ans
    }

    /// Current mode flags.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Display options.
    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// The math engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The display surface.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Markup for the current buffer text.
    pub fn buffer_markup(&self) -> String {
        to_markup(self.buffer.text())
    }

    /// Push the buffer markup to the display.
    pub fn refresh(&mut self) {
        let markup = self.buffer_markup();
        self.renderer.render_math(&markup);
    }

    // ===== Dispatch =====

    /// Apply one button action.
    pub fn dispatch(&mut self, action: ButtonAction) -> Feedback {
        debug!(action = %action.name(), "dispatch");

        match action {
            ButtonAction::Digit(d) => self.insert_number(&d.to_string()),
            ButtonAction::DecimalPoint => self.insert_number("."),
            ButtonAction::Operator(op) => self.edit(|buf| buf.insert(op.symbol())),
            ButtonAction::OpenParen => self.edit(|buf| buf.insert("(")),
            ButtonAction::CloseParen => self.edit(|buf| buf.insert(")")),
            ButtonAction::Constant(c) => self.insert_operand(c.symbol()),
            ButtonAction::Function(func) => {
                let func = if self.state.second {
                    self.state.second = false;
                    func.shifted()
                } else {
                    func
                };
                let (prefix, placeholder, suffix) = func.template();
                self.edit(|buf| buf.insert_template(&prefix, placeholder, suffix))
            }
            ButtonAction::Square => self.edit(|buf| buf.insert("^2")),
            ButtonAction::Ans => self.insert_ans(),
            ButtonAction::Backspace => self.edit(ExpressionBuffer::backspace),
            ButtonAction::Delete => self.edit(ExpressionBuffer::delete_forward),
            ButtonAction::Clear => self.edit(ExpressionBuffer::clear),
            ButtonAction::CursorLeft => self.edit(|buf| buf.move_cursor(-1)),
            ButtonAction::CursorRight => self.edit(|buf| buf.move_cursor(1)),
            ButtonAction::Evaluate => self.evaluate(),
            ButtonAction::ToggleAngleMode => self.toggle_angle_mode(),
            ButtonAction::ToggleSecond => {
                self.state.second = !self.state.second;
                let label = if self.state.second { "2nd on" } else { "2nd off" };
                Feedback::Message(label.to_string())
            }
            ButtonAction::ClearHistory => self.clear_history(),
            ButtonAction::Transform(kind) => self.apply_transform(&kind.with_defaults()),
        }
    }

    fn edit(&mut self, mutate: impl FnOnce(&mut ExpressionBuffer)) -> Feedback {
        mutate(&mut self.buffer);
        self.refresh();
        Feedback::Edited
    }

    /// Insert digits, as a new factor if they follow a name (`pi` then `2`
    /// is `pi*2`, not the name `pi2`).
    fn insert_number(&mut self, digits: &str) -> Feedback {
        let after_name = self
            .buffer
            .text_before_insertion()
            .ends_with(|c: char| c.is_ascii_alphabetic());
        if after_name {
            self.type_text(&format!("*{digits}"))
        } else {
            self.type_text(digits)
        }
    }

    /// Insert a constant or a value, as a new factor if it would otherwise
    /// fuse with the operand before it (`2` then `e` is `2*e`, not the
    /// exponent literal `2e`).
    fn insert_operand(&mut self, operand: &str) -> Feedback {
        let after_operand = self
            .buffer
            .text_before_insertion()
            .ends_with(|c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ')'));
        if after_operand {
            self.type_text(&format!("*{operand}"))
        } else {
            self.type_text(operand)
        }
    }

    /// Replace the buffer text, cursor at the end.
    pub fn load_text(&mut self, text: &str) -> Feedback {
        self.edit(|buf| buf.set_text(text))
    }

    /// Insert text at the cursor, as if typed.
    pub fn type_text(&mut self, text: &str) -> Feedback {
        self.edit(|buf| buf.insert(text))
    }

    // ===== Evaluation =====

    /// Evaluate the buffer.
    ///
    /// An empty buffer is a no-op. On success the `(input, result)` pair is
    /// appended to the history and becomes the new `Ans`. The buffer is left
    /// as typed.
    pub fn evaluate(&mut self) -> Feedback {
        let outcome = self.try_evaluate();
        self.report("evaluate", outcome)
    }

    fn try_evaluate(&mut self) -> Result<Feedback, CalcError> {
        let input = self.buffer.text().trim().to_string();
        if input.is_empty() {
            return Ok(Feedback::None);
        }

        let rewritten = angle::rewrite(&input, self.state.angle_mode);
        let expr = self.engine.parse(&rewritten)?;
        let value = self.engine.evaluate(&expr, &Scope::with_ans(self.ans))?;

        let result = format_plain(value.as_f64(), self.options.precision);
        let display = self.display_value(value);
        info!(%input, %result, mode = %self.state.angle_mode, "evaluated");

        self.history.append(input.clone(), result.clone());
        self.ans = Some(value);
        self.renderer
            .render_math(&format!("{} = {}", to_markup(&input), result));

        Ok(Feedback::Result {
            entry: HistoryEntry::new(input, result),
            display,
        })
    }

    /// Evaluate `text` as if it had been typed into an empty buffer.
    pub fn evaluate_text(&mut self, text: &str) -> Feedback {
        self.buffer.set_text(text);
        self.evaluate()
    }

    /// Ask the engine for a symbolic transform of the buffer.
    ///
    /// On success `("op(input)", result)` is appended to the history. `Ans`
    /// is not touched since the result is an expression, not a number.
    pub fn apply_transform(&mut self, transform: &Transform) -> Feedback {
        let outcome = self.try_transform(transform);
        self.report(transform.name(), outcome)
    }

    fn try_transform(&mut self, transform: &Transform) -> Result<Feedback, CalcError> {
        let input = self.buffer.text().trim().to_string();
        if input.is_empty() {
            return Err(InputError::Empty("expression").into());
        }

        let expr = self.engine.parse(&input)?;
        let transformed = self.engine.transform(transform, &expr)?;
        let result = self.engine.display(&transformed);
        let label = transform.label_for(&input);
        info!(%label, %result, "transformed");

        let markup = self
            .engine
            .notation(&transformed)
            .unwrap_or_else(|| to_markup(&result));
        self.renderer.render_math(&markup);
        self.history.append(label.clone(), result.clone());

        Ok(Feedback::Result {
            entry: HistoryEntry::new(label, result.clone()),
            display: result,
        })
    }

    // ===== History =====

    /// Load history entry `index` (0-based) back into the buffer.
    ///
    /// Does not re-evaluate.
    pub fn replay(&mut self, index: usize) -> Feedback {
        let outcome = self.try_replay(index);
        self.report("replay", outcome)
    }

    fn try_replay(&mut self, index: usize) -> Result<Feedback, CalcError> {
        let text = self.history.select_for_replay(index)?.to_string();
        debug!(index, %text, "replay");
        Ok(self.load_text(&text))
    }

    /// Drop every history entry. `Ans` survives.
    pub fn clear_history(&mut self) -> Feedback {
        info!(entries = self.history.len(), "history cleared");
        self.history.clear();
        Feedback::Message("history cleared".to_string())
    }

    /// Insert the last answer at the cursor.
    ///
    /// Negative answers are parenthesized so they stay one operand.
    pub fn insert_ans(&mut self) -> Feedback {
        let outcome = self.try_insert_ans();
        self.report("ans", outcome)
    }

    fn try_insert_ans(&mut self) -> Result<Feedback, CalcError> {
        let value = self.ans.ok_or(InputError::NoAnswer)?;
        let text = format_plain(value.as_f64(), self.options.precision);
        let text = if text.starts_with('-') {
            format!("({text})")
        } else {
            text
        };
        Ok(self.insert_operand(&text))
    }

    // ===== Modes =====

    /// Switch between RAD and DEG.
    pub fn toggle_angle_mode(&mut self) -> Feedback {
        self.set_angle_mode(self.state.angle_mode.toggled())
    }

    /// Switch the angle unit. Only later evaluations are affected.
    pub fn set_angle_mode(&mut self, mode: AngleMode) -> Feedback {
        info!(from = %self.state.angle_mode, to = %mode, "angle mode");
        self.state.angle_mode = mode;
        Feedback::Message(mode.label().to_string())
    }

    // ===== Statistics =====

    /// Summarize a list of numbers. Does not touch the buffer or history.
    pub fn statistics(&mut self, text: &str) -> Feedback {
        let outcome = stats::summarize(text)
            .map(|summary| Feedback::Message(summary.lines(self.options.precision).join("\n")))
            .map_err(CalcError::from);
        self.report("statistics", outcome)
    }

    // ===== Helpers =====

    fn display_value(&self, value: Value) -> String {
        if self.options.group_digits {
            format_grouped(value.as_f64(), self.options.precision)
        } else {
            format_plain(value.as_f64(), self.options.precision)
        }
    }

    fn report(&self, operation: &str, outcome: Result<Feedback, CalcError>) -> Feedback {
        match outcome {
            Ok(feedback) => feedback,
            Err(e) => {
                warn!(operation, error = %e, buffer = self.buffer.text(), "operation failed");
                Feedback::Error(e.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
