//! Tests for the session controller.

use super::*;
use crate::engine::NumericEngine;
use crate::model::{Constant, EvalError, Function, Operator, ParseError, TransformKind};
use crate::view::RecordingRenderer;

// ===== Test Helpers =====

fn session() -> Session<NumericEngine, RecordingRenderer> {
    Session::new(NumericEngine::new(), RecordingRenderer::new())
}

fn press(session: &mut Session<NumericEngine, RecordingRenderer>, keys: &[ButtonAction]) {
    for key in keys {
        session.dispatch(*key);
    }
}

fn result_text(feedback: &Feedback) -> &str {
    match feedback {
        Feedback::Result { entry, .. } => entry.result(),
        other => panic!("expected a result, got {other:?}"),
    }
}

/// Engine that "transforms" by wrapping the text, for exercising the
/// transform plumbing without a computer-algebra backend.
#[derive(Debug, Default)]
struct SymbolicStub;

impl MathEngine for SymbolicStub {
    type Expr = String;

    fn parse(&self, text: &str) -> Result<String, ParseError> {
        if text.ends_with('+') {
            return Err(ParseError::Malformed {
                input: text.to_string(),
                message: "trailing operator".to_string(),
            });
        }
        Ok(text.to_string())
    }

    fn evaluate(&self, expr: &String, _scope: &Scope) -> Result<Value, EvalError> {
        expr.parse::<f64>()
            .map_err(|_| EvalError::UndefinedName(expr.clone()))
            .and_then(Value::new)
    }

    fn transform(&self, transform: &Transform, expr: &String) -> Result<String, EvalError> {
        match transform {
            Transform::Solve { .. } => Err(EvalError::Engine("no solution".to_string())),
            Transform::Differentiate { variable, .. } if variable == "x" => {
                Ok("2*x".to_string())
            }
            other => Ok(format!("{}[{expr}]", other.name())),
        }
    }

    fn display(&self, expr: &String) -> String {
        expr.clone()
    }

    fn notation(&self, expr: &String) -> Option<String> {
        Some(format!(r"\mathrm{{{expr}}}"))
    }
}

// ===== Evaluation =====

#[test]
fn evaluating_two_plus_two_records_history_and_ans() {
    let mut s = session();
    s.load_text("2+2");

    let feedback = s.evaluate();

    assert_eq!(result_text(&feedback), "4");
    assert_eq!(s.history().all(), &[HistoryEntry::new("2+2", "4")]);
    assert_eq!(s.ans().map(Value::as_f64), Some(4.0));
    assert_eq!(s.buffer().text(), "2+2");
}

#[test]
fn degree_mode_rewrites_trig_calls() {
    let mut s = session();
    s.set_angle_mode(AngleMode::Deg);

    let feedback = s.evaluate_text("sin(90)");

    assert_eq!(result_text(&feedback), "1");
    assert_eq!(s.history().last().map(HistoryEntry::input), Some("sin(90)"));
}

#[test]
fn degree_mode_inverse_returns_degrees() {
    let mut s = session();
    s.set_angle_mode(AngleMode::Deg);
    assert_eq!(result_text(&s.evaluate_text("asin(1)")), "90");
    assert_eq!(result_text(&s.evaluate_text("cos(sin(90)*60)")), "0.5");
}

#[test]
fn degree_mode_right_angles_are_exact() {
    let mut s = session();
    s.set_angle_mode(AngleMode::Deg);
    assert_eq!(result_text(&s.evaluate_text("cos(90)")), "0");
    assert_eq!(result_text(&s.evaluate_text("sin(180)")), "0");
    assert_eq!(result_text(&s.evaluate_text("cos(270)")), "0");
    assert_eq!(result_text(&s.evaluate_text("sin(720)")), "0");
    assert_eq!(result_text(&s.evaluate_text("tan(180)")), "0");
    assert_eq!(result_text(&s.evaluate_text("tan(45)")), "1");
}

#[test]
fn degree_mode_tangent_of_right_angle_is_math_error() {
    let mut s = session();
    s.set_angle_mode(AngleMode::Deg);
    s.evaluate_text("1+1");

    let feedback = s.evaluate_text("tan(90)");

    assert_eq!(
        feedback,
        Feedback::Error("Math error: result is infinity".to_string())
    );
    assert_eq!(s.history().len(), 1);
    assert_eq!(s.ans().map(Value::as_f64), Some(2.0));
}

#[test]
fn sign_binds_looser_than_power() {
    let mut s = session();
    assert_eq!(result_text(&s.evaluate_text("-2^2")), "-4");
    assert_eq!(result_text(&s.evaluate_text("2*-3^2")), "-18");
    assert_eq!(result_text(&s.evaluate_text("-(2)^2")), "-4");
    assert_eq!(result_text(&s.evaluate_text("(-2)^2")), "4");
}

#[test]
fn keypad_negative_square() {
    let mut s = session();
    press(
        &mut s,
        &[
            ButtonAction::Operator(Operator::Subtract),
            ButtonAction::Digit(3),
            ButtonAction::Square,
        ],
    );
    assert_eq!(s.buffer().text(), "-3^2");
    assert_eq!(result_text(&s.dispatch(ButtonAction::Evaluate)), "-9");
}

#[test]
fn comparison_results_can_be_replayed() {
    let mut s = session();
    assert_eq!(result_text(&s.evaluate_text("1==1")), "1");
    assert_eq!(result_text(&s.evaluate_text("2>=1")), "1");

    s.replay(0);
    assert_eq!(s.buffer().text(), "1==1");
    assert_eq!(result_text(&s.evaluate()), "1");

    s.replay(1);
    assert_eq!(s.buffer().text(), "2>=1");
    assert_eq!(result_text(&s.evaluate()), "1");
}

#[test]
fn angle_mode_only_affects_later_evaluations() {
    let mut s = session();
    assert_eq!(result_text(&s.evaluate_text("cos(0)")), "1");
    s.toggle_angle_mode();
    assert_eq!(s.state().angle_mode, AngleMode::Deg);
    assert_eq!(result_text(&s.evaluate_text("cos(180)")), "-1");
    assert_eq!(s.history().len(), 2);
}

#[test]
fn parse_error_leaves_history_and_buffer_untouched() {
    let mut s = session();
    s.evaluate_text("1+1");
    s.load_text("2+");

    let feedback = s.evaluate();

    assert!(feedback.is_error(), "got {feedback:?}");
    assert_eq!(s.history().len(), 1);
    assert_eq!(s.buffer().text(), "2+");
    assert_eq!(s.buffer().cursor(), 2);
    assert_eq!(s.ans().map(Value::as_f64), Some(2.0));
}

#[test]
fn math_error_is_reported_not_raised() {
    let mut s = session();
    let feedback = s.evaluate_text("1/0");
    assert_eq!(feedback, Feedback::Error("Math error: result is infinity".to_string()));
    assert!(s.history().is_empty());
    assert_eq!(s.ans(), None);
}

#[test]
fn empty_buffer_evaluation_is_a_no_op() {
    let mut s = session();
    s.load_text("   ");
    let frames_before = s.renderer().frames().len();

    assert_eq!(s.evaluate(), Feedback::None);
    assert!(s.history().is_empty());
    assert_eq!(s.renderer().frames().len(), frames_before);
}

#[test]
fn ans_feeds_the_next_evaluation() {
    let mut s = session();
    s.evaluate_text("6*7");
    assert_eq!(result_text(&s.evaluate_text("ans/2")), "21");
}

#[test]
fn grouped_display_keeps_plain_history() {
    let options = SessionOptions {
        group_digits: true,
        ..SessionOptions::default()
    };
    let mut s = Session::with_options(
        NumericEngine::new(),
        RecordingRenderer::new(),
        SessionState::default(),
        options,
    );

    match s.evaluate_text("1000*1234") {
        Feedback::Result { entry, display } => {
            assert_eq!(entry.result(), "1234000");
            assert_eq!(display, "1,234,000");
        }
        other => panic!("expected a result, got {other:?}"),
    }
}

#[test]
fn successful_evaluation_renders_input_and_result() {
    let mut s = session();
    s.evaluate_text("sqrt(16)*2");
    assert_eq!(s.renderer().last(), Some(r"\sqrt{16} \times 2 = 8"));
}

// ===== Button dispatch =====

#[test]
fn buttons_build_and_evaluate_an_expression() {
    let mut s = session();
    press(
        &mut s,
        &[
            ButtonAction::Digit(1),
            ButtonAction::Digit(2),
            ButtonAction::Operator(Operator::Multiply),
            ButtonAction::OpenParen,
            ButtonAction::Digit(3),
            ButtonAction::Operator(Operator::Add),
            ButtonAction::Digit(4),
            ButtonAction::CloseParen,
        ],
    );
    assert_eq!(s.buffer().text(), "12*(3+4)");
    assert_eq!(result_text(&s.dispatch(ButtonAction::Evaluate)), "84");
}

#[test]
fn function_button_places_cursor_inside_call() {
    let mut s = session();
    press(
        &mut s,
        &[
            ButtonAction::Function(Function::Sqrt),
            ButtonAction::Digit(9),
        ],
    );
    assert_eq!(s.buffer().text(), "sqrt(9)");
    assert_eq!(s.buffer().cursor(), 6);
}

#[test]
fn function_button_wraps_selection() {
    let mut s = session();
    s.load_text("1+2");
    s.buffer_mut().select(0, 3);
    s.dispatch(ButtonAction::Function(Function::Abs));
    assert_eq!(s.buffer().text(), "abs(1+2)");
    assert_eq!(s.buffer().cursor(), 8);
}

#[test]
fn second_shift_inserts_inverse_once() {
    let mut s = session();
    assert_eq!(
        s.dispatch(ButtonAction::ToggleSecond),
        Feedback::Message("2nd on".to_string())
    );
    s.dispatch(ButtonAction::Function(Function::Sin));
    s.dispatch(ButtonAction::CursorRight);
    s.dispatch(ButtonAction::Operator(Operator::Add));
    s.dispatch(ButtonAction::Function(Function::Sin));

    assert_eq!(s.buffer().text(), "asin()+sin()");
    assert!(!s.state().second);
}

#[test]
fn editing_buttons() {
    let mut s = session();
    press(
        &mut s,
        &[
            ButtonAction::Digit(1),
            ButtonAction::Digit(2),
            ButtonAction::Digit(3),
            ButtonAction::CursorLeft,
            ButtonAction::Backspace,
            ButtonAction::DecimalPoint,
            ButtonAction::CursorLeft,
            ButtonAction::CursorLeft,
            ButtonAction::Delete,
        ],
    );
    assert_eq!(s.buffer().text(), ".3");

    s.dispatch(ButtonAction::Clear);
    assert!(s.buffer().is_empty());
    assert_eq!(s.buffer().cursor(), 0);
}

#[test]
fn constants_and_square() {
    let mut s = session();
    press(
        &mut s,
        &[
            ButtonAction::Constant(Constant::E),
            ButtonAction::Square,
            ButtonAction::Operator(Operator::Subtract),
            ButtonAction::Constant(Constant::Pi),
        ],
    );
    assert_eq!(s.buffer().text(), "e^2-pi");
}

#[test]
fn constant_after_digit_is_a_product() {
    let mut s = session();
    press(
        &mut s,
        &[
            ButtonAction::Digit(2),
            ButtonAction::Constant(Constant::E),
            ButtonAction::Operator(Operator::Add),
            ButtonAction::Digit(1),
        ],
    );
    assert_eq!(s.buffer().text(), "2*e+1");
    let expected = format_plain(2.0 * std::f64::consts::E + 1.0, DEFAULT_PRECISION);
    assert_eq!(result_text(&s.dispatch(ButtonAction::Evaluate)), expected);
}

#[test]
fn digit_after_constant_is_a_product() {
    let mut s = session();
    press(
        &mut s,
        &[
            ButtonAction::Constant(Constant::Pi),
            ButtonAction::Digit(2),
            ButtonAction::Constant(Constant::Pi),
        ],
    );
    assert_eq!(s.buffer().text(), "pi*2*pi");
}

#[test]
fn ans_after_digit_is_a_product() {
    let mut s = session();
    s.evaluate_text("5");
    s.dispatch(ButtonAction::Clear);
    press(&mut s, &[ButtonAction::Digit(3), ButtonAction::Ans]);
    assert_eq!(s.buffer().text(), "3*5");
}

#[test]
fn typed_implicit_products_and_unit_suffixes() {
    let mut s = session();
    assert_eq!(
        result_text(&s.evaluate_text("2pi")),
        format_plain(std::f64::consts::TAU, DEFAULT_PRECISION)
    );

    let feedback = s.evaluate_text("5m");
    assert!(feedback.is_error(), "got {feedback:?}");
    assert!(matches!(&feedback, Feedback::Error(m) if m.contains("unit suffix")));
    assert_eq!(s.history().len(), 1);
}

#[test]
fn edits_refresh_the_display() {
    let mut s = session();
    s.dispatch(ButtonAction::Constant(Constant::Pi));
    s.dispatch(ButtonAction::Operator(Operator::Divide));
    assert_eq!(s.renderer().last(), Some(r"\pi \div "));
}

#[test]
fn ans_button_without_answer_is_an_error() {
    let mut s = session();
    let feedback = s.dispatch(ButtonAction::Ans);
    assert_eq!(feedback, Feedback::Error("Input error: no answer yet".to_string()));
    assert!(s.buffer().is_empty());
}

#[test]
fn ans_button_inserts_result_text() {
    let mut s = session();
    s.evaluate_text("3-5");
    s.dispatch(ButtonAction::Clear);
    press(
        &mut s,
        &[
            ButtonAction::Digit(1),
            ButtonAction::Operator(Operator::Subtract),
            ButtonAction::Ans,
        ],
    );
    assert_eq!(s.buffer().text(), "1-(-2)");
    assert_eq!(result_text(&s.dispatch(ButtonAction::Evaluate)), "3");
}

#[test]
fn toggle_angle_button_reports_mode() {
    let mut s = session();
    assert_eq!(
        s.dispatch(ButtonAction::ToggleAngleMode),
        Feedback::Message("DEG".to_string())
    );
    assert_eq!(
        s.dispatch(ButtonAction::ToggleAngleMode),
        Feedback::Message("RAD".to_string())
    );
}

// ===== History =====

#[test]
fn replay_loads_input_without_evaluating() {
    let mut s = session();
    s.evaluate_text("2+2");
    s.evaluate_text("3*3");
    s.dispatch(ButtonAction::Clear);

    assert_eq!(s.replay(0), Feedback::Edited);
    assert_eq!(s.buffer().text(), "2+2");
    assert_eq!(s.buffer().cursor(), 3);
    assert_eq!(s.history().len(), 2);
}

#[test]
fn replay_out_of_range_is_an_error() {
    let mut s = session();
    s.evaluate_text("1");
    s.load_text("keep");

    assert!(s.replay(3).is_error());
    assert_eq!(s.buffer().text(), "keep");
}

#[test]
fn clear_history_keeps_ans() {
    let mut s = session();
    s.evaluate_text("5");
    s.dispatch(ButtonAction::ClearHistory);
    assert!(s.history().is_empty());
    assert_eq!(s.ans().map(Value::as_f64), Some(5.0));
}

// ===== Transforms =====

#[test]
fn numeric_engine_reports_unsupported_transform() {
    let mut s = session();
    s.load_text("x^2");
    let feedback = s.dispatch(ButtonAction::Transform(TransformKind::Factor));
    assert_eq!(
        feedback,
        Feedback::Error("Math error: factor is not supported by this engine".to_string())
    );
    assert!(s.history().is_empty());
}

#[test]
fn transform_appends_labelled_entry() {
    let mut s = Session::new(SymbolicStub, RecordingRenderer::new());
    s.load_text("x^2");

    let feedback = s.dispatch(ButtonAction::Transform(TransformKind::Differentiate));

    assert_eq!(result_text(&feedback), "2*x");
    assert_eq!(s.history().all(), &[HistoryEntry::new("diff(x^2, x)", "2*x")]);
    assert_eq!(s.renderer().last(), Some(r"\mathrm{2*x}"));
    assert_eq!(s.ans(), None);
}

#[test]
fn transform_with_parameters() {
    let mut s = Session::new(SymbolicStub, RecordingRenderer::new());
    s.load_text("x^2");

    let integral = Transform::Integrate {
        variable: "x".to_string(),
        bounds: Some(("0".to_string(), "1".to_string())),
    };
    s.apply_transform(&integral);

    assert_eq!(
        s.history().last(),
        Some(&HistoryEntry::new("integrate(x^2, x, 0, 1)", "integrate[x^2]"))
    );
}

#[test]
fn transform_failures_are_caught() {
    let mut s = Session::new(SymbolicStub, RecordingRenderer::new());

    let empty = s.dispatch(ButtonAction::Transform(TransformKind::Simplify));
    assert_eq!(empty, Feedback::Error("Input error: expression is empty".to_string()));

    s.load_text("x^2+");
    assert!(s.dispatch(ButtonAction::Transform(TransformKind::Expand)).is_error());

    s.load_text("x^2");
    let unsolved = s.dispatch(ButtonAction::Transform(TransformKind::Solve));
    assert_eq!(unsolved, Feedback::Error("Math error: no solution".to_string()));
    assert!(s.history().is_empty());
}

// ===== Statistics =====

#[test]
fn statistics_reports_summary_lines() {
    let mut s = session();
    match s.statistics("2 4 4 4 5 5 7 9") {
        Feedback::Message(text) => {
            assert!(text.starts_with("n = 8\nsum = 40\nmean = 5"), "got {text}");
            assert!(text.contains("pstdev = 2"));
        }
        other => panic!("expected a message, got {other:?}"),
    }
    assert!(s.history().is_empty());
}

#[test]
fn statistics_rejects_bad_input() {
    let mut s = session();
    assert_eq!(
        s.statistics("1 x 2"),
        Feedback::Error("Input error: 'x' is not a number".to_string())
    );
}
