//! Acceptance tests: calculator scenarios through the public API.
//!
//! Each test drives a session the way a keypad would and checks what the
//! display surface received.

use scical::config::ButtonMap;
use scical::engine::NumericEngine;
use scical::model::AngleMode;
use scical::state::{Feedback, HistoryEntry, Session};
use scical::view::RecordingRenderer;

fn press_all(session: &mut Session<NumericEngine, RecordingRenderer>, labels: &[&str]) -> Feedback {
    let buttons = ButtonMap::default();
    let mut last = Feedback::None;
    for label in labels {
        let action = buttons
            .get(label)
            .unwrap_or_else(|| panic!("no button labelled {label}"));
        last = session.dispatch(action);
    }
    last
}

#[test]
fn keypad_evaluation_updates_history_ans_and_display() {
    let mut session = Session::new(NumericEngine::new(), RecordingRenderer::new());

    let feedback = press_all(&mut session, &["2", "+", "2", "="]);

    assert!(matches!(feedback, Feedback::Result { .. }));
    assert_eq!(session.history().all(), &[HistoryEntry::new("2+2", "4")]);
    assert_eq!(session.ans().map(|v| v.as_f64()), Some(4.0));
    assert_eq!(session.renderer().last(), Some("2+2 = 4"));
}

#[test]
fn degree_keypad_session() {
    let mut session = Session::new(NumericEngine::new(), RecordingRenderer::new());

    press_all(&mut session, &["DEG/RAD"]);
    assert_eq!(session.state().angle_mode, AngleMode::Deg);

    press_all(&mut session, &["sin", "3", "0", "→", "×", "2", "="]);

    assert_eq!(
        session.history().last(),
        Some(&HistoryEntry::new("sin(30)*2", "1"))
    );
    assert_eq!(
        session.renderer().last(),
        Some(r"\sin(30) \times 2 = 1")
    );
}

#[test]
fn failed_evaluation_keeps_state() {
    let mut session = Session::new(NumericEngine::new(), RecordingRenderer::new());
    press_all(&mut session, &["9", "="]);
    press_all(&mut session, &["AC", "2", "+"]);
    let frames_before = session.renderer().frames().len();

    let feedback = press_all(&mut session, &["="]);

    assert!(feedback.is_error());
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.buffer().text(), "2+");
    assert_eq!(session.ans().map(|v| v.as_f64()), Some(9.0));
    assert_eq!(session.renderer().frames().len(), frames_before);
}

#[test]
fn replay_then_edit_then_evaluate() {
    let mut session = Session::new(NumericEngine::new(), RecordingRenderer::new());
    session.evaluate_text("12/4");
    press_all(&mut session, &["AC"]);

    session.replay(0);
    press_all(&mut session, &["DEL", "3", "="]);

    assert_eq!(
        session.history().all(),
        &[HistoryEntry::new("12/4", "3"), HistoryEntry::new("12/3", "4")]
    );
}
