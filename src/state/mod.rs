//! Calculator state (pure).
//!
//! Buffer and history transitions are plain methods testable without any
//! display. The session wires them to the engine and the renderer.

pub mod buffer;
pub mod history;
pub mod session;

// Re-export for convenience
pub use buffer::{ExpressionBuffer, Selection};
pub use history::{HistoryEntry, HistoryLog};
pub use session::{Feedback, Session, SessionOptions, SessionState};
