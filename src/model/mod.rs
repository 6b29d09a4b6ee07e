//! Domain model types (pure).
//!
//! All types in this module are plain data: no I/O, no engine calls.

pub mod angle_mode;
pub mod button_action;
pub mod error;
pub mod transform;
pub mod value;

// Re-export for convenience
pub use angle_mode::{AngleMode, InvalidAngleMode};
pub use button_action::{ButtonAction, Constant, Function, Operator};
pub use error::{CalcError, EvalError, InputError, ParseError};
pub use transform::{Transform, TransformKind};
pub use value::Value;
