//! Scientific calculator core (scical)
//!
//! Expression buffer with cursor and selection, degree/radian rewriting of
//! trig calls, an append-only evaluation history with replay, a single-slot
//! answer register and a button dispatch table. The math engine and the
//! display surface sit behind traits.
//!
//! Pure core, impure shell: everything under [`model`], [`state`],
//! [`engine`] and [`view`] is free of I/O except through the collaborators
//! it is handed; [`repl`], [`source`] and [`logging`] do the I/O.

pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repl;
pub mod source;
pub mod state;
pub mod view;
