//! Display surface adapter.
//!
//! The core only produces markup strings; typesetting belongs to whatever
//! implements [`DisplayRenderer`].

pub mod markup;

pub use markup::to_markup;

use std::io::Write;
use tracing::warn;

/// External collaborator that shows math markup.
pub trait DisplayRenderer {
    /// Show `markup` (LaTeX-style) on the display surface.
    fn render_math(&mut self, markup: &str);
}

/// Renderer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl DisplayRenderer for NullRenderer {
    fn render_math(&mut self, _markup: &str) {}
}

/// Renderer writing one markup line per refresh to a writer.
///
/// Write failures are logged and dropped: a broken display must not break
/// the session.
#[derive(Debug)]
pub struct WriterRenderer<W: Write> {
    writer: W,
}

impl<W: Write> WriterRenderer<W> {
    /// Renderer writing one line per frame to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// The wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplayRenderer for WriterRenderer<W> {
    fn render_math(&mut self, markup: &str) {
        if let Err(e) = writeln!(self.writer, "{markup}") {
            warn!(error = %e, "display write failed");
        }
    }
}

/// Renderer that keeps every markup string, for inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingRenderer {
    frames: Vec<String>,
}

impl RecordingRenderer {
    /// Recorder with no frames.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every markup string rendered so far, oldest first.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Most recent frame.
    pub fn last(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl DisplayRenderer for RecordingRenderer {
    fn render_math(&mut self, markup: &str) {
        self.frames.push(markup.to_string());
    }
}
