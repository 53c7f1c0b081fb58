//! # Display Surface
//!
//! The single status region that shows the latest dispatch outcome. The
//! dispatcher receives a surface handle instead of looking one up from
//! ambient global state, which keeps the component testable without any
//! real UI attached.
//!
//! The surface is shared and unsynchronized by contract: overlapping
//! dispatches may interleave writes and the last writer wins.

/// A mutable text region holding the latest status string.
pub trait DisplaySurface: Send + Sync {
    /// Replaces the surface content with `text`.
    fn render(&self, text: &str);
}

/// Writes each status line to stdout. The display region of the CLI.
pub struct StdoutSurface;

impl DisplaySurface for StdoutSurface {
    fn render(&self, text: &str) {
        println!("{text}");
    }
}

/// Drops every write. Stands in when no status region is wired up, so a
/// missing surface never turns into an error.
pub struct NullSurface;

impl DisplaySurface for NullSurface {
    fn render(&self, _text: &str) {}
}
