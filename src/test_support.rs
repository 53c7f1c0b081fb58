//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use crate::dispatch::route::{ActionRoute, PlannedRequest};
use crate::surface::DisplaySurface;

/// A surface that records every write for later inspection.
pub struct MemorySurface {
    writes: Mutex<Vec<String>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        MemorySurface {
            writes: Mutex::new(Vec::new()),
        }
    }

    /// All writes so far, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    /// The most recent write, if any.
    pub fn last(&self) -> Option<String> {
        self.writes.lock().unwrap().last().cloned()
    }
}

impl DisplaySurface for MemorySurface {
    fn render(&self, text: &str) {
        self.writes.lock().unwrap().push(text.to_string());
    }
}

/// A route that never resolves, for exercising the no-op path.
pub struct DeadEndRoute;

impl ActionRoute for DeadEndRoute {
    fn name(&self) -> &str {
        "dead-end"
    }

    fn plan(&self, _action: &str) -> Option<PlannedRequest> {
        None
    }
}
