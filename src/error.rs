//! Errors reported by the dispatch core
//!
//! Every failure is local and returned to the immediate caller; none of them
//! leaves the core in an inconsistent state.

use std::collections::TryReserveError;

/// Failure of a core operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Memory for a new queue item or handler level couldn't be reserved
    Exhausted(&'static str),
    /// `pop` with no handler installed
    EmptyHandlerStack,
    /// The "no command" sentinel was enqueued
    NoCommand,
}

impl CoreError {
    pub(crate) fn exhausted(what: &'static str, error: TryReserveError) -> Self {
        tracing::error!("Failed to allocate {}: {}", what, error);
        CoreError::Exhausted(what)
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::Exhausted(what) => write!(f, "Out of memory for {}", what),
            CoreError::EmptyHandlerStack => write!(f, "No command handler to pop"),
            CoreError::NoCommand => write!(f, "No command to enqueue"),
        }
    }
}

impl std::error::Error for CoreError {}
