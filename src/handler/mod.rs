//! Command handlers and the handler stack
//!
//! Handlers are consulted most-recently-pushed first. Each one either claims a
//! command (returns `true`) or declines it, in which case the walk moves to the
//! level below.

mod stack;
mod wait;

pub use stack::HandlerStack;
pub use wait::KeyWaiter;

use crate::command::Command;

/// A capability that may claim and act on a command
///
/// The handler's own state plays the part of the per-level data blob: it is
/// owned by the stack level and dropped when the level is popped.
pub trait CommandHandler {
    /// Returns `true` if the command was claimed
    fn handle_command(&mut self, command: Command) -> bool;
}

impl<F> CommandHandler for F
where
    F: FnMut(Command) -> bool,
{
    fn handle_command(&mut self, command: Command) -> bool {
        self(command)
    }
}
