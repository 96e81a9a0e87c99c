//! Boundary with an external control API
//!
//! While a control-API client is connected it sees every dequeued command
//! before the daemon does, and may rewrite it or take it over entirely.

use crate::command::Command;
use crate::dispatch::Dispatcher;

/// What a filter did with a dequeued command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filtered {
    /// Execute this (possibly rewritten) command
    Pass(Command),
    /// Fully handled by the API; nothing further to do
    Consumed,
}

/// Intercepts commands as they leave the queue
pub trait CommandFilter {
    fn filter_command(&mut self, command: Command) -> Filtered;
}

impl<F> CommandFilter for F
where
    F: FnMut(Command) -> Filtered,
{
    fn filter_command(&mut self, command: Command) -> Filtered {
        self(command)
    }
}

/// Runs a dequeued command
///
/// The dispatcher is the default. An override installed on the core (for
/// instance by the control API) receives the dispatcher so it can still fall
/// back to default handling.
pub trait CommandExecutor {
    /// Returns `true` if the command was handled
    fn execute_command(&mut self, command: Command, dispatcher: &mut Dispatcher) -> bool;
}

impl<F> CommandExecutor for F
where
    F: FnMut(Command, &mut Dispatcher) -> bool,
{
    fn execute_command(&mut self, command: Command, dispatcher: &mut Dispatcher) -> bool {
        self(command, dispatcher)
    }
}
