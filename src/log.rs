//! Command logging sink
//!
//! The dispatcher reports every command it sees. Sinks must not block or fail.

use crate::command::Command;

/// Receives the three kinds of dispatch events
pub trait CommandLog {
    /// A command dispatched as received
    fn command(&mut self, command: Command);
    /// A command the remapper replaced before dispatch
    fn transformed(&mut self, original: Command, remapped: Command);
    /// A command no handler claimed
    fn unhandled(&mut self, command: Command);
}

/// Writes dispatch events through `tracing`
///
/// Filter with `RUST_LOG=brld::commands=info` to see every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingCommandLog;

impl CommandLog for TracingCommandLog {
    fn command(&mut self, command: Command) {
        tracing::info!(
            target: "brld::commands",
            code = command.raw(),
            "command: {}",
            command
        );
    }

    fn transformed(&mut self, original: Command, remapped: Command) {
        tracing::info!(
            target: "brld::commands",
            original = original.raw(),
            remapped = remapped.raw(),
            "command: {} -> {}",
            original,
            remapped
        );
    }

    fn unhandled(&mut self, command: Command) {
        tracing::warn!(
            target: "brld::commands",
            "unhandled command: {:04X}",
            command.raw()
        );
    }
}

/// One recorded dispatch event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEvent {
    Command(Command),
    Transformed { original: Command, remapped: Command },
    Unhandled(Command),
}

/// Keeps dispatch events in memory
///
/// Clones share the same buffer, so a test (or the control API) can keep a
/// handle while the dispatcher owns the sink.
#[derive(Debug, Clone, Default)]
pub struct MemoryCommandLog {
    events: std::rc::Rc<std::cell::RefCell<Vec<LogEvent>>>,
}

impl MemoryCommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.borrow().clone()
    }

    pub fn unhandled_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, LogEvent::Unhandled(_)))
            .count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl CommandLog for MemoryCommandLog {
    fn command(&mut self, command: Command) {
        self.events.borrow_mut().push(LogEvent::Command(command));
    }

    fn transformed(&mut self, original: Command, remapped: Command) {
        self.events
            .borrow_mut()
            .push(LogEvent::Transformed { original, remapped });
    }

    fn unhandled(&mut self, command: Command) {
        self.events.borrow_mut().push(LogEvent::Unhandled(command));
    }
}
