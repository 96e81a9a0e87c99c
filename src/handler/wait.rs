//! Handler used while a message waits for a key press

use std::cell::Cell;
use std::rc::Rc;

use super::CommandHandler;
use crate::command::Command;

/// Claims the next command and records that the user responded
///
/// Pushed at [`CommandContext::Waiting`](crate::context::CommandContext::Waiting)
/// while a message is displayed. The caller keeps a clone of the flag and pops
/// the handler once it is set.
#[derive(Debug, Clone, Default)]
pub struct KeyWaiter {
    responded: Rc<Cell<bool>>,
    last_command: Rc<Cell<Option<Command>>>,
}

impl KeyWaiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_responded(&self) -> bool {
        self.responded.get()
    }

    /// The command that dismissed the message
    pub fn last_command(&self) -> Option<Command> {
        self.last_command.get()
    }
}

impl CommandHandler for KeyWaiter {
    fn handle_command(&mut self, command: Command) -> bool {
        // NOOP is what drivers send for key releases
        if command == Command::NOOP {
            return false;
        }
        self.responded.set(true);
        self.last_command.set(Some(command));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waiter_claims_and_records() {
        let waiter = KeyWaiter::new();
        let mut handler = waiter.clone();

        assert!(!waiter.has_responded());
        assert!(handler.handle_command(Command::LNDN));
        assert!(waiter.has_responded());
        assert_eq!(waiter.last_command(), Some(Command::LNDN));
    }

    #[test]
    fn test_waiter_ignores_noop() {
        let waiter = KeyWaiter::new();
        let mut handler = waiter.clone();

        assert!(!handler.handle_command(Command::NOOP));
        assert!(!waiter.has_responded());
    }
}
