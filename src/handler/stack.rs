//! LIFO stack of context-scoped command handlers

use super::CommandHandler;
use crate::command::Command;
use crate::context::CommandContext;
use crate::error::CoreError;

/// One installed handler and the context it is scoped to
struct HandlerLevel {
    context: CommandContext,
    handler: Box<dyn CommandHandler>,
}

/// Ordered chain of handlers; the last element is the top of the stack
#[derive(Default)]
pub struct HandlerStack {
    levels: Vec<HandlerLevel>,
}

impl HandlerStack {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Install a handler on top of the stack
    ///
    /// On allocation failure the stack is left unchanged and the handler is
    /// dropped; the caller must treat it as not installed.
    pub fn push(
        &mut self,
        context: CommandContext,
        handler: Box<dyn CommandHandler>,
    ) -> Result<(), CoreError> {
        self.levels
            .try_reserve(1)
            .map_err(|e| CoreError::exhausted("command handler level", e))?;

        self.levels.push(HandlerLevel { context, handler });
        tracing::debug!(depth = self.levels.len(), %context, "pushed command handler");
        Ok(())
    }

    /// Remove and release the top handler
    pub fn pop(&mut self) -> Result<(), CoreError> {
        match self.levels.pop() {
            Some(level) => {
                tracing::debug!(
                    depth = self.levels.len(),
                    context = %level.context,
                    "popped command handler"
                );
                Ok(())
            }
            None => Err(CoreError::EmptyHandlerStack),
        }
    }

    /// Context of the top level, or the deferred `Default` marker
    pub fn current_context(&self) -> CommandContext {
        self.levels
            .last()
            .map(|level| level.context)
            .unwrap_or(CommandContext::Default)
    }

    /// Offer a command to each handler from the top down
    ///
    /// Stops at the first handler that claims it.
    pub fn dispatch(&mut self, command: Command) -> bool {
        self.levels
            .iter_mut()
            .rev()
            .any(|level| level.handler.handle_command(command))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl std::fmt::Debug for HandlerStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.levels.iter().rev().map(|level| level.context))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn claim_all() -> Box<dyn CommandHandler> {
        Box::new(|_: Command| true)
    }

    fn decline_all() -> Box<dyn CommandHandler> {
        Box::new(|_: Command| false)
    }

    #[test]
    fn test_empty_stack_reports_default() {
        let stack = HandlerStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.current_context(), CommandContext::Default);
    }

    #[test]
    fn test_pop_empty_fails_without_fault() {
        let mut stack = HandlerStack::new();
        assert_eq!(stack.pop(), Err(CoreError::EmptyHandlerStack));
        assert_eq!(stack.pop(), Err(CoreError::EmptyHandlerStack));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_push_pop_nests() {
        let mut stack = HandlerStack::new();
        stack.push(CommandContext::Menu, claim_all()).unwrap();
        stack.push(CommandContext::Waiting, claim_all()).unwrap();
        assert_eq!(stack.current_context(), CommandContext::Waiting);

        stack.pop().unwrap();
        assert_eq!(stack.current_context(), CommandContext::Menu);

        stack.pop().unwrap();
        assert_eq!(stack.current_context(), CommandContext::Default);
        assert!(stack.pop().is_err());
    }

    #[test]
    fn test_dispatch_walks_top_down_and_stops_at_claim() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut stack = HandlerStack::new();

        let log = Rc::clone(&seen);
        stack
            .push(
                CommandContext::Default,
                Box::new(move |_: Command| {
                    log.borrow_mut().push("bottom");
                    true
                }),
            )
            .unwrap();

        let log = Rc::clone(&seen);
        stack
            .push(
                CommandContext::Menu,
                Box::new(move |_: Command| {
                    log.borrow_mut().push("middle");
                    true
                }),
            )
            .unwrap();

        let log = Rc::clone(&seen);
        stack
            .push(
                CommandContext::Chords,
                Box::new(move |_: Command| {
                    log.borrow_mut().push("top");
                    false
                }),
            )
            .unwrap();

        assert!(stack.dispatch(Command::LNUP));
        assert_eq!(*seen.borrow(), vec!["top", "middle"]);
    }

    #[test]
    fn test_dispatch_unclaimed() {
        let mut stack = HandlerStack::new();
        assert!(!stack.dispatch(Command::LNUP));

        stack.push(CommandContext::Default, decline_all()).unwrap();
        assert!(!stack.dispatch(Command::LNUP));
    }

    #[test]
    fn test_pop_releases_handler_state() {
        let state = Rc::new(());
        let held = Rc::clone(&state);
        let mut stack = HandlerStack::new();
        stack
            .push(
                CommandContext::Menu,
                Box::new(move |_: Command| {
                    let _ = &held;
                    true
                }),
            )
            .unwrap();
        assert_eq!(Rc::strong_count(&state), 2);

        stack.pop().unwrap();
        assert_eq!(Rc::strong_count(&state), 1);
    }
}
