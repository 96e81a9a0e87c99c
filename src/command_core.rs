//! The dispatch core handle
//!
//! [`CommandCore`] owns everything the command path touches: the dispatcher
//! (and its handler stack), the command queue, the executor and filter slots,
//! and the screen context provider. It is created once at startup, owned by
//! the event loop, and only ever used from the dispatch thread.

use crate::alarm::AlarmScheduler;
use crate::api::{CommandExecutor, CommandFilter};
use crate::command::Command;
use crate::config::Preferences;
use crate::context::{CommandContext, FixedScreenContext, ScreenContext};
use crate::dispatch::Dispatcher;
use crate::error::CoreError;
use crate::handler::CommandHandler;
use crate::log::CommandLog;
use crate::queue::CommandQueue;

/// Handler stack, command queue and executor for one daemon instance
pub struct CommandCore {
    dispatcher: Dispatcher,
    queue: CommandQueue,
    executor: Option<Box<dyn CommandExecutor>>,
    filter: Option<Box<dyn CommandFilter>>,
    screen: Box<dyn ScreenContext>,
}

impl CommandCore {
    pub fn new(preferences: Preferences, scheduler: Box<dyn AlarmScheduler>) -> Self {
        Self {
            dispatcher: Dispatcher::new(preferences),
            queue: CommandQueue::new(scheduler),
            executor: None,
            filter: None,
            screen: Box::new(FixedScreenContext::default()),
        }
    }

    /// Replace the log sink (builder pattern)
    ///
    /// Handlers already pushed stay in place.
    pub fn with_log(mut self, log: Box<dyn CommandLog>) -> Self {
        self.dispatcher.set_log(log);
        self
    }

    /// Replace the screen context provider (builder pattern)
    pub fn with_screen(mut self, screen: Box<dyn ScreenContext>) -> Self {
        self.screen = screen;
        self
    }

    // ========================================================================
    // Queue
    // ========================================================================

    /// Queue a command for asynchronous execution
    pub fn enqueue_command(&mut self, command: Command) -> Result<(), CoreError> {
        self.queue.enqueue(command)
    }

    /// Alarm callback: execute one queued command, then rearm if more remain
    pub fn handle_alarm(&mut self) {
        if !self.queue.alarm_fired() {
            tracing::warn!(target: "brld::queue", "alarm fired with none pending");
            return;
        }

        let filter = self
            .filter
            .as_mut()
            .map(|f| &mut **f as &mut dyn CommandFilter);

        if let Some(command) = self.queue.dequeue(filter) {
            self.execute_command(command);
        }

        self.queue.rearm();
    }

    /// Run a command through the current executor
    pub fn execute_command(&mut self, command: Command) -> bool {
        match self.executor.as_mut() {
            Some(executor) => executor.execute_command(command, &mut self.dispatcher),
            None => self.dispatcher.handle_command(command),
        }
    }

    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }

    // ========================================================================
    // Handlers and context
    // ========================================================================

    pub fn push_handler(
        &mut self,
        context: CommandContext,
        handler: Box<dyn CommandHandler>,
    ) -> Result<(), CoreError> {
        self.dispatcher.push_handler(context, handler)
    }

    pub fn pop_handler(&mut self) -> Result<(), CoreError> {
        self.dispatcher.pop_handler()
    }

    /// Context governing the next raw input
    pub fn command_context(&self) -> CommandContext {
        self.dispatcher.command_context(self.screen.as_ref())
    }

    /// Handle a command immediately, bypassing the queue and executor
    pub fn handle_command(&mut self, command: Command) -> bool {
        self.dispatcher.handle_command(command)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.dispatcher.set_preferences(preferences);
    }

    // ========================================================================
    // Interception
    // ========================================================================

    /// Install an executor override, returning the one it replaces
    ///
    /// Hand the returned value back to [`restore_executor`](Self::restore_executor)
    /// when the override is removed.
    pub fn install_executor(
        &mut self,
        executor: Box<dyn CommandExecutor>,
    ) -> Option<Box<dyn CommandExecutor>> {
        tracing::debug!("command executor overridden");
        self.executor.replace(executor)
    }

    /// Reinstate a previous executor (`None` means the dispatcher)
    pub fn restore_executor(&mut self, previous: Option<Box<dyn CommandExecutor>>) {
        tracing::debug!(default = previous.is_none(), "command executor restored");
        self.executor = previous;
    }

    pub fn has_executor_override(&self) -> bool {
        self.executor.is_some()
    }

    /// Start filtering dequeued commands (control API connected)
    pub fn install_filter(&mut self, filter: Box<dyn CommandFilter>) {
        self.filter = Some(filter);
    }

    /// Stop filtering dequeued commands (control API disconnected)
    pub fn remove_filter(&mut self) -> Option<Box<dyn CommandFilter>> {
        self.filter.take()
    }

    // ========================================================================
    // Shutdown
    // ========================================================================

    /// Tear down the core, returning how many queued commands were discarded
    pub fn shutdown(mut self) -> usize {
        let discarded = self.queue.clear();
        if discarded > 0 {
            tracing::info!(discarded, "discarding queued commands at shutdown");
        }
        discarded
    }
}

impl std::fmt::Debug for CommandCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandCore")
            .field("dispatcher", &self.dispatcher)
            .field("queue", &self.queue)
            .field("executor_override", &self.executor.is_some())
            .field("filter", &self.filter.is_some())
            .finish_non_exhaustive()
    }
}
