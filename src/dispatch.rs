//! Command dispatcher
//!
//! Runs a command through the remapper, reports it to the log sink, and walks
//! the handler stack until some handler claims it.

use crate::command::Command;
use crate::config::Preferences;
use crate::context::{CommandContext, ScreenContext};
use crate::error::CoreError;
use crate::handler::{CommandHandler, HandlerStack};
use crate::log::{CommandLog, TracingCommandLog};
use crate::remap::remap;

/// Default command executor: remap, log, then offer to each handler
pub struct Dispatcher {
    handlers: HandlerStack,
    preferences: Preferences,
    log: Box<dyn CommandLog>,
}

impl Dispatcher {
    pub fn new(preferences: Preferences) -> Self {
        Self::with_log(preferences, Box::new(TracingCommandLog))
    }

    pub fn with_log(preferences: Preferences, log: Box<dyn CommandLog>) -> Self {
        Self {
            handlers: HandlerStack::new(),
            preferences,
            log,
        }
    }

    /// Replace the log sink, keeping handlers and preferences
    pub fn set_log(&mut self, log: Box<dyn CommandLog>) {
        self.log = log;
    }

    /// Handle one command; returns `true` if a handler claimed it
    pub fn handle_command(&mut self, command: Command) -> bool {
        let real = remap(command, self.preferences.skip_identical_lines);

        if real == command {
            self.log.command(command);
        } else {
            self.log.transformed(command, real);
        }

        if self.handlers.dispatch(real) {
            return true;
        }

        self.log.unhandled(real);
        false
    }

    pub fn push_handler(
        &mut self,
        context: CommandContext,
        handler: Box<dyn CommandHandler>,
    ) -> Result<(), CoreError> {
        self.handlers.push(context, handler)
    }

    pub fn pop_handler(&mut self) -> Result<(), CoreError> {
        self.handlers.pop()
    }

    /// Effective context: the top handler's, or the screen's when that is `Default`
    pub fn command_context(&self, screen: &dyn ScreenContext) -> CommandContext {
        match self.handlers.current_context() {
            CommandContext::Default => screen.command_context(),
            context => context,
        }
    }

    pub fn handlers(&self) -> &HandlerStack {
        &self.handlers
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: Preferences) {
        if preferences != self.preferences {
            tracing::info!(?preferences, "preferences changed");
        }
        self.preferences = preferences;
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handlers)
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}
