//! The dispatch thread's event loop
//!
//! Input sources run on their own threads and post [`Event`]s through an
//! [`InputSender`]. The loop owns the [`CommandCore`] and is the only code that
//! touches it. Alarms set by the command queue come back through the same
//! channel, so they always run on the dispatch thread and never inside the
//! code that enqueued the command.

use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::alarm::AlarmScheduler;
use crate::command::Command;
use crate::command_core::CommandCore;
use crate::config::Preferences;
use crate::context::CommandContext;
use crate::handler::KeyWaiter;
use crate::keytable::{KeyTable, KeyValue};

/// Something for the dispatch thread to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A raw key from the display, translated in the current context
    Key(KeyValue),
    /// An already-translated command
    Command(Command),
    /// Show a message; with `wait` set, the next command dismisses it
    Message { text: String, wait: bool },
    /// The command queue's drain alarm
    Alarm,
    /// Stop the loop
    Shutdown,
}

/// Cloneable handle input sources use to reach the dispatch thread
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<Event>,
}

impl InputSender {
    /// Returns `false` once the loop has gone away
    pub fn send(&self, event: Event) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn send_key(&self, key: KeyValue) -> bool {
        self.send(Event::Key(key))
    }

    pub fn send_command(&self, command: Command) -> bool {
        self.send(Event::Command(command))
    }

    pub fn shutdown(&self) -> bool {
        self.send(Event::Shutdown)
    }
}

/// Delivers queue alarms as [`Event::Alarm`]
struct ChannelAlarms {
    tx: Sender<Event>,
}

impl AlarmScheduler for ChannelAlarms {
    fn set_alarm_in(&mut self, delay: Duration) {
        if delay.is_zero() {
            if self.tx.send(Event::Alarm).is_err() {
                tracing::debug!(target: "brld::queue", "event loop gone, alarm dropped");
            }
            return;
        }

        let tx = self.tx.clone();
        std::thread::spawn(move || {
            std::thread::sleep(delay);
            if tx.send(Event::Alarm).is_err() {
                tracing::debug!(target: "brld::queue", "event loop gone, delayed alarm dropped");
            }
        });
    }
}

/// Owns the command core and drives it from a channel of events
pub struct EventLoop {
    core: CommandCore,
    keys: KeyTable,
    waiter: Option<KeyWaiter>,
    closing: bool,
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl EventLoop {
    pub fn new(preferences: Preferences, keys: KeyTable) -> Self {
        let (tx, rx) = mpsc::channel();
        let scheduler = ChannelAlarms { tx: tx.clone() };
        Self {
            core: CommandCore::new(preferences, Box::new(scheduler)),
            keys,
            waiter: None,
            closing: false,
            tx,
            rx,
        }
    }

    /// Apply builder-style configuration to the core
    pub fn configure_core(mut self, configure: impl FnOnce(CommandCore) -> CommandCore) -> Self {
        self.core = configure(self.core);
        self
    }

    pub fn input(&self) -> InputSender {
        InputSender {
            tx: self.tx.clone(),
        }
    }

    pub fn core(&self) -> &CommandCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut CommandCore {
        &mut self.core
    }

    pub fn is_waiting(&self) -> bool {
        self.waiter.is_some()
    }

    /// Process one event
    ///
    /// After a shutdown request, commands already queued still run; new input
    /// is ignored and the loop breaks once the queue is empty.
    pub fn handle_event(&mut self, event: Event) -> ControlFlow<()> {
        if self.closing && !matches!(event, Event::Alarm) {
            tracing::debug!(?event, "shutting down, event ignored");
            return ControlFlow::Continue(());
        }

        match event {
            Event::Key(key) => {
                let context = self.core.command_context();
                match self.keys.lookup(context, key) {
                    Some(command) => self.enqueue(command),
                    None => tracing::debug!(%key, %context, "unbound key"),
                }
            }
            Event::Command(command) => self.enqueue(command),
            Event::Message { text, wait } => self.show_message(&text, wait),
            Event::Alarm => {
                self.core.handle_alarm();
                self.release_waiter();
                if self.closing && self.core.queue().is_empty() {
                    return ControlFlow::Break(());
                }
            }
            Event::Shutdown => {
                if self.core.queue().is_empty() {
                    return ControlFlow::Break(());
                }
                tracing::debug!(
                    pending = self.core.queue().len(),
                    "finishing queued commands before shutdown"
                );
                self.closing = true;
            }
        }
        ControlFlow::Continue(())
    }

    /// Block on the channel until shutdown
    ///
    /// Returns the number of queued commands that were discarded.
    pub fn run(mut self) -> usize {
        tracing::info!("event loop started");
        while let Ok(event) = self.rx.recv() {
            if self.handle_event(event).is_break() {
                break;
            }
        }
        tracing::info!("event loop stopped");
        self.core.shutdown()
    }

    /// Process events until the channel is momentarily empty
    ///
    /// Returns `false` if a shutdown event was seen.
    pub fn run_until_idle(&mut self) -> bool {
        while let Ok(event) = self.rx.try_recv() {
            if self.handle_event(event).is_break() {
                return false;
            }
        }
        true
    }

    fn enqueue(&mut self, command: Command) {
        if let Err(e) = self.core.enqueue_command(command) {
            tracing::warn!(%command, "command dropped: {}", e);
        }
    }

    fn show_message(&mut self, text: &str, wait: bool) {
        tracing::info!(target: "brld::message", wait, "{}", text);
        if !wait || self.waiter.is_some() {
            return;
        }

        let waiter = KeyWaiter::new();
        match self
            .core
            .push_handler(CommandContext::Waiting, Box::new(waiter.clone()))
        {
            Ok(()) => self.waiter = Some(waiter),
            Err(e) => tracing::warn!("not waiting for message dismissal: {}", e),
        }
    }

    fn release_waiter(&mut self) {
        let Some(waiter) = &self.waiter else {
            return;
        };
        if !waiter.has_responded() {
            return;
        }

        if let Some(command) = waiter.last_command() {
            tracing::debug!(target: "brld::message", %command, "message dismissed");
        }
        self.waiter = None;
        if let Err(e) = self.core.pop_handler() {
            tracing::warn!("message handler already gone: {}", e);
        }
    }
}

impl std::fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLoop")
            .field("core", &self.core)
            .field("waiting", &self.waiter.is_some())
            .field("closing", &self.closing)
            .finish_non_exhaustive()
    }
}
