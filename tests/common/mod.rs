//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use brld::alarm::ManualAlarms;
use brld::log::MemoryCommandLog;
use brld::{Command, CommandCore, CommandHandler, Preferences};

/// A core whose alarms are fired by hand and whose log is kept in memory
pub struct Harness {
    pub core: CommandCore,
    pub alarms: ManualAlarms,
    pub log: MemoryCommandLog,
}

impl Harness {
    pub fn new(preferences: Preferences) -> Self {
        let alarms = ManualAlarms::new();
        let log = MemoryCommandLog::new();
        let core = CommandCore::new(preferences, Box::new(alarms.clone()))
            .with_log(Box::new(log.clone()));
        Self { core, alarms, log }
    }

    /// Deliver one outstanding alarm; returns `false` if none was set
    pub fn fire(&mut self) -> bool {
        if self.alarms.take() {
            self.core.handle_alarm();
            true
        } else {
            false
        }
    }

    /// Fire alarms until none is outstanding, returning how many ran
    pub fn drain(&mut self) -> usize {
        let mut fired = 0;
        while self.fire() {
            fired += 1;
        }
        fired
    }
}

pub fn harness() -> Harness {
    Harness::new(Preferences::default())
}

pub type Seen = Rc<RefCell<Vec<Command>>>;

/// Handler that records every command and claims it when `claims` says so
pub fn recorder(
    claims: impl Fn(Command) -> bool + 'static,
) -> (Box<dyn CommandHandler>, Seen) {
    let seen: Seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let handler: Box<dyn CommandHandler> = Box::new(move |command: Command| {
        sink.borrow_mut().push(command);
        claims(command)
    });
    (handler, seen)
}

pub fn claim_all() -> (Box<dyn CommandHandler>, Seen) {
    recorder(|_| true)
}

pub fn claim_none() -> (Box<dyn CommandHandler>, Seen) {
    recorder(|_| false)
}
