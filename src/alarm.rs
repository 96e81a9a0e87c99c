//! Deferred execution for the command queue
//!
//! An alarm asks the event loop to call back into the core once, later, on the
//! dispatch thread. The queue decides when to set one; the scheduler only
//! delivers it.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Delivers one-shot alarms to the dispatch thread
pub trait AlarmScheduler {
    /// Arrange for the alarm callback to run once after `delay`
    fn set_alarm_in(&mut self, delay: Duration);
}

/// Records alarms instead of delivering them
///
/// The owner fires them by hand, which makes the drain loop observable step by
/// step. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct ManualAlarms {
    armed: Rc<Cell<usize>>,
    total: Rc<Cell<usize>>,
}

impl ManualAlarms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alarms set but not yet taken
    pub fn outstanding(&self) -> usize {
        self.armed.get()
    }

    /// Alarms set over the lifetime of the scheduler
    pub fn total(&self) -> usize {
        self.total.get()
    }

    /// Consume one outstanding alarm; returns `false` if none was set
    pub fn take(&self) -> bool {
        match self.armed.get() {
            0 => false,
            n => {
                self.armed.set(n - 1);
                true
            }
        }
    }
}

impl AlarmScheduler for ManualAlarms {
    fn set_alarm_in(&mut self, _delay: Duration) {
        self.armed.set(self.armed.get() + 1);
        self.total.set(self.total.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_alarms_count() {
        let alarms = ManualAlarms::new();
        let mut scheduler = alarms.clone();

        assert!(!alarms.take());
        scheduler.set_alarm_in(Duration::ZERO);
        assert_eq!(alarms.outstanding(), 1);
        assert!(alarms.take());
        assert_eq!(alarms.outstanding(), 0);
        assert_eq!(alarms.total(), 1);
    }
}
