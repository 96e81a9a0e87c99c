//! FIFO command queue drained by self-rearming alarms
//!
//! Input paths only append here; execution happens later, one command per
//! alarm, on the dispatch thread. The queue keeps a pending flag so that at
//! most one alarm is ever outstanding:
//!
//! ```text
//! enqueue (0 -> 1 items)  ──set alarm──▶  alarm fires
//!                                          ├─ dequeue one, execute
//!                                          └─ items left? ──set alarm──▶ ...
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use crate::alarm::AlarmScheduler;
use crate::api::{CommandFilter, Filtered};
use crate::command::Command;
use crate::error::CoreError;

/// Pending commands and the alarm that drains them
pub struct CommandQueue {
    items: VecDeque<Command>,
    alarm_pending: bool,
    scheduler: Box<dyn AlarmScheduler>,
}

impl CommandQueue {
    pub fn new(scheduler: Box<dyn AlarmScheduler>) -> Self {
        Self {
            items: VecDeque::new(),
            alarm_pending: false,
            scheduler,
        }
    }

    /// Append a command, setting the drain alarm if the queue was empty
    ///
    /// The sentinel is rejected. If no memory is available for the item the
    /// command is dropped and nothing is appended.
    pub fn enqueue(&mut self, command: Command) -> Result<(), CoreError> {
        if command.is_none() {
            return Err(CoreError::NoCommand);
        }

        self.items
            .try_reserve(1)
            .map_err(|e| CoreError::exhausted("command queue item", e))?;
        self.items.push_back(command);
        tracing::trace!(target: "brld::queue", size = self.items.len(), %command, "enqueued");

        if self.items.len() == 1 && !self.alarm_pending {
            self.set_alarm();
        }
        Ok(())
    }

    /// Pop the next command that survives `filter`
    ///
    /// Items the filter consumes are discarded and the next one is tried.
    /// Returns `None` once the queue is empty.
    // TODO: cap the number of consumed items per call once the control API
    // defines what a flood of intercepted commands should do.
    pub fn dequeue(&mut self, mut filter: Option<&mut dyn CommandFilter>) -> Option<Command> {
        while let Some(command) = self.items.pop_front() {
            let Some(filter) = filter.as_deref_mut() else {
                return Some(command);
            };

            match filter.filter_command(command) {
                Filtered::Pass(passed) if !passed.is_none() => {
                    if passed != command {
                        tracing::debug!(target: "brld::queue", %command, %passed, "rewritten by filter");
                    }
                    return Some(passed);
                }
                _ => {
                    tracing::trace!(target: "brld::queue", %command, "consumed by filter");
                }
            }
        }

        None
    }

    /// Note that the outstanding alarm has fired
    ///
    /// Returns `false` if no alarm was pending, in which case the caller must
    /// not drain anything.
    pub fn alarm_fired(&mut self) -> bool {
        std::mem::replace(&mut self.alarm_pending, false)
    }

    /// Set a fresh alarm if commands remain and none is pending
    pub fn rearm(&mut self) {
        if !self.items.is_empty() && !self.alarm_pending {
            self.set_alarm();
        }
    }

    fn set_alarm(&mut self) {
        self.alarm_pending = true;
        self.scheduler.set_alarm_in(Duration::ZERO);
        tracing::trace!(target: "brld::queue", size = self.items.len(), "alarm set");
    }

    pub fn is_alarm_pending(&self) -> bool {
        self.alarm_pending
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every pending command, returning how many were discarded
    pub fn clear(&mut self) -> usize {
        let discarded = self.items.len();
        self.items.clear();
        discarded
    }
}

impl std::fmt::Debug for CommandQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandQueue")
            .field("items", &self.items)
            .field("alarm_pending", &self.alarm_pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::ManualAlarms;

    fn queue() -> (CommandQueue, ManualAlarms) {
        let alarms = ManualAlarms::new();
        (CommandQueue::new(Box::new(alarms.clone())), alarms)
    }

    #[test]
    fn test_sentinel_rejected() {
        let (mut queue, alarms) = queue();
        assert_eq!(queue.enqueue(Command::NONE), Err(CoreError::NoCommand));
        assert!(queue.is_empty());
        assert_eq!(alarms.total(), 0);
    }

    #[test]
    fn test_alarm_only_on_first_item() {
        let (mut queue, alarms) = queue();
        queue.enqueue(Command::LNUP).unwrap();
        queue.enqueue(Command::LNDN).unwrap();
        queue.enqueue(Command::NOOP).unwrap();

        assert_eq!(queue.len(), 3);
        assert_eq!(alarms.outstanding(), 1);
        assert!(queue.is_alarm_pending());
    }

    #[test]
    fn test_dequeue_fifo() {
        let (mut queue, _) = queue();
        queue.enqueue(Command::LNUP).unwrap();
        queue.enqueue(Command::LNDN).unwrap();

        assert_eq!(queue.dequeue(None), Some(Command::LNUP));
        assert_eq!(queue.dequeue(None), Some(Command::LNDN));
        assert_eq!(queue.dequeue(None), None);
    }

    #[test]
    fn test_filter_consumes_and_continues() {
        let (mut queue, _) = queue();
        queue.enqueue(Command::LNUP).unwrap();
        queue.enqueue(Command::LNDN).unwrap();
        queue.enqueue(Command::NOOP).unwrap();

        let mut filter = |command: Command| {
            if command == Command::LNDN {
                Filtered::Pass(command)
            } else {
                Filtered::Consumed
            }
        };

        assert_eq!(queue.dequeue(Some(&mut filter)), Some(Command::LNDN));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dequeue(Some(&mut filter)), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_filter_can_rewrite() {
        let (mut queue, _) = queue();
        queue.enqueue(Command::LNUP).unwrap();

        let mut filter = |_: Command| Filtered::Pass(Command::PRDIFLN);
        assert_eq!(queue.dequeue(Some(&mut filter)), Some(Command::PRDIFLN));
    }

    #[test]
    fn test_filter_passing_sentinel_counts_as_consumed() {
        let (mut queue, _) = queue();
        queue.enqueue(Command::LNUP).unwrap();
        queue.enqueue(Command::LNDN).unwrap();

        let mut filter = |command: Command| {
            if command == Command::LNUP {
                Filtered::Pass(Command::NONE)
            } else {
                Filtered::Pass(command)
            }
        };
        assert_eq!(queue.dequeue(Some(&mut filter)), Some(Command::LNDN));
    }

    #[test]
    fn test_rearm_only_with_items_left() {
        let (mut queue, alarms) = queue();
        queue.enqueue(Command::LNUP).unwrap();
        queue.enqueue(Command::LNDN).unwrap();

        assert!(alarms.take());
        assert!(queue.alarm_fired());
        queue.dequeue(None);
        queue.rearm();
        assert_eq!(alarms.outstanding(), 1);

        assert!(alarms.take());
        assert!(queue.alarm_fired());
        queue.dequeue(None);
        queue.rearm();
        assert_eq!(alarms.outstanding(), 0);
        assert!(!queue.is_alarm_pending());
    }

    #[test]
    fn test_stale_alarm_reported() {
        let (mut queue, _) = queue();
        assert!(!queue.alarm_fired());
    }

    #[test]
    fn test_enqueue_after_fire_does_not_double_arm() {
        let (mut queue, alarms) = queue();
        queue.enqueue(Command::LNUP).unwrap();
        assert!(alarms.take());
        assert!(queue.alarm_fired());
        queue.dequeue(None);

        // A command enqueued while the previous one executes
        queue.enqueue(Command::LNDN).unwrap();
        queue.rearm();
        assert_eq!(alarms.outstanding(), 1);
    }

    #[test]
    fn test_clear_discards() {
        let (mut queue, _) = queue();
        queue.enqueue(Command::LNUP).unwrap();
        queue.enqueue(Command::LNDN).unwrap();
        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
    }
}
