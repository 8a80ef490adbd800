//! Deferred, cancellable tasks for the single-threaded run loop.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

/// Shared flag checked before a scheduled task fires.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Returned to whoever scheduled a task.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: u64,
    token: CancellationToken,
}

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

struct ScheduledTask<J> {
    id: u64,
    due: Instant,
    token: CancellationToken,
    job: J,
}

/// What [`Scheduler::next`] hands back.
#[derive(Debug, PartialEq, Eq)]
pub enum Fired<J> {
    /// The delay elapsed; run the job.
    Due(J),
    /// Cancelled before it fired; the job is returned unrun.
    Cancelled(J),
}

/// FIFO of delayed jobs.
pub struct Scheduler<J> {
    next_id: u64,
    queue: VecDeque<ScheduledTask<J>>,
}

impl<J> Default for Scheduler<J> {
    fn default() -> Self {
        Self {
            next_id: 0,
            queue: VecDeque::new(),
        }
    }
}

impl<J> Scheduler<J> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: Duration, job: J) -> TaskHandle {
        self.next_id += 1;
        let token = CancellationToken::new();
        self.queue.push_back(ScheduledTask {
            id: self.next_id,
            due: Instant::now() + delay,
            token: token.clone(),
            job,
        });
        debug!(task = self.next_id, ?delay, "scheduled task");
        TaskHandle {
            id: self.next_id,
            token,
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Cancel and drop every queued task; returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        for task in self.queue.drain(..) {
            task.token.cancel();
        }
        if dropped > 0 {
            debug!(dropped, "cancelled pending tasks");
        }
        dropped
    }

    /// Pop the oldest task, blocking until its delay has elapsed.
    ///
    /// A cancelled task is returned immediately as [`Fired::Cancelled`].
    pub fn next(&mut self) -> Option<Fired<J>> {
        let task = self.queue.pop_front()?;
        if task.token.is_cancelled() {
            debug!(task = task.id, "task cancelled before firing");
            return Some(Fired::Cancelled(task.job));
        }

        let remaining = task.due.saturating_duration_since(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }

        // cancellation can only come from this thread, so no recheck after sleeping
        debug!(task = task.id, "task fired");
        Some(Fired::Due(task.job))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::ZERO, "a");
        scheduler.schedule(Duration::ZERO, "b");

        assert_eq!(scheduler.next(), Some(Fired::Due("a")));
        assert_eq!(scheduler.next(), Some(Fired::Due("b")));
        assert_eq!(scheduler.next(), None);
    }

    #[test]
    fn test_cancelled_task_does_not_fire() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(Duration::from_secs(60), 7);
        handle.cancel();

        let started = Instant::now();
        assert_eq!(scheduler.next(), Some(Fired::Cancelled(7)));
        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_waits_out_delay() {
        let mut scheduler = Scheduler::new();
        let started = Instant::now();
        scheduler.schedule(Duration::from_millis(20), ());
        assert_eq!(scheduler.next(), Some(Fired::Due(())));
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_cancel_all_empties_queue() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(Duration::from_secs(60), "stale");
        scheduler.schedule(Duration::from_secs(60), "older");

        assert_eq!(scheduler.cancel_all(), 2);
        assert!(handle.is_cancelled());
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.next(), None);
    }

    #[test]
    fn test_handles_have_distinct_ids() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.schedule(Duration::ZERO, ());
        let b = scheduler.schedule(Duration::ZERO, ());
        assert_ne!(a.id(), b.id());
        assert_eq!(scheduler.pending(), 2);
    }
}
