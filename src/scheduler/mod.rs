// SPDX-License-Identifier: MPL-2.0
//! Cooperative single-threaded task scheduler.
//!
//! Every deferred piece of work in the crate (bus deliveries, the one-tick
//! `update` deferral, entry delays and auto-close timers) is a one-shot task
//! queued here. Time is virtual: it only moves when the owner calls
//! [`Scheduler::advance`] or [`Scheduler::run_until_idle`], or when a
//! [`driver`] moves it against a real clock.
//!
//! # Usage
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use toastkit::scheduler::Scheduler;
//!
//! let scheduler = Scheduler::new();
//! let fired = Rc::new(Cell::new(false));
//! let flag = fired.clone();
//! scheduler.schedule(Duration::from_millis(100), move || flag.set(true));
//!
//! scheduler.advance(Duration::from_millis(99));
//! assert!(!fired.get());
//! scheduler.advance(Duration::from_millis(1));
//! assert!(fired.get());
//! ```

pub mod driver;

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

type Task = Box<dyn FnOnce()>;

/// Cancellation handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Deadline-ordered queue of one-shot tasks on a virtual clock.
///
/// Tasks sharing a deadline run in the order they were scheduled.
#[derive(Default)]
pub struct Scheduler {
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    tasks: RefCell<BTreeMap<(Duration, u64), Task>>,
    deadlines: RefCell<HashMap<u64, Duration>>,
}

impl Scheduler {
    /// Creates an empty scheduler with its clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time, measured from the scheduler's creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Queues a task for the next tick.
    pub fn defer(&self, task: impl FnOnce() + 'static) -> TaskHandle {
        self.schedule(Duration::ZERO, task)
    }

    /// Queues a task to run once `delay` has elapsed.
    pub fn schedule(&self, delay: Duration, task: impl FnOnce() + 'static) -> TaskHandle {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        let due = self.now.get().saturating_add(delay);

        self.tasks.borrow_mut().insert((due, seq), Box::new(task));
        self.deadlines.borrow_mut().insert(seq, due);
        TaskHandle(seq)
    }

    /// Cancels a task that has not run yet.
    ///
    /// Returns `false` when the task already ran or was cancelled before.
    pub fn cancel(&self, handle: TaskHandle) -> bool {
        let Some(due) = self.deadlines.borrow_mut().remove(&handle.0) else {
            return false;
        };
        self.tasks.borrow_mut().remove(&(due, handle.0)).is_some()
    }

    /// Returns whether the task is still waiting to run.
    #[must_use]
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.deadlines.borrow().contains_key(&handle.0)
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Deadline of the earliest waiting task.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks.borrow().first_key_value().map(|(&(due, _), _)| due)
    }

    /// Runs every task that is already due, including zero-delay tasks they
    /// queue while running. Returns the number of tasks run.
    pub fn run_pending(&self) -> usize {
        self.advance(Duration::ZERO)
    }

    /// Moves the clock forward by `by`, running due tasks in deadline order.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get().saturating_add(by);
        let mut ran = 0;
        while let Some(task) = self.pop_due(target) {
            task();
            ran += 1;
        }
        if self.now.get() < target {
            self.now.set(target);
        }
        ran
    }

    /// Runs tasks until none are left, jumping the clock to each deadline.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.pop_due(Duration::MAX) {
            task();
            ran += 1;
        }
        ran
    }

    /// Removes the earliest task due at or before `limit`.
    ///
    /// No borrow is held when the task is returned, so it may schedule or
    /// cancel other tasks while it runs.
    fn pop_due(&self, limit: Duration) -> Option<Task> {
        let mut tasks = self.tasks.borrow_mut();
        let &(due, seq) = tasks.first_key_value()?.0;
        if due > limit {
            return None;
        }
        let task = tasks.remove(&(due, seq))?;
        drop(tasks);

        self.deadlines.borrow_mut().remove(&seq);
        if due > self.now.get() {
            self.now.set(due);
        }
        Some(task)
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now", &self.now.get())
            .field("pending", &self.pending())
            .finish()
    }
}
