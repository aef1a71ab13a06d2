//! Deferred callback scheduling.
//!
//! Every time-based behavior in this crate — the transition clear, the
//! notification reveal/hide/remove sequence, the one-time hotkey hint —
//! goes through the [`Scheduler`] trait so tests can simulate time
//! deterministically.
//!
//! Two implementations are provided:
//!
//! - [`ManualScheduler`] — a virtual clock driven by [`advance`]
//!   (`ManualScheduler::advance`). Used by tests and by the demo CLI.
//! - [`ThreadScheduler`] — real timers on background threads, for hosts
//!   without their own event loop.
//!
//! Handles are cancellable even though the controller itself never cancels
//! a timer; cancellation exists for hosts and tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// A deferred, fire-once callback.
pub type TimerCallback = Box<dyn FnOnce() + Send>;

/// Handle to a scheduled callback.
///
/// Dropping the handle does not cancel the timer; call
/// [`cancel`](TimerHandle::cancel) explicitly.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Prevents the callback from firing, if it has not fired yet.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns true if [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Capability for scheduling deferred callbacks.
pub trait Scheduler: Send + Sync {
    /// Runs `callback` once after `delay`.
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;
}

struct PendingTimer {
    due: Duration,
    seq: u64,
    handle: TimerHandle,
    callback: TimerCallback,
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    seq: u64,
    pending: Vec<PendingTimer>,
}

/// Deterministic scheduler driven by a virtual clock.
///
/// Callbacks fire during [`advance`](Self::advance), in due order, with the
/// virtual clock stepped to each callback's due time before it runs. A
/// callback that schedules further work therefore observes the same "now"
/// a real timer would, so nested timelines (like the notification fade
/// followed by removal) come out right:
///
/// ```rust
/// use std::time::Duration;
/// use duotone::{ManualScheduler, Scheduler};
///
/// let scheduler = ManualScheduler::new();
/// scheduler.schedule(Duration::from_millis(10), Box::new(|| println!("fired")));
///
/// scheduler.advance(Duration::from_millis(10)); // prints "fired"
/// ```
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<ManualQueue>,
}

impl ManualScheduler {
    /// Creates a scheduler with the clock at zero and no pending timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current virtual time.
    pub fn now(&self) -> Duration {
        self.queue.lock().unwrap().now
    }

    /// Returns the number of timers that have not fired yet.
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap().pending.len()
    }

    /// Moves the virtual clock forward by `delta`, firing due callbacks.
    ///
    /// Callbacks run outside the queue lock, so they may schedule further
    /// timers; newly scheduled timers that fall within the advanced window
    /// fire in the same call.
    pub fn advance(&self, delta: Duration) {
        let target = self.queue.lock().unwrap().now + delta;

        loop {
            let next = {
                let mut queue = self.queue.lock().unwrap();
                let due_index = queue
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.seq))
                    .map(|(index, _)| index);

                match due_index {
                    Some(index) => {
                        let timer = queue.pending.swap_remove(index);
                        queue.now = timer.due;
                        Some(timer)
                    }
                    None => {
                        queue.now = target;
                        None
                    }
                }
            };

            match next {
                Some(timer) => {
                    if !timer.handle.is_cancelled() {
                        (timer.callback)();
                    }
                }
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle::new();
        let mut queue = self.queue.lock().unwrap();
        queue.seq += 1;
        let seq = queue.seq;
        let due = queue.now + delay;
        queue.pending.push(PendingTimer {
            due,
            seq,
            handle: handle.clone(),
            callback,
        });
        handle
    }
}

/// Scheduler backed by real timers.
///
/// Each callback gets its own background thread that sleeps for the delay
/// and then fires unless the handle was cancelled. Suitable for hosts that
/// have no event loop of their own; hosts with one should implement
/// [`Scheduler`] on top of it instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadScheduler;

impl ThreadScheduler {
    /// Creates a thread-backed scheduler.
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for ThreadScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle::new();
        let fired_handle = handle.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            if !fired_handle.is_cancelled() {
                callback();
            }
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> TimerCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let make = {
            let count = Arc::clone(&count);
            move || {
                let count = Arc::clone(&count);
                Box::new(move || {
                    count.fetch_add(1, Ordering::SeqCst);
                }) as TimerCallback
            }
        };
        (count, make)
    }

    #[test]
    fn test_manual_fires_only_when_due() {
        let scheduler = ManualScheduler::new();
        let (count, cb) = counter();

        scheduler.schedule(Duration::from_millis(100), cb());
        scheduler.advance(Duration::from_millis(99));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_manual_fires_in_due_order() {
        let scheduler = ManualScheduler::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (label, delay) in [("late", 200u64), ("early", 50), ("middle", 100)] {
            let order = Arc::clone(&order);
            scheduler.schedule(
                Duration::from_millis(delay),
                Box::new(move || order.lock().unwrap().push(label)),
            );
        }

        scheduler.advance(Duration::from_millis(200));
        assert_eq!(*order.lock().unwrap(), vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_manual_nested_schedule_uses_fire_time() {
        let scheduler = Arc::new(ManualScheduler::new());
        let fired_at = Arc::new(Mutex::new(None));

        let inner_scheduler = Arc::clone(&scheduler);
        let inner_fired_at = Arc::clone(&fired_at);
        scheduler.schedule(
            Duration::from_millis(2000),
            Box::new(move || {
                // Schedules from within a callback; due time must be
                // relative to t=2000, not to the advance target.
                let fired_at = Arc::clone(&inner_fired_at);
                let record_scheduler = Arc::clone(&inner_scheduler);
                inner_scheduler.schedule(
                    Duration::from_millis(300),
                    Box::new(move || {
                        *fired_at.lock().unwrap() = Some(record_scheduler.now());
                    }),
                );
            }),
        );

        scheduler.advance(Duration::from_millis(2300));
        assert_eq!(
            *fired_at.lock().unwrap(),
            Some(Duration::from_millis(2300))
        );
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let scheduler = ManualScheduler::new();
        let (count, cb) = counter();

        let handle = scheduler.schedule(Duration::from_millis(10), cb());
        handle.cancel();
        assert!(handle.is_cancelled());

        scheduler.advance(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_thread_scheduler_fires() {
        let scheduler = ThreadScheduler::new();
        let (count, cb) = counter();

        scheduler.schedule(Duration::from_millis(5), cb());
        thread::sleep(Duration::from_millis(100));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
