use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// One-shot timers driving the post-answer reveal delay.
///
/// After an answer is judged the engine stays locked until a deferred
/// advance fires. The timer is modeled as an explicit scheduled task with
/// a cancellable handle so tests can simulate time instead of sleeping.

/// Tick delivered when a scheduled reveal delay has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceDue;

/// Handle to a scheduled advance; cancelling prevents tick delivery.
///
/// No quiz transition can abort a pending advance, so cancellation is
/// only used on shutdown.
#[derive(Debug, Clone)]
pub struct AdvanceHandle {
    cancelled: Arc<AtomicBool>,
}

impl AdvanceHandle {
    fn armed() -> (Self, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Self {
                cancelled: Arc::clone(&flag),
            },
            flag,
        )
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Scheduler for the deferred advance after an answer is judged
pub trait AdvanceScheduler: Send {
    /// Schedule a tick after `delay`, returning a cancellable handle
    fn schedule(&mut self, delay: Duration) -> AdvanceHandle;
}

/// Production scheduler: a one-shot sleeper thread per scheduled advance
pub struct TimerScheduler {
    ticks: Sender<AdvanceDue>,
}

impl TimerScheduler {
    pub fn new(ticks: Sender<AdvanceDue>) -> Self {
        Self { ticks }
    }
}

impl AdvanceScheduler for TimerScheduler {
    fn schedule(&mut self, delay: Duration) -> AdvanceHandle {
        let (handle, cancelled) = AdvanceHandle::armed();
        let ticks = self.ticks.clone();

        thread::spawn(move || {
            thread::sleep(delay);
            if !cancelled.load(Ordering::SeqCst) {
                // Receiver gone means the app is shutting down
                let _ = ticks.send(AdvanceDue);
            }
        });

        handle
    }
}

/// Test scheduler: delivers the tick immediately, no real time passes.
///
/// The tick still travels through the channel, so tests drive the advance
/// exactly the way the production loop does.
pub struct ManualScheduler {
    ticks: Sender<AdvanceDue>,
}

impl ManualScheduler {
    pub fn new(ticks: Sender<AdvanceDue>) -> Self {
        Self { ticks }
    }
}

impl AdvanceScheduler for ManualScheduler {
    fn schedule(&mut self, _delay: Duration) -> AdvanceHandle {
        let (handle, _) = AdvanceHandle::armed();
        let _ = self.ticks.send(AdvanceDue);
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_manual_scheduler_delivers_immediately() {
        let (tx, rx) = unbounded();
        let mut scheduler = ManualScheduler::new(tx);

        scheduler.schedule(Duration::from_secs(3600));
        assert_eq!(rx.try_recv().unwrap(), AdvanceDue);
    }

    #[test]
    fn test_timer_scheduler_delivers_after_delay() {
        let (tx, rx) = unbounded();
        let mut scheduler = TimerScheduler::new(tx);

        scheduler.schedule(Duration::from_millis(10));
        let tick = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(tick, AdvanceDue);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let (tx, rx) = unbounded();
        let mut scheduler = TimerScheduler::new(tx);

        let handle = scheduler.schedule(Duration::from_millis(50));
        handle.cancel();
        assert!(handle.is_cancelled());

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn test_handle_not_cancelled_by_default() {
        let (handle, _) = AdvanceHandle::armed();
        assert!(!handle.is_cancelled());
    }
}
