//! Tokio-backed tick scheduler.
//!
//! Each run of the timer gets its own interval task that sends a [`Tick`]
//! into the event loop once per second. The task is aborted when its handle
//! is dropped, which the session does on every exit from the running state.

use std::time::Duration;

use stint_core::Scheduler;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Tick cadence while the timer runs.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Marker delivered to the event loop on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;

/// Spawns interval tasks on the current tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<Tick>,
    period: Duration,
}

impl TokioScheduler {
    /// Creates a scheduler and the receiving end the event loop listens on.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Tick>) {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, period }, rx)
    }
}

/// Owns one interval task. Dropping it cancels the task.
#[derive(Debug)]
pub struct TickTask(JoinHandle<()>);

impl Drop for TickTask {
    fn drop(&mut self) {
        self.0.abort();
        tracing::trace!("tick task cancelled");
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TickTask;

    /// Must be called from within a tokio runtime.
    fn start(&self) -> TickTask {
        let tx = self.tx.clone();
        let period = self.period;
        // First tick one period from now, not immediately.
        let first = Instant::now() + period;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(Tick).is_err() {
                    break;
                }
            }
        });
        tracing::trace!(?period, "tick task scheduled");
        TickTask(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let (scheduler, mut rx) = TokioScheduler::channel();
        let _task = scheduler.start();

        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(rx.recv().await, Some(Tick));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(rx.recv().await, Some(Tick));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_ticks() {
        let (scheduler, mut rx) = TokioScheduler::channel();
        let task = scheduler.start();

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(rx.recv().await, Some(Tick));

        drop(task);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}
