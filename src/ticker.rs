use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior, interval};

/// Cloneable flag that ends a [`Ticker`] from anywhere that holds a copy.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Repeating task at a fixed period, yielding an ever-increasing frame index
/// until stopped. Must be created inside a tokio runtime.
pub struct Ticker {
    interval: Interval,
    next_frame: u64,
    stop: StopHandle,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period.max(Duration::from_millis(1)));
        // A slow present shifts the schedule instead of bursting frames.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Ticker {
            interval,
            next_frame: 0,
            stop: StopHandle::default(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Waits for the next tick. The first tick fires immediately with
    /// frame 0. Returns `None` once stopped.
    pub async fn tick(&mut self) -> Option<u64> {
        if self.stop.is_stopped() {
            return None;
        }
        self.interval.tick().await;
        if self.stop.is_stopped() {
            return None;
        }
        let frame = self.next_frame;
        self.next_frame += 1;
        Some(frame)
    }
}
