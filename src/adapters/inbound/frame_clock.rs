use crate::domains::path_planning::FrameClock;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Fixed-rate frame clock backed by a tokio interval. Every tick, the first
/// included, waits one period. Late ticks are skipped rather than bunched up.
pub struct IntervalFrameClock {
    interval: Interval,
}

impl IntervalFrameClock {
    pub fn new(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

#[async_trait]
impl FrameClock for IntervalFrameClock {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Ticks as fast as the scheduler allows. For headless runs.
#[derive(Debug, Default)]
pub struct ImmediateFrameClock {
    pub ticks: u64,
}

#[async_trait]
impl FrameClock for ImmediateFrameClock {
    async fn tick(&mut self) {
        self.ticks += 1;
        tokio::task::yield_now().await;
    }
}
