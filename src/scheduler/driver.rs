// SPDX-License-Identifier: MPL-2.0
//! Tokio integration for the virtual-clock [`Scheduler`].
//!
//! The scheduler itself never sleeps. These helpers sleep on tokio's clock
//! until the next deadline and then advance the scheduler by the time that
//! actually elapsed, which keeps auto-close timers honest in a running
//! application and deterministic under `tokio::time::pause`.

use super::Scheduler;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Drives the scheduler until no task is left.
pub async fn run_until_idle(scheduler: &Scheduler) {
    let mut last = Instant::now();
    loop {
        let now = Instant::now();
        scheduler.advance(now.saturating_duration_since(last));
        last = now;

        let Some(deadline) = scheduler.next_deadline() else {
            break;
        };
        sleep(deadline.saturating_sub(scheduler.now())).await;
    }
}

/// Drives the scheduler for `duration` of wall-clock time.
///
/// Tasks due after the window stay queued. A window too large for the clock
/// behaves like [`run_until_idle`].
pub async fn run_for(scheduler: &Scheduler, duration: Duration) {
    let Some(end) = Instant::now().checked_add(duration) else {
        return run_until_idle(scheduler).await;
    };
    let mut last = Instant::now();
    loop {
        let now = Instant::now();
        scheduler.advance(now.saturating_duration_since(last));
        last = now;

        if now >= end {
            break;
        }
        let until_end = end.saturating_duration_since(now);
        let wait = scheduler
            .next_deadline()
            .map_or(until_end, |deadline| {
                deadline.saturating_sub(scheduler.now()).min(until_end)
            });
        sleep(wait).await;
    }
}
