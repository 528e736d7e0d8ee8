//! Search limits and cooperative cancellation.
//!
//! The search is single-threaded; the only things that can end it early
//! are its wall-clock deadline and a stop flag another thread may raise.
//! Both live here so every engine implementation shares one contract:
//! when `check_time` reports true, the current iteration's partial
//! results must be discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Limits for one search call: a depth ceiling, an optional wall-clock
/// budget, and the cancellation handle enforcing it.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies.
    pub max_depth: u8,
    /// Wall-clock budget for this move (`None` = unbounded).
    pub move_time: Option<Duration>,
    /// Cancellation handle; clone it to stop the search from outside.
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Depth-limited search with no clock.
    pub fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    /// Time-limited search with no meaningful depth ceiling.
    pub fn time(move_time: Duration) -> Self {
        Self {
            max_depth: u8::MAX,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Both a depth ceiling and a wall-clock budget.
    pub fn depth_and_time(max_depth: u8, move_time: Duration) -> Self {
        Self {
            max_depth,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Arm the deadline. Call when the search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Cheaply cloneable stop handle: an atomic flag shared across clones
/// plus a monotonic deadline armed by `start`.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    deadline: Arc<std::sync::RwLock<Option<Instant>>>,
    budget: Option<Duration>,
}

impl TimeControl {
    pub fn new(budget: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            deadline: Arc::new(std::sync::RwLock::new(None)),
            budget,
        }
    }

    /// Arm the deadline from now and clear a previous stop.
    pub fn start(&self) {
        *self.deadline.write().unwrap() = self.budget.map(|b| Instant::now() + b);
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Request a stop from any thread.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Fast flag read, suitable for every node.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Flag read plus deadline sample; latches the flag once the clock
    /// runs out so later `is_stopped` reads stay true.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let Some(deadline) = *self.deadline.read().unwrap()
            && Instant::now() >= deadline
        {
            self.stop();
            return true;
        }
        false
    }

    /// Remaining time (`None` when unbounded or not started).
    pub fn remaining(&self) -> Option<Duration> {
        let deadline = (*self.deadline.read().unwrap())?;
        Some(deadline.saturating_duration_since(Instant::now()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
