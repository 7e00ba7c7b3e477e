//! Search control: shared stop flag and an optional wall-clock deadline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Decides when a search should stop.
///
/// The deadline is computed once when the control is created. The search
/// polls [`should_stop`](SearchControl::should_stop) at every node; the clock
/// itself is only read every 2048 nodes.
#[derive(Debug, Clone)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl SearchControl {
    /// Control that stops when `stopped` is raised or `budget` has elapsed.
    pub fn new(stopped: Arc<AtomicBool>, budget: Option<Duration>) -> Self {
        Self {
            stopped,
            deadline: budget.map(|b| Instant::now() + b),
        }
    }

    /// Control with its own stop flag and no time limit.
    pub fn unlimited() -> Self {
        Self::new(Arc::new(AtomicBool::new(false)), None)
    }

    /// Whether the search should abort now.
    ///
    /// Once the deadline has passed the stop flag is raised, so later calls
    /// return immediately.
    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }

        if nodes & 2047 != 0 {
            return false;
        }

        self.check_deadline()
    }

    /// Whether iterative deepening should skip the next iteration.
    pub fn should_stop_iterating(&self) -> bool {
        self.stopped.load(Ordering::Relaxed) || self.check_deadline()
    }

    fn check_deadline(&self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.stopped.store(true, Ordering::Release);
                true
            }
            _ => false,
        }
    }

    /// Raise the stop flag.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Reference to the shared stop flag.
    pub fn stop_flag(&self) -> &Arc<AtomicBool> {
        &self.stopped
    }
}
