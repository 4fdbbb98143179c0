//! Elapsed-time reporting around individual operations.
//!
//! Timing only observes: [`PerformanceTracker::measure`] returns exactly what
//! the wrapped closure returns, whether the tracker is enabled or not.

use std::cell::RefCell;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSample {
    pub operation: String,
    pub elapsed: Duration,
}

impl OperationSample {
    pub fn micros(&self) -> u128 {
        self.elapsed.as_micros()
    }
}

#[derive(Debug)]
pub struct PerformanceTracker {
    enabled: bool,
    samples: RefCell<Vec<OperationSample>>,
}

impl Default for PerformanceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceTracker {
    pub fn new() -> Self {
        PerformanceTracker {
            enabled: true,
            samples: RefCell::new(Vec::new()),
        }
    }

    /// A tracker that runs operations without timing them.
    pub fn disabled() -> Self {
        PerformanceTracker {
            enabled: false,
            samples: RefCell::new(Vec::new()),
        }
    }

    pub fn measure<T>(&self, operation: &str, f: impl FnOnce() -> T) -> T {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        info!(operation, micros = elapsed.as_micros() as u64, "operation finished");
        self.samples.borrow_mut().push(OperationSample {
            operation: operation.to_string(),
            elapsed,
        });
        result
    }

    pub fn samples(&self) -> Vec<OperationSample> {
        self.samples.borrow().clone()
    }

    pub fn total(&self) -> Duration {
        self.samples.borrow().iter().map(|s| s.elapsed).sum()
    }

    pub fn reset(&self) {
        self.samples.borrow_mut().clear();
    }
}
