//! Wall-clock budget for one invocation.

use std::time::{Duration, Instant};

/// Deadline checked between files. A zero timeout means unlimited.
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    started: Instant,
    timeout: Option<Duration>,
}

impl Budget {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            started: Instant::now(),
            timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(0)
    }

    pub fn expired(&self) -> bool {
        self.timeout
            .is_some_and(|limit| self.started.elapsed() >= limit)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout.map(|t| t.as_millis() as u64).unwrap_or(0)
    }
}
