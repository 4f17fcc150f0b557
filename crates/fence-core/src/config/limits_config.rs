//! Resource limits for one analysis invocation.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_CHANGED_FILES, DEFAULT_READ_RETRIES, DEFAULT_TIMEOUT_MS};

/// Caps that turn an oversized or slow analysis into an INCOMPLETE report.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum in-scope changed files. Default: 500.
    pub max_changed_files: Option<usize>,
    /// Wall-clock budget in milliseconds. Default: 30_000. 0 disables the timeout.
    pub timeout_ms: Option<u64>,
    /// Read attempts per file before degrading to empty content. Default: 3.
    pub read_retries: Option<u32>,
}

impl LimitsConfig {
    pub fn effective_max_changed_files(&self) -> usize {
        self.max_changed_files.unwrap_or(DEFAULT_MAX_CHANGED_FILES)
    }

    pub fn effective_timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)
    }

    /// Always at least one attempt.
    pub fn effective_read_retries(&self) -> u32 {
        self.read_retries.unwrap_or(DEFAULT_READ_RETRIES).max(1)
    }
}
