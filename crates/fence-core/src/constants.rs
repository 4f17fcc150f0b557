//! Workspace-wide constants and defaults.

/// Default hard cap on the number of in-scope changed files per invocation.
pub const DEFAULT_MAX_CHANGED_FILES: usize = 500;

/// Default wall-clock budget per invocation, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default number of read attempts before a file degrades to empty content.
pub const DEFAULT_READ_RETRIES: u32 = 3;

/// Default package source root, relative to the package root.
pub const DEFAULT_SOURCE_ROOT: &str = "src";

/// Default entry file, relative to the package source root.
pub const DEFAULT_ENTRY: &str = "index.ts";

/// Source extensions that participate in the module graph.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Test and generated paths excluded from diff scope unless overridden.
pub const DEFAULT_SCOPE_EXCLUDES: &[&str] = &[
    "**/*.test.ts",
    "**/*.test.tsx",
    "**/*.spec.ts",
    "**/*.spec.tsx",
    "**/__tests__/**",
    "**/__generated__/**",
    "**/generated/**",
    "**/*.d.ts",
    "**/*.gen.ts",
];

/// Environment variable read by [`crate::tracing::init_tracing`].
pub const LOG_ENV_VAR: &str = "FENCE_LOG";

/// Prefix of every module id.
pub const MODULE_ID_PREFIX: &str = "pkg:";

/// Coverage ratios at or above this value snap to exactly 1.0.
pub const COVERAGE_SNAP_THRESHOLD: f64 = 0.999;
