//! Shared constants for the divmine diversity engine.

/// divmine version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of patterns handed to one cover worker.
pub const DEFAULT_COVER_BATCH_SIZE: usize = 100;

/// Concurrent cover workers.
pub const DEFAULT_COVER_POOL_CAPACITY: usize = 5;

/// Concurrent pairwise row workers.
pub const DEFAULT_PAIRWISE_POOL_CAPACITY: usize = 4;

/// Pattern count above which pairwise computation is skipped unless a limit is given.
pub const DEFAULT_MAX_PAIRWISE_PATTERNS: usize = 1000;

/// Per-worker timeout in seconds (0 disables the timeout).
pub const DEFAULT_WORKER_TIMEOUT_SECS: u64 = 3600;

/// Number of CDF intervals; the curve has one more point than this.
pub const DEFAULT_CDF_RESOLUTION: usize = 1000;

/// Exclusive upper bound of `k` for the iterated-average curve.
pub const DEFAULT_AVERAGE_HORIZON: usize = 13;

// ---- File naming ----

/// Extension of pattern-cover result files.
pub const SOLUTION_EXTENSION: &str = "sol";

/// Extension of pairwise-similarity files.
pub const PAIRWISE_EXTENSION: &str = "par";

/// Suffix appended to the solution stem for the CDF curve file.
pub const CDF_FILE_SUFFIX: &str = "-fullCDF.gph";

/// Suffix appended to the solution stem for the iterated-average curve file.
pub const AVERAGE_FILE_SUFFIX: &str = "-average.gph";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "divmine.toml";
