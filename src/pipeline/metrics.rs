//! Run metrics.
//!
//! Collected by [`process_verbose`](crate::process_verbose) for profiling and
//! for the CLI summary. [`process`](crate::process) gathers the same numbers
//! and drops them.

use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    /// Time spent tokenizing every variant.
    pub tokenize: Duration,
    /// Time spent merging resources.
    pub merge: Duration,
    /// Variants tokenized (duplicates excluded).
    pub variants: usize,
    /// Variants whose text failed to parse.
    pub parse_errors: usize,
    /// Repeated names within one folder; only the first is kept.
    pub duplicates: usize,
    /// Resources merged.
    pub resources: usize,
    /// Resources dropped for lack of a base variant.
    pub skipped: usize,
    /// Resolution failures across all resources.
    pub failures: usize,
}
