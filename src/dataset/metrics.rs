//! Load timings.
//!
//! Collected once per successful load by [`DatasetService`](super::DatasetService)
//! and surfaced in the terminal footer.

use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadMetrics {
    /// Time spent reading raw rows from the source.
    pub read: Duration,
    /// Time spent in the cleaning pipeline.
    pub clean: Duration,
    /// Total elapsed time for the load.
    pub total: Duration,
}
