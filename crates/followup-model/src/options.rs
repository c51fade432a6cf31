//! Configuration options for follow-up processing.

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;

/// Label fragment marking the baseline sheet in the source workbooks.
pub const DEFAULT_BASELINE_MARKER: &str = "基本信息";

/// Options controlling follow-up processing behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingOptions {
    /// Endpoint evaluated for every subject.
    pub endpoint: Endpoint,

    /// Substrings that identify the baseline table by label, tried in order.
    /// The first table is used when none matches.
    pub baseline_markers: Vec<String>,

    /// Process subjects on the rayon thread pool.
    ///
    /// Output order is the same either way.
    pub parallel: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            baseline_markers: vec![DEFAULT_BASELINE_MARKER.to_string(), "baseline".to_string()],
            parallel: true,
        }
    }
}

impl ProcessingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Replaces the baseline markers; an empty list keeps the defaults.
    #[must_use]
    pub fn with_baseline_markers(mut self, markers: Vec<String>) -> Self {
        if !markers.is_empty() {
            self.baseline_markers = markers;
        }
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
