// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

/// A single timing observation reported by the [`Metrics`][super::Metrics] middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub(super) path: String,
    pub(super) status: u16,
    pub(super) elapsed: Duration,
}

impl Observation {
    /// Returns the path of the observed request.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the status code of the response the inner chain produced.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the time spent in the inner chain.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns [`elapsed`][Self::elapsed] in whole milliseconds, saturating at `u64::MAX`.
    #[must_use]
    pub fn elapsed_millis(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}
