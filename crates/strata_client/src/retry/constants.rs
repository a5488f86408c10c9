// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::num::NonZeroU32;

/// Default maximum number of attempts, the original call included.
pub(crate) const DEFAULT_MAX_ATTEMPTS: NonZeroU32 = NonZeroU32::MIN.saturating_add(2);

/// The name of the retry event for telemetry reporting.
#[cfg(any(feature = "metrics", test))]
pub(super) const RETRY_EVENT: &str = "retry";
