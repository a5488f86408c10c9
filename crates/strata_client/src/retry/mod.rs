// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Retry middleware for transient, server-class failures.
//!
//! The primary types are [`Retry`] and [`RetryLayer`]:
//!
//! - [`Retry`] wraps an inner handler and re-invokes it while the output is retryable
//! - [`RetryLayer`] configures and constructs the retry middleware
//!
//! Whether an output is retryable is decided by its [`Recovery`][recoverable::Recovery]
//! implementation. For [`Response`][crate::Response] every status of 500 and above is
//! retryable and everything else, including client errors, is final.
//!
//! # Quick Start
//!
//! ```rust
//! use strata::{Handler, Layer};
//! use strata_client::retry::Retry;
//! use strata_client::{FlakyBackend, PipelineContext, Request, Response};
//! # let clock = tick::Clock::new_frozen();
//!
//! let context = PipelineContext::<Request, Response>::new(&clock);
//! let retry = Retry::layer("retry", &context).max_attempts(2)?.layer(FlakyBackend::new());
//!
//! let response = retry.invoke(Request::new("/v1/payment/refund", ""));
//!
//! assert_eq!(response.status(), 200);
//! # Ok::<(), strata_client::Error>(())
//! ```
//!
//! # Defaults
//!
//! | Parameter | Default Value | Configured By |
//! |-----------|---------------|---------------|
//! | Max attempts | `3` | [`max_attempts`][RetryLayer::max_attempts] |
//! | Retry callback | None | [`on_retry`][RetryLayer::on_retry] |
//!
//! There is no backoff: the next attempt starts as soon as the previous one returned.
//!
//! # Telemetry
//!
//! ## Logs
//!
//! - **Event**: `strata.retry` at `WARN` level, for each failed attempt including the last one
//! - **Fields**: `pipeline.name`, `middleware.name`, `attempt.index`, `attempt.is_last`, `recovery.kind`
//!
//! ## Metrics
//!
//! - **Metric**: `pipeline.event` (counter)
//! - **When**: For each failed attempt, including the last one
//! - **Attributes**:
//!   - `pipeline.name`: Pipeline identifier from [`PipelineContext::name`][crate::PipelineContext::name]
//!   - `middleware.name`: Retry identifier from [`Retry::layer`]
//!   - `event.name`: Always `retry`
//!   - `attempt.index`: Attempt index (0-based)
//!   - `attempt.is_last`: Whether this was the last allowed attempt

mod args;
mod attempt;
mod callbacks;
mod constants;
mod layer;
mod service;

pub use args::OnRetryArgs;
pub use attempt::Attempt;
pub(crate) use constants::DEFAULT_MAX_ATTEMPTS;
pub(crate) use callbacks::OnRetry;
pub use layer::RetryLayer;
pub(crate) use service::RetryShared;
pub use service::Retry;
