// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Latency metrics middleware.
//!
//! [`Metrics`] measures how long the inner chain takes to answer a call and reports one
//! [`Observation`] per call. Observations go to any combination of three sinks:
//!
//! - a callback installed with [`MetricsLayer::on_observation`]
//! - an `INFO` event `strata.metrics`, when [`PipelineContext::enable_logs`][crate::PipelineContext::enable_logs] was called
//! - the `pipeline.request.duration` histogram (milliseconds), when
//!   [`PipelineContext::enable_metrics`][crate::PipelineContext::enable_metrics] was called
//!
//! Time is read from the [`Clock`][tick::Clock] of the context, so tests can drive it with
//! a `ClockControl`.
//!
//! # Examples
//!
//! ```rust
//! use strata::{Handler, Layer};
//! use strata_client::metrics::Metrics;
//! use strata_client::{FlakyBackend, PipelineContext, Request, Response};
//! # let clock = tick::Clock::new_frozen();
//!
//! let context = PipelineContext::<Request, Response>::new(&clock);
//! let metrics = Metrics::layer("latency", &context)
//!     .on_observation(|observation| {
//!         println!("{} -> {} in {}ms", observation.path(), observation.status(), observation.elapsed_millis());
//!     })
//!     .layer(FlakyBackend::new());
//!
//! let response = metrics.invoke(Request::new("/v1/payment/refund", ""));
//! assert_eq!(response.status(), 500);
//! ```

mod callbacks;
mod layer;
mod observation;
mod service;

pub(crate) use callbacks::OnObservation;
pub use layer::MetricsLayer;
pub use observation::Observation;
pub(crate) use service::MetricsShared;
pub use service::Metrics;
