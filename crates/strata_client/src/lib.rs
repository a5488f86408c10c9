// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Request pipeline middleware for API clients.
//!
//! This crate builds on the [`strata`] composition core and provides the pieces of a typical
//! client-side request pipeline: a [`Request`]/[`Response`] model, a [`FlakyBackend`] stand-in
//! for a remote service, and middleware for authentication, retries, latency metrics and
//! trace-id propagation. Every middleware is a [`Layer`][strata::Layer], so the pieces can be
//! added, removed or reordered without touching each other or the terminal handler.
//!
//! # Quick Start
//!
//! ```rust
//! use strata::{Handler, Pipeline};
//! use strata_client::auth::Auth;
//! use strata_client::metrics::Metrics;
//! use strata_client::retry::Retry;
//! use strata_client::trace::Trace;
//! use strata_client::{FlakyBackend, PipelineContext, Request, Response};
//! # let clock = tick::Clock::new_frozen();
//!
//! let context = PipelineContext::<Request, Response>::new(&clock).name("payments");
//!
//! // Layers are listed inner to outer: Metrics → Retry → Auth → FlakyBackend.
//! let pipeline = Pipeline::builder()
//!     .terminal(FlakyBackend::new())
//!     .layer(Auth::layer(&context))
//!     .layer(Retry::layer("retry", &context).max_attempts(2)?)
//!     .layer(Metrics::layer("metrics", &context))
//!     .build()?;
//!
//! // Extending a built pipeline never touches its existing layers.
//! let pipeline = pipeline.wrap(Trace::layer(&context).trace_id("trace-1001"));
//!
//! let response = pipeline.invoke(Request::new("/v1/payment/refund", r#"{"orderId":"ORD-1001"}"#));
//! assert_eq!(response, Response::ok("ok"));
//! # Ok::<(), strata_client::Error>(())
//! ```
//!
//! > **Note**: Timing requires a [`Clock`][tick::Clock] from the [`tick`] crate. The clock is
//! > passed through [`PipelineContext`] when creating middleware layers.
//!
//! # Failures
//!
//! A failed call is a [`Response`] with a status code of 500 or above; it is never an error.
//! [`Error`] is reserved for configuration problems, such as a retry layer with zero
//! attempts, and is always reported before the first call.
//!
//! # Built-in Middleware
//!
//! - [`auth`]: Adds a bearer token to every request.
//! - [`retry`]: Re-invokes the inner chain on server-class failures.
//! - [`metrics`]: Reports one latency observation per call.
//! - [`trace`]: Stamps requests with a correlation identifier.
//!
//! ## Features
//!
//! - `logs`: Emits `tracing` events for middleware activity once
//!   [`PipelineContext::enable_logs`] is called.
//! - `metrics`: Reports OpenTelemetry metrics once [`PipelineContext::enable_metrics`] is called.
//! - `serde`: Enables the declarative [`config`] module.

#[doc(inline)]
pub use recoverable::{Recovery, RecoveryInfo, RecoveryKind};

mod backend;
pub use backend::FlakyBackend;

mod context;
pub use context::PipelineContext;

mod error;
pub use error::{Error, ErrorKind, Result};

mod model;
pub use model::{AUTHORIZATION, Request, Response, TRACE_ID};

pub mod telemetry;

pub(crate) mod utils;

pub mod auth;

pub mod metrics;

pub mod retry;

pub mod trace;

#[cfg(feature = "serde")]
pub mod config;
