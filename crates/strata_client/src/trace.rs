// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Trace-id propagation middleware.
//!
//! [`Trace`] stamps every request with a correlation identifier in the
//! [`X-Trace-Id`][crate::TRACE_ID] header, replacing any value already present. The identifier
//! is either fixed with [`TraceLayer::trace_id`] or generated per call as
//! `trace-<uuid>`.
//!
//! # Examples
//!
//! ```rust
//! use strata::{Execute, Handler, Layer};
//! use strata_client::trace::Trace;
//! use strata_client::{PipelineContext, Request, Response, TRACE_ID};
//! # let clock = tick::Clock::new_frozen();
//!
//! let context = PipelineContext::<Request, Response>::new(&clock);
//! let trace = Trace::layer(&context).trace_id("trace-1001").layer(Execute::new(|request: Request| {
//!     assert_eq!(request.header(TRACE_ID), Some("trace-1001"));
//!     Response::ok("ok")
//! }));
//!
//! trace.invoke(Request::new("/v1/payment/refund", ""));
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use strata::{Handler, Layer};

#[cfg(any(feature = "logs", feature = "metrics", test))]
use crate::utils::TelemetryHelper;
use crate::{PipelineContext, Request, Response, TRACE_ID};

#[cfg(any(feature = "logs", feature = "metrics", test))]
const MIDDLEWARE_NAME: &str = "trace";

/// Adds the `X-Trace-Id` header to every request.
///
/// Trace is configured by calling [`Trace::layer`] and using the builder methods on the
/// returned [`TraceLayer`] instance.
#[derive(Debug)]
pub struct Trace<S> {
    shared: Arc<TraceShared>,
    inner: S,
}

#[derive(Debug)]
struct TraceShared {
    trace_id: Option<Cow<'static, str>>,
    #[cfg(any(feature = "logs", feature = "metrics", test))]
    telemetry: TelemetryHelper,
}

impl Trace<()> {
    /// Creates a new trace layer that generates a fresh identifier for every call.
    #[must_use]
    #[cfg_attr(
        not(any(feature = "logs", feature = "metrics", test)),
        expect(unused_variables, reason = "unused when logs nor metrics are used")
    )]
    pub fn layer(context: &PipelineContext<Request, Response>) -> TraceLayer {
        TraceLayer {
            trace_id: None,
            #[cfg(any(feature = "logs", feature = "metrics", test))]
            telemetry: context.create_telemetry(Cow::Borrowed(MIDDLEWARE_NAME)),
        }
    }
}

impl<S: Clone> Clone for Trace<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            inner: self.inner.clone(),
        }
    }
}

impl<S> Handler<Request> for Trace<S>
where
    S: Handler<Request, Out = Response>,
{
    type Out = Response;

    fn invoke(&self, input: Request) -> Self::Out {
        let trace_id = match &self.shared.trace_id {
            Some(id) => id.to_string(),
            None => generate_trace_id(),
        };

        #[cfg(any(feature = "logs", test))]
        if self.shared.telemetry.logs_enabled {
            tracing::event!(
                name: "strata.trace",
                tracing::Level::DEBUG,
                pipeline.name = %self.shared.telemetry.pipeline_name,
                middleware.name = %self.shared.telemetry.middleware_name,
                request.path = input.path(),
                trace.id = %trace_id,
            );
        }

        self.inner.invoke(input.with_header(TRACE_ID, trace_id))
    }
}

fn generate_trace_id() -> String {
    format!("trace-{}", uuid::Uuid::new_v4().simple())
}

/// Builder for configuring trace middleware, created by [`Trace::layer`].
#[derive(Debug, Clone)]
pub struct TraceLayer {
    trace_id: Option<Cow<'static, str>>,
    #[cfg(any(feature = "logs", feature = "metrics", test))]
    telemetry: TelemetryHelper,
}

impl TraceLayer {
    /// Uses the same identifier for every call instead of generating one.
    #[must_use]
    pub fn trace_id(mut self, trace_id: impl Into<Cow<'static, str>>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

impl<S> Layer<S> for TraceLayer {
    type Service = Trace<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Trace {
            shared: Arc::new(TraceShared {
                trace_id: self.trace_id.clone(),
                #[cfg(any(feature = "logs", feature = "metrics", test))]
                telemetry: self.telemetry.clone(),
            }),
            inner,
        }
    }
}
