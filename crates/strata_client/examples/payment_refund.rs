// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Refunds a payment through a client pipeline whose backend fails once.
//!
//! The chain `Metrics → Retry(2) → Auth → FlakyBackend` absorbs the transient failure. The
//! built pipeline is then extended with an outer `Trace` layer without rebuilding it, and a
//! second backend shows the same outcome with the trace header added.

use strata::{Handler, Pipeline};
use strata_client::auth::Auth;
use strata_client::metrics::Metrics;
use strata_client::retry::Retry;
use strata_client::trace::Trace;
use strata_client::{FlakyBackend, PipelineContext, Request, Response};
use tick::runtime::InactiveClock;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<(), strata_client::Error> {
    tracing_subscriber::registry().with(tracing_subscriber::fmt::layer()).init();

    let (clock, _driver) = InactiveClock::default().activate();
    let context = PipelineContext::<Request, Response>::new(&clock).name("payments").enable_logs();

    let request = Request::new("/v1/payment/refund", r#"{"orderId":"ORD-1001"}"#);

    let pipeline = client_pipeline(&context)?;
    let response = pipeline.invoke(request.clone());
    tracing::info!(status = response.status(), body = response.body(), "refund without trace");

    let traced = client_pipeline(&context)?.wrap(Trace::layer(&context).trace_id("trace-1001"));
    let response = traced.invoke(request);
    tracing::info!(status = response.status(), body = response.body(), "refund with trace");

    Ok(())
}

fn client_pipeline(context: &PipelineContext<Request, Response>) -> Result<Pipeline<Request, Response>, strata_client::Error> {
    let pipeline = Pipeline::builder()
        .terminal(FlakyBackend::new())
        .layer(Auth::layer(context))
        .layer(Retry::layer("retry", context).max_attempts(2)?.on_retry(|response: &Response, args| {
            tracing::info!(attempt = args.attempt().index(), status = response.status(), "retrying refund");
        }))
        .layer(Metrics::layer("metrics", context).on_observation(|observation| {
            tracing::info!(
                path = observation.path(),
                status = observation.status(),
                elapsed_ms = observation.elapsed_millis(),
                "refund observed"
            );
        }))
        .build()?;

    Ok(pipeline)
}
