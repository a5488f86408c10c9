// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use strata::Handler;
use tick::Clock;

use super::{MetricsLayer, Observation, OnObservation};
use crate::{PipelineContext, Request, Response};

/// Times every call to the inner handler and reports exactly one [`Observation`] for it.
///
/// The observation is taken around the whole inner chain: when retry middleware sits below
/// `Metrics`, all attempts of one call add up to a single observation carrying the final
/// status. Neither the request nor the response is changed.
///
/// Metrics is configured by calling [`Metrics::layer`] and using the builder methods on the
/// returned [`MetricsLayer`] instance.
#[derive(Debug)]
pub struct Metrics<S> {
    pub(super) shared: Arc<MetricsShared>,
    pub(super) inner: S,
}

#[derive(Debug)]
pub(crate) struct MetricsShared {
    pub(crate) clock: Clock,
    pub(crate) on_observation: Option<OnObservation>,
    #[cfg(any(feature = "logs", feature = "metrics", test))]
    pub(crate) telemetry: crate::utils::TelemetryHelper,
}

impl<S: Clone> Clone for Metrics<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            inner: self.inner.clone(),
        }
    }
}

impl Metrics<()> {
    /// Creates a new metrics layer with the specified name.
    ///
    /// The name identifies this middleware in logs and metrics.
    pub fn layer(name: impl Into<std::borrow::Cow<'static, str>>, context: &PipelineContext<Request, Response>) -> MetricsLayer {
        MetricsLayer::new(name.into(), context)
    }
}

impl<S> Handler<Request> for Metrics<S>
where
    S: Handler<Request, Out = Response>,
{
    type Out = Response;

    fn invoke(&self, input: Request) -> Self::Out {
        let path = input.path().to_owned();
        let stopwatch = self.shared.clock.stopwatch();

        let response = self.inner.invoke(input);

        self.shared.report(&Observation {
            path,
            status: response.status(),
            elapsed: stopwatch.elapsed(),
        });

        response
    }
}

impl MetricsShared {
    fn report(&self, observation: &Observation) {
        #[cfg(any(feature = "logs", test))]
        if self.telemetry.logs_enabled {
            tracing::event!(
                name: "strata.metrics",
                tracing::Level::INFO,
                pipeline.name = %self.telemetry.pipeline_name,
                middleware.name = %self.telemetry.middleware_name,
                request.path = observation.path(),
                response.status_code = observation.status(),
                elapsed_ms = observation.elapsed_millis(),
            );
        }

        #[cfg(any(feature = "metrics", test))]
        if self.telemetry.metrics_enabled() {
            use crate::telemetry::{REQUEST_PATH, RESPONSE_STATUS_CODE};

            let [pipeline, middleware] = self.telemetry.base_attributes();
            self.telemetry.report_duration(
                observation.elapsed().as_secs_f64() * 1000.0,
                &[
                    pipeline,
                    middleware,
                    opentelemetry::KeyValue::new(REQUEST_PATH, observation.path().to_owned()),
                    opentelemetry::KeyValue::new(RESPONSE_STATUS_CODE, i64::from(observation.status())),
                ],
            );
        }

        if let Some(on_observation) = &self.on_observation {
            on_observation.call(observation);
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use opentelemetry::KeyValue;
    use strata::{Execute, Layer};
    use testing_aids::{LogCapture, MetricTester};
    use tick::ClockControl;
    use tracing_subscriber::util::SubscriberInitExt;

    use super::*;

    fn collect(sink: &Arc<Mutex<Vec<Observation>>>) -> impl Fn(&Observation) + Send + Sync + use<> {
        let sink = Arc::clone(sink);
        move |observation: &Observation| sink.lock().unwrap().push(observation.clone())
    }

    #[test]
    fn reports_one_observation_with_elapsed_time() {
        let control = ClockControl::new();
        let context = PipelineContext::new(control.to_clock());
        let observations = Arc::new(Mutex::new(Vec::new()));
        let advance = control.clone();
        let metrics = Metrics::layer("metrics", &context)
            .on_observation(collect(&observations))
            .layer(Execute::new(move |_: Request| {
                advance.advance(Duration::from_millis(42));
                Response::new(201, "created")
            }));

        let response = metrics.invoke(Request::new("/orders", "{}"));

        assert_eq!(response, Response::new(201, "created"));
        let observations = observations.lock().unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].path(), "/orders");
        assert_eq!(observations[0].status(), 201);
        assert_eq!(observations[0].elapsed_millis(), 42);
    }

    #[test]
    fn request_reaches_inner_handler_unchanged() {
        let context = PipelineContext::new(tick::Clock::new_frozen());
        let request = Request::new("/a", "b").with_header("x", "1");
        let expected = request.clone();
        let metrics = Metrics::layer("metrics", &context).layer(Execute::new(move |seen: Request| {
            assert_eq!(seen, expected);
            Response::ok("ok")
        }));

        assert_eq!(metrics.invoke(request), Response::ok("ok"));
    }

    #[test]
    fn emits_info_event_when_logs_enabled() {
        let capture = LogCapture::new();
        let _guard = capture.subscriber().set_default();
        let context = PipelineContext::new(tick::Clock::new_frozen()).name("payments").enable_logs();
        let metrics = Metrics::layer("latency", &context).layer(Execute::new(|_: Request| Response::new(503, "")));

        let _ = metrics.invoke(Request::new("/v1/payment/refund", ""));

        capture.assert_contains("INFO");
        capture.assert_contains("strata_client::metrics");
        capture.assert_contains("pipeline.name=payments");
        capture.assert_contains("middleware.name=latency");
        capture.assert_contains("request.path=\"/v1/payment/refund\"");
        capture.assert_contains("response.status_code=503");
        capture.assert_contains("elapsed_ms=0");
    }

    #[cfg(not(miri))]
    #[test]
    fn records_duration_histogram() {
        let tester = MetricTester::new();
        let context = PipelineContext::new(tick::Clock::new_frozen())
            .name("payments")
            .enable_metrics(tester.meter_provider());
        let metrics = Metrics::layer("latency", &context).layer(Execute::new(|_: Request| Response::ok("ok")));

        let _ = metrics.invoke(Request::new("/orders", ""));
        let _ = metrics.invoke(Request::new("/orders", ""));

        tester.assert_attributes_contain(&[
            KeyValue::new("pipeline.name", "payments"),
            KeyValue::new("middleware.name", "latency"),
            KeyValue::new("request.path", "/orders"),
            KeyValue::new("response.status_code", 200_i64),
        ]);
        assert_eq!(tester.histogram_count("pipeline.request.duration"), 2);
    }

    #[test]
    fn static_assertions() {
        static_assertions::assert_impl_all!(Metrics<strata::DynamicHandler<Request, Response>>: Send, Sync, Clone);
        static_assertions::assert_impl_all!(MetricsLayer: Send, Sync);
    }
}
