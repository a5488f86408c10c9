// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::marker::PhantomData;

use tick::Clock;

pub(crate) const DEFAULT_PIPELINE_NAME: &str = "default";

/// Shared configuration and dependencies for the middleware of one pipeline.
///
/// Pass a single `PipelineContext` to every layer of a pipeline to share a clock, a pipeline
/// name and the telemetry configuration. The type parameters tie the context to the input and
/// output of the pipeline, which is what lets layers such as [`Retry`][crate::retry::Retry]
/// infer their types.
///
/// # Examples
///
/// ```
/// use strata_client::{PipelineContext, Request, Response};
/// # let clock = tick::Clock::new_frozen();
///
/// let context = PipelineContext::<Request, Response>::new(&clock)
///     .name("payments")
///     .enable_logs();
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub struct PipelineContext<In, Out> {
    clock: Clock,
    name: Cow<'static, str>,
    #[cfg(any(feature = "metrics", test))]
    meter: Option<opentelemetry::metrics::Meter>,
    #[cfg(any(feature = "logs", test))]
    logs_enabled: bool,
    _in: PhantomData<fn() -> In>,
    _out: PhantomData<fn() -> Out>,
}

impl<In, Out> PipelineContext<In, Out> {
    /// Creates a context with a clock. The pipeline is named `"default"`.
    pub fn new(clock: impl AsRef<Clock>) -> Self {
        Self {
            clock: clock.as_ref().clone(),
            name: Cow::Borrowed(DEFAULT_PIPELINE_NAME),
            #[cfg(any(feature = "metrics", test))]
            meter: None,
            #[cfg(any(feature = "logs", test))]
            logs_enabled: false,
            _in: PhantomData,
            _out: PhantomData,
        }
    }

    pub(crate) fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Sets the pipeline name used to correlate telemetry. Prefer `snake_case`.
    #[must_use]
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Enables metrics reporting with the given OpenTelemetry meter provider.
    #[must_use]
    #[cfg(any(feature = "metrics", test))]
    pub fn enable_metrics(self, provider: &dyn opentelemetry::metrics::MeterProvider) -> Self {
        Self {
            meter: Some(crate::telemetry::metrics::create_meter(provider)),
            ..self
        }
    }

    /// Enables structured logging of middleware activity.
    #[must_use]
    #[cfg(any(feature = "logs", test))]
    pub fn enable_logs(self) -> Self {
        Self {
            logs_enabled: true,
            ..self
        }
    }

    /// Re-targets the context at another input and output type, keeping its configuration.
    #[must_use]
    pub fn cast<I, O>(&self) -> PipelineContext<I, O> {
        PipelineContext {
            clock: self.clock.clone(),
            name: self.name.clone(),
            #[cfg(any(feature = "metrics", test))]
            meter: self.meter.clone(),
            #[cfg(any(feature = "logs", test))]
            logs_enabled: self.logs_enabled,
            _in: PhantomData,
            _out: PhantomData,
        }
    }

    #[cfg(any(feature = "logs", feature = "metrics", test))]
    pub(crate) fn create_telemetry(&self, middleware_name: Cow<'static, str>) -> crate::utils::TelemetryHelper {
        crate::utils::TelemetryHelper {
            #[cfg(any(feature = "metrics", test))]
            event_reporter: self.meter.as_ref().map(crate::telemetry::metrics::create_pipeline_event_counter),
            #[cfg(any(feature = "metrics", test))]
            duration_reporter: self.meter.as_ref().map(crate::telemetry::metrics::create_request_duration_histogram),
            pipeline_name: self.name.clone(),
            middleware_name,
            #[cfg(any(feature = "logs", test))]
            logs_enabled: self.logs_enabled,
        }
    }
}

impl<In, Out> Clone for PipelineContext<In, Out> {
    fn clone(&self) -> Self {
        self.cast()
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Request, Response};

    #[test]
    fn new_sets_default_pipeline_name() {
        let ctx = PipelineContext::<Request, Response>::new(Clock::new_frozen());
        let telemetry = ctx.create_telemetry("auth".into());

        assert_eq!(telemetry.pipeline_name.as_ref(), DEFAULT_PIPELINE_NAME);
        assert_eq!(telemetry.middleware_name.as_ref(), "auth");
        assert!(!telemetry.logs_enabled);
        assert!(!telemetry.metrics_enabled());
    }

    #[test]
    fn name_accepts_owned_values() {
        let ctx = PipelineContext::<Request, Response>::new(Clock::new_frozen()).name(String::from("payments"));
        let telemetry = ctx.create_telemetry("retry".into());

        assert_eq!(telemetry.pipeline_name.as_ref(), "payments");
        assert!(matches!(telemetry.pipeline_name, Cow::Owned(_)));
    }

    #[test]
    fn clone_and_cast_keep_configuration() {
        let tester = testing_aids::MetricTester::new();
        let ctx = PipelineContext::<Request, Response>::new(Clock::new_frozen())
            .name("payments")
            .enable_logs()
            .enable_metrics(tester.meter_provider());

        let cloned = ctx.clone().create_telemetry("a".into());
        let cast = ctx.cast::<String, String>().create_telemetry("b".into());

        for telemetry in [cloned, cast] {
            assert_eq!(telemetry.pipeline_name.as_ref(), "payments");
            assert!(telemetry.logs_enabled);
            assert!(telemetry.metrics_enabled());
        }
    }

    #[test]
    fn static_assertions() {
        static_assertions::assert_impl_all!(PipelineContext<Request, Response>: Send, Sync, Clone);
    }
}
