// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::sync::Arc;

use strata::Layer;
use tick::Clock;

use super::{Metrics, MetricsShared, Observation, OnObservation};
#[cfg(any(feature = "logs", feature = "metrics", test))]
use crate::utils::TelemetryHelper;
use crate::{PipelineContext, Request, Response};

/// Builder for configuring metrics middleware.
///
/// This type is created by calling [`Metrics::layer`]. Observations are always timed with the
/// clock of the [`PipelineContext`]; where they go is configured here and on the context.
#[derive(Debug)]
pub struct MetricsLayer {
    clock: Clock,
    on_observation: Option<OnObservation>,
    #[cfg(any(feature = "logs", feature = "metrics", test))]
    telemetry: TelemetryHelper,
}

impl MetricsLayer {
    #[must_use]
    #[cfg_attr(
        not(any(feature = "logs", feature = "metrics", test)),
        expect(unused_variables, reason = "unused when logs nor metrics are used")
    )]
    pub(crate) fn new(name: Cow<'static, str>, context: &PipelineContext<Request, Response>) -> Self {
        Self {
            clock: context.clock().clone(),
            on_observation: None,
            #[cfg(any(feature = "logs", feature = "metrics", test))]
            telemetry: context.create_telemetry(name),
        }
    }

    /// Installs the sink that receives one [`Observation`] per call.
    ///
    /// This call replaces any previous sink.
    ///
    /// **Default**: None
    #[must_use]
    pub fn on_observation(mut self, observe_fn: impl Fn(&Observation) + Send + Sync + 'static) -> Self {
        self.on_observation = Some(OnObservation::new(observe_fn));
        self
    }
}

impl<S> Layer<S> for MetricsLayer {
    type Service = Metrics<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Metrics {
            shared: Arc::new(MetricsShared {
                clock: self.clock.clone(),
                on_observation: self.on_observation.clone(),
                #[cfg(any(feature = "logs", feature = "metrics", test))]
                telemetry: self.telemetry.clone(),
            }),
            inner,
        }
    }
}
