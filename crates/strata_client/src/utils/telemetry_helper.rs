// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;

/// Telemetry handles created by [`PipelineContext`][crate::PipelineContext] for one middleware.
#[derive(Debug, Clone)]
pub(crate) struct TelemetryHelper {
    pub(crate) pipeline_name: Cow<'static, str>,
    pub(crate) middleware_name: Cow<'static, str>,
    #[cfg(any(feature = "metrics", test))]
    pub(crate) event_reporter: Option<opentelemetry::metrics::Counter<u64>>,
    #[cfg(any(feature = "metrics", test))]
    pub(crate) duration_reporter: Option<opentelemetry::metrics::Histogram<f64>>,
    #[cfg(any(feature = "logs", test))]
    pub(crate) logs_enabled: bool,
}

impl TelemetryHelper {
    #[cfg(any(feature = "metrics", test))]
    pub(crate) fn metrics_enabled(&self) -> bool {
        self.event_reporter.is_some()
    }

    #[cfg(any(feature = "metrics", test))]
    pub(crate) fn report_event(&self, attributes: &[opentelemetry::KeyValue]) {
        if let Some(reporter) = &self.event_reporter {
            reporter.add(1, attributes);
        }
    }

    #[cfg(any(feature = "metrics", test))]
    pub(crate) fn report_duration(&self, millis: f64, attributes: &[opentelemetry::KeyValue]) {
        if let Some(reporter) = &self.duration_reporter {
            reporter.record(millis, attributes);
        }
    }

    #[cfg(any(feature = "metrics", test))]
    pub(crate) fn base_attributes(&self) -> [opentelemetry::KeyValue; 2] {
        use crate::telemetry::{MIDDLEWARE_NAME, PIPELINE_NAME};

        [
            opentelemetry::KeyValue::new(PIPELINE_NAME, self.pipeline_name.clone()),
            opentelemetry::KeyValue::new(MIDDLEWARE_NAME, self.middleware_name.clone()),
        ]
    }
}
