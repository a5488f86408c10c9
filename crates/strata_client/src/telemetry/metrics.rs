// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use opentelemetry::InstrumentationScope;
use opentelemetry::metrics::{Counter, Histogram, Meter, MeterProvider};

const METER_NAME: &str = "strata_client";
const VERSION: &str = "v0.1.0";
const SCHEMA_URL: &str = "https://opentelemetry.io/schemas/1.47.0";

pub(crate) const PIPELINE_EVENT: &str = "pipeline.event";
pub(crate) const REQUEST_DURATION: &str = "pipeline.request.duration";

pub(crate) fn create_meter(meter_provider: &dyn MeterProvider) -> Meter {
    meter_provider.meter_with_scope(
        InstrumentationScope::builder(METER_NAME)
            .with_version(VERSION)
            .with_schema_url(SCHEMA_URL)
            .build(),
    )
}

pub(crate) fn create_pipeline_event_counter(meter: &Meter) -> Counter<u64> {
    meter
        .u64_counter(PIPELINE_EVENT)
        .with_description("Emitted upon the occurrence of a pipeline event, such as a retried attempt.")
        .with_unit("{event}")
        .build()
}

pub(crate) fn create_request_duration_histogram(meter: &Meter) -> Histogram<f64> {
    meter
        .f64_histogram(REQUEST_DURATION)
        .with_description("Duration of requests observed by the metrics middleware.")
        .with_unit("ms")
        .build()
}
