// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Well-known keys attached to the telemetry emitted by the middleware of this crate.
//!
//! The same keys are used as `tracing` field names and as OpenTelemetry attribute keys, so
//! logs and metrics of one pipeline can be joined on them.
//!
//! # Conventions
//!
//! Names follow the [OpenTelemetry naming guidelines](https://opentelemetry.io/docs/specs/semconv/general/naming/#general-naming-considerations):
//! keys are dot-separated and values are short, preferably `snake_case`.

#[cfg(any(feature = "metrics", test))]
pub(crate) mod metrics;

/// Key used to annotate the name of a pipeline, as set by [`PipelineContext::name`][crate::PipelineContext::name].
pub const PIPELINE_NAME: &str = "pipeline.name";

/// Key used to annotate the name of a middleware within its pipeline.
///
/// Examples: `retry`, `metrics`, `auth`, `trace`.
pub const MIDDLEWARE_NAME: &str = "middleware.name";

/// Key used to annotate the specific pipeline event being reported.
pub const EVENT_NAME: &str = "event.name";

/// Key used to annotate the path of the request being processed.
pub const REQUEST_PATH: &str = "request.path";

/// Key used to annotate the status code of the response.
pub const RESPONSE_STATUS_CODE: &str = "response.status_code";

/// Key used to annotate the 0-based index of a retry attempt.
pub const ATTEMPT_INDEX: &str = "attempt.index";

/// Key used to annotate whether an attempt was the last one allowed.
pub const ATTEMPT_IS_LAST: &str = "attempt.is_last";

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_stable() {
        assert_eq!(PIPELINE_NAME, "pipeline.name");
        assert_eq!(MIDDLEWARE_NAME, "middleware.name");
        assert_eq!(EVENT_NAME, "event.name");
        assert_eq!(REQUEST_PATH, "request.path");
        assert_eq!(RESPONSE_STATUS_CODE, "response.status_code");
        assert_eq!(ATTEMPT_INDEX, "attempt.index");
        assert_eq!(ATTEMPT_IS_LAST, "attempt.is_last");
    }
}
