// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::marker::PhantomData;
use std::num::NonZeroU32;
use std::sync::Arc;

use recoverable::{Recovery, RecoveryInfo, RecoveryKind};
use strata::Handler;

use super::{Attempt, OnRetry, OnRetryArgs, RetryLayer};
use crate::PipelineContext;

/// Re-invokes the inner handler while it reports a retryable failure.
///
/// Each attempt receives a clone of the original input, so every attempt sees exactly the
/// request the caller sent. The output of an attempt is classified through [`Recovery`]:
/// [`RecoveryKind::Retry`] leads to another attempt, anything else is returned at once. When
/// the last attempt fails its output is returned unchanged; running out of attempts is never
/// an error. There is no delay between attempts.
///
/// Retries are issued regardless of whether the call is idempotent. Callers that must not
/// repeat a side effect should configure a single attempt for that pipeline.
///
/// Retry is configured by calling [`Retry::layer`] and using the builder methods on the
/// returned [`RetryLayer`] instance.
#[derive(Debug)]
pub struct Retry<In, Out, S> {
    pub(super) shared: Arc<RetryShared<In, Out>>,
    pub(super) inner: S,
}

/// Shared configuration for [`Retry`] middleware.
#[derive(Debug)]
pub(crate) struct RetryShared<In, Out> {
    pub(crate) max_attempts: NonZeroU32,
    pub(crate) on_retry: Option<OnRetry<Out>>,
    #[cfg(any(feature = "logs", feature = "metrics", test))]
    pub(crate) telemetry: crate::utils::TelemetryHelper,
    pub(crate) _in: PhantomData<fn(In)>,
}

impl<In, Out, S: Clone> Clone for Retry<In, Out, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            inner: self.inner.clone(),
        }
    }
}

impl<In, Out> Retry<In, Out, ()> {
    /// Creates a new retry layer with the specified name.
    ///
    /// The name identifies this middleware in logs and metrics.
    pub fn layer(name: impl Into<std::borrow::Cow<'static, str>>, context: &PipelineContext<In, Out>) -> RetryLayer<In, Out> {
        RetryLayer::new(name.into(), context)
    }
}

impl<In, Out, S> Handler<In> for Retry<In, Out, S>
where
    In: Clone,
    Out: Recovery,
    S: Handler<In, Out = Out>,
{
    type Out = Out;

    fn invoke(&self, input: In) -> Self::Out {
        let mut attempt = Attempt::first(self.shared.max_attempts);

        loop {
            if attempt.is_last() {
                let out = self.inner.invoke(input);
                let recovery = out.recovery();

                if is_retryable(&recovery) {
                    self.shared.emit_telemetry(attempt, &recovery);
                }

                return out;
            }

            let out = self.inner.invoke(input.clone());
            let recovery = out.recovery();

            if !is_retryable(&recovery) {
                return out;
            }

            self.shared.emit_telemetry(attempt, &recovery);
            self.shared.invoke_on_retry(&out, attempt, recovery);

            let Some(next) = attempt.next(self.shared.max_attempts) else {
                return out;
            };

            attempt = next;
        }
    }
}

fn is_retryable(recovery: &RecoveryInfo) -> bool {
    matches!(recovery.kind(), RecoveryKind::Retry)
}

impl<In, Out> RetryShared<In, Out> {
    fn invoke_on_retry(&self, out: &Out, attempt: Attempt, recovery: RecoveryInfo) {
        if let Some(on_retry) = &self.on_retry {
            on_retry.call(out, OnRetryArgs { attempt, recovery });
        }
    }

    #[cfg_attr(
        not(any(feature = "logs", feature = "metrics", test)),
        expect(unused_variables, clippy::unused_self, reason = "unused when logs nor metrics are used")
    )]
    fn emit_telemetry(&self, attempt: Attempt, recovery: &RecoveryInfo) {
        #[cfg(any(feature = "logs", test))]
        if self.telemetry.logs_enabled {
            tracing::event!(
                name: "strata.retry",
                tracing::Level::WARN,
                pipeline.name = %self.telemetry.pipeline_name,
                middleware.name = %self.telemetry.middleware_name,
                attempt.index = attempt.index(),
                attempt.is_last = attempt.is_last(),
                recovery.kind = ?recovery.kind(),
            );
        }

        #[cfg(any(feature = "metrics", test))]
        if self.telemetry.metrics_enabled() {
            use super::constants::RETRY_EVENT;
            use crate::telemetry::{ATTEMPT_INDEX, ATTEMPT_IS_LAST, EVENT_NAME};

            let [pipeline, middleware] = self.telemetry.base_attributes();
            self.telemetry.report_event(&[
                pipeline,
                middleware,
                opentelemetry::KeyValue::new(EVENT_NAME, RETRY_EVENT),
                opentelemetry::KeyValue::new(ATTEMPT_INDEX, i64::from(attempt.index())),
                opentelemetry::KeyValue::new(ATTEMPT_IS_LAST, attempt.is_last()),
            ]);
        }
    }
}
