// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::marker::PhantomData;
use std::num::NonZeroU32;
use std::sync::Arc;

use strata::Layer;

use super::{DEFAULT_MAX_ATTEMPTS, OnRetry, OnRetryArgs, Retry, RetryShared};
#[cfg(any(feature = "logs", feature = "metrics", test))]
use crate::utils::TelemetryHelper;
use crate::{Error, ErrorKind, PipelineContext};

/// Builder for configuring retry middleware.
///
/// This type is created by calling [`Retry::layer`]. Every setting is optional; an
/// invalid attempt count is rejected by [`max_attempts`][Self::max_attempts] while the
/// pipeline is being configured, never while a request is in flight.
///
/// For comprehensive examples, see the [retry module][crate::retry] documentation.
#[derive(Debug)]
pub struct RetryLayer<In, Out> {
    max_attempts: NonZeroU32,
    on_retry: Option<OnRetry<Out>>,
    #[cfg(any(feature = "logs", feature = "metrics", test))]
    telemetry: TelemetryHelper,
    _in: PhantomData<fn(In)>,
}

impl<In, Out> RetryLayer<In, Out> {
    #[must_use]
    #[cfg_attr(
        not(any(feature = "logs", feature = "metrics", test)),
        expect(unused_variables, reason = "unused when logs nor metrics are used")
    )]
    pub(crate) fn new(name: Cow<'static, str>, context: &PipelineContext<In, Out>) -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            on_retry: None,
            #[cfg(any(feature = "logs", feature = "metrics", test))]
            telemetry: context.create_telemetry(name),
            _in: PhantomData,
        }
    }

    /// Sets the maximum number of attempts, the original call included.
    ///
    /// With `1` the middleware is a pure pass-through.
    ///
    /// **Default**: 3 attempts
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidMaxAttempts`] if `max_attempts` is zero.
    pub fn max_attempts(mut self, max_attempts: u32) -> Result<Self, Error> {
        let Some(max_attempts) = NonZeroU32::new(max_attempts) else {
            return Err(Error::from_kind(ErrorKind::InvalidMaxAttempts(max_attempts)));
        };

        self.max_attempts = max_attempts;
        Ok(self)
    }

    /// Configures a callback invoked after every failed attempt that is followed by another one.
    ///
    /// The callback receives the failed output and [`OnRetryArgs`]. It is purely for
    /// observation and does not affect the retry behavior.
    ///
    /// **Default**: None
    #[must_use]
    pub fn on_retry(mut self, retry_fn: impl Fn(&Out, OnRetryArgs) + Send + Sync + 'static) -> Self {
        self.on_retry = Some(OnRetry::new(retry_fn));
        self
    }
}

impl<In, Out, S> Layer<S> for RetryLayer<In, Out> {
    type Service = Retry<In, Out, S>;

    fn layer(&self, inner: S) -> Self::Service {
        Retry {
            shared: Arc::new(RetryShared {
                max_attempts: self.max_attempts,
                on_retry: self.on_retry.clone(),
                #[cfg(any(feature = "logs", feature = "metrics", test))]
                telemetry: self.telemetry.clone(),
                _in: PhantomData,
            }),
            inner,
        }
    }
}
