// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::atomic::{AtomicU32, Ordering};

use strata::Handler;

use crate::{Request, Response};

/// A stand-in for a remote service that fails exactly once.
///
/// The first call on an instance returns `500 temporary_error`; every later call returns
/// `200 ok`. The call counter belongs to the instance, so every fresh backend starts over
/// with a failure.
///
/// # Examples
///
/// ```
/// use strata::Handler;
/// use strata_client::{FlakyBackend, Request};
///
/// let backend = FlakyBackend::new();
///
/// assert_eq!(backend.invoke(Request::new("/ping", "")).status(), 500);
/// assert_eq!(backend.invoke(Request::new("/ping", "")).status(), 200);
/// assert_eq!(backend.calls(), 2);
/// ```
#[derive(Debug, Default)]
pub struct FlakyBackend {
    calls: AtomicU32,
}

impl FlakyBackend {
    /// Creates a backend whose next call is its first one.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times this backend has been invoked.
    #[must_use]
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::Acquire)
    }
}

impl Handler<Request> for FlakyBackend {
    type Out = Response;

    #[cfg_attr(not(any(feature = "logs", test)), expect(unused_variables, reason = "unused when logs are disabled"))]
    fn invoke(&self, input: Request) -> Self::Out {
        // The counter saturates so that a wrapped count never reads as the first call again.
        let previous = self
            .calls
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |calls| Some(calls.saturating_add(1)))
            .unwrap_or_else(|calls| calls);
        let call = previous.saturating_add(1);

        #[cfg(any(feature = "logs", test))]
        tracing::event!(
            name: "strata.backend",
            tracing::Level::DEBUG,
            request.path = input.path(),
            backend.call = call,
        );

        if call == 1 {
            Response::new(500, "temporary_error")
        } else {
            Response::ok("ok")
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn fails_once_then_succeeds() {
        let backend = FlakyBackend::new();

        assert_eq!(backend.invoke(Request::default()), Response::new(500, "temporary_error"));
        assert_eq!(backend.invoke(Request::default()), Response::ok("ok"));
        assert_eq!(backend.invoke(Request::default()), Response::ok("ok"));
        assert_eq!(backend.calls(), 3);
    }

    #[test]
    fn instances_do_not_share_counter() {
        let first = FlakyBackend::new();
        let _ = first.invoke(Request::default());

        let second = FlakyBackend::new();

        assert_eq!(second.calls(), 0);
        assert_eq!(second.invoke(Request::default()).status(), 500);
    }

    #[test]
    fn counter_saturates_instead_of_wrapping() {
        let backend = FlakyBackend {
            calls: AtomicU32::new(u32::MAX - 1),
        };

        assert_eq!(backend.invoke(Request::default()), Response::ok("ok"));
        assert_eq!(backend.calls(), u32::MAX);
        assert_eq!(backend.invoke(Request::default()), Response::ok("ok"));
        assert_eq!(backend.invoke(Request::default()), Response::ok("ok"));
        assert_eq!(backend.calls(), u32::MAX);
    }

    #[test]
    fn concurrent_callers_see_exactly_one_failure() {
        let backend = Arc::new(FlakyBackend::new());

        let failures: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let backend = Arc::clone(&backend);
                    scope.spawn(move || backend.invoke(Request::default()).is_server_error())
                })
                .collect();

            handles.into_iter().map(|h| usize::from(h.join().unwrap())).sum()
        });

        assert_eq!(failures, 1);
        assert_eq!(backend.calls(), 8);
    }

    #[test]
    fn emits_debug_event_per_call() {
        use tracing_subscriber::util::SubscriberInitExt;

        let capture = testing_aids::LogCapture::new();
        let _guard = capture.subscriber().set_default();
        let backend = FlakyBackend::new();

        let _ = backend.invoke(Request::new("/v1/payment/refund", ""));

        capture.assert_contains("request.path=\"/v1/payment/refund\"");
        capture.assert_contains("backend.call=1");
    }
}
