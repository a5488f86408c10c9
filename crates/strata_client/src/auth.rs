// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Authentication middleware.
//!
//! [`Auth`] signs every request with a bearer token in the
//! [`Authorization`][crate::AUTHORIZATION] header before passing it on. Any value already
//! present under that header is replaced. The response is returned unchanged.
//!
//! The token is a static credential; it is neither validated nor refreshed.
//!
//! # Examples
//!
//! ```rust
//! use strata::{Execute, Handler, Layer};
//! use strata_client::auth::Auth;
//! use strata_client::{AUTHORIZATION, PipelineContext, Request, Response};
//! # let clock = tick::Clock::new_frozen();
//!
//! let context = PipelineContext::<Request, Response>::new(&clock);
//! let auth = Auth::layer(&context).layer(Execute::new(|request: Request| {
//!     assert_eq!(request.header(AUTHORIZATION), Some("Bearer demo-token"));
//!     Response::ok("ok")
//! }));
//!
//! auth.invoke(Request::new("/v1/payment/refund", ""));
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use strata::{Handler, Layer};

#[cfg(any(feature = "logs", feature = "metrics", test))]
use crate::utils::TelemetryHelper;
use crate::{AUTHORIZATION, PipelineContext, Request, Response};

const DEFAULT_TOKEN: &str = "demo-token";
#[cfg(any(feature = "logs", feature = "metrics", test))]
const MIDDLEWARE_NAME: &str = "auth";

/// Adds the `Authorization: Bearer <token>` header to every request.
///
/// Auth is configured by calling [`Auth::layer`] and using the builder methods on the
/// returned [`AuthLayer`] instance.
#[derive(Debug)]
pub struct Auth<S> {
    shared: Arc<AuthShared>,
    inner: S,
}

#[derive(Debug)]
struct AuthShared {
    credential: String,
    #[cfg(any(feature = "logs", feature = "metrics", test))]
    telemetry: TelemetryHelper,
}

impl Auth<()> {
    /// Creates a new auth layer that uses the `demo-token` bearer token.
    #[must_use]
    #[cfg_attr(
        not(any(feature = "logs", feature = "metrics", test)),
        expect(unused_variables, reason = "unused when logs nor metrics are used")
    )]
    pub fn layer(context: &PipelineContext<Request, Response>) -> AuthLayer {
        AuthLayer {
            token: Cow::Borrowed(DEFAULT_TOKEN),
            #[cfg(any(feature = "logs", feature = "metrics", test))]
            telemetry: context.create_telemetry(Cow::Borrowed(MIDDLEWARE_NAME)),
        }
    }
}

impl<S: Clone> Clone for Auth<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            inner: self.inner.clone(),
        }
    }
}

impl<S> Handler<Request> for Auth<S>
where
    S: Handler<Request, Out = Response>,
{
    type Out = Response;

    fn invoke(&self, input: Request) -> Self::Out {
        #[cfg(any(feature = "logs", test))]
        if self.shared.telemetry.logs_enabled {
            tracing::event!(
                name: "strata.auth",
                tracing::Level::DEBUG,
                pipeline.name = %self.shared.telemetry.pipeline_name,
                middleware.name = %self.shared.telemetry.middleware_name,
                request.path = input.path(),
            );
        }

        self.inner.invoke(input.with_header(AUTHORIZATION, self.shared.credential.as_str()))
    }
}

/// Builder for configuring auth middleware, created by [`Auth::layer`].
#[derive(Debug, Clone)]
pub struct AuthLayer {
    token: Cow<'static, str>,
    #[cfg(any(feature = "logs", feature = "metrics", test))]
    telemetry: TelemetryHelper,
}

impl AuthLayer {
    /// Replaces the bearer token.
    ///
    /// **Default**: `demo-token`
    #[must_use]
    pub fn token(mut self, token: impl Into<Cow<'static, str>>) -> Self {
        self.token = token.into();
        self
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = Auth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Auth {
            shared: Arc::new(AuthShared {
                credential: format!("Bearer {}", self.token),
                #[cfg(any(feature = "logs", feature = "metrics", test))]
                telemetry: self.telemetry.clone(),
            }),
            inner,
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use strata::Execute;
    use testing_aids::LogCapture;
    use tick::Clock;
    use tracing_subscriber::util::SubscriberInitExt;

    use super::*;

    fn echo_authorization() -> impl Handler<Request, Out = Response> {
        Execute::new(|request: Request| Response::ok(request.header(AUTHORIZATION).unwrap_or_default().to_owned()))
    }

    #[test]
    fn sets_default_bearer_token() {
        let context = PipelineContext::new(Clock::new_frozen());
        let auth = Auth::layer(&context).layer(echo_authorization());

        assert_eq!(auth.invoke(Request::default()).body(), "Bearer demo-token");
    }

    #[test]
    fn custom_token_overwrites_existing_header() {
        let context = PipelineContext::new(Clock::new_frozen());
        let auth = Auth::layer(&context).token("secret").layer(echo_authorization());

        let response = auth.invoke(Request::default().with_header(AUTHORIZATION, "Basic abc"));

        assert_eq!(response.body(), "Bearer secret");
    }

    #[test]
    fn keeps_other_headers_and_response() {
        let context = PipelineContext::new(Clock::new_frozen());
        let auth = Auth::layer(&context).layer(Execute::new(|request: Request| {
            assert_eq!(request.header("X-Other"), Some("1"));
            assert_eq!(request.body(), "payload");
            Response::new(418, "teapot")
        }));

        let response = auth.invoke(Request::new("/", "payload").with_header("X-Other", "1"));

        assert_eq!(response, Response::new(418, "teapot"));
    }

    #[test]
    fn logs_when_enabled() {
        let capture = LogCapture::new();
        let _guard = capture.subscriber().set_default();
        let context = PipelineContext::new(Clock::new_frozen()).enable_logs();
        let auth = Auth::layer(&context).layer(echo_authorization());

        let _ = auth.invoke(Request::new("/v1/payment/refund", ""));

        capture.assert_contains("strata_client::auth");
        capture.assert_contains("middleware.name=auth");
        capture.assert_not_contains("demo-token");
    }

    #[test]
    fn static_assertions() {
        static_assertions::assert_impl_all!(Auth<strata::DynamicHandler<Request, Response>>: Send, Sync, Clone);
        static_assertions::assert_impl_all!(AuthLayer: Send, Sync, Clone);
    }
}
