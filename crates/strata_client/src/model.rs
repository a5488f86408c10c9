// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::collections::HashMap;

use recoverable::{Recovery, RecoveryInfo};

/// Header carrying the bearer credential set by [`Auth`][crate::auth::Auth].
pub const AUTHORIZATION: &str = "Authorization";

/// Header carrying the correlation identifier set by [`Trace`][crate::trace::Trace].
pub const TRACE_ID: &str = "X-Trace-Id";

/// An outgoing call to the remote service.
///
/// Requests are values. Middleware that adds headers does so with [`with_header`][Self::with_header],
/// which consumes one request and yields the derived one; the value a caller handed to the
/// pipeline is never changed behind its back.
///
/// # Examples
///
/// ```
/// use strata_client::{AUTHORIZATION, Request};
///
/// let request = Request::new("/v1/payment/refund", r#"{"orderId":"ORD-1001"}"#);
/// let signed = request.clone().with_header(AUTHORIZATION, "Bearer demo-token");
///
/// assert_eq!(request.header(AUTHORIZATION), None);
/// assert_eq!(signed.header(AUTHORIZATION), Some("Bearer demo-token"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Request {
    path: String,
    body: String,
    headers: HashMap<String, String>,
}

impl Request {
    /// Creates a request without headers.
    #[must_use]
    pub fn new(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            body: body.into(),
            headers: HashMap::new(),
        }
    }

    /// Returns the request with `name` set to `value`, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the request body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns all headers of the request.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the value of the header `name`, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// The outcome of a call.
///
/// Failures are ordinary responses: a status code of 500 or above marks a transient,
/// server-class failure and is the only signal the [`Retry`][crate::retry::Retry] middleware
/// acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    body: Cow<'static, str>,
}

impl Response {
    /// Creates a response with the given status code and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a `200` response.
    #[must_use]
    pub fn ok(body: impl Into<Cow<'static, str>>) -> Self {
        Self::new(200, body)
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` for status codes of 500 and above.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    /// Returns `true` for `2xx` status codes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl Recovery for Response {
    fn recovery(&self) -> RecoveryInfo {
        if self.is_server_error() {
            RecoveryInfo::retry()
        } else {
            RecoveryInfo::never()
        }
    }
}
