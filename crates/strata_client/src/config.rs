// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Declarative pipeline configuration.
//!
//! A [`PipelineConfig`] describes the standard client pipeline
//! `Trace? → Metrics → Retry → Auth → terminal` as data, so that it can be loaded from a
//! configuration file instead of being assembled in code.
//!
//! ```rust
//! use strata::Handler;
//! use strata_client::config::PipelineConfig;
//! use strata_client::{FlakyBackend, PipelineContext, Request, Response};
//! # let clock = tick::Clock::new_frozen();
//!
//! let config = PipelineConfig::from_json(r#"{ "name": "payments", "max_attempts": 2 }"#)?;
//! let context = PipelineContext::<Request, Response>::new(&clock);
//! let pipeline = config.build(&context, FlakyBackend::new())?;
//!
//! assert_eq!(pipeline.invoke(Request::new("/v1/payment/refund", "")).status(), 200);
//! # Ok::<(), strata_client::Error>(())
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use strata::{Handler, Pipeline};

use crate::auth::Auth;
use crate::context::DEFAULT_PIPELINE_NAME;
use crate::metrics::Metrics;
use crate::retry::{DEFAULT_MAX_ATTEMPTS, Retry};
use crate::trace::Trace;
use crate::{Error, ErrorKind, PipelineContext, Request, Response};

/// Configuration of the standard client pipeline.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[non_exhaustive]
pub struct PipelineConfig {
    /// Pipeline name used in telemetry. **Default**: `default`
    pub name: Cow<'static, str>,

    /// Maximum number of attempts of the retry middleware. Must be at least 1. **Default**: 3
    pub max_attempts: u32,

    /// Bearer token for the auth middleware. **Default**: `demo-token`
    pub auth_token: Option<String>,

    /// Fixed trace identifier. When tracing is enabled and no identifier is set, one is
    /// generated per call.
    pub trace_id: Option<String>,

    /// Adds the trace middleware as the outermost layer. **Default**: `false`
    pub trace: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: Cow::Borrowed(DEFAULT_PIPELINE_NAME),
            max_attempts: DEFAULT_MAX_ATTEMPTS.get(),
            auth_token: None,
            trace_id: None,
            trace: false,
        }
    }
}

impl PipelineConfig {
    /// Reads a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Config`] if `json` is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::from_kind(ErrorKind::Config(e.to_string())))
    }

    /// Assembles the pipeline around `terminal`.
    ///
    /// The pipeline name of the configuration overrides the name of `context`; everything else
    /// (clock, logs and metrics) is taken from `context`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidMaxAttempts`] if `max_attempts` is zero. Nothing is built in
    /// that case.
    pub fn build<H>(&self, context: &PipelineContext<Request, Response>, terminal: H) -> Result<Pipeline<Request, Response>, Error>
    where
        H: Handler<Request, Out = Response> + 'static,
    {
        let context = context.clone().name(self.name.clone());

        let retry = Retry::layer("retry", &context).max_attempts(self.max_attempts)?;

        let mut auth = Auth::layer(&context);
        if let Some(token) = &self.auth_token {
            auth = auth.token(token.clone());
        }

        let mut builder = Pipeline::builder()
            .terminal(terminal)
            .layer(auth)
            .layer(retry)
            .layer(Metrics::layer("metrics", &context));

        if self.trace {
            let mut trace = Trace::layer(&context);
            if let Some(id) = &self.trace_id {
                trace = trace.trace_id(id.clone());
            }
            builder = builder.layer(trace);
        }

        Ok(builder.build()?)
    }
}
