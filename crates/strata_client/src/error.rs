// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use strata::BuildError;

/// The result for fallible pipeline configuration in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error raised while configuring or assembling a pipeline.
///
/// Errors only ever occur before the first call is made. Failures of the remote call itself
/// are carried by [`Response`][crate::Response] status codes and are never surfaced here.
///
/// # Examples
///
/// ```
/// use strata_client::retry::Retry;
/// use strata_client::{ErrorKind, PipelineContext, Request, Response};
/// # let clock = tick::Clock::new_frozen();
///
/// let context = PipelineContext::<Request, Response>::new(&clock);
/// let error = Retry::layer("retry", &context).max_attempts(0).unwrap_err();
///
/// assert!(matches!(error.kind(), ErrorKind::InvalidMaxAttempts(0)));
/// ```
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] ErrorKind);

/// The reason a pipeline could not be configured.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The retry middleware needs at least one attempt.
    #[error("retry requires at least one attempt, got {0}")]
    InvalidMaxAttempts(u32),

    /// The pipeline builder rejected the chain.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// A declarative pipeline configuration could not be read.
    #[error("invalid pipeline configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) const fn from_kind(kind: ErrorKind) -> Self {
        Self(kind)
    }

    /// Returns the reason for this error.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.0
    }
}

impl From<BuildError> for Error {
    fn from(error: BuildError) -> Self {
        Self::from_kind(ErrorKind::Build(error))
    }
}
