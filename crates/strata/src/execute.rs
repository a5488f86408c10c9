// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{Debug, Formatter};

use crate::Handler;

/// A handler implementation that wraps a function for ad-hoc handler creation.
///
/// `Execute` allows you to quickly create a [`Handler`] from any function or closure
/// that takes an input and returns an output. This is particularly useful for:
///
/// - Converting lambdas into handlers without defining custom types
/// - Standing in for a remote call in tests
/// - Probing what the innermost handler of a chain receives
///
/// # Examples
///
/// ```rust
/// # use strata::{Execute, Handler};
/// fn handle_input(data: String) -> String {
///     format!("Processed: {data}")
/// }
///
/// let handler = Execute::new(handle_input);
/// assert_eq!(handler.invoke("test".to_string()), "Processed: test");
/// ```
#[derive(Clone)]
pub struct Execute<E>(E);

impl<E> Execute<E> {
    /// Creates a new `Execute` handler from a function or closure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use strata::Execute;
    /// let handler = Execute::new(|msg: String| format!("Echo: {msg}"));
    /// ```
    #[must_use]
    pub fn new<In, Out>(e: E) -> Self
    where
        E: Fn(In) -> Out + Send + Sync + 'static,
    {
        Self(e)
    }
}

impl<E, In, Out> Handler<In> for Execute<E>
where
    E: Fn(In) -> Out + Send + Sync,
{
    type Out = Out;

    fn invoke(&self, input: In) -> Self::Out {
        self.0(input)
    }
}

impl<E> Debug for Execute<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Execute").finish_non_exhaustive()
    }
}
