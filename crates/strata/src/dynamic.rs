// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::Debug;
use std::sync::Arc;

use crate::Handler;

/// Extension trait for converting handlers to [`DynamicHandler`].
///
/// Provides type erasure for handlers, useful when the concrete type of a deeply nested
/// chain becomes unwieldy or when handlers of different types are stored together.
pub trait DynamicHandlerExt<In, Out>: Sized {
    /// Converts this handler into a type-erased [`DynamicHandler`].
    fn into_dynamic(self) -> DynamicHandler<In, Out>;
}

impl<In, Out, T> DynamicHandlerExt<In, Out> for T
where
    T: Handler<In, Out = Out> + 'static,
{
    fn into_dynamic(self) -> DynamicHandler<In, Out> {
        DynamicHandler::new(self)
    }
}

/// Type-erased wrapper for [`Handler`] that hides the concrete type.
///
/// Cloning a `DynamicHandler` is cheap and shares the same underlying chain; this is the
/// reference-counted shared ownership to reach for when several pipelines must reuse one
/// suffix.
///
/// # Examples
///
/// ```
/// use strata::{DynamicHandler, DynamicHandlerExt, Execute, Handler};
///
/// let handler: DynamicHandler<i32, i32> = Execute::new(|v: i32| v * 2).into_dynamic();
///
/// assert_eq!(handler.invoke(21), 42);
/// ```
pub struct DynamicHandler<In, Out>(Arc<dyn Handler<In, Out = Out>>);

impl<In, Out> DynamicHandler<In, Out> {
    pub(crate) fn new<T>(handler: T) -> Self
    where
        T: Handler<In, Out = Out> + 'static,
    {
        Self(Arc::new(handler))
    }
}

impl<In, Out> Handler<In> for DynamicHandler<In, Out> {
    type Out = Out;

    fn invoke(&self, input: In) -> Self::Out {
        self.0.invoke(input)
    }
}

impl<In, Out> Debug for DynamicHandler<In, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicHandler").finish()
    }
}

impl<In, Out> Clone for DynamicHandler<In, Out> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}
