// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// A synchronous function `In → Out` that processes inputs.
///
/// This trait is the single capability shared by terminal handlers and middleware. A
/// middleware holds the next handler of the chain and implements `Handler` itself, which is
/// what allows chains to nest to arbitrary depth.
///
/// Implement it directly for custom handlers, or use [`Execute`][crate::Execute]
/// to wrap closures.
///
/// See the [crate documentation][crate] for usage examples and layer composition.
pub trait Handler<In>: Send + Sync {
    /// The output type returned by this handler.
    type Out;

    /// Processes the input and returns the output.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::Handler;
    ///
    /// struct Echo;
    ///
    /// impl Handler<String> for Echo {
    ///     type Out = String;
    ///
    ///     fn invoke(&self, input: String) -> Self::Out {
    ///         input
    ///     }
    /// }
    /// ```
    fn invoke(&self, input: In) -> Self::Out;
}

impl<H, In> Handler<In> for Box<H>
where
    H: Handler<In> + ?Sized,
{
    type Out = H::Out;

    fn invoke(&self, input: In) -> Self::Out {
        (**self).invoke(input)
    }
}

/// Shared ownership of a handler.
///
/// Wrapping a chain in an [`Arc`][std::sync::Arc] is the explicit way to let several
/// pipelines share a common suffix.
impl<H, In> Handler<In> for std::sync::Arc<H>
where
    H: Handler<In> + ?Sized,
{
    type Out = H::Out;

    fn invoke(&self, input: In) -> Self::Out {
        (**self).invoke(input)
    }
}
