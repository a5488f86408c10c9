// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

mod stack;
mod tuples;

#[doc(inline)]
pub use stack::Stack;
/// A trait for decorating a [`Handler`](crate::Handler) with middleware.
///
/// A `Layer` takes an inner handler and wraps it with additional behavior, producing a new
/// handler. The inner handler is moved into the middleware exactly once, when the layer is
/// applied; the middleware never swaps it for another one afterwards.
///
/// # Tower Ecosystem Compatibility
///
/// This trait is re-exported from [`tower_layer`](https://docs.rs/tower-layer), so layers written
/// against it can be reused in both ecosystems as long as the produced type implements the
/// handler trait the caller needs.
///
/// # How It Works
///
/// The `layer` method wraps an inner handler `S` and returns a new handler
/// (`Self::Service`) that adds cross-cutting behavior such as:
///
/// - Authentication header injection
/// - Retries
/// - Metrics collection
/// - Trace propagation
///
/// Applying a layer to a handler that is already a multi-layer chain adds exactly one
/// outer layer and leaves every inner layer untouched.
///
/// ---
pub use tower_layer::Layer;
