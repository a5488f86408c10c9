// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Strata
//!
//! Compose synchronous handlers with layered middleware.
//!
//! This crate provides the [`Handler`] trait and a layer system for adding cross-cutting
//! concerns like authentication, retries, metrics and tracing around a unit of work, without
//! touching that unit of work or any middleware that already wraps it.
//!
//! ## Quick Start
//!
//! A [`Handler`] turns an input into an output:
//!
//! ```
//! use strata::Handler;
//!
//! struct Greeter;
//!
//! impl Handler<String> for Greeter {
//!     type Out = String;
//!
//!     fn invoke(&self, name: String) -> Self::Out {
//!         format!("Hello, {name}!")
//!     }
//! }
//! ```
//!
//! Use [`Execute`] to turn any function into a handler:
//!
//! ```
//! use strata::{Execute, Handler};
//!
//! let greeter = Execute::new(|name: String| format!("Hello, {name}!"));
//!
//! assert_eq!(greeter.invoke("World".into()), "Hello, World!");
//! ```
//!
//! ## Key Concepts
//!
//! - **Handler**: A type implementing the [`Handler`] trait. Think of it as `fn(&self, In) -> Out`.
//! - **Middleware**: A handler that owns the next handler of the chain and adds behavior around
//!   it. Middleware sees the input before the inner handler and the output after it.
//! - **Layer**: A type implementing the [`Layer`] trait that constructs middleware around a
//!   handler. Layers are stacked using tuples like `(layer1, layer2, handler)`.
//! - **Pipeline**: A type-erased chain assembled at runtime by [`PipelineBuilder`]. A built
//!   [`Pipeline`] can be [wrapped][Pipeline::wrap] with one more outer layer at any time.
//!
//! ## Layers and Middleware
//!
//! ```
//! use strata::{Execute, Handler, Layer, Stack};
//!
//! struct LogLayer;
//!
//! impl<S> Layer<S> for LogLayer {
//!     type Service = Log<S>;
//!
//!     fn layer(&self, inner: S) -> Self::Service {
//!         Log(inner)
//!     }
//! }
//!
//! struct Log<S>(S);
//!
//! impl<S, In: std::fmt::Display> Handler<In> for Log<S>
//! where
//!     S: Handler<In>,
//! {
//!     type Out = S::Out;
//!
//!     fn invoke(&self, input: In) -> Self::Out {
//!         println!("input: {input}");
//!         self.0.invoke(input)
//!     }
//! }
//!
//! // Layers apply outer to inner.
//! let handler = (LogLayer, Execute::new(|x: i32| x * 2)).build();
//!
//! assert_eq!(handler.invoke(21), 42);
//! ```
//!
//! ## Execution Model
//!
//! Invoking a chain is synchronous: the call travels inward through every middleware to the
//! innermost handler and returns outward along the same stack. All handlers are [`Send`] and
//! [`Sync`] so a built chain can be stored anywhere, but the crate itself never spawns work.

mod handler;
pub use handler::Handler;

mod execute;
pub use execute::Execute;

mod layer;
pub use layer::{Layer, Stack};

mod dynamic;
pub use dynamic::{DynamicHandler, DynamicHandlerExt};

mod error;
pub use error::BuildError;

mod pipeline;
pub use pipeline::{Pipeline, PipelineBuilder};

pub mod prelude;
