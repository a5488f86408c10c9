// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Custom middleware layer.
//!
//! Shows how to define custom middleware, stack it statically and then add one more
//! layer to an already built pipeline.

use strata::prelude::*;
use strata::{Execute, Pipeline};

fn main() -> Result<(), strata::BuildError> {
    // layer-1 -> layer-2 -> core handler
    let stacked = (
        Logging::layer("layer-1"),
        Logging::layer("layer-2"),
        Execute::new(|input: String| {
            println!("handling input: {input}");
            input.len()
        }),
    )
        .build();
    let _len = stacked.invoke("Hello, World!".to_string());

    // the same chain, assembled inner to outer at runtime and extended afterwards
    let pipeline = Pipeline::builder()
        .terminal(Execute::new(|input: String| input.len()))
        .layer(Logging::layer("inner"))
        .build()?;
    let pipeline = pipeline.wrap(Logging::layer("outer"));
    let _len = pipeline.invoke("Hello again!".to_string());

    Ok(())
}

/// Logging middleware that wraps a handler.
#[derive(Debug)]
pub struct Logging<S> {
    inner: S,
    id: &'static str,
}

/// Layer for creating logging middleware.
#[derive(Debug, Clone, Copy)]
pub struct LoggingLayer {
    id: &'static str,
}

impl Logging<()> {
    /// Creates a logging layer with the given identifier.
    #[must_use]
    pub fn layer(id: &'static str) -> LoggingLayer {
        LoggingLayer { id }
    }
}

impl<S, In, Out> Handler<In> for Logging<S>
where
    S: Handler<In, Out = Out>,
{
    type Out = Out;

    fn invoke(&self, input: In) -> Self::Out {
        println!("{}: handling input...", self.id);
        let output = self.inner.invoke(input);
        println!("{}: handling input...done", self.id);

        output
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging { inner, id: self.id }
    }
}
