// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::Debug;

use crate::{BuildError, DynamicHandler, DynamicHandlerExt, Handler, Layer};

type ApplyLayer<In, Out> = Box<dyn FnOnce(DynamicHandler<In, Out>) -> DynamicHandler<In, Out> + Send>;

/// Assembles a [`Pipeline`] from a terminal handler and an ordered list of layers.
///
/// Layers are registered inner to outer: the first layer passed to [`layer`][Self::layer]
/// wraps the terminal handler directly, and every following layer wraps the result of the
/// previous step. This is the opposite order of a [`Stack`][crate::Stack] tuple, which is
/// written outer to inner.
///
/// # Examples
///
/// ```
/// use strata::{Execute, Handler, Pipeline};
/// # use strata::Layer;
/// # #[derive(Clone)]
/// # struct Double;
/// # impl<S> Layer<S> for Double {
/// #     type Service = Doubled<S>;
/// #     fn layer(&self, inner: S) -> Self::Service { Doubled(inner) }
/// # }
/// # struct Doubled<S>(S);
/// # impl<S: Handler<i32, Out = i32>> Handler<i32> for Doubled<S> {
/// #     type Out = i32;
/// #     fn invoke(&self, input: i32) -> i32 { self.0.invoke(input) * 2 }
/// # }
///
/// let pipeline = Pipeline::builder()
///     .terminal(Execute::new(|v: i32| v + 1))
///     .layer(Double)
///     .build()?;
///
/// assert_eq!(pipeline.invoke(1), 4);
/// # Ok::<(), strata::BuildError>(())
/// ```
pub struct PipelineBuilder<In, Out> {
    terminal: Option<DynamicHandler<In, Out>>,
    layers: Vec<ApplyLayer<In, Out>>,
}

impl<In, Out> PipelineBuilder<In, Out> {
    /// Creates an empty builder with no terminal handler and no layers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            terminal: None,
            layers: Vec::new(),
        }
    }

    /// Sets the innermost handler of the pipeline, replacing any previous one.
    #[must_use]
    pub fn terminal<H>(mut self, handler: H) -> Self
    where
        H: Handler<In, Out = Out> + 'static,
    {
        self.terminal = Some(handler.into_dynamic());
        self
    }

    /// Appends a layer that wraps everything registered before it.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<DynamicHandler<In, Out>> + Send + 'static,
        L::Service: Handler<In, Out = Out> + 'static,
    {
        self.layers.push(Box::new(move |inner| layer.layer(inner).into_dynamic()));
        self
    }

    /// Builds the chain bottom-up, starting from the terminal handler.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingTerminal`] if no terminal handler was set.
    pub fn build(self) -> Result<Pipeline<In, Out>, BuildError> {
        let Some(terminal) = self.terminal else {
            return Err(BuildError::MissingTerminal {
                layers: self.layers.len(),
            });
        };

        let depth = self.layers.len();
        let handler = self.layers.into_iter().fold(terminal, |inner, apply| apply(inner));

        tracing::event!(name: "strata.pipeline.build", tracing::Level::DEBUG, pipeline.depth = depth);

        Ok(Pipeline { handler, depth })
    }
}

impl<In, Out> Default for PipelineBuilder<In, Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<In, Out> Debug for PipelineBuilder<In, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("has_terminal", &self.terminal.is_some())
            .field("layers", &self.layers.len())
            .finish()
    }
}

/// A fully composed chain, from the outermost middleware down to the terminal handler.
///
/// A pipeline is built once and invoked any number of times. It can be extended with
/// [`wrap`][Self::wrap], which puts one more layer around the existing chain. Wrapping
/// never rebuilds, reorders or otherwise touches the layers that are already in place, so
/// the wrapped chain behaves for every input exactly as it did before.
///
/// Cloning a pipeline shares the underlying chain.
pub struct Pipeline<In, Out> {
    handler: DynamicHandler<In, Out>,
    depth: usize,
}

impl<In, Out> Pipeline<In, Out> {
    /// Creates a [`PipelineBuilder`].
    #[must_use]
    pub fn builder() -> PipelineBuilder<In, Out> {
        PipelineBuilder::new()
    }

    /// Adopts an already composed handler, such as the result of a [`Stack`][crate::Stack].
    ///
    /// The adopted handler counts as depth zero regardless of how many layers it contains.
    #[must_use]
    pub fn from_handler<H>(handler: H) -> Self
    where
        H: Handler<In, Out = Out> + 'static,
    {
        Self {
            handler: handler.into_dynamic(),
            depth: 0,
        }
    }

    /// Returns a new pipeline with `layer` as its outermost middleware.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::{Execute, Handler, Layer, Pipeline};
    /// # #[derive(Clone)]
    /// # struct Negate;
    /// # impl<S> Layer<S> for Negate {
    /// #     type Service = Negated<S>;
    /// #     fn layer(&self, inner: S) -> Self::Service { Negated(inner) }
    /// # }
    /// # struct Negated<S>(S);
    /// # impl<S: Handler<i32, Out = i32>> Handler<i32> for Negated<S> {
    /// #     type Out = i32;
    /// #     fn invoke(&self, input: i32) -> i32 { -self.0.invoke(input) }
    /// # }
    ///
    /// let pipeline = Pipeline::builder().terminal(Execute::new(|v: i32| v)).build()?;
    /// assert_eq!(pipeline.invoke(7), 7);
    ///
    /// let pipeline = pipeline.wrap(Negate);
    /// assert_eq!(pipeline.invoke(7), -7);
    /// assert_eq!(pipeline.depth(), 1);
    /// # Ok::<(), strata::BuildError>(())
    /// ```
    #[must_use]
    pub fn wrap<L>(self, layer: L) -> Self
    where
        L: Layer<DynamicHandler<In, Out>>,
        L::Service: Handler<In, Out = Out> + 'static,
    {
        Self {
            handler: layer.layer(self.handler).into_dynamic(),
            depth: self.depth.saturating_add(1),
        }
    }

    /// Returns the number of layers applied through the builder or [`wrap`][Self::wrap].
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the type-erased chain.
    #[must_use]
    pub fn into_handler(self) -> DynamicHandler<In, Out> {
        self.handler
    }
}

impl<In, Out> Handler<In> for Pipeline<In, Out> {
    type Out = Out;

    fn invoke(&self, input: In) -> Self::Out {
        self.handler.invoke(input)
    }
}

impl<In, Out> Clone for Pipeline<In, Out> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            depth: self.depth,
        }
    }
}

impl<In, Out> Debug for Pipeline<In, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").field("depth", &self.depth).finish_non_exhaustive()
    }
}
