// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Builds a handler from a tuple of layers and a root handler.
///
/// Automatically implemented for tuples of layers with a handler at the end,
/// supporting up to 8 layers. Layers apply outer to inner: the first element of the tuple
/// sees every input first and every output last.
pub trait Stack {
    /// The type of handler produced by this builder.
    type Service;

    /// Builds the composed handler with all layers applied.
    fn build(self) -> Self::Service;
}
