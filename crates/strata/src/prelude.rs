// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Common imports for working with handler chains.
//!
//! Re-exports the most commonly used types from [`strata`][crate].

pub use crate::{DynamicHandlerExt, Handler, Layer, Stack};
