// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

mod define_fn_wrapper;
pub(crate) use define_fn_wrapper::define_fn_wrapper;

#[cfg(any(feature = "logs", feature = "metrics", test))]
mod telemetry_helper;
#[cfg(any(feature = "logs", feature = "metrics", test))]
pub(crate) use telemetry_helper::TelemetryHelper;
