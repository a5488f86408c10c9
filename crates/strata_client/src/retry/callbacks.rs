// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::OnRetryArgs;

crate::utils::define_fn_wrapper!(OnRetry<Out>(Fn(&Out, OnRetryArgs)));
