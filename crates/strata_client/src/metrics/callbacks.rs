// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::Observation;

crate::utils::define_fn_wrapper!(OnObservation(Fn(&Observation)));
