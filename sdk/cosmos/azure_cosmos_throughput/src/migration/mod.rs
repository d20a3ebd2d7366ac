// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Switching offers between manual and autoscale throughput.

mod engine;
mod migrator;

pub use engine::*;
pub use migrator::*;
