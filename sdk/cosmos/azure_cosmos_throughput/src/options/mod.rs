// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

mod azure_cli_options;
mod throughput_options;

pub use azure_cli_options::*;
pub use throughput_options::*;
