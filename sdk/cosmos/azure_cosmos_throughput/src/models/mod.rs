// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Model types sent to and received from the Cosmos DB REST API and the Azure CLI.

mod account;
mod resource;
mod snapshot;
mod system_properties;
mod throughput_properties;

pub use account::*;
pub use resource::*;
pub use snapshot::*;
pub use system_properties::*;
pub use throughput_properties::*;
