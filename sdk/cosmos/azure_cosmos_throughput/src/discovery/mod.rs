// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Discovering subscriptions, resource groups, Cosmos DB accounts, databases and
//! containers through the Azure CLI.

mod azure_cli;
mod cache;
mod executor;
mod hierarchy;

pub use azure_cli::*;
pub use cache::*;
pub use executor::*;
pub use hierarchy::*;
