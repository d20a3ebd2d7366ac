// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Clients used to interact with a Cosmos DB account's throughput offers.

mod cosmos_client;

pub use cosmos_client::*;
