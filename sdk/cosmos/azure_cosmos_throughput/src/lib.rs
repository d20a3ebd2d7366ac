// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(docsrs, feature(doc_cfg_hide))]

pub mod auth;
pub mod batch;
pub mod clients;
pub mod constants;
pub mod discovery;
mod error;
pub mod http;
pub mod migration;
pub mod models;
mod options;
pub(crate) mod pipeline;

#[doc(inline)]
pub use clients::CosmosClient;

pub use batch::{
    AccountScope, AppliedThroughput, ContainerOutcome, ContainerThroughputUpdate, ThroughputBatch,
};
pub use error::*;
pub use migration::{ScalingModeMigrator, ThroughputMigrationEngine};
pub use options::*;
