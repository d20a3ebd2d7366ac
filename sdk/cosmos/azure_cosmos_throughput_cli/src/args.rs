// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use std::time::Duration;

use azure_cosmos_throughput::{AccountScope, ContainerThroughputUpdate, ThroughputOptions};
use clap::{Args, Parser, Subcommand};

/// Read or change the throughput mode of Azure Cosmos DB containers.
#[derive(Debug, Parser)]
#[command(name = "cosmos-throughput", version)]
pub struct Cli {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Per-request timeout in seconds. No timeout when omitted.
    #[arg(long, global = true, env = "AZURE_COSMOS_REQUEST_TIMEOUT")]
    pub request_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show whether autoscale is on for each container, and its maximum.
    Get {
        /// Containers to read; every container in the database when omitted.
        #[arg(long = "container", value_delimiter = ',')]
        containers: Vec<String>,
    },
    /// Turn autoscale on or off for each container and set its throughput.
    Set {
        /// Containers to update, in order.
        #[arg(long = "container", value_delimiter = ',', required = true)]
        containers: Vec<String>,

        /// Whether autoscale should be on, one value per container.
        #[arg(long, value_delimiter = ',', required = true)]
        autoscale: Vec<bool>,

        /// Maximum (autoscale) or provisioned (manual) RU/s per container; `nil` for the minimum.
        #[arg(
            long = "max-throughput",
            value_delimiter = ',',
            required = true,
            value_parser = parse_max_throughput
        )]
        max_throughput: Vec<MaxThroughput>,
    },
}

/// Where the containers live.
#[derive(Debug, Clone, Args)]
pub struct ScopeArgs {
    /// The subscription holding the account.
    #[arg(long, global = true, env = "AZURE_SUBSCRIPTION_ID")]
    pub subscription_id: Option<String>,

    /// The resource group holding the account.
    #[arg(long, global = true, env = "AZURE_RESOURCE_GROUP")]
    pub resource_group: Option<String>,

    /// The Cosmos DB account name.
    #[arg(long, global = true, env = "AZURE_COSMOS_ACCOUNT")]
    pub account: Option<String>,

    /// The SQL database holding the containers.
    #[arg(long, global = true, env = "AZURE_COSMOS_DATABASE")]
    pub database: Option<String>,
}

impl ScopeArgs {
    pub fn to_scope(&self) -> azure_cosmos_throughput::Result<AccountScope> {
        AccountScope::new(
            self.subscription_id.clone().unwrap_or_default(),
            self.resource_group.clone().unwrap_or_default(),
            self.account.clone().unwrap_or_default(),
            self.database.clone().unwrap_or_default(),
        )
    }
}

/// A `--max-throughput` entry; `None` when given as `nil` or `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxThroughput(pub Option<i32>);

fn parse_max_throughput(value: &str) -> Result<MaxThroughput, String> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("nil") || value.eq_ignore_ascii_case("none") {
        return Ok(MaxThroughput(None));
    }
    value
        .parse::<i32>()
        .map(|n| MaxThroughput(Some(n)))
        .map_err(|e| format!("'{}' is not a throughput: {}", value, e))
}

/// Zips the three `set` lists into updates, rejecting lists of different lengths.
pub fn zip_updates(
    containers: &[String],
    autoscale: &[bool],
    max_throughput: &[MaxThroughput],
) -> Result<Vec<ContainerThroughputUpdate>, String> {
    if containers.len() != autoscale.len() || containers.len() != max_throughput.len() {
        return Err(format!(
            "--container, --autoscale and --max-throughput need the same number of values (got {}, {} and {})",
            containers.len(),
            autoscale.len(),
            max_throughput.len()
        ));
    }
    Ok(containers
        .iter()
        .zip(autoscale)
        .zip(max_throughput)
        .map(|((name, autoscale), max)| ContainerThroughputUpdate::new(name, *autoscale, max.0))
        .collect())
}

impl Cli {
    pub fn throughput_options(&self) -> ThroughputOptions {
        let mut builder = ThroughputOptions::builder();
        if let Some(secs) = self.request_timeout {
            builder = builder.with_request_timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}
