// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! `cosmos-throughput`: read or switch the autoscale setting of Cosmos DB containers
//! in an account found through the Azure CLI.

mod args;
mod report;

use std::error::Error;
use std::process::ExitCode;

use azure_cosmos_throughput::{
    discovery::{AzureResourceInfoStore, ProcessExecutor, ResourceHierarchyCache},
    AccountScope, AzureCliOptions, ThroughputBatch,
};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands};

type Batch = ThroughputBatch<ResourceHierarchyCache<AzureResourceInfoStore<ProcessExecutor>>>;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns `false` when nothing was found or applied.
async fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let scope = cli.scope.to_scope()?;
    debug!(
        account = scope.account_name(),
        database = scope.database_name(),
        "resolved scope"
    );
    let hierarchy = ResourceHierarchyCache::new(AzureResourceInfoStore::from_installed_cli(
        AzureCliOptions::default(),
    ));
    let batch = ThroughputBatch::new(hierarchy, cli.throughput_options());

    match cli.command {
        Commands::Get { containers } => get(&batch, &scope, containers).await,
        Commands::Set {
            containers,
            autoscale,
            max_throughput,
        } => {
            let updates = args::zip_updates(&containers, &autoscale, &max_throughput)?;
            let outcomes = batch.apply_all(&scope, &updates).await?;
            if outcomes.is_empty() {
                eprintln!("account '{}' not found", scope.account_name());
                return Ok(false);
            }

            let mut applied = false;
            for outcome in &outcomes {
                let name = &outcome.item().container_name;
                match (outcome.value(), outcome.error()) {
                    (Some(value), _) => {
                        applied = true;
                        println!("{}", report::applied_line(name, value));
                    }
                    (None, Some(error)) => eprintln!("{}", report::failure_line(name, error)),
                    (None, None) => {}
                }
            }
            Ok(applied)
        }
    }
}

async fn get(
    batch: &Batch,
    scope: &AccountScope,
    containers: Vec<String>,
) -> Result<bool, Box<dyn Error>> {
    let containers = if containers.is_empty() {
        batch.list_containers(scope).await?
    } else {
        containers
    };
    if containers.is_empty() {
        eprintln!(
            "no containers found in database '{}'",
            scope.database_name()
        );
        return Ok(false);
    }

    let outcomes = batch.get_settings(scope, &containers).await?;
    if outcomes.is_empty() {
        eprintln!("account '{}' not found", scope.account_name());
        return Ok(false);
    }

    let mut found = false;
    for outcome in &outcomes {
        match (outcome.value(), outcome.error()) {
            (Some(snapshot), _) => {
                found = true;
                println!(
                    "{}",
                    report::setting_line(
                        outcome.item(),
                        snapshot.autoscale_enabled(),
                        snapshot.max_throughput()
                    )
                );
            }
            (None, Some(error)) => eprintln!("{}", report::failure_line(outcome.item(), error)),
            (None, None) => {}
        }
    }
    Ok(found)
}
