// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use async_trait::async_trait;
use tracing::warn;

use crate::discovery::{AzureCli, CommandExecutor, ProcessExecutor};
use crate::models::{
    CosmosAccountInfo, CosmosAccountKeys, CosmosAccountRecord, NamedResource, ResourceGroupInfo,
    SubscriptionInfo,
};
use crate::{AzureCliOptions, Error, Result};

/// A source of subscription, resource group, account, database and container records.
///
/// Arguments are ordered from the most specific name to the subscription.
#[async_trait]
pub trait ResourceHierarchy: Send + Sync {
    async fn subscriptions(&self) -> Result<Vec<SubscriptionInfo>>;

    async fn resource_groups(&self, subscription: &str) -> Result<Vec<ResourceGroupInfo>>;

    async fn cosmos_accounts(
        &self,
        resource_group: &str,
        subscription: &str,
    ) -> Result<Vec<CosmosAccountInfo>>;

    async fn databases(
        &self,
        account: &str,
        resource_group: &str,
        subscription: &str,
    ) -> Result<Vec<String>>;

    async fn containers(
        &self,
        database: &str,
        account: &str,
        resource_group: &str,
        subscription: &str,
    ) -> Result<Vec<String>>;
}

/// Reads the resource hierarchy through the Azure CLI, logging in first when needed.
pub struct AzureResourceInfoStore<E = ProcessExecutor> {
    cli: AzureCli<E>,
}

impl AzureResourceInfoStore<ProcessExecutor> {
    /// Creates a store that runs the installed `az` command.
    pub fn from_installed_cli(options: AzureCliOptions) -> Self {
        Self::new(ProcessExecutor, options)
    }
}

impl<E: CommandExecutor> AzureResourceInfoStore<E> {
    pub fn new(executor: E, options: AzureCliOptions) -> Self {
        Self {
            cli: AzureCli::new(executor, options),
        }
    }
}

#[async_trait]
impl<E: CommandExecutor> ResourceHierarchy for AzureResourceInfoStore<E> {
    async fn subscriptions(&self) -> Result<Vec<SubscriptionInfo>> {
        self.cli.ensure_logged_in().await?;
        self.cli.subscriptions().await
    }

    async fn resource_groups(&self, subscription: &str) -> Result<Vec<ResourceGroupInfo>> {
        Error::require("subscriptionId", subscription)?;
        self.cli.ensure_logged_in().await?;
        self.cli.resource_groups(subscription).await
    }

    async fn cosmos_accounts(
        &self,
        resource_group: &str,
        subscription: &str,
    ) -> Result<Vec<CosmosAccountInfo>> {
        Error::require("resourceGroupName", resource_group)?;
        Error::require("subscriptionId", subscription)?;
        self.cli.ensure_logged_in().await?;

        let records: Vec<CosmosAccountRecord> =
            self.cli.cosmos_accounts(resource_group, subscription).await?;
        let mut accounts = Vec::with_capacity(records.len());
        for record in records {
            let keys: Option<CosmosAccountKeys> = self
                .cli
                .cosmos_keys(&record.name, resource_group, subscription)
                .await?;
            let Some(keys) = keys else {
                warn!(account = %record.name, "skipping account whose keys could not be read");
                continue;
            };
            accounts.push(CosmosAccountInfo::new(record, keys.primary_master_key));
        }
        Ok(accounts)
    }

    async fn databases(
        &self,
        account: &str,
        resource_group: &str,
        subscription: &str,
    ) -> Result<Vec<String>> {
        Error::require("cosmosDbAccountName", account)?;
        Error::require("resourceGroupName", resource_group)?;
        Error::require("subscriptionId", subscription)?;
        self.cli.ensure_logged_in().await?;

        let databases: Vec<NamedResource> = self
            .cli
            .databases(account, resource_group, subscription)
            .await?;
        Ok(databases.into_iter().map(|d| d.name).collect())
    }

    async fn containers(
        &self,
        database: &str,
        account: &str,
        resource_group: &str,
        subscription: &str,
    ) -> Result<Vec<String>> {
        Error::require("cosmosDbDatabaseName", database)?;
        Error::require("cosmosDbAccountName", account)?;
        Error::require("resourceGroupName", resource_group)?;
        Error::require("subscriptionId", subscription)?;
        self.cli.ensure_logged_in().await?;

        let containers: Vec<NamedResource> = self
            .cli
            .containers(database, account, resource_group, subscription)
            .await?;
        Ok(containers.into_iter().map(|c| c.name).collect())
    }
}
