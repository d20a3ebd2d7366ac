// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Applying or reading throughput settings for a list of containers, one at a time.

use std::sync::Arc;
use tracing::{info, warn};

use crate::discovery::ResourceHierarchy;
use crate::http::{self, HttpClient};
use crate::models::{CosmosAccountInfo, ScalableResource, ThroughputSetting, ThroughputSnapshot};
use crate::{CosmosClient, Error, Result, ThroughputOptions};

/// The database whose containers a batch operates on, and where to find it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountScope {
    subscription_id: String,
    resource_group: String,
    account_name: String,
    database_name: String,
}

impl AccountScope {
    /// Creates a scope, rejecting empty or whitespace names.
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        account_name: impl Into<String>,
        database_name: impl Into<String>,
    ) -> Result<Self> {
        let scope = Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            account_name: account_name.into(),
            database_name: database_name.into(),
        };
        Error::require("subscriptionId", &scope.subscription_id)?;
        Error::require("resourceGroupName", &scope.resource_group)?;
        Error::require("cosmosDbAccountName", &scope.account_name)?;
        Error::require("cosmosDbDatabaseName", &scope.database_name)?;
        Ok(scope)
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn resource_group(&self) -> &str {
        &self.resource_group
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

/// The requested mode and maximum for one container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerThroughputUpdate {
    pub container_name: String,
    pub autoscale: bool,
    pub max_throughput: Option<i32>,
}

impl ContainerThroughputUpdate {
    pub fn new(container_name: impl Into<String>, autoscale: bool, max_throughput: Option<i32>) -> Self {
        Self {
            container_name: container_name.into(),
            autoscale,
            max_throughput,
        }
    }
}

/// The settings recorded for a successful update: the requested mode, the
/// requested maximum when autoscale was requested, and the setting actually sent
/// after raising it to the service minimum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedThroughput {
    pub autoscale: bool,
    pub max_throughput: Option<i32>,
    pub sent: ThroughputSetting,
}

/// The result for one input item, tagged with that item.
#[derive(Debug)]
pub enum ContainerOutcome<I, T> {
    Success { item: I, value: T },
    Failure { item: I, error: Error },
}

impl<I, T> ContainerOutcome<I, T> {
    pub fn item(&self) -> &I {
        match self {
            Self::Success { item, .. } | Self::Failure { item, .. } => item,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Returns the `(autoscale, max throughput)` pairs of the successful updates, in input order.
pub fn applied_settings(
    outcomes: &[ContainerOutcome<ContainerThroughputUpdate, AppliedThroughput>],
) -> Vec<(bool, Option<i32>)> {
    outcomes
        .iter()
        .filter_map(ContainerOutcome::value)
        .map(|applied| (applied.autoscale, applied.max_throughput))
        .collect()
}

/// Resolves an account through a [`ResourceHierarchy`] and changes or reads the
/// throughput of its containers sequentially, continuing past failed items.
pub struct ThroughputBatch<H> {
    hierarchy: H,
    http: Option<Arc<dyn HttpClient>>,
    options: ThroughputOptions,
}

impl<H: ResourceHierarchy> ThroughputBatch<H> {
    pub fn new(hierarchy: H, options: ThroughputOptions) -> Self {
        Self {
            hierarchy,
            http: None,
            options,
        }
    }

    /// Sends every request through `http` instead of the default `azure_core` transport.
    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn hierarchy(&self) -> &H {
        &self.hierarchy
    }

    /// Applies each update in order.
    ///
    /// Returns an empty list when the account is not found. A failed update is
    /// logged and reported in its outcome; later updates still run.
    pub async fn apply_all(
        &self,
        scope: &AccountScope,
        updates: &[ContainerThroughputUpdate],
    ) -> Result<Vec<ContainerOutcome<ContainerThroughputUpdate, AppliedThroughput>>> {
        if updates.is_empty() {
            return Err(Error::InvalidInput {
                name: "containerUpdates",
            });
        }
        for update in updates {
            Error::require("containerName", &update.container_name)?;
        }

        let Some(client) = self.connect(scope).await? else {
            return Ok(Vec::new());
        };
        let engine = client.throughput_engine();

        let mut outcomes = Vec::with_capacity(updates.len());
        for update in updates {
            info!(
                container = %update.container_name,
                autoscale = update.autoscale,
                max_throughput = ?update.max_throughput,
                "processing container"
            );
            let result = match ScalableResource::container(scope.database_name(), &update.container_name) {
                Ok(resource) => {
                    engine
                        .set_throughput(&resource, update.autoscale, update.max_throughput)
                        .await
                }
                Err(e) => Err(e),
            };
            outcomes.push(match result {
                Ok(applied) => ContainerOutcome::Success {
                    item: update.clone(),
                    value: AppliedThroughput {
                        autoscale: update.autoscale,
                        max_throughput: update.max_throughput.filter(|_| update.autoscale),
                        sent: applied.setting,
                    },
                },
                Err(error) => {
                    warn!(container = %update.container_name, %error, "error while updating autoscale settings");
                    ContainerOutcome::Failure {
                        item: update.clone(),
                        error,
                    }
                }
            });
        }
        Ok(outcomes)
    }

    /// Reads the current settings of each named container, in order.
    ///
    /// Returns an empty list when the account is not found. Nothing is clamped,
    /// migrated or replaced.
    pub async fn get_settings(
        &self,
        scope: &AccountScope,
        container_names: &[String],
    ) -> Result<Vec<ContainerOutcome<String, ThroughputSnapshot>>> {
        if container_names.is_empty() {
            return Err(Error::InvalidInput {
                name: "containerNames",
            });
        }
        for name in container_names {
            Error::require("containerName", name)?;
        }

        let Some(client) = self.connect(scope).await? else {
            return Ok(Vec::new());
        };
        let engine = client.throughput_engine();

        let mut outcomes = Vec::with_capacity(container_names.len());
        for name in container_names {
            info!(container = %name, "processing container");
            let result = match ScalableResource::container(scope.database_name(), name) {
                Ok(resource) => engine.read_throughput(&resource).await,
                Err(e) => Err(e),
            };
            outcomes.push(match result {
                Ok(snapshot) => ContainerOutcome::Success {
                    item: name.clone(),
                    value: snapshot,
                },
                Err(error) => {
                    warn!(container = %name, %error, "error while reading autoscale settings");
                    ContainerOutcome::Failure {
                        item: name.clone(),
                        error,
                    }
                }
            });
        }
        Ok(outcomes)
    }

    /// Lists the containers of the scope's database.
    pub async fn list_containers(&self, scope: &AccountScope) -> Result<Vec<String>> {
        self.hierarchy
            .containers(
                scope.database_name(),
                scope.account_name(),
                scope.resource_group(),
                scope.subscription_id(),
            )
            .await
    }

    async fn find_account(&self, scope: &AccountScope) -> Result<Option<CosmosAccountInfo>> {
        let accounts = self
            .hierarchy
            .cosmos_accounts(scope.resource_group(), scope.subscription_id())
            .await?;
        Ok(accounts
            .into_iter()
            .find(|account| account.name == scope.account_name()))
    }

    async fn connect(&self, scope: &AccountScope) -> Result<Option<CosmosClient>> {
        let Some(account) = self.find_account(scope).await? else {
            info!(account = %scope.account_name(), "account not found");
            return Ok(None);
        };
        let http = match &self.http {
            Some(http) => http.clone(),
            None => http::default_http_client(),
        };
        CosmosClient::with_http_client(
            &account.document_endpoint,
            account.primary_key,
            http,
            self.options.clone(),
        )
        .map(Some)
    }
}
