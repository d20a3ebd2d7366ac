// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use crate::discovery::CommandLine;

/// Commands and output markers used to drive the Azure CLI during discovery.
///
/// A command template is split on whitespace into a program and its arguments,
/// and the program is started without a shell. Templates may contain the
/// placeholders `{subscription}`, `{resource_group}`, `{account}` and `{database}`.
#[derive(Clone, Debug)]
pub struct AzureCliOptions {
    pub(crate) check_logged_in: String,
    pub(crate) login: String,
    pub(crate) subscriptions: String,
    pub(crate) resource_groups: String,
    pub(crate) cosmos_accounts: String,
    pub(crate) cosmos_keys: String,
    pub(crate) databases: String,
    pub(crate) containers: String,
    pub(crate) login_failure_marker: String,
    pub(crate) credentials_expired_marker: String,
}

impl Default for AzureCliOptions {
    fn default() -> Self {
        Self {
            check_logged_in: "az account show --output json".into(),
            login: "az login --output json".into(),
            subscriptions: "az account list --output json".into(),
            resource_groups: "az group list --subscription {subscription} --output json".into(),
            cosmos_accounts:
                "az cosmosdb list --resource-group {resource_group} --subscription {subscription} --output json"
                    .into(),
            cosmos_keys:
                "az cosmosdb keys list --name {account} --resource-group {resource_group} --subscription {subscription} --output json"
                    .into(),
            databases:
                "az cosmosdb sql database list --account-name {account} --resource-group {resource_group} --subscription {subscription} --output json"
                    .into(),
            containers:
                "az cosmosdb sql container list --database-name {database} --account-name {account} --resource-group {resource_group} --subscription {subscription} --output json"
                    .into(),
            login_failure_marker: "ERROR".into(),
            credentials_expired_marker: "az login".into(),
        }
    }
}

impl AzureCliOptions {
    /// Creates a new [`AzureCliOptionsBuilder`] starting from the default commands.
    pub fn builder() -> AzureCliOptionsBuilder {
        AzureCliOptionsBuilder::default()
    }
}

/// Builder used to construct an [`AzureCliOptions`].
#[derive(Default)]
pub struct AzureCliOptionsBuilder(AzureCliOptions);

macro_rules! setter {
    ($name:ident, $field:ident) => {
        pub fn $name(mut self, value: impl Into<String>) -> Self {
            self.0.$field = value.into();
            self
        }
    };
}

impl AzureCliOptionsBuilder {
    setter!(with_check_logged_in, check_logged_in);
    setter!(with_login, login);
    setter!(with_subscriptions, subscriptions);
    setter!(with_resource_groups, resource_groups);
    setter!(with_cosmos_accounts, cosmos_accounts);
    setter!(with_cosmos_keys, cosmos_keys);
    setter!(with_databases, databases);
    setter!(with_containers, containers);
    setter!(with_login_failure_marker, login_failure_marker);
    setter!(with_credentials_expired_marker, credentials_expired_marker);

    /// Builds an [`AzureCliOptions`] from the builder.
    pub fn build(&self) -> AzureCliOptions {
        self.0.clone()
    }
}

/// Values substituted into an [`AzureCliOptions`] command template.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CommandArgs<'a> {
    pub subscription: &'a str,
    pub resource_group: &'a str,
    pub account: &'a str,
    pub database: &'a str,
}

impl CommandArgs<'_> {
    /// Splits `template` on whitespace into a program and its arguments, then
    /// fills placeholders. A substituted value always stays inside the single
    /// argument that held its placeholder.
    pub fn render(&self, template: &str) -> CommandLine {
        let mut tokens = template.split_whitespace().map(|token| self.substitute(token));
        let program = tokens.next().unwrap_or_default();
        CommandLine {
            program,
            args: tokens.collect(),
        }
    }

    fn substitute(&self, token: &str) -> String {
        token
            .replace("{subscription}", self.subscription)
            .replace("{resource_group}", self.resource_group)
            .replace("{account}", self.account)
            .replace("{database}", self.database)
    }
}
