// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::discovery::CommandExecutor;
use crate::options::{AzureCliOptions, CommandArgs};
use crate::{Error, Result};

/// Thin wrapper over the `az` command line.
pub struct AzureCli<E> {
    executor: E,
    options: AzureCliOptions,
}

impl<E: CommandExecutor> AzureCli<E> {
    pub fn new(executor: E, options: AzureCliOptions) -> Self {
        Self { executor, options }
    }

    /// Makes sure a CLI session exists, logging in if needed.
    ///
    /// Returns [`Error::Authentication`] when the login is refused.
    pub async fn ensure_logged_in(&self) -> Result<()> {
        if self.is_logged_in().await? {
            return Ok(());
        }

        debug!("no Azure CLI session, logging in");
        let login = CommandArgs::default().render(&self.options.login);
        let output = self.executor.execute(&login).await?;
        if !output.success
            || output.stdout.contains(&self.options.login_failure_marker)
            || output.stderr.contains(&self.options.login_failure_marker)
        {
            warn!("Azure CLI login failed");
            return Err(Error::Authentication(
                "Azure CLI login failed; run 'az login' and retry".into(),
            ));
        }
        Ok(())
    }

    async fn is_logged_in(&self) -> Result<bool> {
        let check = CommandArgs::default().render(&self.options.check_logged_in);
        let output = self.executor.execute(&check).await?;
        let expired = output
            .stdout
            .contains(&self.options.credentials_expired_marker)
            || output
                .stderr
                .contains(&self.options.credentials_expired_marker);
        Ok(!expired && !output.stdout.trim().is_empty())
    }

    pub(crate) async fn subscriptions<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.run_list(&self.options.subscriptions, CommandArgs::default())
            .await
    }

    pub(crate) async fn resource_groups<T: DeserializeOwned>(
        &self,
        subscription: &str,
    ) -> Result<Vec<T>> {
        let args = CommandArgs {
            subscription,
            ..Default::default()
        };
        self.run_list(&self.options.resource_groups, args).await
    }

    pub(crate) async fn cosmos_accounts<T: DeserializeOwned>(
        &self,
        resource_group: &str,
        subscription: &str,
    ) -> Result<Vec<T>> {
        let args = CommandArgs {
            subscription,
            resource_group,
            ..Default::default()
        };
        self.run_list(&self.options.cosmos_accounts, args).await
    }

    pub(crate) async fn cosmos_keys<T: DeserializeOwned>(
        &self,
        account: &str,
        resource_group: &str,
        subscription: &str,
    ) -> Result<Option<T>> {
        let args = CommandArgs {
            subscription,
            resource_group,
            account,
            ..Default::default()
        };
        self.run_object(&self.options.cosmos_keys, args).await
    }

    pub(crate) async fn databases<T: DeserializeOwned>(
        &self,
        account: &str,
        resource_group: &str,
        subscription: &str,
    ) -> Result<Vec<T>> {
        let args = CommandArgs {
            subscription,
            resource_group,
            account,
            ..Default::default()
        };
        self.run_list(&self.options.databases, args).await
    }

    pub(crate) async fn containers<T: DeserializeOwned>(
        &self,
        database: &str,
        account: &str,
        resource_group: &str,
        subscription: &str,
    ) -> Result<Vec<T>> {
        let args = CommandArgs {
            subscription,
            resource_group,
            account,
            database,
        };
        self.run_list(&self.options.containers, args).await
    }

    async fn run(&self, template: &str, args: CommandArgs<'_>) -> Result<String> {
        let command = args.render(template);
        let output = self.executor.execute(&command).await?;
        if !output.success {
            // Callers see empty output, which reads as "nothing found".
            debug!(command = %command, stderr = %output.stderr.trim(), "command reported failure");
        }
        Ok(output.stdout)
    }

    async fn run_list<T: DeserializeOwned>(
        &self,
        template: &str,
        args: CommandArgs<'_>,
    ) -> Result<Vec<T>> {
        let text = self.run(template, args).await?;
        Ok(parse_json::<Vec<T>>(&text)?.unwrap_or_default())
    }

    async fn run_object<T: DeserializeOwned>(
        &self,
        template: &str,
        args: CommandArgs<'_>,
    ) -> Result<Option<T>> {
        let text = self.run(template, args).await?;
        parse_json(&text)
    }
}

/// Parses CLI output, treating empty output and `null` as no value.
fn parse_json<T: DeserializeOwned>(text: &str) -> Result<Option<T>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<T>>(text)
        .map_err(|e| Error::DataConversion(format!("unexpected Azure CLI output: {}", e)))
}
