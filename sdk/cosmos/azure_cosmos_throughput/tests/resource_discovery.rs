// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use std::error::Error;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use azure_cosmos_throughput::{
    discovery::{
        AzureResourceInfoStore, CommandExecutor, CommandLine, CommandOutput, ResourceHierarchy,
        ResourceHierarchyCache,
    },
    AzureCliOptions,
};

/// Answers commands by prefix and records every command line it was asked to run.
#[derive(Clone, Default)]
struct FakeAzureCli {
    responses: Arc<Mutex<Vec<(String, CommandOutput)>>>,
    commands: Arc<Mutex<Vec<String>>>,
    lines: Arc<Mutex<Vec<CommandLine>>>,
}

impl FakeAzureCli {
    fn logged_in() -> Self {
        Self::default().on("az account show", CommandOutput::ok(r#"{"id":"sub"}"#))
    }

    fn on(self, prefix: &str, output: CommandOutput) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push((prefix.to_string(), output));
        self
    }

    fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    fn last_line(&self) -> Option<CommandLine> {
        self.lines.lock().unwrap().last().cloned()
    }

    fn count(&self, prefix: &str) -> usize {
        self.commands()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl CommandExecutor for FakeAzureCli {
    async fn execute(
        &self,
        command: &CommandLine,
    ) -> azure_cosmos_throughput::Result<CommandOutput> {
        self.lines.lock().unwrap().push(command.clone());
        let command = command.to_string();
        self.commands.lock().unwrap().push(command.clone());
        // Longest matching prefix wins.
        Ok(self
            .responses
            .lock()
            .unwrap()
            .iter()
            .filter(|(prefix, _)| command.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| CommandOutput::failed("ERROR: unknown command")))
    }
}

const ACCOUNTS: &str = r#"[
    {
        "id": "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.DocumentDB/databaseAccounts/alpha",
        "name": "alpha",
        "provisioningState": "Succeeded",
        "resourceGroup": "rg",
        "documentEndpoint": "https://alpha.documents.azure.com:443/",
        "kind": "GlobalDocumentDB"
    },
    {
        "id": "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.DocumentDB/databaseAccounts/locked",
        "name": "locked",
        "provisioningState": "Succeeded",
        "resourceGroup": "rg",
        "documentEndpoint": "https://locked.documents.azure.com:443/"
    }
]"#;

#[tokio::test]
pub async fn accounts_without_readable_keys_are_skipped() -> Result<(), Box<dyn Error>> {
    let cli = FakeAzureCli::logged_in()
        .on("az cosmosdb list", CommandOutput::ok(ACCOUNTS))
        .on(
            "az cosmosdb keys list --name alpha",
            CommandOutput::ok(r#"{"primaryMasterKey":"a2V5","secondaryMasterKey":"b3RoZXI="}"#),
        )
        .on(
            "az cosmosdb keys list --name locked",
            CommandOutput::failed("ERROR: AuthorizationFailed"),
        );
    let store = AzureResourceInfoStore::new(cli.clone(), AzureCliOptions::default());

    let accounts = store.cosmos_accounts("rg", "sub").await?;

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "alpha");
    assert_eq!(
        accounts[0].document_endpoint,
        "https://alpha.documents.azure.com:443/"
    );
    assert_eq!(accounts[0].primary_key.secret(), "a2V5");
    assert!(cli.commands().contains(
        &"az cosmosdb list --resource-group rg --subscription sub --output json".to_string()
    ));
    Ok(())
}

#[tokio::test]
pub async fn databases_and_containers_are_listed_by_name() -> Result<(), Box<dyn Error>> {
    let cli = FakeAzureCli::logged_in()
        .on(
            "az cosmosdb sql database list",
            CommandOutput::ok(r#"[{"name":"db","id":"x"},{"name":"archive","id":"y"}]"#),
        )
        .on(
            "az cosmosdb sql container list",
            CommandOutput::ok(r#"[{"name":"orders"},{"name":"customers"}]"#),
        );
    let store = AzureResourceInfoStore::new(cli.clone(), AzureCliOptions::default());

    assert_eq!(
        store.databases("alpha", "rg", "sub").await?,
        vec!["db", "archive"]
    );
    assert_eq!(
        store.containers("db", "alpha", "rg", "sub").await?,
        vec!["orders", "customers"]
    );
    assert!(cli.commands().contains(
        &"az cosmosdb sql container list --database-name db --account-name alpha --resource-group rg --subscription sub --output json"
            .to_string()
    ));
    Ok(())
}

#[tokio::test]
pub async fn failed_listing_reads_as_nothing_found() -> Result<(), Box<dyn Error>> {
    let cli = FakeAzureCli::logged_in().on(
        "az cosmosdb list",
        CommandOutput::failed("ERROR: ResourceGroupNotFound"),
    );
    let store = AzureResourceInfoStore::new(cli, AzureCliOptions::default());

    assert!(store.cosmos_accounts("missing", "sub").await?.is_empty());
    Ok(())
}

#[tokio::test]
pub async fn refused_login_stops_discovery() -> Result<(), Box<dyn Error>> {
    let cli = FakeAzureCli::default()
        .on("az account show", CommandOutput::failed("Please run 'az login'"))
        .on("az login", CommandOutput::failed("ERROR: login cancelled"));
    let store = AzureResourceInfoStore::new(cli.clone(), AzureCliOptions::default());

    let err = store.subscriptions().await.unwrap_err();
    assert!(matches!(
        err,
        azure_cosmos_throughput::Error::Authentication(_)
    ));
    assert_eq!(cli.count("az account list"), 0);
    Ok(())
}

#[tokio::test]
pub async fn blank_names_are_rejected_before_running_anything() -> Result<(), Box<dyn Error>> {
    let cli = FakeAzureCli::logged_in();
    let store = AzureResourceInfoStore::new(cli.clone(), AzureCliOptions::default());

    let err = store.containers("db", "", "rg", "sub").await.unwrap_err();
    assert!(matches!(
        err,
        azure_cosmos_throughput::Error::InvalidInput {
            name: "cosmosDbAccountName"
        }
    ));
    assert!(cli.commands().is_empty());
    Ok(())
}

#[tokio::test]
pub async fn names_reach_the_cli_as_single_arguments() -> Result<(), Box<dyn Error>> {
    let cli = FakeAzureCli::logged_in().on(
        "az cosmosdb sql container list",
        CommandOutput::ok(r#"[{"name":"orders"}]"#),
    );
    let store = AzureResourceInfoStore::new(cli.clone(), AzureCliOptions::default());

    let database = "$(echo INJECTED)`id` db\\";
    store.containers(database, "alpha", "rg", "sub").await?;

    let line = cli.last_line().unwrap();
    assert_eq!(line.program, "az");
    let at = line
        .args
        .iter()
        .position(|a| a == "--database-name")
        .unwrap();
    assert_eq!(line.args[at + 1], database);
    assert_eq!(line.args[at + 2], "--account-name");
    Ok(())
}

#[tokio::test]
pub async fn custom_commands_are_used() -> Result<(), Box<dyn Error>> {
    let cli = FakeAzureCli::default()
        .on("whoami", CommandOutput::ok("someone"))
        .on("list-subs", CommandOutput::ok(r#"[{"id":"s1","name":"One"}]"#));
    let options = AzureCliOptions::builder()
        .with_check_logged_in("whoami")
        .with_subscriptions("list-subs")
        .build();
    let store = AzureResourceInfoStore::new(cli.clone(), options);

    let subscriptions = store.subscriptions().await?;
    assert_eq!(subscriptions[0].id, "s1");
    assert_eq!(cli.commands(), vec!["whoami", "list-subs"]);
    Ok(())
}

#[tokio::test]
pub async fn cache_answers_repeat_lookups_until_invalidated() -> Result<(), Box<dyn Error>> {
    let cli = FakeAzureCli::logged_in().on(
        "az cosmosdb sql container list",
        CommandOutput::ok(r#"[{"name":"orders"}]"#),
    );
    let cache = ResourceHierarchyCache::new(AzureResourceInfoStore::new(
        cli.clone(),
        AzureCliOptions::default(),
    ));

    cache.containers("db", "alpha", "rg", "sub").await?;
    cache.containers("db", "alpha", "rg", "sub").await?;
    assert_eq!(cli.count("az cosmosdb sql container list"), 1);

    // A different path is a different entry.
    cache.containers("other", "alpha", "rg", "sub").await?;
    assert_eq!(cli.count("az cosmosdb sql container list"), 2);

    cache.invalidate();
    cache.containers("db", "alpha", "rg", "sub").await?;
    assert_eq!(cli.count("az cosmosdb sql container list"), 3);
    Ok(())
}
