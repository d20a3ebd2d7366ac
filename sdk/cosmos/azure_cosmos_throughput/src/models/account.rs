// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::Deserialize;

use crate::auth::Secret;

/// An Azure subscription visible to the logged-in user.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SubscriptionInfo {
    pub id: String,
    pub name: String,
}

/// A resource group within a subscription.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ResourceGroupInfo {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub properties: ResourceGroupProperties,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupProperties {
    #[serde(default)]
    pub provisioning_state: String,
}

/// A Cosmos DB account as listed by `az cosmosdb list`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosmosAccountRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub provisioning_state: String,
    pub resource_group: String,
    pub document_endpoint: String,
}

/// The account keys returned by `az cosmosdb keys list`.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CosmosAccountKeys {
    pub primary_master_key: String,
}

/// A Cosmos DB account together with the key needed to sign requests against it.
#[derive(Clone, Debug)]
pub struct CosmosAccountInfo {
    pub id: String,
    pub name: String,
    pub provisioning_state: String,
    pub resource_group: String,
    pub document_endpoint: String,
    pub primary_key: Secret,
}

impl CosmosAccountInfo {
    pub fn new(record: CosmosAccountRecord, primary_key: impl Into<Secret>) -> Self {
        Self {
            id: record.id,
            name: record.name,
            provisioning_state: record.provisioning_state,
            resource_group: record.resource_group,
            document_endpoint: record.document_endpoint,
            primary_key: primary_key.into(),
        }
    }
}

/// Any named child resource: a SQL database or container.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct NamedResource {
    pub name: String,
}
