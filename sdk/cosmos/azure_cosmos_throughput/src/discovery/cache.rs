// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

use crate::discovery::ResourceHierarchy;
use crate::models::{CosmosAccountInfo, ResourceGroupInfo, SubscriptionInfo};
use crate::Result;

type Path = Vec<String>;

#[derive(Debug)]
struct Level<K, V> {
    entries: RwLock<HashMap<K, Vec<V>>>,
}

impl<K: Eq + Hash, V: Clone> Level<K, V> {
    fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn get(&self, key: &K) -> Option<Vec<V>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn insert(&self, key: K, values: Vec<V>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, values);
    }

    fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Memoizes every level of a [`ResourceHierarchy`] in memory.
///
/// Entries live until [`invalidate`](Self::invalidate) is called. Errors are not cached.
#[derive(Debug)]
pub struct ResourceHierarchyCache<H> {
    inner: H,
    subscriptions: Level<(), SubscriptionInfo>,
    resource_groups: Level<Path, ResourceGroupInfo>,
    accounts: Level<Path, CosmosAccountInfo>,
    databases: Level<Path, String>,
    containers: Level<Path, String>,
}

impl<H: ResourceHierarchy> ResourceHierarchyCache<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            subscriptions: Level::new(),
            resource_groups: Level::new(),
            accounts: Level::new(),
            databases: Level::new(),
            containers: Level::new(),
        }
    }

    /// Drops every cached record.
    pub fn invalidate(&self) {
        self.subscriptions.clear();
        self.resource_groups.clear();
        self.accounts.clear();
        self.databases.clear();
        self.containers.clear();
    }
}

fn path(parts: &[&str]) -> Path {
    parts.iter().map(|p| p.to_string()).collect()
}

#[async_trait]
impl<H: ResourceHierarchy> ResourceHierarchy for ResourceHierarchyCache<H> {
    async fn subscriptions(&self) -> Result<Vec<SubscriptionInfo>> {
        if let Some(hit) = self.subscriptions.get(&()) {
            return Ok(hit);
        }
        let values = self.inner.subscriptions().await?;
        self.subscriptions.insert((), values.clone());
        Ok(values)
    }

    async fn resource_groups(&self, subscription: &str) -> Result<Vec<ResourceGroupInfo>> {
        let key = path(&[subscription]);
        if let Some(hit) = self.resource_groups.get(&key) {
            return Ok(hit);
        }
        let values = self.inner.resource_groups(subscription).await?;
        self.resource_groups.insert(key, values.clone());
        Ok(values)
    }

    async fn cosmos_accounts(
        &self,
        resource_group: &str,
        subscription: &str,
    ) -> Result<Vec<CosmosAccountInfo>> {
        let key = path(&[subscription, resource_group]);
        if let Some(hit) = self.accounts.get(&key) {
            return Ok(hit);
        }
        let values = self
            .inner
            .cosmos_accounts(resource_group, subscription)
            .await?;
        self.accounts.insert(key, values.clone());
        Ok(values)
    }

    async fn databases(
        &self,
        account: &str,
        resource_group: &str,
        subscription: &str,
    ) -> Result<Vec<String>> {
        let key = path(&[subscription, resource_group, account]);
        if let Some(hit) = self.databases.get(&key) {
            return Ok(hit);
        }
        let values = self
            .inner
            .databases(account, resource_group, subscription)
            .await?;
        self.databases.insert(key, values.clone());
        Ok(values)
    }

    async fn containers(
        &self,
        database: &str,
        account: &str,
        resource_group: &str,
        subscription: &str,
    ) -> Result<Vec<String>> {
        let key = path(&[subscription, resource_group, account, database]);
        if let Some(hit) = self.containers.get(&key) {
            return Ok(hit);
        }
        let values = self
            .inner
            .containers(database, account, resource_group, subscription)
            .await?;
        self.containers.insert(key, values.clone());
        Ok(values)
    }
}
