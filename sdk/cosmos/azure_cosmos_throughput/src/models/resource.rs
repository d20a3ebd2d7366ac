// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::Deserialize;
use std::fmt;

use crate::models::SystemProperties;
use crate::{Error, Result};

/// A database or container that can own a throughput offer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalableResource {
    /// A database with shared throughput.
    Database { database: String },
    /// A container with dedicated throughput.
    Container { database: String, container: String },
}

impl ScalableResource {
    /// Refers to a container, rejecting empty or whitespace names.
    pub fn container(database: impl Into<String>, container: impl Into<String>) -> Result<Self> {
        let (database, container) = (database.into(), container.into());
        Error::require("databaseName", &database)?;
        Error::require("containerName", &container)?;
        Ok(Self::Container {
            database,
            container,
        })
    }

    /// Refers to a database, rejecting an empty or whitespace name.
    pub fn database(database: impl Into<String>) -> Result<Self> {
        let database = database.into();
        Error::require("databaseName", &database)?;
        Ok(Self::Database { database })
    }

    /// Path segments of the resource, e.g. `["dbs", "db", "colls", "items"]`.
    pub fn path_segments(&self) -> Vec<&str> {
        match self {
            Self::Database { database } => vec!["dbs", database.as_str()],
            Self::Container {
                database,
                container,
            } => vec!["dbs", database.as_str(), "colls", container.as_str()],
        }
    }

    /// The resource link used when signing, e.g. `dbs/db/colls/items`.
    pub fn link(&self) -> String {
        self.path_segments().join("/")
    }

    /// The resource type used when signing a read of this resource.
    pub fn resource_type(&self) -> &'static str {
        match self {
            Self::Database { .. } => "dbs",
            Self::Container { .. } => "colls",
        }
    }

    /// The `resource` value of a migration payload, e.g. `dbs/db/colls/items/`.
    pub fn offer_resource(&self) -> String {
        format!("{}/", self.link())
    }

    /// The name the resource was addressed by.
    pub fn name(&self) -> &str {
        match self {
            Self::Database { database } => database,
            Self::Container { container, .. } => container,
        }
    }
}

impl fmt::Display for ScalableResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.link())
    }
}

/// The subset of a database or container definition needed to find its offer.
#[derive(Clone, Debug, Deserialize)]
pub struct ResourceProperties {
    pub id: String,
    #[serde(flatten)]
    pub system_properties: SystemProperties,
}
