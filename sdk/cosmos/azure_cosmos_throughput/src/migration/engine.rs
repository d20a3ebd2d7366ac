// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use tracing::info;

use crate::clients::ThroughputClientMethods;
use crate::migration::{MigrationDirection, ScalingModeMigrator};
use crate::models::{ScalableResource, ThroughputSetting, ThroughputSnapshot};
use crate::Result;

/// Reads a resource's current offer, migrates its representation when the
/// requested mode differs, then applies the requested throughput.
///
/// Nothing is retried; the first failure is returned as is.
#[derive(Clone, Debug)]
pub struct ThroughputMigrationEngine<C> {
    client: C,
    migrator: ScalingModeMigrator,
}

impl<C: ThroughputClientMethods> ThroughputMigrationEngine<C> {
    pub fn new(client: C, migrator: ScalingModeMigrator) -> Self {
        Self { client, migrator }
    }

    /// Reads whether autoscale is enabled and, if so, its maximum throughput.
    pub async fn read_throughput(&self, resource: &ScalableResource) -> Result<ThroughputSnapshot> {
        Ok(self.client.read_throughput(resource).await?.snapshot())
    }

    /// Switches `resource` to the requested mode and throughput.
    ///
    /// `max_throughput` is raised to 400 RU/s for manual and 4000 RU/s for
    /// autoscale when it is missing or lower. The replace is sent even when no
    /// migration was needed.
    pub async fn set_throughput(
        &self,
        resource: &ScalableResource,
        autoscale: bool,
        max_throughput: Option<i32>,
    ) -> Result<ThroughputApplied> {
        let current = self.client.read_throughput(resource).await?;
        let setting = ThroughputSetting::clamped(autoscale, max_throughput);

        let migration = if current.snapshot().autoscale_enabled() != autoscale {
            self.migrator
                .migrate_if_needed(resource, &current, autoscale)
                .await?
        } else {
            None
        };

        let replaced = self.client.replace_throughput(resource, setting).await?;
        info!(%resource, ?setting, ?migration, "throughput replaced");
        Ok(ThroughputApplied {
            setting,
            migration,
            snapshot: replaced.snapshot(),
        })
    }
}

/// What [`ThroughputMigrationEngine::set_throughput`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThroughputApplied {
    /// The clamped setting that was sent.
    pub setting: ThroughputSetting,
    /// The representation migration performed first, if any.
    pub migration: Option<MigrationDirection>,
    /// The offer as returned by the replace.
    pub snapshot: ThroughputSnapshot,
}
