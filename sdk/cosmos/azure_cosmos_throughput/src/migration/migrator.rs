// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::Serialize;
use tracing::{debug, info};

use crate::constants::{self, DEFERRED_THROUGHPUT};
use crate::http::{HeaderName, Method, Request};
use crate::models::{ScalableResource, ThroughputProperties};
use crate::pipeline::{CosmosPipeline, ResourceAuth};
use crate::Result;

/// The representation change performed by a migration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MigrationDirection {
    /// Manual offer to autoscale (autopilot) offer.
    ToAutoscale,
    /// Autoscale offer to manual offer.
    ToManual,
}

impl MigrationDirection {
    /// The direction needed to move `current` to the requested mode, or `None` if it is already there.
    pub fn between(current: &ThroughputProperties, target_autoscale: bool) -> Option<Self> {
        let autoscale_now = current.autoscale_max_throughput().is_some();
        match (autoscale_now, target_autoscale) {
            (false, true) => Some(Self::ToAutoscale),
            (true, false) => Some(Self::ToManual),
            _ => None,
        }
    }

    /// The request header that selects this direction.
    pub fn header(&self) -> HeaderName {
        match self {
            Self::ToAutoscale => constants::MIGRATE_TO_AUTOPILOT,
            Self::ToManual => constants::MIGRATE_TO_MANUAL_THROUGHPUT,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MigrationRequest<'a> {
    offer_version: &'static str,
    offer_type: &'static str,
    content: MigrationContent,
    resource: String,
    offer_resource_id: &'a str,
    id: &'a str,
    #[serde(rename = "_rid")]
    rid: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MigrationContent {
    #[serde(rename_all = "camelCase")]
    ToAutoscale { offer_throughput: i32 },
    #[serde(rename_all = "camelCase")]
    ToManual {
        offer_autopilot_settings: DeferredAutoscale,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeferredAutoscale {
    max_throughput: i32,
}

impl<'a> MigrationRequest<'a> {
    fn new(
        direction: MigrationDirection,
        resource: &ScalableResource,
        offer: &'a ThroughputProperties,
        offer_id: &'a str,
    ) -> Self {
        // The -1 placeholders leave the value to the replace call that follows.
        let content = match direction {
            MigrationDirection::ToAutoscale => MigrationContent::ToAutoscale {
                offer_throughput: DEFERRED_THROUGHPUT,
            },
            MigrationDirection::ToManual => MigrationContent::ToManual {
                offer_autopilot_settings: DeferredAutoscale {
                    max_throughput: DEFERRED_THROUGHPUT,
                },
            },
        };
        Self {
            offer_version: "V2",
            offer_type: "Invalid",
            content,
            resource: resource.offer_resource(),
            offer_resource_id: offer.offer_resource_id(),
            id: offer_id,
            rid: offer_id,
        }
    }
}

/// Converts an offer between the manual and autoscale representations.
///
/// The service refuses to replace a manual offer with autoscale settings (and
/// vice versa), so the representation is first migrated with a
/// `PUT offers/{id}` carrying a migration header. The numeric throughput is
/// applied afterwards by a normal replace.
#[derive(Clone, Debug)]
pub struct ScalingModeMigrator {
    pipeline: CosmosPipeline,
}

impl ScalingModeMigrator {
    pub(crate) fn new(pipeline: CosmosPipeline) -> Self {
        Self { pipeline }
    }

    /// Migrates `current` to the requested representation if it is not already in it.
    ///
    /// Returns the direction of the migration that was performed, or `None` when
    /// no request was needed.
    pub async fn migrate_if_needed(
        &self,
        resource: &ScalableResource,
        current: &ThroughputProperties,
        target_autoscale: bool,
    ) -> Result<Option<MigrationDirection>> {
        let Some(direction) = MigrationDirection::between(current, target_autoscale) else {
            debug!(%resource, target_autoscale, "offer already in requested mode");
            return Ok(None);
        };

        let offer_id = current.offer_id()?;
        let mut request = Request::new(self.pipeline.url(["offers", offer_id]), Method::Put);
        request.set_json(&MigrationRequest::new(direction, resource, current, offer_id))?;

        info!(%resource, offer_id, ?direction, "migrating offer");
        self.pipeline
            .send_with_headers(
                &mut request,
                ResourceAuth::Id {
                    resource_type: "offers",
                    id: offer_id,
                },
                &[
                    (direction.header(), "true"),
                    (constants::CONTENT_TYPE, constants::JSON_CONTENT_TYPE),
                ],
                Some("error changing throughput scheme"),
            )
            .await?;
        Ok(Some(direction))
    }
}
