// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};

use crate::models::{SystemProperties, ThroughputSetting, ThroughputSnapshot};
use crate::{Error, Result};

/// A throughput offer: the service record holding a database's or container's
/// provisioned or autoscale throughput.
#[derive(Clone, Default, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputProperties {
    #[serde(default)]
    resource: String,
    #[serde(rename = "content")]
    offer: Offer,
    #[serde(rename = "id")]
    pub(crate) offer_id: String,
    offer_resource_id: String,
    #[serde(default)]
    offer_type: String,
    #[serde(default)]
    offer_version: String,
    #[serde(flatten)]
    pub(crate) system_properties: SystemProperties,
}

#[derive(Clone, Default, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct Offer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_throughput: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_autopilot_settings: Option<AutoscaleSettings>,
}

#[derive(Clone, Default, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct AutoscaleSettings {
    pub max_throughput: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_upgrade_policy: Option<AutoscaleAutoUpgradePolicy>,
}

#[derive(Clone, Default, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct AutoscaleAutoUpgradePolicy {
    pub throughput_policy: Option<AutoscaleThroughputPolicy>,
}

#[derive(Clone, Default, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct AutoscaleThroughputPolicy {
    pub increment_percent: i32,
}

impl ThroughputProperties {
    /// The internal resource id (`_rid`) of the database or container this offer belongs to.
    pub fn offer_resource_id(&self) -> &str {
        &self.offer_resource_id
    }

    /// The offer's self link, e.g. `offers/AbCd/`.
    pub fn self_link(&self) -> Option<&str> {
        self.system_properties.self_link.as_deref()
    }

    /// The offer's short id: the second `/`-separated segment of its self link.
    pub fn offer_id(&self) -> Result<&str> {
        self.self_link()
            .and_then(|link| link.split('/').nth(1))
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                Error::DataConversion(format!(
                    "offer '{}' has no usable self link: {:?}",
                    self.offer_id,
                    self.self_link()
                ))
            })
    }

    /// The autoscale maximum, present only for autoscale offers.
    pub fn autoscale_max_throughput(&self) -> Option<i32> {
        self.offer
            .offer_autopilot_settings
            .as_ref()
            .map(|settings| settings.max_throughput)
    }

    /// The currently provisioned throughput, if the service reported one.
    pub fn throughput(&self) -> Option<i32> {
        self.offer.offer_throughput
    }

    pub fn snapshot(&self) -> ThroughputSnapshot {
        match self.autoscale_max_throughput() {
            Some(max) => ThroughputSnapshot::autoscale(max),
            None => ThroughputSnapshot::manual(),
        }
    }

    /// Returns a copy of this offer whose content carries `setting`, ready to be sent as a replace.
    pub fn with_setting(&self, setting: ThroughputSetting) -> Self {
        let offer = match setting {
            ThroughputSetting::Manual(throughput) => Offer {
                offer_throughput: Some(throughput),
                offer_autopilot_settings: None,
            },
            ThroughputSetting::Autoscale { max_throughput } => Offer {
                offer_throughput: None,
                offer_autopilot_settings: Some(AutoscaleSettings {
                    max_throughput,
                    auto_upgrade_policy: self
                        .offer
                        .offer_autopilot_settings
                        .as_ref()
                        .and_then(|s| s.auto_upgrade_policy.clone()),
                }),
            },
        };
        Self {
            offer,
            ..self.clone()
        }
    }
}
