// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use crate::constants::{MIN_AUTOSCALE_MAX_THROUGHPUT, MIN_MANUAL_THROUGHPUT};

/// The scaling mode of a resource as last read from the service.
///
/// `max_throughput` is present exactly when autoscale is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ThroughputSnapshot {
    autoscale_enabled: bool,
    max_throughput: Option<i32>,
}

impl ThroughputSnapshot {
    /// A resource with fixed (manual) throughput.
    pub fn manual() -> Self {
        Self {
            autoscale_enabled: false,
            max_throughput: None,
        }
    }

    /// A resource with autoscale throughput capped at `max_throughput` RU/s.
    pub fn autoscale(max_throughput: i32) -> Self {
        Self {
            autoscale_enabled: true,
            max_throughput: Some(max_throughput),
        }
    }

    pub fn autoscale_enabled(&self) -> bool {
        self.autoscale_enabled
    }

    pub fn max_throughput(&self) -> Option<i32> {
        self.max_throughput
    }
}

/// The throughput to apply to a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThroughputSetting {
    /// Fixed throughput, in RU/s.
    Manual(i32),
    /// Autoscale with the given maximum, in RU/s.
    Autoscale { max_throughput: i32 },
}

impl ThroughputSetting {
    /// Builds the setting for the requested mode, raising missing or too-small
    /// values to the service minimum (400 RU/s manual, 4000 RU/s autoscale).
    pub fn clamped(autoscale: bool, max_throughput: Option<i32>) -> Self {
        if autoscale {
            Self::Autoscale {
                max_throughput: max_throughput
                    .unwrap_or(MIN_AUTOSCALE_MAX_THROUGHPUT)
                    .max(MIN_AUTOSCALE_MAX_THROUGHPUT),
            }
        } else {
            Self::Manual(
                max_throughput
                    .unwrap_or(MIN_MANUAL_THROUGHPUT)
                    .max(MIN_MANUAL_THROUGHPUT),
            )
        }
    }

    pub fn is_autoscale(&self) -> bool {
        matches!(self, Self::Autoscale { .. })
    }

    /// The configured value: the fixed throughput, or the autoscale maximum.
    pub fn throughput(&self) -> i32 {
        match self {
            Self::Manual(throughput) => *throughput,
            Self::Autoscale { max_throughput } => *max_throughput,
        }
    }
}
