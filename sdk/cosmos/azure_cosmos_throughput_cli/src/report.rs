// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_cosmos_throughput::{AppliedThroughput, Error};

/// The line printed for a container's autoscale setting.
pub fn setting_line(container: &str, autoscale: bool, max_throughput: Option<i32>) -> String {
    if autoscale {
        let max = max_throughput.map_or_else(|| "nil".to_string(), |max| max.to_string());
        format!(
            "Container Name: {}, AutoScale setting: true, max throughput {} RU/s",
            container, max
        )
    } else {
        format!(
            "Container Name: {}, AutoScale setting: false, Autoscale turned off",
            container
        )
    }
}

/// The line printed after an update, showing the value the service was sent.
pub fn applied_line(container: &str, applied: &AppliedThroughput) -> String {
    setting_line(container, applied.autoscale, Some(applied.sent.throughput()))
}

pub fn failure_line(container: &str, error: &Error) -> String {
    format!("Container Name: {}, failed: {}", container, error)
}
