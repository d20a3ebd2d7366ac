// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use std::time::Duration;

use crate::constants;

/// Options used when talking to a Cosmos DB account's throughput offers.
#[derive(Clone, Debug)]
pub struct ThroughputOptions {
    request_timeout: Option<Duration>,
    api_version: String,
}

impl Default for ThroughputOptions {
    fn default() -> Self {
        Self {
            request_timeout: None,
            api_version: constants::API_VERSION.to_string(),
        }
    }
}

impl ThroughputOptions {
    /// Creates a new [`ThroughputOptionsBuilder`](ThroughputOptionsBuilder) that can be used to construct a [`ThroughputOptions`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::time::Duration;
    /// let options = azure_cosmos_throughput::ThroughputOptions::builder()
    ///     .with_request_timeout(Duration::from_secs(30))
    ///     .build();
    /// assert_eq!(options.request_timeout(), Some(Duration::from_secs(30)));
    /// ```
    pub fn builder() -> ThroughputOptionsBuilder {
        ThroughputOptionsBuilder::default()
    }

    /// Maximum time a single request may take. `None` waits indefinitely.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Value sent in the `x-ms-version` header.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }
}

/// Builder used to construct a [`ThroughputOptions`].
///
/// Obtain a [`ThroughputOptionsBuilder`] by calling [`ThroughputOptions::builder()`]
#[derive(Default)]
pub struct ThroughputOptionsBuilder(ThroughputOptions);

impl ThroughputOptionsBuilder {
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.0.request_timeout = Some(timeout);
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.0.api_version = api_version.into();
        self
    }

    /// Builds a [`ThroughputOptions`] from the builder.
    ///
    /// This does not consume the builder, and can be called multiple times.
    pub fn build(&self) -> ThroughputOptions {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_fixed_api_version_and_no_timeout() {
        let options = ThroughputOptions::default();
        assert_eq!(options.api_version(), "2018-12-31");
        assert_eq!(options.request_timeout(), None);
    }

    #[test]
    fn builder_can_build_repeatedly() {
        let builder = ThroughputOptions::builder().with_api_version("2020-07-15");
        assert_eq!(builder.build().api_version(), "2020-07-15");
        assert_eq!(builder.build().api_version(), "2020-07-15");
    }
}
