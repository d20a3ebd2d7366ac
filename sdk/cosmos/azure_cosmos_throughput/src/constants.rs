// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Header names, API versions and throughput limits used by the Cosmos DB REST API.

use azure_core::http::headers::HeaderName;

/// The REST API version sent in `x-ms-version`.
pub const API_VERSION: &str = "2018-12-31";

pub const AUTHORIZATION: HeaderName = HeaderName::from_static("authorization");
pub const CONTENT_TYPE: HeaderName = HeaderName::from_static("content-type");
pub const MS_DATE: HeaderName = HeaderName::from_static("x-ms-date");
pub const MS_VERSION: HeaderName = HeaderName::from_static("x-ms-version");
pub const IS_QUERY: HeaderName = HeaderName::from_static("x-ms-documentdb-isquery");

/// Asks the service to convert a manual offer into an autoscale (autopilot) offer.
pub const MIGRATE_TO_AUTOPILOT: HeaderName = HeaderName::from_static("x-ms-cosmos-migrate-offer-to-autopilot");

/// Asks the service to convert an autoscale offer into a manual offer.
pub const MIGRATE_TO_MANUAL_THROUGHPUT: HeaderName = HeaderName::from_static("x-ms-cosmos-migrate-offer-to-manual-throughput");

pub const QUERY_CONTENT_TYPE: &str = "application/query+json";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Lowest manual throughput, in RU/s, the service accepts.
pub const MIN_MANUAL_THROUGHPUT: i32 = 400;

/// Lowest autoscale maximum throughput, in RU/s, the service accepts.
pub const MIN_AUTOSCALE_MAX_THROUGHPUT: i32 = 4000;

/// Placeholder throughput sent in a migration request; the real value is applied afterwards.
pub(crate) const DEFERRED_THROUGHPUT: i32 = -1;
