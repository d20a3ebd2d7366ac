// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::auth::{AuthorizationSigner, Secret};
use crate::constants;
use crate::http::{self, HttpClient, Method, Request, Url};
use crate::migration::{ScalingModeMigrator, ThroughputMigrationEngine};
use crate::models::{ResourceProperties, ScalableResource, ThroughputProperties, ThroughputSetting};
use crate::pipeline::{CosmosPipeline, ResourceAuth};
use crate::{Error, Result, ThroughputOptions};

/// Defines the throughput operations provided by a [`CosmosClient`].
///
/// This trait is intended to allow you to mock out the `CosmosClient` when testing your application.
/// Rather than depending on `CosmosClient`, you can depend on a generic parameter constrained by this trait.
pub trait ThroughputClientMethods {
    /// Reads the throughput offer of a database or container.
    ///
    /// Returns [`Error::NotFound`] when the resource has no offer of its own
    /// (for example a container sharing its database's throughput).
    #[allow(async_fn_in_trait)] // REASON: callers use this trait through generics only.
    async fn read_throughput(&self, resource: &ScalableResource) -> Result<ThroughputProperties>;

    /// Replaces the throughput of a database or container.
    ///
    /// The offer must already be in the representation (manual or autoscale) that
    /// `setting` asks for; see [`ScalingModeMigrator`].
    #[allow(async_fn_in_trait)] // REASON: callers use this trait through generics only.
    async fn replace_throughput(
        &self,
        resource: &ScalableResource,
        setting: ThroughputSetting,
    ) -> Result<ThroughputProperties>;
}

impl<T: ThroughputClientMethods> ThroughputClientMethods for &T {
    async fn read_throughput(&self, resource: &ScalableResource) -> Result<ThroughputProperties> {
        (**self).read_throughput(resource).await
    }

    async fn replace_throughput(
        &self,
        resource: &ScalableResource,
        setting: ThroughputSetting,
    ) -> Result<ThroughputProperties> {
        (**self).replace_throughput(resource, setting).await
    }
}

/// A key-authenticated client for one Cosmos DB account.
#[derive(Clone, Debug)]
pub struct CosmosClient {
    pipeline: CosmosPipeline,
}

impl CosmosClient {
    /// Creates a client that sends requests with the `reqwest` transport from `azure_core`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The account's document endpoint, e.g. `https://myaccount.documents.azure.com:443/`.
    /// * `key` - The account's primary (or secondary) master key.
    /// * `options` - Timeout and API version settings.
    pub fn new(endpoint: &str, key: impl Into<Secret>, options: ThroughputOptions) -> Result<Self> {
        Self::with_http_client(endpoint, key, http::default_http_client(), options)
    }

    /// Creates a client that sends requests through `http`.
    pub fn with_http_client(
        endpoint: &str,
        key: impl Into<Secret>,
        http: Arc<dyn HttpClient>,
        options: ThroughputOptions,
    ) -> Result<Self> {
        Error::require("documentEndpoint", endpoint)?;
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::DataConversion(format!("invalid endpoint '{}': {}", endpoint, e)))?;
        let pipeline =
            CosmosPipeline::new(endpoint, AuthorizationSigner::new(key), http, &options)?;
        Ok(Self { pipeline })
    }

    pub fn endpoint(&self) -> &Url {
        self.pipeline.endpoint()
    }

    /// Gets a [`ScalingModeMigrator`] bound to this account.
    pub fn migrator(&self) -> ScalingModeMigrator {
        ScalingModeMigrator::new(self.pipeline.clone())
    }

    /// Gets a [`ThroughputMigrationEngine`] that reads and replaces offers through this client.
    pub fn throughput_engine(&self) -> ThroughputMigrationEngine<&Self> {
        ThroughputMigrationEngine::new(self, self.migrator())
    }

    async fn read_resource(&self, resource: &ScalableResource) -> Result<ResourceProperties> {
        let link = resource.link();
        let mut req = Request::new(self.pipeline.url(resource.path_segments()), Method::Get);
        self.pipeline
            .send(
                &mut req,
                ResourceAuth::Named {
                    resource_type: resource.resource_type(),
                    link: &link,
                },
            )
            .await?
            .json()
    }

    async fn query_offers(&self, resource_id: &str) -> Result<Vec<ThroughputProperties>> {
        #[derive(Serialize)]
        struct QueryParameter<'a> {
            name: &'static str,
            value: &'a str,
        }

        #[derive(Serialize)]
        struct Query<'a> {
            query: &'static str,
            parameters: [QueryParameter<'a>; 1],
        }

        #[derive(Deserialize)]
        struct OfferResults {
            #[serde(rename = "Offers")]
            pub offers: Vec<ThroughputProperties>,
        }

        let mut req = Request::new(self.pipeline.url(["offers"]), Method::Post);
        req.insert_header(constants::IS_QUERY, "True");
        req.insert_header(constants::CONTENT_TYPE, constants::QUERY_CONTENT_TYPE);
        req.set_json(&Query {
            query: "SELECT * FROM c WHERE c.offerResourceId = @rid",
            parameters: [QueryParameter {
                name: "@rid",
                value: resource_id,
            }],
        })?;
        let results: OfferResults = self
            .pipeline
            .send(
                &mut req,
                ResourceAuth::Id {
                    resource_type: "offers",
                    id: "",
                },
            )
            .await?
            .json()?;
        Ok(results.offers)
    }

    async fn read_offer(&self, offer_id: &str) -> Result<ThroughputProperties> {
        let mut req = Request::new(self.pipeline.url(["offers", offer_id]), Method::Get);
        self.pipeline
            .send(
                &mut req,
                ResourceAuth::Id {
                    resource_type: "offers",
                    id: offer_id,
                },
            )
            .await?
            .json()
    }
}

impl ThroughputClientMethods for CosmosClient {
    async fn read_throughput(&self, resource: &ScalableResource) -> Result<ThroughputProperties> {
        // We need the RID of the resource to find its offer.
        let properties = self.read_resource(resource).await?;
        let rid = properties.system_properties.resource_id.ok_or_else(|| {
            Error::DataConversion(format!("'{}' was returned without a '_rid'", resource))
        })?;

        let offers = self.query_offers(&rid).await?;
        let Some(offer) = offers.first() else {
            return Err(Error::NotFound(format!(
                "'{}' has no dedicated throughput offer",
                resource
            )));
        };

        // Now we can read the offer itself.
        let offer_id = offer.offer_id()?;
        debug!(%resource, offer_id, "reading offer");
        self.read_offer(offer_id).await
    }

    async fn replace_throughput(
        &self,
        resource: &ScalableResource,
        setting: ThroughputSetting,
    ) -> Result<ThroughputProperties> {
        let current = self.read_throughput(resource).await?;
        let offer_id = current.offer_id()?;
        let replacement = current.with_setting(setting);

        let mut req = Request::new(self.pipeline.url(["offers", offer_id]), Method::Put);
        req.insert_header(constants::CONTENT_TYPE, constants::JSON_CONTENT_TYPE);
        req.set_json(&replacement)?;
        self.pipeline
            .send(
                &mut req,
                ResourceAuth::Id {
                    resource_type: "offers",
                    id: offer_id,
                },
            )
            .await?
            .json()
    }
}
