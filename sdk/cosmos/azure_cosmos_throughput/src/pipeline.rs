// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::auth::{self, AuthorizationSigner};
use crate::constants;
use crate::http::{self, AsyncRawResponse, HeaderName, HttpClient, Request, ServiceResponse, Url};
use crate::{Error, Result, ThroughputOptions};

/// How the resource link of a request is presented to the signer.
#[derive(Clone, Copy, Debug)]
pub(crate) enum ResourceAuth<'a> {
    /// A name-addressed resource; the link keeps its case.
    Named {
        resource_type: &'static str,
        link: &'a str,
    },
    /// An id-addressed resource (offers); the id is lower-cased.
    Id {
        resource_type: &'static str,
        id: &'a str,
    },
}

/// Shared plumbing for key-signed requests against one account.
#[derive(Clone, Debug)]
pub(crate) struct CosmosPipeline {
    endpoint: Url,
    signer: AuthorizationSigner,
    http: Arc<dyn HttpClient>,
    api_version: String,
    request_timeout: Option<Duration>,
}

impl CosmosPipeline {
    pub fn new(
        endpoint: Url,
        signer: AuthorizationSigner,
        http: Arc<dyn HttpClient>,
        options: &ThroughputOptions,
    ) -> Result<Self> {
        if endpoint.cannot_be_a_base() || !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::DataConversion(format!(
                "'{}' is not an account endpoint",
                endpoint
            )));
        }
        Ok(Self {
            endpoint,
            signer,
            http,
            api_version: options.api_version().to_string(),
            request_timeout: options.request_timeout(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Builds an absolute URL on the account's host from path segments.
    pub fn url<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Url {
        let mut url = self.endpoint.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        url
    }

    /// Adds date, version and authorization headers, sends the request and fails on non-2xx.
    pub async fn send(
        &self,
        request: &mut Request,
        auth: ResourceAuth<'_>,
    ) -> Result<ServiceResponse> {
        self.send_with_headers(request, auth, &[], None).await
    }

    /// Like [`send`](Self::send), with `headers` added to the request.
    ///
    /// When `error_context` is set, the reason of a non-2xx error reads
    /// `<error_context>: '<reason phrase>'`.
    pub async fn send_with_headers(
        &self,
        request: &mut Request,
        auth: ResourceAuth<'_>,
        headers: &[(HeaderName, &'static str)],
        error_context: Option<&str>,
    ) -> Result<ServiceResponse> {
        let date = auth::http_date_now();
        let token = match auth {
            ResourceAuth::Named {
                resource_type,
                link,
            } => self
                .signer
                .sign_preserving_case(request.method(), resource_type, link, &date)?,
            ResourceAuth::Id { resource_type, id } => {
                self.signer.sign(request.method(), resource_type, id, &date)?
            }
        };
        request.insert_header(constants::AUTHORIZATION, token);
        request.insert_header(constants::MS_VERSION, self.api_version.clone());
        request.insert_header(constants::MS_DATE, date);
        for (name, value) in headers {
            request.insert_header(name.clone(), *value);
        }

        debug!(method = ?request.method(), url = %request.url(), "sending request");
        let response = self.execute(request).await?;
        http::read_response(response, |phrase| match error_context {
            Some(context) => format!("{}: '{}'", context, phrase),
            None => phrase.to_string(),
        })
        .await
    }

    async fn execute(&self, request: &Request) -> Result<AsyncRawResponse> {
        let Some(limit) = self.request_timeout else {
            return Ok(self.http.execute_request(request).await?);
        };
        let response = tokio::time::timeout(limit, self.http.execute_request(request))
            .await
            .map_err(|_| Error::Timeout(limit))??;
        Ok(response)
    }
}
