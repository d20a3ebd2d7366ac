// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! HTTP types shared with `azure_core`, and buffering of service responses.

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;

pub use azure_core::http::{
    headers::{HeaderName, Headers},
    AsyncRawResponse, Body, HttpClient, Method, Request, StatusCode, Url,
};

use crate::{Error, Result};

/// The `reqwest` transport that ships with `azure_core`.
pub fn default_http_client() -> Arc<dyn HttpClient> {
    azure_core::http::new_http_client()
}

/// A fully read response with a 2xx status.
#[derive(Clone, Debug)]
pub struct ServiceResponse {
    status: StatusCode,
    body: Bytes,
}

impl ServiceResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// The canonical reason phrase for `status`, e.g. `Bad Request`.
pub fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason()
}

/// Reads the whole body of `response`.
///
/// A non-2xx status becomes [`Error::HttpResponse`]; `describe` turns the
/// status's reason phrase into the error's reason.
pub(crate) async fn read_response(
    response: AsyncRawResponse,
    describe: impl FnOnce(&str) -> String,
) -> Result<ServiceResponse> {
    let status = response.status();
    let body = response.into_body().collect().await?;
    if !status.is_success() {
        return Err(Error::HttpResponse {
            status,
            reason: describe(reason_phrase(status)),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    Ok(ServiceResponse { status, body })
}
