// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Master-key request signing for the Cosmos DB REST API.

use azure_core::{
    hmac::hmac_sha256,
    http::Method,
    time::{to_rfc7231, OffsetDateTime},
};
use url::form_urlencoded;

pub use azure_core::credentials::Secret;

use crate::{Error, Result};

const TOKEN_TYPE: &str = "master";
const TOKEN_VERSION: &str = "1.0";

/// Formats `date` the way the service expects in `x-ms-date`, e.g. `Tue, 01 Nov 1994 08:12:31 GMT`.
pub fn to_http_date(date: OffsetDateTime) -> String {
    to_rfc7231(&date)
}

/// The current UTC time as an HTTP date.
pub fn http_date_now() -> String {
    to_http_date(OffsetDateTime::now_utc())
}

/// Computes `Authorization` header values from an account master key.
///
/// The signature is an HMAC-SHA256 over
/// `verb\nresourcetype\nresourcelink\ndate\n\n` (every field lower-cased),
/// keyed with the base64-decoded master key. The token is
/// `type=master&ver=1.0&sig=<base64 signature>`, URL-encoded.
#[derive(Clone, Debug)]
pub struct AuthorizationSigner {
    key: Secret,
}

impl AuthorizationSigner {
    pub fn new(key: impl Into<Secret>) -> Self {
        Self { key: key.into() }
    }

    /// Signs a request against an id-addressed resource such as an offer.
    ///
    /// `resource_id` is lower-cased before hashing; the service rejects the
    /// signature otherwise.
    pub fn sign(
        &self,
        verb: Method,
        resource_type: &str,
        resource_id: &str,
        http_date: &str,
    ) -> Result<String> {
        self.sign_link(
            verb,
            resource_type,
            &resource_id.to_lowercase(),
            http_date,
        )
    }

    /// Signs a request against a name-addressed resource (`dbs/{db}/colls/{coll}`).
    ///
    /// Names are case-sensitive on the service, so the link is hashed as given.
    pub fn sign_preserving_case(
        &self,
        verb: Method,
        resource_type: &str,
        resource_link: &str,
        http_date: &str,
    ) -> Result<String> {
        self.sign_link(verb, resource_type, resource_link, http_date)
    }

    fn sign_link(
        &self,
        verb: Method,
        resource_type: &str,
        resource_link: &str,
        http_date: &str,
    ) -> Result<String> {
        let payload = string_to_sign(verb, resource_type, resource_link, http_date);
        let signature = hmac_sha256(&payload, &self.key)
            .map_err(|e| Error::Credential(e.to_string()))?;
        let token = format!(
            "type={}&ver={}&sig={}",
            TOKEN_TYPE, TOKEN_VERSION, signature
        );
        Ok(form_urlencoded::byte_serialize(token.as_bytes()).collect())
    }
}

fn string_to_sign(verb: Method, resource_type: &str, resource_link: &str, date: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n",
        verb.as_str().to_lowercase(),
        resource_type.to_lowercase(),
        resource_link,
        date.to_lowercase(),
        ""
    )
}
