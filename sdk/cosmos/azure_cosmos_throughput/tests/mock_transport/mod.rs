// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use azure_cosmos_throughput::{
    auth::AuthorizationSigner,
    constants,
    http::{AsyncRawResponse, Body, HeaderName, Headers, HttpClient, Method, Request, StatusCode},
};
use serde_json::{json, Value};

/// base64("cosmos-throughput-test-key")
pub const ACCOUNT_KEY: &str = "Y29zbW9zLXRocm91Z2hwdXQtdGVzdC1rZXk=";
pub const ENDPOINT: &str = "https://mockaccount.documents.azure.com:443/";

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: Headers,
    pub body: Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get_optional_str(name)
    }

    pub fn is_migration(&self) -> bool {
        self.header(&constants::MIGRATE_TO_AUTOPILOT).is_some()
            || self.header(&constants::MIGRATE_TO_MANUAL_THROUGHPUT).is_some()
    }

    pub fn is_replace(&self) -> bool {
        self.method == Method::Put && !self.is_migration()
    }
}

#[derive(Default)]
struct State {
    // resource link ("dbs/db/colls/c") -> _rid
    resources: HashMap<String, String>,
    // offer id -> offer record
    offers: HashMap<String, Value>,
    requests: Vec<RecordedRequest>,
    reject_migrations: Option<StatusCode>,
}

/// An in-memory stand-in for an account's REST endpoint that understands
/// resource reads, offer queries, offer reads, offer replaces and offer migrations.
///
/// Every request must carry a valid master-key signature.
#[derive(Debug)]
pub struct MockCosmosTransport {
    state: Mutex<State>,
    signer: AuthorizationSigner,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("resources", &self.resources.len())
            .field("offers", &self.offers.len())
            .finish()
    }
}

impl MockCosmosTransport {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            signer: AuthorizationSigner::new(ACCOUNT_KEY),
        }
    }

    /// Adds a container with a manual offer of `throughput` RU/s.
    pub fn with_manual_container(self, database: &str, container: &str, throughput: i32) -> Self {
        self.add_container(database, container, json!({ "offerThroughput": throughput }))
    }

    /// Adds a container with an autoscale offer capped at `max_throughput` RU/s.
    pub fn with_autoscale_container(self, database: &str, container: &str, max_throughput: i32) -> Self {
        self.add_container(
            database,
            container,
            json!({
                "offerThroughput": max_throughput / 10,
                "offerAutopilotSettings": { "maxThroughput": max_throughput }
            }),
        )
    }

    /// Adds a container that shares its database's throughput and so has no offer.
    pub fn with_shared_container(self, database: &str, container: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let rid = format!("Rid{}Shared=", state.resources.len());
            state
                .resources
                .insert(format!("dbs/{}/colls/{}", database, container), rid);
        }
        self
    }

    /// Makes every migration request fail with `status`.
    pub fn rejecting_migrations(self, status: StatusCode) -> Self {
        self.state.lock().unwrap().reject_migrations = Some(status);
        self
    }

    /// Adds a database with a shared manual offer of `throughput` RU/s.
    pub fn with_manual_database(self, database: &str, throughput: i32) -> Self {
        self.add_resource(
            format!("dbs/{}", database),
            json!({ "offerThroughput": throughput }),
        )
    }

    fn add_container(self, database: &str, container: &str, content: Value) -> Self {
        self.add_resource(format!("dbs/{}/colls/{}", database, container), content)
    }

    fn add_resource(self, link: String, content: Value) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let n = state.resources.len();
            let rid = format!("Rid{}Res=", n);
            let offer_id = format!("Of{}X", n);
            state.resources.insert(link.clone(), rid.clone());
            state.offers.insert(
                offer_id.clone(),
                json!({
                    "resource": format!("{}/", link),
                    "offerType": "Invalid",
                    "offerResourceId": rid,
                    "offerVersion": "V2",
                    "content": content,
                    "id": offer_id,
                    "_rid": offer_id,
                    "_self": format!("offers/{}/", offer_id),
                    "_etag": "\"0\"",
                    "_ts": 1
                }),
            );
        }
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn migrations(&self) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.is_migration()).collect()
    }

    pub fn replaces(&self) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.is_replace()).collect()
    }

    /// The stored offer content of a container.
    pub fn offer_content(&self, database: &str, container: &str) -> Option<Value> {
        self.offer_content_of(&format!("dbs/{}/colls/{}", database, container))
    }

    /// The stored offer content of the resource at `link`, e.g. `dbs/db`.
    pub fn offer_content_of(&self, link: &str) -> Option<Value> {
        let state = self.state.lock().unwrap();
        let rid = state.resources.get(link)?;
        state
            .offers
            .values()
            .find(|offer| offer["offerResourceId"] == *rid.as_str())
            .map(|offer| offer["content"].clone())
    }

    fn verify_signature(&self, request: &Request, segments: &[&str]) -> bool {
        let (Some(token), Some(date)) = (
            request.headers().get_optional_str(&constants::AUTHORIZATION),
            request.headers().get_optional_str(&constants::MS_DATE),
        ) else {
            return false;
        };
        let expected = match segments {
            ["offers"] => self.signer.sign(request.method(), "offers", "", date),
            ["offers", id] => self.signer.sign(request.method(), "offers", id, date),
            ["dbs", _] => self.signer.sign_preserving_case(
                request.method(),
                "dbs",
                &segments.join("/"),
                date,
            ),
            ["dbs", _, "colls", _] => self.signer.sign_preserving_case(
                request.method(),
                "colls",
                &segments.join("/"),
                date,
            ),
            _ => return false,
        };
        expected.map(|e| e == token).unwrap_or(false)
    }
}

fn respond(status: StatusCode, body: Value) -> azure_core::Result<AsyncRawResponse> {
    Ok(AsyncRawResponse::from_bytes(
        status,
        Headers::new(),
        body.to_string(),
    ))
}

fn not_found() -> azure_core::Result<AsyncRawResponse> {
    respond(
        StatusCode::NotFound,
        json!({ "code": "NotFound", "message": "Resource Not Found" }),
    )
}

#[async_trait]
impl HttpClient for MockCosmosTransport {
    async fn execute_request(&self, request: &Request) -> azure_core::Result<AsyncRawResponse> {
        let segments: Vec<String> = request
            .url()
            .path_segments()
            .map(|s| s.filter(|s| !s.is_empty()).map(String::from).collect())
            .unwrap_or_default();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        let body: Value = match request.body() {
            Body::Bytes(bytes) if !bytes.is_empty() => {
                serde_json::from_slice(bytes).unwrap_or(Value::Null)
            }
            _ => Value::Null,
        };

        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: request.method(),
            path: segments.join("/"),
            headers: request.headers().clone(),
            body: body.clone(),
        });

        if request.headers().get_optional_str(&constants::MS_VERSION) != Some("2018-12-31")
            || !self.verify_signature(request, &segments)
        {
            return respond(
                StatusCode::Unauthorized,
                json!({ "code": "Unauthorized", "message": "signature mismatch" }),
            );
        }

        match (request.method(), segments.as_slice()) {
            (Method::Get, ["dbs", _, "colls", _]) | (Method::Get, ["dbs", _]) => {
                let link = segments.join("/");
                match state.resources.get(&link) {
                    Some(rid) => respond(
                        StatusCode::Ok,
                        json!({ "id": segments.last(), "_rid": rid, "_self": format!("{}/", link) }),
                    ),
                    None => not_found(),
                }
            }
            (Method::Post, ["offers"]) => {
                let rid = &body["parameters"][0]["value"];
                let offers: Vec<Value> = state
                    .offers
                    .values()
                    .filter(|offer| &offer["offerResourceId"] == rid)
                    .cloned()
                    .collect();
                respond(
                    StatusCode::Ok,
                    json!({ "_rid": "", "Offers": offers, "_count": offers.len() }),
                )
            }
            (Method::Get, ["offers", id]) => match state.offers.get(*id) {
                Some(offer) => respond(StatusCode::Ok, offer.clone()),
                None => not_found(),
            },
            (Method::Put, ["offers", id]) => {
                let reject = state.reject_migrations;
                let Some(offer) = state.offers.get_mut(*id) else {
                    return not_found();
                };
                let is_autoscale = offer["content"].get("offerAutopilotSettings").is_some();

                if request
                    .headers()
                    .get_optional_str(&constants::MIGRATE_TO_AUTOPILOT)
                    .is_some()
                {
                    if let Some(status) = reject {
                        return respond(status, json!({ "code": "Forbidden", "message": "migration blocked" }));
                    }
                    if is_autoscale {
                        return respond(StatusCode::BadRequest, json!({ "message": "already autoscale" }));
                    }
                    offer["content"] = json!({
                        "offerThroughput": 400,
                        "offerAutopilotSettings": { "maxThroughput": 4000 }
                    });
                } else if request
                    .headers()
                    .get_optional_str(&constants::MIGRATE_TO_MANUAL_THROUGHPUT)
                    .is_some()
                {
                    if let Some(status) = reject {
                        return respond(status, json!({ "code": "Forbidden", "message": "migration blocked" }));
                    }
                    if !is_autoscale {
                        return respond(StatusCode::BadRequest, json!({ "message": "already manual" }));
                    }
                    offer["content"] = json!({ "offerThroughput": 400 });
                } else {
                    let wants_autoscale = body["content"].get("offerAutopilotSettings").is_some();
                    if wants_autoscale != is_autoscale {
                        return respond(
                            StatusCode::BadRequest,
                            json!({ "message": "offer representation mismatch; migrate first" }),
                        );
                    }
                    offer["content"] = body["content"].clone();
                }
                respond(StatusCode::Ok, offer.clone())
            }
            _ => not_found(),
        }
    }
}
