//! Direct transport: the caller posts a plain request description and gets
//! a plain response description back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{null_as_default, Envelope};
use crate::protocol::decode_body;
use crate::{RequestSpec, ResponseSpec, Result};

/// Inbound document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectRequest {
    pub method: String,
    pub url: String,
    /// Base64 request body
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,
}

/// Outbound document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// Base64 response body
    pub content: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectEnvelope;

impl Envelope for DirectEnvelope {
    type Inbound = DirectRequest;
    type Outbound = DirectResponse;

    const NAME: &'static str = "direct";
    const BODY_IS_ENCODED: bool = true;

    fn decode(&self, inbound: DirectRequest) -> Result<RequestSpec> {
        Ok(RequestSpec {
            body: decode_body(&inbound.body)?,
            method: inbound.method,
            target: inbound.url,
            headers: inbound.headers,
            query: BTreeMap::new(),
        })
    }

    fn encode(&self, response: ResponseSpec) -> DirectResponse {
        DirectResponse {
            content: response.encoded_body(),
            status_code: response.status_code,
            headers: response.headers,
        }
    }
}
