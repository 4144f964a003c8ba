//! API gateway transport: the inbound document is a gateway invocation
//! event and the outbound document is a gateway integration response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{null_as_default, Envelope};
use crate::protocol::{decode_body, QueryValue};
use crate::{Error, RequestSpec, ResponseSpec, Result};

/// Value of `isBase64Encoded` on every gateway response. The body is
/// base64 text regardless; downstream consumers read this flag as-is.
pub const BASE64_FLAG: bool = false;

/// Gateway invocation event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,
    pub http_method: String,
    /// Used verbatim as the outbound target
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_string: BTreeMap<String, QueryValue>,
    /// Base64 request body
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_context: RequestContext,
}

/// Request metadata attached by the gateway. Only used for logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestContext {
    pub service_id: String,
    pub request_id: String,
    pub http_method: String,
    pub path: String,
    pub source_ip: String,
    pub stage: String,
    pub identity: Identity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Identity {
    pub secret_id: Option<String>,
}

/// Gateway integration response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub is_base64_encoded: bool,
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GatewayEnvelope;

impl Envelope for GatewayEnvelope {
    type Inbound = EventRequest;
    type Outbound = EventResponse;

    const NAME: &'static str = "gateway";
    const BODY_IS_ENCODED: bool = BASE64_FLAG;

    fn decode(&self, inbound: EventRequest) -> Result<RequestSpec> {
        let query = inbound
            .query_string
            .into_iter()
            .map(|(key, value)| (key, value.into_values()))
            .collect();

        Ok(RequestSpec {
            body: decode_body(&inbound.body)?,
            method: inbound.http_method,
            target: inbound.path,
            headers: inbound.headers,
            query,
        })
    }

    fn encode(&self, response: ResponseSpec) -> EventResponse {
        EventResponse {
            is_base64_encoded: response.body_is_encoded,
            body: response.encoded_body(),
            status_code: response.status_code,
            headers: response.headers,
        }
    }

    fn reject(&self, error: &Error) -> Option<EventResponse> {
        Some(EventResponse {
            is_base64_encoded: BASE64_FLAG,
            status_code: error.status_code(),
            headers: BTreeMap::new(),
            body: String::new(),
        })
    }

    fn request_id<'a>(&self, inbound: &'a EventRequest) -> Option<&'a str> {
        let id = inbound.request_context.request_id.as_str();
        (!id.is_empty()).then_some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(query: &str) -> String {
        format!(
            r#"{{
                "headers": {{"Accept": "*/*"}},
                "httpMethod": "GET",
                "path": "https://example.test/a/b",
                "queryString": {},
                "body": "",
                "requestContext": {{
                    "serviceId": "svc",
                    "requestId": "req-1",
                    "httpMethod": "GET",
                    "path": "/proxy",
                    "sourceIp": "10.0.0.1",
                    "stage": "RELEASE",
                    "identity": {{"secretId": null}}
                }}
            }}"#,
            query
        )
    }

    #[test]
    fn test_decode() {
        let parsed = GatewayEnvelope
            .parse(event(r#"{"a": true, "b": "x", "c": ["x", "y"]}"#).as_bytes())
            .unwrap();
        assert_eq!(parsed.request_id.as_deref(), Some("req-1"));
        let spec = parsed.spec;
        assert_eq!(spec.method, "GET");
        assert_eq!(spec.target, "https://example.test/a/b");
        assert_eq!(spec.headers["Accept"], "*/*");
        assert!(spec.body.is_empty());
        assert_eq!(spec.query["a"], Vec::<String>::new());
        assert_eq!(spec.query["b"], vec!["x"]);
        assert_eq!(spec.query["c"], vec!["x", "y"]);
    }

    #[test]
    fn test_decode_rejects_non_string_query() {
        let err = GatewayEnvelope.parse(event(r#"{"a": [1, 2]}"#).as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_decode_minimal_event() {
        let spec = GatewayEnvelope
            .parse(br#"{"httpMethod":"DELETE","path":"http://example.test/x","queryString":null}"#)
            .unwrap()
            .spec;
        assert_eq!(spec.method, "DELETE");
        assert!(spec.query.is_empty());
        assert!(spec.headers.is_empty());
    }

    #[test]
    fn test_request_id() {
        let inbound: EventRequest = serde_json::from_str(&event("{}")).unwrap();
        assert_eq!(GatewayEnvelope.request_id(&inbound), Some("req-1"));
        assert_eq!(inbound.request_context.source_ip, "10.0.0.1");
    }

    #[test]
    fn test_encode_keeps_flag_false() {
        let response = ResponseSpec {
            status_code: 201,
            headers: BTreeMap::new(),
            body: b"hi".to_vec(),
            body_is_encoded: true,
        };
        let bytes = GatewayEnvelope.render(response).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"isBase64Encoded": false, "statusCode": 201, "headers": {}, "body": "aGk="})
        );
    }

    #[test]
    fn test_reject() {
        let doc = GatewayEnvelope.reject(&Error::Transport("timed out".into())).unwrap();
        assert_eq!(doc.status_code, 500);
        assert!(doc.body.is_empty());

        let doc = GatewayEnvelope.reject(&Error::Decode("bad".into())).unwrap();
        assert_eq!(doc.status_code, 400);
    }
}
