//! Canonical request/response types for FcProxy.
//!
//! Every envelope decodes into [`RequestSpec`] and encodes from
//! [`ResponseSpec`]; nothing here knows about a particular transport.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Maximum inbound payload size (16 MB)
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Method used when the caller leaves it empty
pub const DEFAULT_METHOD: &str = "GET";

/// Outbound request to issue against the origin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSpec {
    /// HTTP verb, passed through verbatim
    pub method: String,
    /// Absolute URL of the origin resource
    pub target: String,
    /// Raw body bytes (already base64-decoded)
    pub body: Vec<u8>,
    /// Header name to value, case as supplied
    pub headers: BTreeMap<String, String>,
    /// Query parameters (gateway transport only)
    pub query: BTreeMap<String, Vec<String>>,
}

impl RequestSpec {
    /// Effective method, falling back to GET when none was given.
    pub fn method(&self) -> &str {
        if self.method.is_empty() {
            DEFAULT_METHOD
        } else {
            &self.method
        }
    }
}

/// Response captured from the origin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSpec {
    pub status_code: u16,
    /// First value observed per header name
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    /// Value reported to the caller for "body is base64 text". Set by the
    /// envelope when rendering; raw origin responses carry `false`.
    pub body_is_encoded: bool,
}

impl ResponseSpec {
    /// Body as standard base64 text
    pub fn encoded_body(&self) -> String {
        encode_body(&self.body)
    }
}

/// One query-string value as emitted by the API gateway.
///
/// The gateway sends `true` for a key without a value, a plain string for
/// a single value, and an array for repeated keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Flag(bool),
    Single(String),
    Many(Vec<String>),
}

impl QueryValue {
    pub fn into_values(self) -> Vec<String> {
        match self {
            QueryValue::Flag(_) => Vec::new(),
            QueryValue::Single(value) => vec![value],
            QueryValue::Many(values) => values,
        }
    }
}

/// Decode a standard base64 body. Empty text is an empty body.
pub fn decode_body(encoded: &str) -> Result<Vec<u8>> {
    Ok(B64.decode(encoded)?)
}

/// Encode body bytes as standard base64 text
pub fn encode_body(body: &[u8]) -> String {
    B64.encode(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> std::result::Result<BTreeMap<String, QueryValue>, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_query_flag_is_empty() {
        let mut q = parse(r#"{"a": true}"#).unwrap();
        assert_eq!(q.remove("a").unwrap().into_values(), Vec::<String>::new());

        let mut q = parse(r#"{"a": false}"#).unwrap();
        assert!(q.remove("a").unwrap().into_values().is_empty());
    }

    #[test]
    fn test_query_single_and_many() {
        let mut q = parse(r#"{"a": "x", "b": ["x", "y"], "c": []}"#).unwrap();
        assert_eq!(q.remove("a").unwrap().into_values(), vec!["x"]);
        assert_eq!(q.remove("b").unwrap().into_values(), vec!["x", "y"]);
        assert!(q.remove("c").unwrap().into_values().is_empty());
    }

    #[test]
    fn test_query_rejects_other_shapes() {
        assert!(parse(r#"{"a": [1, 2]}"#).is_err());
        assert!(parse(r#"{"a": ["x", 2]}"#).is_err());
        assert!(parse(r#"{"a": 7}"#).is_err());
        assert!(parse(r#"{"a": null}"#).is_err());
        assert!(parse(r#"{"a": {"b": "c"}}"#).is_err());
    }

    #[test]
    fn test_body_base64() {
        assert_eq!(decode_body("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_body("aGk=").unwrap(), b"hi");
        assert_eq!(encode_body(b"hi"), "aGk=");

        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(decode_body(&encode_body(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_invalid_base64_is_decode_error() {
        for bad in ["not base64!", "a===", "aGk=\n"] {
            match decode_body(bad) {
                Err(crate::Error::Decode(_)) => {}
                other => panic!("expected decode error for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_empty_method_defaults_to_get() {
        let spec = RequestSpec::default();
        assert_eq!(spec.method(), "GET");

        let spec = RequestSpec { method: "PROPFIND".into(), ..Default::default() };
        assert_eq!(spec.method(), "PROPFIND");
    }
}
