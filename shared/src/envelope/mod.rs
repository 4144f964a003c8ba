//! Transport envelopes
//!
//! An [`Envelope`] is the codec for one inbound/outbound transport. Each
//! one only translates between its wire documents and the canonical
//! [`RequestSpec`]/[`ResponseSpec`]; building and forwarding the request is
//! shared by all of them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, RequestSpec, ResponseSpec, Result};

mod direct;
mod gateway;

pub use direct::{DirectEnvelope, DirectRequest, DirectResponse};
pub use gateway::{EventRequest, EventResponse, GatewayEnvelope, Identity, RequestContext, BASE64_FLAG};

/// Canonical request plus the caller-side request id, if any
#[derive(Debug, Clone)]
pub struct Parsed {
    pub spec: RequestSpec,
    pub request_id: Option<String>,
}

/// Codec for one transport variant
pub trait Envelope {
    /// Inbound document
    type Inbound: DeserializeOwned;
    /// Outbound document
    type Outbound: Serialize;

    /// Short transport name used in logs
    const NAME: &'static str;

    /// Value of [`ResponseSpec::body_is_encoded`] on rendered responses
    const BODY_IS_ENCODED: bool;

    /// Translate an inbound document into a canonical request.
    fn decode(&self, inbound: Self::Inbound) -> Result<RequestSpec>;

    /// Translate an origin response into the outbound document. The body
    /// is always emitted as base64 text.
    fn encode(&self, response: ResponseSpec) -> Self::Outbound;

    /// Envelope-shaped document describing a failure, if the transport
    /// has one. Transports without one report failures as plain text.
    fn reject(&self, _error: &Error) -> Option<Self::Outbound> {
        None
    }

    /// Caller-side request id carried by the inbound document, if any.
    fn request_id<'a>(&self, _inbound: &'a Self::Inbound) -> Option<&'a str> {
        None
    }

    /// Parse raw payload bytes and decode them.
    fn parse(&self, payload: &[u8]) -> Result<Parsed> {
        let inbound: Self::Inbound = serde_json::from_slice(payload)?;
        let request_id = self.request_id(&inbound).map(str::to_string);
        Ok(Parsed {
            spec: self.decode(inbound)?,
            request_id,
        })
    }

    /// Stamp the envelope's encoding flag, encode, and serialize.
    fn render(&self, mut response: ResponseSpec) -> Result<Vec<u8>> {
        response.body_is_encoded = Self::BODY_IS_ENCODED;
        to_payload(&self.encode(response))
    }
}

/// Serialize an outbound document.
pub fn to_payload<T: Serialize>(document: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(document).map_err(|e| Error::Encode(e.to_string()))
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
