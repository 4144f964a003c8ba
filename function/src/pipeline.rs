//! Invocation pipeline
//!
//! decode -> build -> forward -> encode, generic over the transport
//! envelope. Every failure ends the invocation; nothing is retried.

use fcproxy_shared::{Envelope, Error, Result};
use tracing::{debug, warn};

use crate::forward::Forwarder;

/// A failed invocation and the envelope's failure document, if any
#[derive(Debug)]
pub struct Failure<T> {
    pub error: Error,
    pub document: Option<T>,
}

/// Serialized outbound payload, or the failure to report
pub type Invocation<T> = std::result::Result<Vec<u8>, Failure<T>>;

/// Run one invocation through `envelope`.
pub async fn invoke<E: Envelope>(
    forwarder: &Forwarder,
    envelope: &E,
    payload: &[u8],
) -> Invocation<E::Outbound> {
    run(forwarder, envelope, payload).await.map_err(|error| {
        warn!("[{}] invocation failed ({}): {}", E::NAME, error.status_code(), error);
        Failure {
            document: envelope.reject(&error),
            error,
        }
    })
}

async fn run<E: Envelope>(forwarder: &Forwarder, envelope: &E, payload: &[u8]) -> Result<Vec<u8>> {
    let parsed = envelope.parse(payload)?;
    if let Some(id) = &parsed.request_id {
        debug!("[{}] request id {}", E::NAME, id);
    }

    let response = forwarder.forward(&parsed.spec).await?;
    envelope.render(response)
}
