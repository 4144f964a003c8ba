//! HTTP runtime adapter
//!
//! Exposes each transport as its own entry point. The runtime hands the
//! raw invocation payload to the matching route; nothing is inferred from
//! the payload itself.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{
        header::{HeaderName, HeaderValue, CONTENT_TYPE},
        StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use fcproxy_shared::envelope::to_payload;
use fcproxy_shared::protocol::MAX_PAYLOAD_SIZE;
use fcproxy_shared::{DirectEnvelope, GatewayEnvelope};

use crate::forward::Forwarder;
use crate::pipeline::{self, Failure};

/// Header carrying the failure text on gateway error responses
pub const ERROR_HEADER: &str = "x-fcproxy-error";

#[derive(Clone)]
pub struct AppState {
    forwarder: Arc<Forwarder>,
}

impl AppState {
    pub fn new(forwarder: Forwarder) -> Self {
        Self {
            forwarder: Arc::new(forwarder),
        }
    }
}

pub fn router(forwarder: Forwarder) -> Router {
    Router::new()
        .route("/invoke", post(direct_handler))
        .route("/event", post(gateway_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(MAX_PAYLOAD_SIZE))
        .with_state(AppState::new(forwarder))
}

/// Direct transport: failures are plain text with the mapped status.
async fn direct_handler(State(state): State<AppState>, payload: Bytes) -> Response {
    match pipeline::invoke(&state.forwarder, &DirectEnvelope, &payload).await {
        Ok(body) => json(StatusCode::OK, body),
        Err(Failure { error, .. }) => {
            (status(error.status_code()), error.caller_message()).into_response()
        }
    }
}

/// Gateway transport: failures carry the event response document and
/// surface the error to the runtime through the status and error header.
async fn gateway_handler(State(state): State<AppState>, payload: Bytes) -> Response {
    match pipeline::invoke(&state.forwarder, &GatewayEnvelope, &payload).await {
        Ok(body) => json(StatusCode::OK, body),
        Err(Failure { error, document }) => {
            let body = document
                .and_then(|doc| to_payload(&doc).ok())
                .unwrap_or_default();
            let message = HeaderValue::from_str(&error.caller_message())
                .unwrap_or_else(|_| HeaderValue::from_static("invocation failed"));

            let mut response = json(status(error.status_code()), body);
            response
                .headers_mut()
                .insert(HeaderName::from_static(ERROR_HEADER), message);
            response
        }
    }
}

fn json(status: StatusCode, body: Vec<u8>) -> Response {
    (status, [(CONTENT_TYPE, "application/json")], body).into_response()
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
