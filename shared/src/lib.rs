//! FcProxy Shared Library
//!
//! Canonical request/response types, envelope codecs, and the error
//! taxonomy shared by every transport of the forwarding function.

pub mod envelope;
pub mod error;
pub mod headers;
pub mod protocol;

pub use envelope::{DirectEnvelope, Envelope, GatewayEnvelope};
pub use error::{Error, Result};
pub use protocol::{QueryValue, RequestSpec, ResponseSpec};
