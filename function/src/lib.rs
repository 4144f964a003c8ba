//! FcProxy function runtime
//!
//! Forwards HTTP requests described by an inbound envelope to an
//! arbitrary origin and returns the origin's response in the matching
//! outbound envelope.

pub mod config;
pub mod forward;
pub mod pipeline;
pub mod server;

pub use config::{FcProxyConfig, ForwardPolicy};
pub use forward::Forwarder;
