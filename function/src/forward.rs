//! Outbound request building and forwarding
//!
//! Shared by every envelope: a [`RequestSpec`] goes in, a [`ResponseSpec`]
//! comes out. One client is built from the [`ForwardPolicy`] and reused
//! across invocations; the policy is identical for every request.
//! Outbound calls always go straight to the origin: proxy environment
//! variables are ignored.

use std::time::Instant;

use anyhow::{Context, Result as AnyResult};
use fcproxy_shared::{headers, Error, RequestSpec, ResponseSpec, Result};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{redirect, Client, Method, Request, Url};
use tracing::{debug, info, warn};

use crate::config::ForwardPolicy;

/// Issues outbound requests under a fixed policy
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    policy: ForwardPolicy,
}

impl Forwarder {
    pub fn new(policy: ForwardPolicy) -> AnyResult<Self> {
        let client = Client::builder()
            .timeout(policy.timeout())
            .redirect(redirect::Policy::none())
            .no_proxy()
            .danger_accept_invalid_certs(policy.accept_invalid_certs)
            .build()
            .context("Failed to build outbound HTTP client")?;

        if policy.accept_invalid_certs {
            warn!("Origin certificate validation is disabled");
        }

        Ok(Self { client, policy })
    }

    pub fn policy(&self) -> &ForwardPolicy {
        &self.policy
    }

    /// Turn a request description into an outbound request.
    ///
    /// Headers are appended, so names differing only in case are all sent.
    pub fn build(&self, spec: &RequestSpec) -> Result<Request> {
        let method = Method::from_bytes(spec.method().as_bytes())
            .map_err(|e| Error::Build(format!("invalid method {:?}: {}", spec.method(), e)))?;

        let mut url = Url::parse(&spec.target)
            .map_err(|e| Error::Build(format!("invalid target {:?}: {}", spec.target, e)))?;

        if self.policy.forward_query && !spec.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, values) in &spec.query {
                if values.is_empty() {
                    pairs.append_key_only(key);
                }
                for value in values {
                    pairs.append_pair(key, value);
                }
            }
        }

        let mut request = Request::new(method, url);

        for (name, value) in &spec.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::Build(format!("invalid header name {:?}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| Error::Build(format!("invalid value for header {:?}: {}", name, e)))?;
            request.headers_mut().append(header_name, header_value);
        }

        if !spec.body.is_empty() {
            *request.body_mut() = Some(spec.body.clone().into());
        }

        Ok(request)
    }

    /// Execute a built request and buffer the full response.
    pub async fn send(&self, request: Request) -> Result<ResponseSpec> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status_code = response.status().as_u16();
        let headers = headers::collapse(response.headers().iter().map(|(name, value)| {
            (name.as_str(), String::from_utf8_lossy(value.as_bytes()).into_owned())
        }));

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Read(e.to_string()))?;

        Ok(ResponseSpec {
            status_code,
            headers,
            body: body.to_vec(),
            body_is_encoded: false,
        })
    }

    /// Build and send. Dropping the returned future aborts the call.
    pub async fn forward(&self, spec: &RequestSpec) -> Result<ResponseSpec> {
        let request = self.build(spec)?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!("Forwarding {} {}", method, url);

        let start = Instant::now();
        match self.send(request).await {
            Ok(response) => {
                info!(
                    "{} {} -> {} ({} bytes, {}ms)",
                    method,
                    url,
                    response.status_code,
                    response.body.len(),
                    start.elapsed().as_millis()
                );
                Ok(response)
            }
            Err(e) => {
                warn!("{} {} failed after {}ms: {}", method, url, start.elapsed().as_millis(), e);
                Err(e)
            }
        }
    }
}
