//! Runs in its own test binary: it sets process-wide proxy variables.

use axum::{routing::get, Router};
use fcproxy_function::{ForwardPolicy, Forwarder};
use fcproxy_shared::RequestSpec;

#[tokio::test]
async fn test_proxy_env_vars_are_ignored() {
    for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
        std::env::set_var(var, "http://127.0.0.1:1");
    }
    std::env::remove_var("NO_PROXY");
    std::env::remove_var("no_proxy");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/ok", get(|| async { "direct" }));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let forwarder = Forwarder::new(ForwardPolicy::default()).unwrap();
    let spec = RequestSpec {
        method: "GET".into(),
        target: format!("http://{}/ok", addr),
        ..Default::default()
    };

    let response = forwarder.forward(&spec).await.unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, b"direct");
}
