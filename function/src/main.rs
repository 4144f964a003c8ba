use anyhow::{Context, Result};
use clap::Parser;
use fcproxy_function::{server, FcProxyConfig, Forwarder};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fcproxy")]
#[command(author = "FcProxy Team")]
#[command(version = "0.1.0")]
#[command(about = "HTTP forwarding function for cloud function runtimes", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port the function runtime delivers invocations to
    #[arg(short, long, env = "FC_SERVER_PORT", default_value_t = 9000)]
    port: u16,

    /// Path to fcproxy.yml (defaults to ./fcproxy.yml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "fcproxy=debug,fcproxy_function=debug"
    } else {
        "fcproxy=info,fcproxy_function=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = match cli.config.or_else(FcProxyConfig::find_config) {
        Some(path) => {
            info!("Loading config from {}", path.display());
            FcProxyConfig::load(&path)?
        }
        None => FcProxyConfig::default(),
    };

    let forwarder = Forwarder::new(config.forward)?;
    let policy = forwarder.policy();
    info!(
        "Outbound policy: timeout {}s, redirects disabled, accept invalid certs: {}, forward query: {}",
        policy.timeout_secs, policy.accept_invalid_certs, policy.forward_query
    );

    let app = server::router(forwarder);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", cli.host, cli.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("FcProxy listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down...");
        })
        .await?;
    Ok(())
}
