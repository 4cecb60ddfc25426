mod server;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use streamauth_core::{bootstrap::load_config, logging, Config};

use server::StreamAuthServer;

#[derive(Parser, Debug)]
#[command(name = "streamauth")]
#[command(about = "Mock round-trip authentication backend for streaming servers", long_about = None)]
struct Args {
    /// Config file (YAML, TOML or JSON)
    #[arg(long, short, env = "STREAMAUTH_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Listen host, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides the config file
    #[arg(long)]
    port: Option<u16>,

    /// Resource URL returned to publisher and websocket clients
    #[arg(long)]
    url_resource: Option<String>,

    /// Read and log the `token` field of incoming requests
    #[arg(long)]
    use_token: bool,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url_resource) = self.url_resource {
            config.gateway.url_resource = url_resource;
        }
        if self.use_token {
            config.gateway.use_token = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load configuration, then let CLI flags override it
    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config);

    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        return Err(streamauth_core::Error::InvalidConfig(errors).into());
    }

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;
    info!("StreamAuth server starting...");
    info!(
        url_resource = %config.gateway.url_resource,
        use_token = config.gateway.use_token,
        "Credential gateway configured"
    );

    // 3. Serve until shutdown
    StreamAuthServer::new(config).start().await
}
