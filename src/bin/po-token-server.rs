use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use tracing::{info, warn};

use po_token_server::cache::store::CredentialStore;
use po_token_server::config::settings::{
    MetricsConfig, ServerConfig, Settings, TokenConfig, UpstreamConfig,
};
use po_token_server::generator::invoker::Invoker;
use po_token_server::generator::upstream::UpstreamGenerator;
use po_token_server::helpers::clock::system_clock;
use po_token_server::server;
use po_token_server::utils::constants::{
    DEFAULT_GENERATION_TIMEOUT_SECS, DEFAULT_HOST, DEFAULT_METRICS_PATH, DEFAULT_PORT,
    DEFAULT_TOKEN_TTL_SECS,
};
use po_token_server::utils::logging::{self, LogLevel};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port the token API listens on
    #[arg(short, long, env = "PO_TOKEN_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
    #[arg(long, env = "PO_TOKEN_HOST", default_value = DEFAULT_HOST)]
    host: String,
    /// Endpoint of the sidecar embedding the platform SDK
    #[arg(long, env = "UPSTREAM_URL", default_value = "http://127.0.0.1:8080/generate")]
    upstream_url: String,
    /// How long a generated token is served before regeneration
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value_t = DEFAULT_TOKEN_TTL_SECS)]
    token_ttl_seconds: u64,
    /// Upper bound on one generation call
    #[arg(long, env = "GENERATION_TIMEOUT_SECONDS", default_value_t = DEFAULT_GENERATION_TIMEOUT_SECS)]
    generation_timeout_seconds: u64,
    #[arg(long, env = "METRICS_ENABLED")]
    metrics: bool,
    #[arg(long, env = "METRICS_PATH", default_value = DEFAULT_METRICS_PATH)]
    metrics_path: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read env / CLI, init logging
    // -------------------------------

    let args = Args::parse();
    let logging_config = logging::resolve(args.log_level);
    logging::init_logging(&logging_config);

    let settings = Settings {
        server: ServerConfig { host: args.host.clone(), port: args.port },
        token: TokenConfig {
            ttl: Duration::from_secs(args.token_ttl_seconds),
            generation_timeout: Duration::from_secs(args.generation_timeout_seconds),
        },
        upstream: UpstreamConfig { url: args.upstream_url.clone() },
        metrics: MetricsConfig { path: args.metrics_path.clone(), is_enabled: args.metrics },
        logging: logging_config,
    };

    // -------------------------------
    // 2. Build store, upstream generator, single-flight invoker
    // -------------------------------

    let client = Client::new();
    let generator = UpstreamGenerator::new(client, settings.upstream.url.clone());
    let store = CredentialStore::new();
    let invoker = Invoker::new(
        generator,
        store,
        system_clock(),
        settings.token.ttl,
        settings.token.generation_timeout,
    );

    // -------------------------------
    // 3. Warm the cache, best effort
    // -------------------------------

    let warmup = invoker.clone();
    tokio::spawn(async move {
        info!("warming PO token cache");
        if let Err(err) = warmup.ensure_fresh().await {
            warn!("initial token generation failed, will retry on demand: {}", err);
        }
    });

    // -------------------------------
    // 4. Serve the token API
    // -------------------------------

    info!("Service starting...");
    server::server::start(&settings, invoker).await?;

    Ok(())
}
