use clap::Parser;
use mimalloc::MiMalloc;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use webless_domain::CliOverrides;
use webless_infrastructure::jobs::CacheSweepJob;

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "webless-dns")]
#[command(version)]
#[command(about = "Webless DNS - website-existence verdicts for mail filters")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting Webless DNS v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config)?;

    let sweep_token = CancellationToken::new();
    let sweep_job = Arc::new(
        CacheSweepJob::new(services.cache.clone())
            .with_interval(config.cache.sweep_interval_secs)
            .with_cancellation(sweep_token.clone()),
    );
    sweep_job.start().await;

    let dns_addr = format!("{}:{}", config.server.bind_address, config.server.dns_port);
    let handler = services.handler.clone();
    let dns_task = tokio::spawn(async move {
        if let Err(e) = server::start_dns_server(dns_addr, handler).await {
            error!(error = %e, "DNS server error");
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    dns_task.abort();
    sweep_token.cancel();
    services.cache.shutdown().await;

    info!("Server shutdown complete");
    Ok(())
}
