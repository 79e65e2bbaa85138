use clap::Parser;
use routewatch_domain::{CliOverrides, OutputFormat};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod bootstrap;
mod di;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "routewatch")]
#[command(version)]
#[command(about = "Watch a MikroTik router's connection table and identify every destination")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Router address
    #[arg(long, value_name = "HOST")]
    ip: Option<String>,

    /// RouterOS API user
    #[arg(long)]
    user: Option<String>,

    /// RouterOS API password
    #[arg(long)]
    pass: Option<String>,

    /// RouterOS API port
    #[arg(long)]
    port: Option<u16>,

    /// Seconds between connection table polls
    #[arg(long, value_name = "SECS")]
    interval: Option<u64>,

    /// Maximum simultaneous resolutions
    #[arg(long, value_name = "N")]
    max_concurrency: Option<usize>,

    /// Seconds allowed for each WHOIS query
    #[arg(long, value_name = "SECS")]
    whois_timeout: Option<u64>,

    /// Output format (text, json)
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        router_host: cli.ip,
        router_port: cli.port,
        username: cli.user,
        password: cli.pass,
        poll_interval: cli.interval,
        max_concurrency: cli.max_concurrency,
        whois_timeout: cli.whois_timeout,
        output_format: cli.format,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting routewatch v{}", env!("CARGO_PKG_VERSION"));

    let source = match di::MonitorServices::connect_router(&config).await {
        Ok(source) => source,
        Err(e) => {
            error!(host = %config.router.address(), error = %e, "Failed to connect to router");
            return Err(e);
        }
    };

    let shutdown = CancellationToken::new();
    let services = di::MonitorServices::new(&config, source, shutdown.clone());

    info!(
        interval_secs = config.monitor.poll_interval,
        max_concurrency = services.engine.max_concurrency(),
        "Monitoring connection table"
    );

    let monitor = services.monitor.clone().start();

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for interrupt");
            return;
        }
        info!("Interrupt received, stopping monitor");
        signal_token.cancel();
    });

    if let Err(e) = monitor.await {
        error!(error = %e, "Monitor task ended abnormally");
    }

    if tokio::time::timeout(SHUTDOWN_GRACE, services.engine.wait_idle())
        .await
        .is_err()
    {
        warn!(
            active = services.engine.active_count(),
            "Resolutions still in flight at exit"
        );
    }

    let stats = services.engine.stats();
    let cache = services.cache.stats();
    info!(
        destinations = stats.seen,
        dispatched = stats.dispatched,
        completed = stats.completed,
        duplicates = stats.duplicates,
        rejected = stats.rejected,
        peak_active = stats.peak_active,
        cached = cache.entries,
        cache_hits = cache.hits,
        "Shutdown complete"
    );

    Ok(())
}
