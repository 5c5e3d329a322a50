use clap::Parser;
use kubezone_domain::CliOverrides;
use kubezone_infrastructure::dns::ExternalDnsHandler;
use kubezone_jobs::{ClusterSyncJob, JobRunner};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "kubezone")]
#[command(version)]
#[command(about = "Authoritative DNS for externally exposed Kubernetes services")]
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

    /// Cluster snapshot file
    #[arg(short = 's', long, value_name = "FILE")]
    snapshot: Option<String>,

    /// Zone to serve (repeatable, replaces the configured zones)
    #[arg(short = 'z', long = "zone", value_name = "ZONE")]
    zones: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        snapshot_path: cli.snapshot.clone(),
        log_level: cli.log_level.clone(),
        zones: cli.zones.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    if let Some(path) = cli.write_config.as_deref() {
        config.save(path)?;
        println!("Configuration written to {}", path);
        return Ok(());
    }

    bootstrap::init_logging(&config);

    info!("Starting kubezone v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();

    let cluster = di::ClusterServices::new(&config).await;
    let use_cases = di::UseCases::new(&config, &cluster, shutdown.clone())?;

    let jobs = JobRunner::new()
        .with_cluster_sync(ClusterSyncJob::new(
            cluster.sync.clone(),
            config.cluster.sync_interval_secs,
        ))
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let dns_addr = format!("{}:{}", config.server.bind_address, config.server.dns_port);
    let dns_handler = ExternalDnsHandler::new(use_cases.answer_query, use_cases.transfer_zone);
    let tcp_timeout = Duration::from_secs(config.server.tcp_timeout_secs);

    let dns_shutdown = shutdown.clone();
    let dns_task = tokio::spawn(async move {
        if let Err(e) =
            server::start_dns_server(dns_addr, dns_handler, tcp_timeout, dns_shutdown).await
        {
            error!(error = %e, "DNS server error");
        }
    });

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        }
        _ = shutdown.cancelled() => {}
    }

    shutdown.cancel();
    let _ = dns_task.await;
    for job in jobs {
        let _ = job.await;
    }

    info!("Server shutdown complete");
    Ok(())
}
