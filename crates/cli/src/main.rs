use clap::{Parser, Subcommand};
use ferrous_doh_domain::CliOverrides;
use std::net::SocketAddr;
use tracing::info;

mod bootstrap;
mod commands;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-doh")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous DoH - DNS-over-HTTP gateway with per-upstream answer caching")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP listener port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream DNS server (host, host:port or host:port,secondary_port). Repeatable.
    #[arg(short = 's', long = "server", value_name = "ADDRESS")]
    servers: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Send one question to a running DoH endpoint and print the reply as JSON
    Query(commands::QueryArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        http_port: cli.port,
        bind_address: cli.bind.clone(),
        servers: cli.servers.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    if let Some(Command::Query(args)) = cli.command {
        return commands::run_query(args).await;
    }

    info!("Starting Ferrous DoH v{}", env!("CARGO_PKG_VERSION"));

    let gateway = di::GatewayServices::new(&config)?;

    let web_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.http_port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    server::start_web_server(web_addr, gateway.app_state).await?;

    info!("Server shutdown complete");
    Ok(())
}
