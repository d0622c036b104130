use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use users_info::{config::UsersInfoConfig, UsersInfo};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Users Server - in-memory user registry over HTTP
#[derive(Parser)]
#[command(name = "users-server")]
#[command(about = "Users Server - in-memory user registry over HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        port: cli.port,
        verbose: cli.verbose,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config
        .logging
        .clone()
        .unwrap_or_else(runtime::config::default_logging_config);
    let base_dir = std::env::current_dir().context("Cannot resolve working directory")?;
    runtime::logging::init_logging_from_config(&logging_config, &base_dir);
    tracing::info!("Users Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Module instances assembled from the `modules` section.
struct Modules {
    ingress: ApiIngress,
    addr: SocketAddr,
}

fn build_modules(config: &AppConfig) -> Result<Modules> {
    let users_cfg: UsersInfoConfig = config.module_config("users_info")?;
    let mut ingress_cfg: ApiIngressConfig = config.module_config("api_ingress")?;
    if config.server.timeout_sec > 0 {
        ingress_cfg.request_timeout_sec = config.server.timeout_sec;
    }

    let users = UsersInfo::new(users_cfg)?;
    let mut ingress = ApiIngress::new(ingress_cfg);
    ingress.register_module(Arc::new(users));

    let bind = format!("{}:{}", config.server.host, config.server.port);
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address '{bind}'"))?;

    Ok(Modules { ingress, addr })
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");
    let Modules { ingress, addr } = build_modules(&config)?;

    let shutdown = async {
        if let Err(e) = api_ingress::shutdown::wait_for_shutdown().await {
            tracing::error!(error = %e, "Signal handling failed, shutting down");
        }
    };
    ingress.serve(addr, shutdown).await?;

    tracing::info!("Users Server stopped");
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // Building the modules runs every typed section through its validation
    let Modules { ingress, addr } = build_modules(&config)?;
    ingress.build_router()?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Listening address: {addr}");
    println!("{}", config.to_yaml()?);

    Ok(())
}
