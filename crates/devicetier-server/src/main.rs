//! devicetier — device capability tier classification server.

use std::path::PathBuf;
use std::sync::Arc;

use devicetier_core::DeviceTierConfig;
use devicetier_server::{build_router, cli, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "--classify" | "classify" => {
                let path = args.get(2).map(PathBuf::from);
                println!("{}", cli::classify_command(path.as_deref())?);
                return Ok(());
            }
            "--tiers" | "tiers" => {
                println!("{}", cli::tiers_command()?);
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                cli::print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'devicetier help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let config = DeviceTierConfig::from_env()?;
    let addr = config.bind_addr();
    info!("CORS mode: {:?}", config.cors);

    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("devicetier server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
