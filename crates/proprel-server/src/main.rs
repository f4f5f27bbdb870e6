//! Proprel server binary
//!
//! Starts the HTTP server for validation and recommendation requests.

use proprel_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using defaults");
        eprintln!("Usage: proprel-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default()
    };

    start_server(config.with_env_overrides()).await?;

    Ok(())
}

fn print_help() {
    println!("Proprel Server - Property Relationship Engine over HTTP");
    println!();
    println!("USAGE:");
    println!("    proprel-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    proprel-server --config config/server.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default: '127.0.0.1')");
    println!("    - bind_port: Port number (default: 8080)");
    println!("    - corpus_path: Relationship corpus file or directory");
    println!("    - [engine]: Penalty weights and suggestion limits");
    println!();
    println!("ENVIRONMENT:");
    println!("    PROPREL_CORPUS     Corpus path used when the config names none");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
}
