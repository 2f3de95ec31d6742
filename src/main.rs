//! CodeMind gateway binary
//!
//! Wires configuration, the history store, the engine client, and the HTTP
//! server together.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use codemind::{
    AnalysisGateway, ApiConfig, ApiServer, GatewayConfig, HttpEngineClient, MemoryHistoryStore,
    RecordStore, SqliteHistoryStore,
};

/// Parsed command-line arguments
#[derive(Debug, Default)]
struct Args {
    config_path: Option<PathBuf>,
    port: Option<u16>,
    engine_url: Option<String>,
    memory_store: bool,
    show_help: bool,
    show_version: bool,
}

fn parse_args(args: Vec<String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut iter = args.into_iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or("--config requires a path")?;
                parsed.config_path = Some(PathBuf::from(value));
            }
            "--port" => {
                let value = iter.next().ok_or("--port requires a number")?;
                let port = value
                    .parse::<u16>()
                    .map_err(|_| format!("invalid port: {}", value))?;
                parsed.port = Some(port);
            }
            "--engine-url" => {
                let value = iter.next().ok_or("--engine-url requires a URL")?;
                parsed.engine_url = Some(value);
            }
            "--memory-store" => parsed.memory_store = true,
            "--help" => parsed.show_help = true,
            "--version" => parsed.show_version = true,
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let parsed = match parse_args(args) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if parsed.show_version {
        println!("CodeMind gateway v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if parsed.show_help {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = match GatewayConfig::load(parsed.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    // Command-line flags win over file and environment values
    if let Some(port) = parsed.port {
        config.gateway.port = port;
    }
    if let Some(engine_url) = parsed.engine_url {
        config.engine.base_url = engine_url;
    }

    let store: Arc<dyn RecordStore> = if parsed.memory_store {
        Arc::new(MemoryHistoryStore::new())
    } else {
        match SqliteHistoryStore::new(&config.store.connection_string).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                eprintln!("History store error: {}", e);
                std::process::exit(2);
            }
        }
    };

    let engine = HttpEngineClient::new(
        config.engine.base_url.clone(),
        Duration::from_secs(config.engine.request_timeout_seconds),
    )?;

    let gateway = Arc::new(AnalysisGateway::new(Arc::new(engine), store)?);

    let api_config = ApiConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    let server = ApiServer::new(api_config, gateway);
    server.start().await
}

/// Print help message
fn print_help() {
    println!(
        "CodeMind v{} - Code Analysis Gateway",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    codemind [options]");
    println!();
    println!("OPTIONS:");
    println!("    --config <path>      Configuration file (TOML)");
    println!("    --port <port>        Gateway listen port (default: 5000)");
    println!("    --engine-url <url>   Analysis engine base URL (default: http://localhost:8000)");
    println!("    --memory-store       Keep history in memory instead of SQLite");
    println!("    --version            Show version information");
    println!("    --help               Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    CODEMIND_GATEWAY_PORT             Gateway listen port");
    println!("    CODEMIND_ENGINE_URL               Engine base URL");
    println!("    CODEMIND_ENGINE_PORT              Engine port on localhost");
    println!("    CODEMIND_ENGINE_TIMEOUT_SECONDS   Engine request timeout");
    println!("    CODEMIND_STORE_CONNECTION         History database path");
    println!("    RUST_LOG                          Log filter (default: info)");
}
