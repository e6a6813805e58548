/*
 * geonet-cli - run tracing operations against a network fixture
 *
 * Usage:
 *   geonet-cli --map water.json networks
 *   geonet-cli --map water.json trace --network 1 --request trace.json
 *   geonet-cli --map water.json --config geonet.yaml isolate --network 1 --request isolate.json
 *   geonet-cli --map water.json pos-along --network 1 --request - < pos.json
 *
 * Responses are printed as JSON. The exit code is non-zero when the
 * response carries "hasError".
 *
 * Logging goes to stderr; set GEONET_LOG (e.g. GEONET_LOG=geonet_trace=debug).
 */

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use geonet_trace::adapters::memory::MapFixture;
use geonet_trace::config::ServiceConfig;
use geonet_trace::GeometricNetworkService;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Geometric network tracing over a JSON network fixture
#[derive(Debug, Parser)]
#[command(name = "geonet-cli", version, about)]
struct Cli {
    /// Map fixture: networks and layers
    #[arg(short, long)]
    map: PathBuf,

    /// Service configuration (YAML, schema v1)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List networks, or describe one
    Networks {
        #[arg(long)]
        id: Option<String>,
    },

    /// Operation descriptions
    Help,

    /// TraceNetwork
    Trace {
        #[arg(short, long, default_value = "1")]
        network: String,

        /// Request JSON file, `-` for stdin
        #[arg(short, long)]
        request: PathBuf,
    },

    /// IsolateValve
    Isolate {
        #[arg(short, long, default_value = "1")]
        network: String,

        #[arg(short, long)]
        request: PathBuf,
    },

    /// TraceNetworkPosAlong
    PosAlong {
        #[arg(short, long, default_value = "1")]
        network: String,

        #[arg(short, long)]
        request: PathBuf,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("GEONET_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn read_request(path: &Path) -> Result<Value, String> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read request from stdin: {}", e))?;
        buffer
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?
    };
    serde_json::from_str(&content).map_err(|e| format!("Invalid request JSON: {}", e))
}

fn build_service(cli: &Cli) -> Result<GeometricNetworkService, String> {
    let config = match &cli.config {
        Some(path) => ServiceConfig::from_yaml(path).map_err(|e| e.to_string())?,
        None => ServiceConfig::default(),
    };
    let catalog = MapFixture::from_path(&cli.map)
        .and_then(|fixture| fixture.to_catalog())
        .map_err(|e| e.to_string())?;
    Ok(GeometricNetworkService::new(catalog, config))
}

fn run(cli: &Cli) -> Result<Value, String> {
    let service = build_service(cli)?;
    let response = match &cli.command {
        Command::Networks { id } => service.handle_resource("GeometricNetworks", id.as_deref()),
        Command::Help => service.handle_resource("Help", None),
        Command::Trace { network, request } => {
            service.handle_operation(network, "TraceNetwork", &read_request(request)?)
        }
        Command::Isolate { network, request } => {
            service.handle_operation(network, "IsolateValve", &read_request(request)?)
        }
        Command::PosAlong { network, request } => {
            service.handle_operation(network, "TraceNetworkPosAlong", &read_request(request)?)
        }
    };
    Ok(response)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(&cli) {
        Ok(response) => {
            match serde_json::to_string_pretty(&response) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            if response.get("hasError").and_then(Value::as_bool).unwrap_or(false) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}
