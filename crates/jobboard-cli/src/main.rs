//! jobboard CLI
//!
//! Command-line interface for loading job-board resources through the local
//! proxy, with retry and remote fallback

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use jobboard_api::{Params, Resource};
use jobboard_client::{ClientConfig, JobBoardClient, ResourceLoader, normalize};

#[derive(Parser, Debug)]
#[command(name = "jobboard", version)]
#[command(about = "Load job-board resources with retry and fallback", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the local proxy
    #[arg(long, global = true)]
    local_origin: Option<String>,

    /// Base URL used once local attempts are exhausted
    #[arg(long, global = true)]
    remote_origin: Option<String>,

    /// Per-attempt timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Retries after the first attempt
    #[arg(long, global = true)]
    retries: Option<u32>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a collection (jobs, newjobs, hirings, news, applications, ...)
    List {
        /// Endpoint under /api
        endpoint: String,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Page number
        #[arg(long)]
        page: Option<u64>,

        /// Items per page
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Load a single item by id
    Get {
        /// Endpoint under /api
        endpoint: String,

        /// Item id
        id: String,
    },

    /// Normalize a JSON payload read from a file or stdin
    Normalize {
        /// JSON file (stdin when omitted)
        file: Option<PathBuf>,

        /// Message used when the payload carries none
        #[arg(long, default_value = "OK")]
        message: String,
    },
}

fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty parameter name in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let config = match &cli.config {
        Some(path) => ClientConfig::load(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?
            .with_env(|key| std::env::var(key).ok()),
        None => ClientConfig::load_default()?,
    };

    Ok(apply_flags(cli, config))
}

/// Command-line flags win over file and environment settings
fn apply_flags(cli: &Cli, mut config: ClientConfig) -> ClientConfig {
    if let Some(origin) = &cli.local_origin {
        config.local_origin.clone_from(origin);
    }
    if let Some(origin) = &cli.remote_origin {
        config.remote_origin.clone_from(origin);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(retries) = cli.retries {
        config.retries = retries;
    }

    config
}

/// Known resources get their presets; anything else starts empty
fn loader_for(client: &JobBoardClient, endpoint: &str) -> ResourceLoader {
    match endpoint.parse::<Resource>() {
        Ok(resource) => client.resource(resource),
        Err(_) => client.loader(endpoint, Params::new()),
    }
}

fn list_params(params: Vec<(String, String)>, page: Option<u64>, limit: Option<u64>) -> Params {
    let mut map: Params = params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    if let Some(page) = page {
        map.insert("page".into(), page.into());
    }
    if let Some(limit) = limit {
        map.insert("limit".into(), limit.into());
    }
    map
}

fn read_payload(file: Option<&PathBuf>) -> Result<Value> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "payload is not valid JSON, treating it as empty");
        Value::Null
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let success = match &cli.command {
        Commands::Normalize { file, message } => {
            let payload = read_payload(file.as_ref())?;
            let normalized = normalize(&payload, message);
            println!("{}", serde_json::to_string_pretty(&normalized)?);
            normalized.success
        }
        Commands::List {
            endpoint,
            params,
            page,
            limit,
        } => {
            let client = JobBoardClient::new(&load_config(&cli)?)?;
            let params = list_params(params.clone(), *page, *limit);
            let result = loader_for(&client, endpoint).load::<Value>(&params).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            result.success
        }
        Commands::Get { endpoint, id } => {
            let client = JobBoardClient::new(&load_config(&cli)?)?;
            let result = loader_for(&client, endpoint)
                .load_item::<Value>(id, None)
                .await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            result.success
        }
    };

    if !success {
        std::process::exit(1);
    }

    Ok(())
}
