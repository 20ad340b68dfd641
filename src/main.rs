use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fastly_syslog::config::Config;
use fastly_syslog::resource::{
    self, CreateSyslogInput, DeleteSyslogInput, FormatVersion, GetSyslogInput, ListSyslogsInput,
    MessageType, Placement, UpdateSyslogInput,
};
use fastly_syslog::{format_error, FastlyClient};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Manage Fastly syslog logging endpoints
#[derive(Parser, Debug)]
#[command(name = "fastly-syslog", version, about, long_about = None)]
struct Args {
    /// API endpoint (defaults to FASTLY_API_URL, then the config file, then production)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// API token (defaults to FASTLY_API_TOKEN, then the config file)
    #[arg(long, global = true)]
    api_token: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> Option<&'static str> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some("error"),
            LogLevel::Warn => Some("warn"),
            LogLevel::Info => Some("info"),
            LogLevel::Debug => Some("debug"),
            LogLevel::Trace => Some("trace"),
        }
    }
}

/// Service version the endpoint belongs to
#[derive(clap::Args, Debug)]
struct Scope {
    /// Service ID (defaults to the last one used)
    #[arg(short, long)]
    service_id: Option<String>,

    /// Service version number
    #[arg(long)]
    service_version: u32,
}

/// Endpoint settings; anything left out is not sent
#[derive(clap::Args, Debug)]
struct Fields {
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    hostname: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    use_tls: Option<bool>,
    /// PEM file with the CA certificate
    #[arg(long)]
    tls_ca_cert: Option<PathBuf>,
    #[arg(long)]
    tls_hostname: Option<String>,
    /// PEM file with the client certificate
    #[arg(long)]
    tls_client_cert: Option<PathBuf>,
    /// PEM file with the client key
    #[arg(long)]
    tls_client_key: Option<PathBuf>,
    /// Token prefixed to each log line
    #[arg(long)]
    token: Option<String>,
    #[arg(long)]
    format: Option<String>,
    #[arg(long)]
    format_version: Option<FormatVersion>,
    #[arg(long)]
    message_type: Option<MessageType>,
    #[arg(long)]
    placement: Option<Placement>,
    #[arg(long)]
    response_condition: Option<String>,
}

/// Fields with PEM files already read
struct LoadedFields {
    fields: Fields,
    tls_ca_cert: Option<String>,
    tls_client_cert: Option<String>,
    tls_client_key: Option<String>,
}

impl Fields {
    fn load(self) -> Result<LoadedFields> {
        Ok(LoadedFields {
            tls_ca_cert: read_pem(self.tls_ca_cert.as_deref())?,
            tls_client_cert: read_pem(self.tls_client_cert.as_deref())?,
            tls_client_key: read_pem(self.tls_client_key.as_deref())?,
            fields: self,
        })
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List syslog endpoints of a service version
    List {
        #[command(flatten)]
        scope: Scope,
    },
    /// Show one syslog endpoint
    Get {
        #[command(flatten)]
        scope: Scope,
        name: String,
    },
    /// Create a syslog endpoint
    Create {
        #[command(flatten)]
        scope: Scope,
        name: String,
        #[command(flatten)]
        fields: Fields,
    },
    /// Update a syslog endpoint
    Update {
        #[command(flatten)]
        scope: Scope,
        name: String,
        /// Rename the endpoint
        #[arg(long)]
        new_name: Option<String>,
        #[command(flatten)]
        fields: Fields,
    },
    /// Delete a syslog endpoint
    Delete {
        #[command(flatten)]
        scope: Scope,
        name: String,
    },
}

impl Command {
    fn scope(&self) -> &Scope {
        match self {
            Command::List { scope }
            | Command::Get { scope, .. }
            | Command::Create { scope, .. }
            | Command::Update { scope, .. }
            | Command::Delete { scope, .. } => scope,
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = match (std::env::var("RUST_LOG").ok(), level.as_filter()) {
        (Some(env), _) if !env.is_empty() => EnvFilter::new(env),
        (_, Some(level)) => EnvFilter::new(level),
        _ => return Ok(None),
    };

    let log_path = get_log_path();
    let file = open_log_file(&log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("fastly-syslog started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn open_log_file(log_path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("fastly-syslog").join("fastly-syslog.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".fastly-syslog").join("fastly-syslog.log");
    }
    PathBuf::from("fastly-syslog.log")
}

fn read_pem(path: Option<&Path>) -> Result<Option<String>> {
    path.map(|p| {
        std::fs::read_to_string(p)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Failed to read {:?}", p))
    })
    .transpose()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();
    let endpoint = config.effective_endpoint(args.endpoint.as_deref());
    let token = config.effective_token(args.api_token.as_deref())?;
    let client = FastlyClient::with_endpoint(&endpoint, token)
        .with_context(|| format!("Failed to create client for {}", endpoint))?;

    let scope = args.command.scope();
    let service_id = config
        .effective_service_id(scope.service_id.as_deref())
        .unwrap_or_default();
    let service_version = scope.service_version;

    tracing::info!("Using endpoint: {}, service: {}", endpoint, service_id);

    match run(&client, args.command, service_id.clone(), service_version).await {
        Ok(()) => {
            if config.service_id.as_deref() != Some(service_id.as_str()) {
                if let Err(e) = config.set_service_id(&service_id) {
                    tracing::warn!("Failed to save config: {}", e);
                }
            }
            Ok(())
        }
        Err(err) => {
            tracing::error!("Command failed: {:?}", err);
            match err.downcast_ref::<fastly_syslog::Error>() {
                Some(api_err) => eprintln!("Error: {}", format_error(api_err)),
                None => eprintln!("Error: {err:#}"),
            }
            // exit() skips destructors; flush the log writer first
            drop(log_guard);
            std::process::exit(1);
        }
    }
}

async fn run(
    client: &FastlyClient,
    command: Command,
    service_id: String,
    service_version: u32,
) -> Result<()> {
    match command {
        Command::List { .. } => {
            let input = ListSyslogsInput {
                service_id,
                service_version,
            };
            print_json(&resource::list_syslogs(client, &input).await?)
        }
        Command::Get { name, .. } => {
            let input = GetSyslogInput {
                service_id,
                service_version,
                name,
            };
            print_json(&resource::get_syslog(client, &input).await?)
        }
        Command::Create { name, fields, .. } => {
            let loaded = fields.load()?;
            let f = loaded.fields;
            let input = CreateSyslogInput {
                service_id,
                service_version,
                name: Some(name),
                address: f.address,
                hostname: f.hostname,
                port: f.port,
                use_tls: f.use_tls,
                tls_ca_cert: loaded.tls_ca_cert,
                tls_hostname: f.tls_hostname,
                tls_client_cert: loaded.tls_client_cert,
                tls_client_key: loaded.tls_client_key,
                token: f.token,
                format: f.format,
                format_version: f.format_version,
                message_type: f.message_type,
                placement: f.placement,
                response_condition: f.response_condition,
            };
            print_json(&resource::create_syslog(client, &input).await?)
        }
        Command::Update {
            name,
            new_name,
            fields,
            ..
        } => {
            let loaded = fields.load()?;
            let f = loaded.fields;
            let input = UpdateSyslogInput {
                service_id,
                service_version,
                name,
                new_name,
                address: f.address,
                hostname: f.hostname,
                port: f.port,
                use_tls: f.use_tls,
                tls_ca_cert: loaded.tls_ca_cert,
                tls_hostname: f.tls_hostname,
                tls_client_cert: loaded.tls_client_cert,
                tls_client_key: loaded.tls_client_key,
                token: f.token,
                format: f.format,
                format_version: f.format_version,
                message_type: f.message_type,
                placement: f.placement,
                response_condition: f.response_condition,
            };
            print_json(&resource::update_syslog(client, &input).await?)
        }
        Command::Delete { name, .. } => {
            let input = DeleteSyslogInput {
                service_id,
                service_version,
                name,
            };
            resource::delete_syslog(client, &input).await?;
            print_json(&serde_json::json!({ "status": "ok" }))
        }
    }
}
