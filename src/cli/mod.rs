//! # Command Line Interface
//!
//! `credhub-cli` drives the library against a CredHub server: credential
//! reads and writes, certificate rotation, permissions, service-binding
//! interpolation and local configuration.

pub mod certificates;
pub mod config;
pub mod config_cmd;
pub mod credentials;
pub mod output;
pub mod permissions;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::http::StaticTokenProvider;
use crate::info::{ServerInfo, VersionInfo};
use crate::observability::{init_logging, LoggingConfig};
use crate::operations::CredHubClient;
use config::{CliConfig, ConnectionOverrides};

#[derive(Parser)]
#[command(name = "credhub-cli")]
#[command(about = "Command line client for the CredHub credential store")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging, including redacted request and response bodies
    #[arg(short, long)]
    pub verbose: bool,

    /// CredHub API URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Pre-issued bearer token
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Path to file containing a bearer token
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,

    /// OAuth2 client id for the client-credentials grant
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, global = true)]
    pub client_secret: Option<String>,

    /// UAA token endpoint
    #[arg(long, global = true)]
    pub token_uri: Option<String>,

    /// Extra CA certificate (PEM) to trust
    #[arg(long, global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Client certificate (PEM) for mutual TLS
    #[arg(long, global = true, requires = "client_key")]
    pub client_cert: Option<PathBuf>,

    /// Client private key (PEM) for mutual TLS
    #[arg(long, global = true, requires = "client_cert")]
    pub client_key: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

impl Cli {
    pub fn connection_overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            url: self.url.clone(),
            token: self.token.clone(),
            token_file: self.token_file.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            token_uri: self.token_uri.clone(),
            ca_cert: self.ca_cert.clone(),
            client_cert: self.client_cert.clone(),
            client_key: self.client_key.clone(),
            timeout: self.timeout,
            verbose: self.verbose,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get a credential by name or id
    Get(credentials::GetArgs),

    /// Set a credential to a caller-supplied value
    Set(credentials::SetArgs),

    /// Generate a credential on the server
    Generate(credentials::GenerateArgs),

    /// Regenerate a credential with its stored parameters
    Regenerate(credentials::NameArgs),

    /// Delete a credential and all its versions
    Delete(credentials::DeleteArgs),

    /// Find credentials by partial name or path
    Find(credentials::FindArgs),

    /// Replace credhub-ref entries in a VCAP_SERVICES document
    Interpolate(credentials::InterpolateArgs),

    /// Certificate management commands
    Certificates {
        #[command(subcommand)]
        command: certificates::CertificateCommands,
    },

    /// Credential permission commands
    Permissions {
        #[command(subcommand)]
        command: permissions::PermissionCommands,
    },

    /// Show server version and auth server details
    Info {
        /// Output format (json, yaml, or table)
        #[arg(short, long, default_value = "table", value_parser = ["json", "yaml", "table"])]
        output: String,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: config_cmd::ConfigCommands,
    },
}

#[derive(Serialize)]
struct InfoOutput {
    version: VersionInfo,
    info: ServerInfo,
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    initialise_logging(cli.verbose)?;

    let overrides = cli.connection_overrides();

    match cli.command {
        Commands::Config { command } => config_cmd::handle_config_command(command).await?,
        command => {
            let client = create_client(&overrides)?;
            dispatch(command, &client).await?
        }
    }

    Ok(())
}

async fn dispatch(command: Commands, client: &CredHubClient) -> anyhow::Result<()> {
    match command {
        Commands::Get(args) => credentials::handle_get(args, client).await,
        Commands::Set(args) => credentials::handle_set(args, client).await,
        Commands::Generate(args) => credentials::handle_generate(args, client).await,
        Commands::Regenerate(args) => credentials::handle_regenerate(args, client).await,
        Commands::Delete(args) => credentials::handle_delete(args, client).await,
        Commands::Find(args) => credentials::handle_find(args, client).await,
        Commands::Interpolate(args) => credentials::handle_interpolate(args, client).await,
        Commands::Certificates { command } => {
            certificates::handle_certificate_command(command, client).await
        }
        Commands::Permissions { command } => {
            permissions::handle_permission_command(command, client).await
        }
        Commands::Info { output } => {
            let info = client.info();
            let result = InfoOutput { version: info.version().await?, info: info.server_info().await? };
            output::print_output(&result, &output, |r| {
                output::print_table_header(&[("Key", 15), ("Value", 50)]);
                println!("{:<15} {}", "version", r.version.version);
                println!("{:<15} {}", "app", r.info.app.name);
                println!("{:<15} {}", "auth server", r.info.auth_server.url);
                println!();
            })
        }
        Commands::Config { command } => config_cmd::handle_config_command(command).await,
    }
}

/// Build a client from flags, ~/.credhub/config.toml and the environment
fn create_client(overrides: &ConnectionOverrides) -> anyhow::Result<CredHubClient> {
    let config = CliConfig::load()?;
    let properties = config.resolve_properties(overrides);
    let client = CredHubClient::new(&properties)?;

    Ok(match config.resolve_token(overrides)? {
        Some(token) => client.with_token_provider(Arc::new(StaticTokenProvider::new(token))),
        None => client,
    })
}

fn initialise_logging(verbose: bool) -> anyhow::Result<()> {
    let mut logging = LoggingConfig::from_env();
    if verbose {
        logging = logging.with_level("credhub=trace,info");
    }
    // A subscriber may already be installed (e.g. integration tests).
    init_logging(&logging)?;
    Ok(())
}
