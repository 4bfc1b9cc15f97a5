//! Credential CLI commands
//!
//! get, set, generate, regenerate, delete, find and interpolate.

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use std::path::{Path, PathBuf};

use super::output::{print_output, print_table_header, truncate};
use crate::credential::{
    CertificateCredential, CertificateParameters, CredentialDetails, CredentialName,
    CredentialRequest, CredentialSummary, CredentialType, CredentialValue, GenerationParameters,
    JsonCredential, KeyLength, ParametersRequest, PasswordCredential, PasswordParameters,
    RsaCredential, RsaParameters, SshCredential, SshParameters, UserCredential, ValueCredential,
    WriteMode,
};
use crate::interpolation::ServicesData;
use crate::operations::CredHubClient;

const WRITE_MODES: [&str; 3] = ["no-overwrite", "overwrite", "converge"];

#[derive(Args)]
#[command(
    group(ArgGroup::new("target").required(true).args(["name", "id"])),
    after_help = "EXAMPLES:\n    credhub-cli get --name /my-app/db-password\n    credhub-cli get --name /my-app/db-password --versions 3 --output json\n    credhub-cli get --id 67fc3def-bbfb-4953-83f8-4ab0682ad675"
)]
pub struct GetArgs {
    /// Credential name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Credential version id
    #[arg(long)]
    pub id: Option<String>,

    /// Number of versions to return, newest first
    #[arg(long, requires = "name")]
    pub versions: Option<u32>,

    /// Output format (json, yaml, or table)
    #[arg(short, long, default_value = "table", value_parser = ["json", "yaml", "table"])]
    pub output: String,
}

#[derive(Args)]
#[command(
    after_help = "EXAMPLES:\n    credhub-cli set --name /my-app/api-key --type value --value abc123\n    credhub-cli set --name /my-app/admin --type user --username admin --password s3cret\n    credhub-cli set --name /my-app/config --type json --file config.json\n    credhub-cli set --name /my-app/tls --type certificate --certificate cert.pem --private-key key.pem --ca-name /my-app/ca"
)]
pub struct SetArgs {
    /// Credential name
    #[arg(short, long)]
    pub name: String,

    /// Credential type
    #[arg(short = 't', long = "type", value_parser = ["password", "value", "json", "user", "rsa", "ssh", "certificate"])]
    pub credential_type: String,

    /// Value for password, value and json credentials
    #[arg(short, long, conflicts_with = "file")]
    pub value: Option<String>,

    /// Read the password, value or json value from a file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Username for user credentials
    #[arg(long)]
    pub username: Option<String>,

    /// Password for user credentials
    #[arg(long)]
    pub password: Option<String>,

    /// Public key file for rsa and ssh credentials
    #[arg(long, value_name = "FILE")]
    pub public_key: Option<PathBuf>,

    /// Private key file for rsa, ssh and certificate credentials
    #[arg(long, value_name = "FILE")]
    pub private_key: Option<PathBuf>,

    /// Certificate file for certificate credentials
    #[arg(long, value_name = "FILE")]
    pub certificate: Option<PathBuf>,

    /// CA certificate file for certificate credentials
    #[arg(long, value_name = "FILE", conflicts_with = "ca_name")]
    pub ca: Option<PathBuf>,

    /// Name of a CA stored in CredHub that signed the certificate
    #[arg(long)]
    pub ca_name: Option<String>,

    /// Write mode
    #[arg(short, long, value_parser = WRITE_MODES)]
    pub mode: Option<String>,

    /// Output format (json, yaml, or table)
    #[arg(short, long, default_value = "table", value_parser = ["json", "yaml", "table"])]
    pub output: String,
}

#[derive(Args)]
#[command(
    after_help = "EXAMPLES:\n    credhub-cli generate --name /my-app/db-password --type password --length 40\n    credhub-cli generate --name /my-app/ca --type certificate --common-name my-ca --is-ca\n    credhub-cli generate --name /my-app/tls --type certificate --ca /my-app/ca --common-name app.internal --alternative-name app.example.com"
)]
pub struct GenerateArgs {
    /// Credential name
    #[arg(short, long)]
    pub name: String,

    /// Credential type
    #[arg(short = 't', long = "type", value_parser = ["password", "user", "rsa", "ssh", "certificate"])]
    pub credential_type: String,

    /// Password length
    #[arg(long)]
    pub length: Option<u32>,

    #[arg(long)]
    pub exclude_upper: bool,

    #[arg(long)]
    pub exclude_lower: bool,

    #[arg(long)]
    pub exclude_number: bool,

    #[arg(long)]
    pub include_special: bool,

    /// Fixed username for user credentials
    #[arg(long)]
    pub username: Option<String>,

    /// Key length for rsa, ssh and certificate credentials (2048, 3072 or 4096)
    #[arg(long)]
    pub key_length: Option<u32>,

    /// Comment appended to a generated ssh public key
    #[arg(long)]
    pub ssh_comment: Option<String>,

    #[arg(long)]
    pub common_name: Option<String>,

    #[arg(long = "alternative-name")]
    pub alternative_names: Vec<String>,

    #[arg(long)]
    pub organization: Option<String>,

    #[arg(long)]
    pub organization_unit: Option<String>,

    #[arg(long)]
    pub locality: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    /// Certificate validity in days
    #[arg(long)]
    pub duration: Option<u32>,

    /// Name of the CA stored in CredHub that signs the certificate
    #[arg(long)]
    pub ca: Option<String>,

    #[arg(long)]
    pub self_sign: bool,

    #[arg(long)]
    pub is_ca: bool,

    /// Write mode
    #[arg(short, long, value_parser = WRITE_MODES)]
    pub mode: Option<String>,

    /// Output format (json, yaml, or table)
    #[arg(short, long, default_value = "table", value_parser = ["json", "yaml", "table"])]
    pub output: String,
}

#[derive(Args)]
pub struct NameArgs {
    /// Credential name
    #[arg(short, long)]
    pub name: String,

    /// Output format (json, yaml, or table)
    #[arg(short, long, default_value = "table", value_parser = ["json", "yaml", "table"])]
    pub output: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Credential name
    #[arg(short, long)]
    pub name: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
#[command(group(ArgGroup::new("query").required(true).args(["name_like", "path"])))]
pub struct FindArgs {
    /// Find credentials whose name contains this fragment
    #[arg(short, long)]
    pub name_like: Option<String>,

    /// Find credentials stored under this path
    #[arg(short, long)]
    pub path: Option<String>,

    /// Output format (json, yaml, or table)
    #[arg(short, long, default_value = "table", value_parser = ["json", "yaml", "table"])]
    pub output: String,
}

#[derive(Args)]
pub struct InterpolateArgs {
    /// VCAP_SERVICES JSON file; the VCAP_SERVICES environment variable is used when absent
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output format (json or yaml)
    #[arg(short, long, default_value = "json", value_parser = ["json", "yaml"])]
    pub output: String,
}

pub async fn handle_get(args: GetArgs, client: &CredHubClient) -> Result<()> {
    let credentials = client.credentials();

    let details = match (&args.id, &args.name, args.versions) {
        (Some(id), _, _) => vec![credentials.get_by_id(id).await?],
        (None, Some(name), Some(versions)) => {
            credentials.get_by_name_with_history(&CredentialName::new(name)?, versions).await?
        }
        (None, Some(name), None) => vec![credentials.get_by_name(&CredentialName::new(name)?).await?],
        (None, None, _) => anyhow::bail!("Either --name or --id is required"),
    };

    if details.len() == 1 && args.versions.is_none() {
        print_output(&details[0], &args.output, |d| print_details_table(std::slice::from_ref(d)))
    } else {
        print_output(&details, &args.output, |d| print_details_table(d))
    }
}

pub async fn handle_set(args: SetArgs, client: &CredHubClient) -> Result<()> {
    let name = CredentialName::new(&args.name)?;
    let value = build_value(&args)?;

    let mut request = CredentialRequest::new(name, value);
    if let Some(mode) = &args.mode {
        request = request.with_mode(mode.parse::<WriteMode>()?);
    }

    let details = client.credentials().write(&request).await?;
    print_output(&details, &args.output, |d| print_details_table(std::slice::from_ref(d)))
}

pub async fn handle_generate(args: GenerateArgs, client: &CredHubClient) -> Result<()> {
    let name = CredentialName::new(&args.name)?;
    let parameters = build_parameters(&args)?;

    let mut request = ParametersRequest::new(name, parameters);
    if let Some(mode) = &args.mode {
        request = request.with_mode(mode.parse::<WriteMode>()?);
    }

    let details = client.credentials().generate(&request).await?;
    print_output(&details, &args.output, |d| print_details_table(std::slice::from_ref(d)))
}

pub async fn handle_regenerate(args: NameArgs, client: &CredHubClient) -> Result<()> {
    let details = client.credentials().regenerate(&CredentialName::new(&args.name)?).await?;
    print_output(&details, &args.output, |d| print_details_table(std::slice::from_ref(d)))
}

pub async fn handle_delete(args: DeleteArgs, client: &CredHubClient) -> Result<()> {
    let name = CredentialName::new(&args.name)?;

    if !args.yes {
        println!("Are you sure you want to delete credential '{}'? (y/N)", name);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled");
            return Ok(());
        }
    }

    client.credentials().delete_by_name(&name).await?;
    println!("Credential '{}' deleted successfully", name);
    Ok(())
}

pub async fn handle_find(args: FindArgs, client: &CredHubClient) -> Result<()> {
    let results = match (&args.name_like, &args.path) {
        (Some(name_like), _) => client.credentials().find_by_name(name_like).await?,
        (None, Some(path)) => client.credentials().find_by_path(path).await?,
        (None, None) => anyhow::bail!("Either --name-like or --path is required"),
    };

    print_output(&results, &args.output, |r| print_summary_table(r))
}

pub async fn handle_interpolate(args: InterpolateArgs, client: &CredHubClient) -> Result<()> {
    let services = match &args.file {
        Some(file) => {
            let contents = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read file: {}", file.display()))?;
            ServicesData::from_json(&contents)?
        }
        None => ServicesData::from_env()?,
    };

    let resolved = client.interpolation().interpolate_service_data(&services).await?;
    print_output(&resolved, &args.output, |_| {})
}

/// Assemble a credential value from `set` flags.
pub fn build_value(args: &SetArgs) -> Result<CredentialValue> {
    let credential_type: CredentialType = args.credential_type.parse()?;

    let value: CredentialValue = match credential_type {
        CredentialType::Password => PasswordCredential::new(inline_or_file(args)?).into(),
        CredentialType::Value => ValueCredential::new(inline_or_file(args)?).into(),
        CredentialType::Json => {
            let raw = inline_or_file(args)?;
            let object: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(&raw).context("JSON credentials must be a JSON object")?;
            JsonCredential::new(object).into()
        }
        CredentialType::User => {
            let password = args.password.clone().context("--password is required for user credentials")?;
            UserCredential {
                username: args.username.clone(),
                password: password.into(),
                password_hash: None,
            }
            .into()
        }
        CredentialType::Rsa => RsaCredential {
            public_key: read_optional(&args.public_key)?,
            private_key: read_optional(&args.private_key)?.map(Into::into),
        }
        .into(),
        CredentialType::Ssh => SshCredential {
            public_key: read_optional(&args.public_key)?,
            private_key: read_optional(&args.private_key)?.map(Into::into),
            public_key_fingerprint: None,
        }
        .into(),
        CredentialType::Certificate => CertificateCredential {
            ca: read_optional(&args.ca)?,
            ca_name: args.ca_name.clone(),
            certificate: read_optional(&args.certificate)?,
            private_key: read_optional(&args.private_key)?.map(Into::into),
        }
        .into(),
    };

    Ok(value)
}

/// Assemble generation parameters from `generate` flags.
pub fn build_parameters(args: &GenerateArgs) -> Result<GenerationParameters> {
    let credential_type: CredentialType = args.credential_type.parse()?;
    let key_length = args.key_length.map(KeyLength::try_from).transpose()?;

    let password = || PasswordParameters {
        length: args.length,
        exclude_upper: args.exclude_upper.then_some(true),
        exclude_lower: args.exclude_lower.then_some(true),
        exclude_number: args.exclude_number.then_some(true),
        include_special: args.include_special.then_some(true),
    };

    let parameters: GenerationParameters = match credential_type {
        CredentialType::Password => GenerationParameters::Password(password()),
        CredentialType::User => {
            GenerationParameters::User { parameters: password(), username: args.username.clone() }
        }
        CredentialType::Rsa => RsaParameters { key_length }.into(),
        CredentialType::Ssh => {
            SshParameters { key_length, ssh_comment: args.ssh_comment.clone() }.into()
        }
        CredentialType::Certificate => CertificateParameters {
            key_length,
            common_name: args.common_name.clone(),
            alternative_names: args.alternative_names.clone(),
            organization: args.organization.clone(),
            organization_unit: args.organization_unit.clone(),
            locality: args.locality.clone(),
            state: args.state.clone(),
            country: args.country.clone(),
            duration: args.duration,
            ca: args.ca.clone(),
            is_ca: args.is_ca.then_some(true),
            self_sign: args.self_sign.then_some(true),
            ..Default::default()
        }
        .into(),
        other => anyhow::bail!("Credentials of type '{}' cannot be generated", other),
    };

    Ok(parameters)
}

fn inline_or_file(args: &SetArgs) -> Result<String> {
    match (&args.value, &args.file) {
        (Some(value), _) => Ok(value.clone()),
        (None, Some(file)) => Ok(strip_trailing_newline(read_file(file)?)),
        (None, None) => anyhow::bail!(
            "--value or --file is required for {} credentials",
            args.credential_type
        ),
    }
}

/// Drop the single line ending editors append; any other trailing whitespace is kept.
fn strip_trailing_newline(mut contents: String) -> String {
    if contents.ends_with('\n') {
        contents.pop();
        if contents.ends_with('\r') {
            contents.pop();
        }
    }
    contents
}

fn read_optional(path: &Option<PathBuf>) -> Result<Option<String>> {
    path.as_deref().map(read_file).transpose()
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

fn print_details_table(details: &[CredentialDetails]) {
    if details.is_empty() {
        println!("No credentials found");
        return;
    }

    print_table_header(&[("Name", 40), ("Type", 12), ("Id", 36), ("Created", 25)]);
    for d in details {
        println!(
            "{:<40} {:<12} {:<36} {}",
            truncate(&d.name.name(), 40),
            d.credential_type(),
            d.id,
            d.version_created_at.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".to_string())
        );
    }

    if let [single] = details {
        println!();
        match single.value.to_wire() {
            Ok(serde_json::Value::String(s)) => println!("value: {}", s),
            Ok(value) => println!(
                "value:\n{}",
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            ),
            Err(e) => println!("value: <unable to render: {}>", e),
        }
    }
    println!();
}

fn print_summary_table(results: &[CredentialSummary]) {
    if results.is_empty() {
        println!("No credentials found");
        return;
    }

    print_table_header(&[("Name", 60), ("Updated", 25)]);
    for summary in results {
        println!(
            "{:<60} {}",
            truncate(&summary.name.name(), 60),
            summary.version_created_at.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".to_string())
        );
    }
    println!();
}
