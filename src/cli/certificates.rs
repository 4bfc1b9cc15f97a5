//! Certificate CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::{print_output, print_table_header, truncate};
use crate::certificate::CertificateSummary;
use crate::credential::CredentialName;
use crate::operations::CredHubClient;

#[derive(Subcommand)]
pub enum CertificateCommands {
    /// List certificates and their versions
    #[command(
        after_help = "EXAMPLES:\n    credhub-cli certificates list\n    credhub-cli certificates list --name /my-app/tls --output json"
    )]
    List {
        /// Only show this certificate
        #[arg(short, long)]
        name: Option<String>,

        /// Output format (json, yaml, or table)
        #[arg(short, long, default_value = "table", value_parser = ["json", "yaml", "table"])]
        output: String,
    },

    /// Regenerate a certificate by id
    #[command(
        after_help = "EXAMPLES:\n    credhub-cli certificates regenerate --id 6f0b9a40-...\n    credhub-cli certificates regenerate --id 6f0b9a40-... --transitional"
    )]
    Regenerate {
        /// Certificate id (see `certificates list`)
        #[arg(long)]
        id: String,

        /// Mark the new version as transitional
        #[arg(long)]
        transitional: bool,

        /// Output format (json or yaml)
        #[arg(short, long, default_value = "json", value_parser = ["json", "yaml"])]
        output: String,
    },

    /// Show the versions of a certificate
    Versions {
        /// Certificate id
        #[arg(long)]
        id: String,

        /// Only versions that are currently active
        #[arg(long)]
        current: bool,

        /// Output format (json or yaml)
        #[arg(short, long, default_value = "json", value_parser = ["json", "yaml"])]
        output: String,
    },

    /// Set or clear the transitional version of a certificate
    SetTransitional {
        /// Certificate id
        #[arg(long)]
        id: String,

        /// Version id to mark transitional
        #[arg(long, conflicts_with = "clear", required_unless_present = "clear")]
        version: Option<String>,

        /// Clear the transitional flag
        #[arg(long)]
        clear: bool,

        /// Output format (json or yaml)
        #[arg(short, long, default_value = "json", value_parser = ["json", "yaml"])]
        output: String,
    },

    /// Regenerate every certificate signed by a CA
    BulkRegenerate {
        /// Name of the signing CA
        #[arg(long)]
        signed_by: String,
    },
}

/// Handle certificate commands
pub async fn handle_certificate_command(
    command: CertificateCommands,
    client: &CredHubClient,
) -> Result<()> {
    let certificates = client.certificates();

    match command {
        CertificateCommands::List { name, output } => {
            let list = match name {
                Some(name) => vec![certificates.get_by_name(&CredentialName::new(name)?).await?],
                None => certificates.get_all().await?,
            };
            print_output(&list, &output, |l| print_certificates_table(l))?;
        }
        CertificateCommands::Regenerate { id, transitional, output } => {
            let details = certificates.regenerate(&id, transitional).await?;
            print_output(&details, &output, |_| {})?;
        }
        CertificateCommands::Versions { id, current, output } => {
            let versions = certificates.get_versions(&id, current).await?;
            print_output(&versions, &output, |_| {})?;
        }
        CertificateCommands::SetTransitional { id, version, clear, output } => {
            let version = if clear { None } else { version.as_deref() };
            let versions = certificates.update_transitional_version(&id, version).await?;
            print_output(&versions, &output, |_| {})?;
        }
        CertificateCommands::BulkRegenerate { signed_by } => {
            let regenerated =
                certificates.bulk_regenerate(&CredentialName::new(&signed_by)?).await?;
            if regenerated.is_empty() {
                println!("No certificates signed by '{}' were regenerated", signed_by);
            }
            for name in regenerated {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn print_certificates_table(certificates: &[CertificateSummary]) {
    if certificates.is_empty() {
        println!("No certificates found");
        return;
    }

    print_table_header(&[("Name", 40), ("Id", 36), ("Signed By", 30), ("Versions", 8), ("Expires", 25)]);
    for cert in certificates {
        println!(
            "{:<40} {:<36} {:<30} {:<8} {}",
            truncate(&cert.name.name(), 40),
            cert.id,
            truncate(cert.signed_by.as_deref().unwrap_or("-"), 30),
            cert.versions.len(),
            cert.earliest_expiry().map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".to_string())
        );
    }
    println!();
}
