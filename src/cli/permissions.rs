//! Permission CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::{print_output, print_table_header};
use crate::credential::CredentialName;
use crate::operations::CredHubClient;
use crate::permission::{Actor, Operation, Permission};

#[derive(Subcommand)]
pub enum PermissionCommands {
    /// Show who may access a credential
    Get {
        /// Credential name
        #[arg(short, long)]
        name: String,

        /// Output format (json, yaml, or table)
        #[arg(short, long, default_value = "table", value_parser = ["json", "yaml", "table"])]
        output: String,
    },

    /// Grant an actor operations on a credential
    #[command(
        after_help = "EXAMPLES:\n    credhub-cli permissions add --name /my-app/db --actor mtls-app:5c1b... --operations read\n    credhub-cli permissions add --name /my-app/db --actor uaa-user:admin --operations read,write,delete"
    )]
    Add {
        /// Credential name
        #[arg(short, long)]
        name: String,

        /// Actor, e.g. mtls-app:<app-guid>, uaa-user:<user-id> or uaa-client:<client-id>
        #[arg(short, long)]
        actor: String,

        /// Operations to grant
        #[arg(long, value_delimiter = ',', required = true, value_parser = ["read", "write", "delete", "read_acl", "write_acl"])]
        operations: Vec<String>,
    },

    /// Revoke all of an actor's operations on a credential
    Delete {
        /// Credential name
        #[arg(short, long)]
        name: String,

        /// Actor whose permissions are removed
        #[arg(short, long)]
        actor: String,
    },
}

/// Handle permission commands
pub async fn handle_permission_command(
    command: PermissionCommands,
    client: &CredHubClient,
) -> Result<()> {
    match command {
        PermissionCommands::Get { name, output } => {
            let permissions = client.permissions().get_permissions(&CredentialName::new(name)?).await?;
            print_output(&permissions, &output, |p| print_permissions_table(p))?;
        }
        PermissionCommands::Add { name, actor, operations } => {
            let permission = build_permission(&actor, &operations)?;
            let name = CredentialName::new(name)?;
            client.permissions().add_permissions(&name, &[permission]).await?;
            println!("Permissions for '{}' on '{}' added successfully", actor, name);
        }
        PermissionCommands::Delete { name, actor } => {
            let name = CredentialName::new(name)?;
            let actor: Actor = actor.parse()?;
            client.permissions().delete_permission(&name, &actor).await?;
            println!("Permissions for '{}' on '{}' deleted successfully", actor, name);
        }
    }

    Ok(())
}

pub fn build_permission(actor: &str, operations: &[String]) -> Result<Permission> {
    let operations =
        operations.iter().map(|op| op.parse::<Operation>()).collect::<Result<Vec<_>, _>>()?;
    Ok(Permission::new(actor.parse()?).with_operations(operations))
}

fn print_permissions_table(permissions: &[Permission]) {
    if permissions.is_empty() {
        println!("No permissions found");
        return;
    }

    print_table_header(&[("Actor", 50), ("Operations", 40)]);
    for permission in permissions {
        let operations: Vec<&str> = permission.operations.iter().map(Operation::as_str).collect();
        println!("{:<50} {}", permission.actor.to_string(), operations.join(", "));
    }
    println!();
}
