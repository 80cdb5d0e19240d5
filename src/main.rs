mod azcli;
mod cmd;
mod profile;
mod prompt;
mod settings;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "azctx",
    version,
    about = "fast azure subscription and tenant context switching",
    long_about = "Selects and caches the active Azure context (account, subscription, environment, tenant) used by management operations, resolving partial selectors against the Azure CLI."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Select the active context by subscription, tenant, or exported file
    Use {
        /// Subscription id to select
        #[arg(long)]
        subscription_id: Option<String>,
        /// Subscription name to select (case-insensitive)
        #[arg(short = 'n', long)]
        subscription_name: Option<String>,
        /// Tenant id the subscription must live in; alone, switches only the tenant
        #[arg(long)]
        tenant_id: Option<String>,
        /// Restore a previously exported context verbatim
        #[arg(
            long,
            conflicts_with_all = ["subscription_id", "subscription_name", "tenant_id", "interactive"]
        )]
        file: Option<PathBuf>,
        /// Pick a subscription interactively
        #[arg(
            short,
            long,
            conflicts_with_all = ["subscription_id", "subscription_name", "tenant_id"]
        )]
        interactive: bool,
    },
    /// Show the active context
    Current,
    /// Clear the active context
    Clear,
    /// Export the active context to a JSON file
    Export { file: PathBuf },
    /// List subscriptions visible to the signed-in account
    #[command(alias = "subs")]
    Subscriptions,
    /// List tenants visible to the signed-in account
    Tenants,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Use {
            subscription_id,
            subscription_name,
            tenant_id,
            file,
            interactive,
        } => cmd::context::handle_use(subscription_id, subscription_name, tenant_id, file, interactive),
        Command::Current => cmd::context::handle_current(),
        Command::Clear => cmd::context::handle_clear(),
        Command::Export { file } => cmd::context::handle_export(&file),
        Command::Subscriptions => cmd::account::handle_subscriptions(),
        Command::Tenants => cmd::account::handle_tenants(),
    }
}
