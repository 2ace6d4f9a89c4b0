//! Shopfloor CLI - operator console for the shopfloor backend.
//!
//! Commands:
//! - `shopfloor login` / `shopfloor logout` - Manage the operator session
//! - `shopfloor catalog` - List sellable items
//! - `shopfloor sale` - Compose and record a sale
//! - `shopfloor suppliers` - Manage supplier records
//! - `shopfloor estimates` - Manage supplier delivery estimates
//! - `shopfloor inventory` - Manage inventory entries
//! - `shopfloor production` - Record production runs
//! - `shopfloor faults` - Report machine faults
//! - `shopfloor config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    CatalogArgs, ConfigArgs, EstimatesArgs, FaultsArgs, InventoryArgs, LoginArgs, ProductionArgs,
    SaleArgs, SuppliersArgs,
};

/// Shopfloor CLI - sales, plant records and fault reports from the terminal
#[derive(Parser)]
#[command(name = "shopfloor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login(LoginArgs),

    /// Forget the stored session token
    Logout,

    /// List the sellable catalog
    Catalog(CatalogArgs),

    /// Compose a sale and record it
    Sale(SaleArgs),

    /// Manage suppliers
    Suppliers(SuppliersArgs),

    /// Manage supplier delivery estimates
    Estimates(EstimatesArgs),

    /// Manage inventory entries
    Inventory(InventoryArgs),

    /// Record production runs
    Production(ProductionArgs),

    /// Report machine faults
    Faults(FaultsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Login(args) => commands::login::run(args, &ctx).await,
        Commands::Logout => commands::login::logout(&ctx).await,
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Sale(args) => commands::sale::run(args, &ctx).await,
        Commands::Suppliers(args) => commands::suppliers::run(args, &ctx).await,
        Commands::Estimates(args) => commands::estimates::run(args, &ctx).await,
        Commands::Inventory(args) => commands::inventory::run(args, &ctx).await,
        Commands::Production(args) => commands::production::run(args, &ctx).await,
        Commands::Faults(args) => commands::faults::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
