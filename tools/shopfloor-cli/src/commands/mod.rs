//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod estimates;
pub mod faults;
pub mod inventory;
pub mod login;
pub mod production;
pub mod sale;
pub mod suppliers;

use clap::{Args, Subcommand};

use sale::ItemSpec;

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Username (prompted when omitted).
    #[arg(short, long)]
    pub username: Option<String>,

    /// Read the password from this environment variable instead of prompting.
    #[arg(long, value_name = "VAR")]
    pub password_env: Option<String>,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show items whose name contains this text.
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Arguments for the sale command.
#[derive(Args)]
pub struct SaleArgs {
    /// Customer name.
    #[arg(long)]
    pub customer: String,

    /// Customer phone.
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Item to sell, as ID or ID:QTY (quantity 1-10). Repeatable.
    #[arg(short, long = "item", value_name = "ID[:QTY]")]
    pub items: Vec<ItemSpec>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Price the sale without recording it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the suppliers command.
#[derive(Args)]
pub struct SuppliersArgs {
    #[command(subcommand)]
    pub command: SuppliersCommand,
}

/// Supplier fields shared by add and update.
#[derive(Args)]
pub struct SupplierFields {
    /// Contact person.
    #[arg(long)]
    pub contact: Option<String>,

    /// Phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,

    /// Postal address.
    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Subcommand)]
pub enum SuppliersCommand {
    /// List all suppliers.
    List,
    /// Show one supplier.
    Show {
        /// Supplier ID.
        id: String,
    },
    /// Create a supplier.
    Add {
        /// Supplier name.
        name: String,

        #[command(flatten)]
        fields: SupplierFields,
    },
    /// Change a supplier. Omitted fields keep their current value.
    Update {
        /// Supplier ID.
        id: String,

        /// New name.
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: SupplierFields,
    },
    /// Delete a supplier.
    Delete {
        /// Supplier ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the faults command.
#[derive(Args)]
pub struct FaultsArgs {
    #[command(subcommand)]
    pub command: FaultsCommand,
}

#[derive(Subcommand)]
pub enum FaultsCommand {
    /// List machines faults can be reported against.
    Machines,
    /// Report a fault.
    Report {
        /// Machine ID.
        #[arg(short, long)]
        machine: String,

        /// What went wrong.
        #[arg(short, long)]
        description: String,

        /// Baja, Media or Alta (low, medium, high also accepted).
        #[arg(short, long, default_value = "Baja")]
        severity: String,

        /// When it happened, local time `YYYY-MM-DD HH:MM[:SS]` (default: now).
        #[arg(long)]
        at: Option<String>,

        /// Reporting employee ID.
        #[arg(long, default_value = "1")]
        employee: String,
    },
}

/// Arguments for the production command.
#[derive(Args)]
pub struct ProductionArgs {
    #[command(subcommand)]
    pub command: ProductionCommand,
}

#[derive(Subcommand)]
pub enum ProductionCommand {
    /// List the machines and products a record can name.
    Options,
    /// Record a production run.
    Record {
        /// Machine ID.
        #[arg(short, long)]
        machine: String,

        /// Product ID.
        #[arg(short, long)]
        product: String,

        /// Units produced (0 allowed).
        #[arg(short, long)]
        quantity: u32,

        /// Hours worked.
        #[arg(long)]
        hours: f64,

        /// operativa, parada, "en mantenimiento" or fallo (English names also accepted).
        #[arg(short, long, default_value = "operativa")]
        status: String,

        /// mañana, tarde or noche.
        #[arg(long, default_value = "mañana")]
        shift: String,

        /// Notes on the run.
        #[arg(short, long, default_value = "")]
        description: String,

        /// Recording employee ID.
        #[arg(long, default_value = "1")]
        employee: String,
    },
}

/// Arguments for the inventory command.
#[derive(Args)]
pub struct InventoryArgs {
    #[command(subcommand)]
    pub command: InventoryCommand,
}

/// Inventory entry fields shared by add and update.
#[derive(Args)]
pub struct EntryFields {
    /// Supplier ID.
    #[arg(long)]
    pub supplier: Option<String>,

    /// Date received, `YYYY-MM-DD`.
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Comments.
    #[arg(long)]
    pub comments: Option<String>,
}

#[derive(Subcommand)]
pub enum InventoryCommand {
    /// List inventory entries.
    List,
    /// Show one entry.
    Show {
        /// Entry ID.
        id: String,
    },
    /// Record goods received. The date defaults to today.
    Add {
        /// Product name.
        product: String,

        /// Quantity received.
        #[arg(short, long)]
        quantity: u32,

        #[command(flatten)]
        fields: EntryFields,
    },
    /// Change an entry. Omitted fields keep their current value.
    Update {
        /// Entry ID.
        id: String,

        /// New product name.
        #[arg(long)]
        product: Option<String>,

        /// New quantity.
        #[arg(short, long)]
        quantity: Option<u32>,

        /// Detach the entry from its supplier.
        #[arg(long, conflicts_with = "supplier")]
        no_supplier: bool,

        #[command(flatten)]
        fields: EntryFields,
    },
    /// Delete an entry.
    Delete {
        /// Entry ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the estimates command.
#[derive(Args)]
pub struct EstimatesArgs {
    #[command(subcommand)]
    pub command: EstimatesCommand,
}

#[derive(Subcommand)]
pub enum EstimatesCommand {
    /// List a supplier's delivery estimates.
    List {
        /// Supplier ID.
        #[arg(short, long)]
        supplier: String,
    },
    /// Show one estimate.
    Show {
        /// Estimate ID.
        id: String,
    },
    /// Create an estimate.
    Add {
        /// Supplier ID.
        #[arg(short, long)]
        supplier: String,

        /// Product name.
        product: String,

        /// Quantity expected.
        #[arg(short, long)]
        quantity: u32,

        /// Expected delivery date, `YYYY-MM-DD`.
        #[arg(long, value_name = "DATE")]
        date: String,

        /// Comments.
        #[arg(long)]
        comments: Option<String>,
    },
    /// Change an estimate. Omitted fields keep their current value.
    Update {
        /// Estimate ID.
        id: String,

        /// New supplier ID.
        #[arg(short, long)]
        supplier: Option<String>,

        /// New product name.
        #[arg(long)]
        product: Option<String>,

        /// New quantity.
        #[arg(short, long)]
        quantity: Option<u32>,

        /// New delivery date, `YYYY-MM-DD`.
        #[arg(long, value_name = "DATE")]
        date: Option<String>,

        /// New comments.
        #[arg(long)]
        comments: Option<String>,
    },
    /// Delete an estimate.
    Delete {
        /// Estimate ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Print the config file in use.
    Path,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// File format: toml or json.
        #[arg(long, default_value = "toml")]
        format: String,
    },
}
