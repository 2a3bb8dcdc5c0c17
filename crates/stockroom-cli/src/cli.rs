use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use stockroom_core::VERSION;

/// Stockroom - track stock items, their movements and reports from the terminal
#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the inventory database
    #[arg(long, global = true, env = "STOCKROOM_DB", value_name = "PATH")]
    pub db: Option<String>,

    /// Name recorded on transactions
    #[arg(long, global = true, env = "STOCKROOM_USER", value_name = "NAME")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Output options shared by every listing command
#[derive(Args, Clone, Default)]
pub struct ListingArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Write the rows as CSV to FILE (`-` for stdout)
    #[arg(long, value_name = "FILE")]
    pub export: Option<String>,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Default user written to the config file
    #[arg(long, value_name = "NAME")]
    pub default_user: Option<String>,

    /// Replace an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Item attributes accepted by `add` and `update`
#[derive(Args, Clone, Default)]
pub struct ItemFields {
    /// Item name (unique)
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Units on hand
    #[arg(long, allow_negative_numbers = true)]
    pub quantity: Option<i64>,

    /// Price per unit (e.g. 2.50)
    #[arg(long, value_name = "PRICE")]
    pub price: Option<String>,

    #[arg(long)]
    pub supplier: Option<String>,

    #[arg(long, value_name = "CONTACT")]
    pub supplier_contact: Option<String>,

    /// Low stock threshold
    #[arg(long = "min-stock", value_name = "N", allow_negative_numbers = true)]
    pub minimum_stock: Option<i64>,

    #[arg(long)]
    pub barcode: Option<String>,

    /// Shelf, bin or room
    #[arg(long)]
    pub location: Option<String>,
}

impl ItemFields {
    /// Whether any attribute was given on the command line.
    pub fn any(&self) -> bool {
        self.name.is_some()
            || self.category.is_some()
            || self.quantity.is_some()
            || self.price.is_some()
            || self.supplier.is_some()
            || self.supplier_contact.is_some()
            || self.minimum_stock.is_some()
            || self.barcode.is_some()
            || self.location.is_some()
    }
}

/// Arguments for the `add` command
#[derive(Args, Clone, Default)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: ItemFields,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args, Clone, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub output: ListingArgs,
}

/// Arguments for the `show` command
#[derive(Args, Clone)]
pub struct ShowArgs {
    /// Item ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `update` command
#[derive(Args, Clone)]
pub struct UpdateArgs {
    /// Item ID
    #[arg(value_name = "ID")]
    pub id: i64,

    #[command(flatten)]
    pub fields: ItemFields,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `delete` command
#[derive(Args, Clone)]
pub struct DeleteArgs {
    /// Item ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `record` command
#[derive(Args, Clone)]
pub struct RecordArgs {
    /// Item ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Transaction type (in, out, adjustment)
    #[arg(value_name = "KIND")]
    pub kind: String,

    /// Quantity moved (or the new absolute quantity for adjustment)
    #[arg(value_name = "QTY", allow_negative_numbers = true)]
    pub quantity: i64,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `history` command
#[derive(Args, Clone, Default)]
pub struct HistoryArgs {
    /// Only transactions for this item
    #[arg(long, value_name = "ID")]
    pub item: Option<i64>,

    /// Only transactions of this type (in, out, adjustment)
    #[arg(long, value_name = "KIND")]
    pub r#type: Option<String>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub output: ListingArgs,
}

/// Arguments for the `low-stock` command
#[derive(Args, Clone, Default)]
pub struct LowStockArgs {
    #[command(flatten)]
    pub output: ListingArgs,
}

/// Arguments for the `search` command
#[derive(Args, Clone)]
pub struct SearchArgs {
    /// Text to look for (substring, case-insensitive)
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Field to search (name, category, supplier, barcode)
    #[arg(long, default_value = "name")]
    pub field: String,

    #[command(flatten)]
    pub output: ListingArgs,
}

/// Available reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Quantity, unit price and total value per item
    StockValue,
    /// Total quantity moved per transaction type
    TransactionSummary,
    /// Quantity on hand per category
    CategoryBreakdown,
    /// Quantity moved per day and transaction type
    Activity,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::StockValue,
        ReportKind::TransactionSummary,
        ReportKind::CategoryBreakdown,
        ReportKind::Activity,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::StockValue => "Stock Value",
            Self::TransactionSummary => "Transaction Summary",
            Self::CategoryBreakdown => "Category Breakdown",
            Self::Activity => "Daily Activity",
        }
    }
}

/// Arguments for the `report` command
#[derive(Args, Clone)]
pub struct ReportArgs {
    /// Report to produce
    #[arg(value_enum, value_name = "REPORT")]
    pub kind: ReportKind,

    #[command(flatten)]
    pub output: ListingArgs,
}

/// Arguments for the `dashboard` command
#[derive(Args, Clone, Default)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub output: ListingArgs,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Destination path (must not exist)
    #[arg(value_name = "DEST")]
    pub destination: String,
}

/// Arguments for the `check` command
#[derive(Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the inventory database and config file
    Init(InitArgs),

    /// Show totals, low stock count and stock levels
    Dashboard(DashboardArgs),

    /// Add a new item
    Add(AddArgs),

    /// List all items
    List(ListArgs),

    /// Show a single item
    Show(ShowArgs),

    /// Update an item's attributes
    Update(UpdateArgs),

    /// Delete an item and its transactions
    Delete(DeleteArgs),

    /// Record an IN, OUT or ADJUSTMENT transaction
    Record(RecordArgs),

    /// Show transaction history, newest first
    History(HistoryArgs),

    /// List items at or below their minimum stock
    LowStock(LowStockArgs),

    /// Search items by name, category, supplier or barcode
    Search(SearchArgs),

    /// Produce an inventory report
    Report(ReportArgs),

    /// Interactive menu
    Menu,

    /// Check database integrity
    Check(CheckArgs),

    /// Back up the database
    Backup(BackupArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
