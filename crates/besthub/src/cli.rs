//! Clap derive structures for the `besthub` CLI.
//!
//! Defines the complete command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// besthub -- buy and manage mobile data bundles from the command line
#[derive(Debug, Parser)]
#[command(
    name = "besthub",
    version,
    about = "Buy and manage Ghanaian mobile data bundles from the command line",
    long_about = "Command-line client for the Besthub data-bundle shop.\n\n\
        Shoppers browse bundles, buy from their wallet or by card and top up;\n\
        administrators manage users, order queues, prices, wallets and settings.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "BESTHUB_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, env = "BESTHUB_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BESTHUB_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "BESTHUB_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "BESTHUB_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Domain value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NetworkArg {
    Mtn,
    /// Telecel (formerly Vodafone)
    #[value(alias = "vodafone")]
    Telecel,
    #[value(alias = "at", alias = "airtel-tigo")]
    Airteltigo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Customer,
    Agent,
    Wholesaler,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UserStatusArg {
    Active,
    Pending,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderStatusArg {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransactionKindArg {
    Topup,
    Purchase,
    Refund,
    Withdrawal,
    Adjustment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransactionStatusArg {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BundleSortArg {
    PriceAsc,
    PriceDesc,
    DataAsc,
    DataDesc,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in, sign out and manage the account
    Auth(AuthArgs),

    /// Browse data bundles
    #[command(alias = "b")]
    Bundles(BundlesArgs),

    /// Buy a bundle from the wallet (interactive when flags are missing)
    Buy(BuyArgs),

    /// View your orders and pay by card
    #[command(alias = "o")]
    Orders(OrdersArgs),

    /// Wallet balance, top-ups and history
    #[command(alias = "w")]
    Wallet(WalletArgs),

    /// Your balance, today's sales and recent orders
    Dashboard,

    /// Administration (admin accounts only)
    Admin(AdminArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in and keep the session for later commands
    Login {
        /// Account email (defaults to the profile's email)
        #[arg(long, short = 'e')]
        email: Option<String>,
    },

    /// End the session
    Logout,

    /// Create an account
    Register {
        /// Display name
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        /// Account type
        #[arg(long, default_value = "customer", value_enum)]
        role: RoleArg,
    },

    /// Show the signed-in user
    Whoami,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SHOP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BundlesArgs {
    #[command(subcommand)]
    pub command: BundlesCommand,
}

#[derive(Debug, Subcommand)]
pub enum BundlesCommand {
    /// List bundles for a network
    #[command(alias = "ls")]
    List {
        #[arg(long, short = 'n', value_enum)]
        network: NetworkArg,

        /// Sort order
        #[arg(long, default_value = "price-asc", value_enum)]
        sort: BundleSortArg,
    },
}

#[derive(Debug, Args)]
pub struct BuyArgs {
    #[arg(long, short = 'n', value_enum)]
    pub network: Option<NetworkArg>,

    /// Bundle id or exact package name
    #[arg(long)]
    pub package: Option<String>,

    /// Recipient phone number
    #[arg(long)]
    pub recipient: Option<String>,

    /// Recipient phone number, again
    #[arg(long)]
    pub confirm_recipient: Option<String>,
}

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List your orders
    #[command(alias = "ls")]
    List {
        #[arg(long, value_enum)]
        status: Option<OrderStatusArg>,

        /// Match reference, package or phone number
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one order
    Get {
        /// Order id
        id: String,
    },

    /// Start a card payment for a bundle
    Checkout {
        #[arg(long, short = 'n', value_enum)]
        network: NetworkArg,

        /// Bundle id or exact package name
        #[arg(long)]
        package: String,

        #[arg(long)]
        recipient: String,
    },

    /// Confirm a card payment after the gateway redirect
    Capture {
        /// Payment reference from the redirect
        reference: String,
    },
}

#[derive(Debug, Args)]
pub struct WalletArgs {
    #[command(subcommand)]
    pub command: WalletCommand,
}

#[derive(Debug, Subcommand)]
pub enum WalletCommand {
    /// Show the current balance
    Balance,

    /// Start a top-up and print the payment link
    Topup {
        /// Amount in cedis (e.g. 50 or 12.50)
        amount: String,

        /// Email for the payment receipt (defaults to the account email)
        #[arg(long)]
        email: Option<String>,
    },

    /// Confirm a paid top-up
    Verify {
        /// Payment reference (defaults to the last top-up started)
        reference: Option<String>,
    },

    /// Wallet history
    #[command(alias = "tx")]
    Transactions(TransactionFilterArgs),
}

#[derive(Debug, Args)]
pub struct TransactionFilterArgs {
    #[arg(long, value_enum)]
    pub kind: Option<TransactionKindArg>,

    #[arg(long, value_enum)]
    pub status: Option<TransactionStatusArg>,

    /// Match description, reference, user or phone
    #[arg(long)]
    pub search: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ADMIN
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Manage user accounts
    Users(AdminUsersArgs),

    /// Work a network's order queue
    Orders(AdminOrdersArgs),

    /// Manage per-role price tables
    Prices(AdminPricesArgs),

    /// Inspect and adjust wallets
    Wallets(AdminWalletsArgs),

    /// Platform transaction ledger
    #[command(alias = "tx")]
    Transactions(AdminTransactionsArgs),

    /// Platform-wide headline numbers
    Dashboard,

    /// View or change platform settings
    Settings(AdminSettingsArgs),
}

#[derive(Debug, Args)]
pub struct AdminUsersArgs {
    #[command(subcommand)]
    pub command: AdminUsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminUsersCommand {
    /// List users
    #[command(alias = "ls")]
    List {
        #[arg(long, value_enum)]
        role: Option<RoleArg>,

        #[arg(long, value_enum)]
        status: Option<UserStatusArg>,

        /// Match name, email or phone
        #[arg(long)]
        search: Option<String>,
    },

    /// Change a user's role
    Role {
        /// User id
        id: String,

        #[arg(value_enum)]
        role: RoleArg,
    },

    /// Change a user's account status
    Status {
        /// User id
        id: String,

        #[arg(value_enum)]
        status: UserStatusArg,
    },

    /// Delete a user account
    Delete {
        /// User id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct AdminOrdersArgs {
    #[arg(long, short = 'n', value_enum, global = true)]
    pub network: Option<NetworkArg>,

    #[command(subcommand)]
    pub command: AdminOrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminOrdersCommand {
    /// List the network's orders
    #[command(alias = "ls")]
    List {
        #[arg(long, value_enum)]
        status: Option<OrderStatusArg>,

        /// Match user, email, reference, package or phone
        #[arg(long)]
        search: Option<String>,

        /// Use the unfiltered listing
        #[arg(long)]
        all: bool,
    },

    /// Set one order's status
    Status {
        /// Order id
        id: String,

        #[arg(value_enum)]
        status: OrderStatusArg,
    },

    /// Set the status of several orders at once
    BulkStatus {
        /// Order ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        #[arg(long, value_enum)]
        status: OrderStatusArg,
    },
}

#[derive(Debug, Args)]
pub struct AdminPricesArgs {
    #[command(subcommand)]
    pub command: AdminPricesCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminPricesCommand {
    /// Show the price book
    #[command(alias = "ls")]
    List {
        #[arg(long, short = 'n', value_enum)]
        network: Option<NetworkArg>,

        #[arg(long, value_enum)]
        role: Option<RoleArg>,
    },

    /// Replace a price table from a JSON file
    Update {
        #[arg(value_enum)]
        network: NetworkArg,

        #[arg(value_enum)]
        role: RoleArg,

        /// JSON array of packages ({"packageName", "dataAmount", "price", "validity"})
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Add one package to a price table
    Add {
        #[arg(value_enum)]
        network: NetworkArg,

        #[arg(value_enum)]
        role: RoleArg,

        #[arg(long)]
        name: String,

        /// Data amount label, e.g. "1GB"
        #[arg(long)]
        data: Option<String>,

        /// Price in cedis
        #[arg(long)]
        price: String,

        #[arg(long)]
        validity: Option<String>,
    },

    /// Remove a package from a price table
    Delete {
        #[arg(value_enum)]
        network: NetworkArg,

        #[arg(value_enum)]
        role: RoleArg,

        /// Package id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct AdminWalletsArgs {
    #[command(subcommand)]
    pub command: AdminWalletsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminWalletsCommand {
    /// List wallets
    #[command(alias = "ls")]
    List {
        /// Match name, email or phone
        #[arg(long)]
        search: Option<String>,
    },

    /// Credit (positive) or debit (negative) a wallet
    Adjust {
        /// User id
        user_id: String,

        /// Amount in cedis, negative to debit
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Reason recorded with the adjustment
        #[arg(long, short = 'd')]
        description: String,
    },

    /// Wallet transactions across all users
    #[command(alias = "tx")]
    Transactions(TransactionFilterArgs),
}

#[derive(Debug, Args)]
pub struct AdminTransactionsArgs {
    #[command(subcommand)]
    pub command: AdminTransactionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminTransactionsCommand {
    /// List transactions, newest first
    #[command(alias = "ls")]
    List(TransactionFilterArgs),

    /// Aggregate figures
    Stats,
}

#[derive(Debug, Args)]
pub struct AdminSettingsArgs {
    #[command(subcommand)]
    pub command: AdminSettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminSettingsCommand {
    /// Show platform settings
    Get,

    /// Change one setting
    Set {
        /// Setting name, e.g. "maintenance-mode", "mtn-available", "min-topup-amount"
        key: String,

        /// New value
        value: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Key: api-url, email, password-env, token, ca-cert, insecure, timeout
        key: String,

        value: String,
    },

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name (defaults to the active profile)
        name: Option<String>,
    },

    /// Remove a stored password from the system keyring
    ForgetPassword {
        /// Profile name (defaults to the active profile)
        name: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
