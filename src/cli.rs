use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use maestranza::screens::inventory::StockFilter;
use maestranza::screens::movements::MovementTypeFilter;
use maestranza::screens::users::UserStatusFilter;

#[derive(Parser)]
#[command(
    name = "maestranza",
    about = "Maestranza inventory client: products, stock movements and users",
    version
)]
pub struct Cli {
    /// Path to config.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides config and MAESTRANZA_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        username: String,

        /// Password; read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List products
    Inventory {
        /// Name or code fragment
        #[arg(long)]
        search: Option<String>,

        /// Exact category name
        #[arg(long)]
        category: Option<String>,

        #[arg(long, value_enum, default_value = "all")]
        stock: StockArg,
    },

    /// List stock movements, newest first
    Movements {
        /// Product code, product name or user fragment
        #[arg(long)]
        search: Option<String>,

        #[arg(long = "type", value_enum, default_value = "all")]
        kind: KindArg,

        /// First day (YYYY-MM-DD); alone, selects that day
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day (YYYY-MM-DD); alone, selects that day
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// List users
    Users {
        /// Username, name or email fragment
        #[arg(long)]
        search: Option<String>,

        /// Role tag or name; repeat to match any of several
        #[arg(long = "role")]
        roles: Vec<String>,

        #[arg(long, value_enum, default_value = "all")]
        status: StatusArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StockArg {
    All,
    In,
    Low,
    Out,
}

impl From<StockArg> for StockFilter {
    fn from(arg: StockArg) -> Self {
        match arg {
            StockArg::All => StockFilter::All,
            StockArg::In => StockFilter::InStock,
            StockArg::Low => StockFilter::LowStock,
            StockArg::Out => StockFilter::OutOfStock,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    All,
    Entrada,
    Salida,
}

impl From<KindArg> for MovementTypeFilter {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::All => MovementTypeFilter::All,
            KindArg::Entrada => MovementTypeFilter::Entrada,
            KindArg::Salida => MovementTypeFilter::Salida,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    All,
    Active,
    Inactive,
}

impl From<StatusArg> for UserStatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => UserStatusFilter::All,
            StatusArg::Active => UserStatusFilter::Active,
            StatusArg::Inactive => UserStatusFilter::Inactive,
        }
    }
}
