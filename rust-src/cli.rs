//! CLI definitions using clap.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::auth::AuthorizedCaller;
use crate::commands;
use crate::config;
use crate::ledger::Ledger;
use crate::models::Month;
use crate::storage::RecordStore;


/// Subsplit - track shared subscription payments across slots
#[derive(Parser)]
#[command(name = "ssp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data directory (default: ~/.subsplit/data)
    #[arg(long, global = true, env = "SUBSPLIT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Admin secret for destructive operations
    #[arg(long, global = true, env = "SUBSPLIT_ADMIN_SECRET", hide_env_values = true)]
    secret: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}


#[derive(Subcommand)]
enum Commands {
    /// List years with ledger data
    Years,

    /// Create an empty ledger for a year
    CreateYear { year: i32 },

    /// Copy the member roster from one year into another
    CopyMembers { source_year: i32, target_year: i32 },

    /// Manage the member roster
    Member {
        #[command(subcommand)]
        command: MemberCommands,
    },

    /// Record payments
    Payment {
        #[command(subcommand)]
        command: PaymentCommands,
    },

    /// Update subscription settings for a year
    Settings {
        year: i32,

        /// Total subscription price split across slots
        #[arg(long, value_parser = parse_price)]
        total_price: f64,

        /// Maximum number of slots
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_slots: u32,
    },

    /// Show the payment summary for a year
    Summary { year: i32 },

    /// Show payment change history
    History {
        year: i32,

        /// Only show changes for one member
        #[arg(short, long)]
        member: Option<String>,

        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export a year's payment table as CSV
    Export {
        year: i32,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Backup and restore the whole store
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },
}


#[derive(Subcommand)]
enum MemberCommands {
    /// Add a member to a year's roster
    Add { year: i32, name: String },

    /// Remove a member (payment history is kept)
    Remove { year: i32, name: String },
}


#[derive(Subcommand)]
enum PaymentCommands {
    /// Set the paid flag for one member and month
    Set {
        year: i32,
        member: String,
        month: Month,

        #[command(flatten)]
        status: PaidFlag,
    },

    /// Set the paid flag for consecutive months, wrapping Dec into Jan
    Bulk {
        year: i32,
        member: String,

        /// First month to mark
        #[arg(long)]
        start: Month,

        /// How many consecutive months
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        months: u32,

        #[command(flatten)]
        status: PaidFlag,
    },
}


#[derive(Args)]
#[group(required = true, multiple = false)]
struct PaidFlag {
    /// Mark as paid
    #[arg(long)]
    paid: bool,

    /// Mark as unpaid
    #[arg(long)]
    unpaid: bool,
}


impl PaidFlag {
    fn value(&self) -> bool {
        self.paid
    }
}


#[derive(Subcommand)]
enum BackupCommands {
    /// Export every year's record as one JSON bundle
    Export {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore a backup bundle, overwriting existing years
    Restore { path: PathBuf },
}


fn parse_price(raw: &str) -> Result<f64, String> {
    let price: f64 = raw.parse().map_err(|_| format!("'{raw}' is not a number"))?;
    if price < 0.0 || !price.is_finite() {
        return Err("total price must be zero or greater".to_string());
    }
    Ok(price)
}


/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.clone().unwrap_or_else(config::default_data_dir);
    let store = RecordStore::open(&data_dir)
        .with_context(|| format!("cannot open data directory {}", data_dir.display()))?;
    let ledger = Ledger::new(&store);

    let expected = config::load_admin_secret(store.data_dir());
    let authorize = || AuthorizedCaller::authenticate(&ledger, expected.as_ref(), cli.secret.as_deref());

    match cli.command {
        Some(Commands::Years) => commands::years::list(&store),
        Some(Commands::CreateYear { year }) => commands::years::create(&store, year),
        Some(Commands::CopyMembers { source_year, target_year }) => {
            commands::years::copy_members(&authorize()?, source_year, target_year)
        }
        Some(Commands::Member { command }) => match command {
            MemberCommands::Add { year, name } => {
                commands::member::add(&authorize()?, year, &name)
            }
            MemberCommands::Remove { year, name } => {
                commands::member::remove(&authorize()?, year, &name)
            }
        },
        Some(Commands::Payment { command }) => match command {
            PaymentCommands::Set { year, member, month, status } => {
                commands::payment::set(&authorize()?, year, &member, month, status.value())
            }
            PaymentCommands::Bulk { year, member, start, months, status } => {
                commands::payment::bulk(&authorize()?, year, &member, start, months as usize, status.value())
            }
        },
        Some(Commands::Settings { year, total_price, max_slots }) => {
            commands::settings::update(&authorize()?, year, total_price, max_slots)
        }
        Some(Commands::Summary { year }) => commands::summary::run(&store, year),
        Some(Commands::History { year, member, limit }) => {
            commands::history::run(&ledger, year, member.as_deref(), limit)
        }
        Some(Commands::Export { year, output }) => {
            commands::export::csv(&store, year, output)
        }
        Some(Commands::Backup { command }) => match command {
            BackupCommands::Export { output } => commands::backup::export(&store, output),
            BackupCommands::Restore { path } => commands::backup::restore(&authorize()?, &path),
        },
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
