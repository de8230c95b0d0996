use clap::{Parser, Subcommand};

/// Command-line interface definition for kviktime
/// CLI application to compute flex-time balances with SQLite
#[derive(Parser)]
#[command(
    name = "kviktime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Flex-time balances: contract targets, worked shifts and yearly running balance",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pin "today" (YYYY-MM-DD) for reproducible balances
    #[arg(global = true, long = "today", hide = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Manage a user's contract settings
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Record worked shifts
    Shift {
        #[command(subcommand)]
        action: ShiftAction,
    },

    /// Record a manual balance adjustment
    Adjust {
        #[arg(long = "user", help = "User ID (UUID)")]
        user: String,

        /// Effective date of the adjustment (YYYY-MM-DD)
        date: String,

        #[arg(
            long = "delta",
            allow_hyphen_values = true,
            help = "Signed correction in minutes (e.g. -90)"
        )]
        delta: i64,

        #[arg(long = "note", help = "Free-text reason")]
        note: Option<String>,
    },

    /// Print the flex balances of a user
    Balance {
        #[arg(long = "user", help = "User ID (UUID)")]
        user: String,

        #[arg(long = "year", help = "Year (default: current year)")]
        year: Option<i32>,

        #[arg(long = "month", help = "Month 1-12 (default: current month)")]
        month: Option<u32>,

        #[arg(long = "json", help = "Print balances as JSON")]
        json: bool,
    },

    /// Export all data of a user as a JSON bundle
    Export {
        #[arg(long = "user", help = "User ID (UUID)")]
        user: String,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create or update contract settings
    Set {
        #[arg(long = "user", help = "User ID (UUID)")]
        user: String,

        #[arg(long = "hours", help = "Weekly full-time hours (default 40)")]
        hours: Option<f64>,

        #[arg(long = "percent", help = "Contract percent 0-100 (default 100)")]
        percent: Option<f64>,

        #[arg(
            long = "opening",
            allow_hyphen_values = true,
            help = "Opening flex balance in minutes"
        )]
        opening: Option<i64>,

        #[arg(long = "start", help = "Tracking start date (YYYY-MM-DD)")]
        start: Option<String>,

        #[arg(
            long = "no-tracking",
            conflicts_with = "start",
            help = "Clear the tracking start date"
        )]
        no_tracking: bool,
    },

    /// Show contract settings
    Show {
        #[arg(long = "user", help = "User ID (UUID)")]
        user: String,
    },
}

#[derive(Subcommand)]
pub enum ShiftAction {
    /// Add a shift to the day's entry
    Add {
        #[arg(long = "user", help = "User ID (UUID)")]
        user: String,

        /// Date of the entry (YYYY-MM-DD)
        date: String,

        #[arg(long = "in", help = "Start time (HH:MM)")]
        start: String,

        #[arg(long = "out", help = "End time (HH:MM)")]
        end: String,

        #[arg(long = "break", default_value_t = 0, help = "Unpaid break in minutes")]
        unpaid_break: i64,

        #[arg(
            long = "kind",
            default_value = "work",
            help = "Entry type: work or travel"
        )]
        kind: String,
    },
}
