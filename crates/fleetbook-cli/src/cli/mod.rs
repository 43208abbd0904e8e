//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use fleetbook_core::domain::{BookingId, CustomerId, TaxiId};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "fleetbook",
    bin_name = "fleetbook",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Taxi bookings for a small fleet",
    long_about = "Fleetbook registers customers and taxis and admits bookings, \
                  one taxi per customer per day, never double-booked.",
    after_help = "EXAMPLES:\n\
        \x20 fleetbook customer add --name Bob --email bob@x.com --phone 01225593234\n\
        \x20 fleetbook taxi add --seats 4 --reg AB12CDE\n\
        \x20 fleetbook booking create --customer 1 --taxi 1 --date 2099-01-01\n\
        \x20 fleetbook booking list --output-format json",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register and look up customers.
    #[command(
        subcommand,
        visible_alias = "c",
        about = "Manage customers",
        after_help = "EXAMPLES:\n\
            \x20 fleetbook customer add --name Bob --email bob@x.com --phone 01225593234\n\
            \x20 fleetbook customer find-email bob@x.com"
    )]
    Customer(CustomerCommands),

    /// Register and look up taxis.
    #[command(
        subcommand,
        visible_alias = "t",
        about = "Manage taxis",
        after_help = "EXAMPLES:\n\
            \x20 fleetbook taxi add --seats 4 --reg AB12CDE\n\
            \x20 fleetbook taxi update 1 --seats 6"
    )]
    Taxi(TaxiCommands),

    /// Create, change and cancel bookings.
    #[command(
        subcommand,
        visible_alias = "b",
        about = "Manage bookings",
        after_help = "EXAMPLES:\n\
            \x20 fleetbook booking create --customer 1 --taxi 1 --date 2099-01-01\n\
            \x20 fleetbook booking update 3 --date 2099-01-02\n\
            \x20 fleetbook booking by-taxi 1"
    )]
    Booking(BookingCommands),

    /// Initialise a Fleetbook configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 fleetbook init           # platform config location\n\
            \x20 fleetbook init --local   # .fleetbook.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 fleetbook completions bash > ~/.local/share/bash-completion/completions/fleetbook\n\
            \x20 fleetbook completions zsh  > ~/.zfunc/_fleetbook"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Fleetbook configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 fleetbook config get store.data_dir\n\
            \x20 fleetbook config list"
    )]
    Config(ConfigCommands),
}

// ── customer ──────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum CustomerCommands {
    /// Register a new customer.
    Add {
        #[arg(long, value_name = "NAME")]
        name: String,
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PHONE", help = "0 followed by 10 digits")]
        phone: String,
    },
    /// List customers by name.
    #[command(visible_alias = "ls")]
    List,
    /// Show one customer.
    Show { id: CustomerId },
    /// Change a customer's details; omitted fields are kept.
    Update {
        id: CustomerId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Customers are retained; this reports the record and changes nothing.
    Delete { id: CustomerId },
    /// Look a customer up by email.
    FindEmail { email: String },
}

// ── taxi ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum TaxiCommands {
    /// Register a new taxi.
    Add {
        #[arg(long, value_name = "SEATS", help = "Seat count, 2 to 20")]
        seats: u32,
        #[arg(long, value_name = "REG", help = "Registration, exactly 7 characters")]
        reg: String,
    },
    /// List taxis by registration.
    #[command(visible_alias = "ls")]
    List,
    /// Show one taxi.
    Show { id: TaxiId },
    /// Change a taxi's details; omitted fields are kept.
    Update {
        id: TaxiId,
        #[arg(long)]
        seats: Option<u32>,
        #[arg(long)]
        reg: Option<String>,
    },
    /// Remove a taxi from the fleet.
    Delete {
        id: TaxiId,
        #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
        yes: bool,
    },
    /// Look a taxi up by registration.
    FindReg { reg: String },
}

// ── booking ───────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum BookingCommands {
    /// Book a taxi for a customer on a future date.
    Create {
        #[arg(long, value_name = "ID")]
        customer: CustomerId,
        #[arg(long, value_name = "ID")]
        taxi: TaxiId,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: NaiveDate,
    },
    /// List bookings by date.
    #[command(visible_alias = "ls")]
    List,
    /// Show one booking.
    Show { id: BookingId },
    /// Change a booking; omitted fields are kept.
    Update {
        id: BookingId,
        #[arg(long, value_name = "ID")]
        customer: Option<CustomerId>,
        #[arg(long, value_name = "ID")]
        taxi: Option<TaxiId>,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
    /// Cancel a booking.
    Delete {
        id: BookingId,
        #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
        yes: bool,
    },
    /// Bookings of one customer, by date.
    ByCustomer { customer: CustomerId },
    /// Bookings of one taxi, by date.
    ByTaxi { taxi: TaxiId },
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `fleetbook init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.fleetbook.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `fleetbook completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `fleetbook config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `store.data_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_booking_create() {
        let cli = Cli::parse_from([
            "fleetbook",
            "booking",
            "create",
            "--customer",
            "1",
            "--taxi",
            "2",
            "--date",
            "2099-01-01",
        ]);
        match cli.command {
            Commands::Booking(BookingCommands::Create {
                customer,
                taxi,
                date,
            }) => {
                assert_eq!(customer, CustomerId::new(1));
                assert_eq!(taxi, TaxiId::new(2));
                assert_eq!(date, NaiveDate::from_ymd_opt(2099, 1, 1).unwrap());
            }
            other => panic!("expected booking create, got {other:?}"),
        }
    }

    #[test]
    fn malformed_date_is_a_parse_error() {
        let result = Cli::try_parse_from([
            "fleetbook",
            "booking",
            "create",
            "--customer",
            "1",
            "--taxi",
            "2",
            "--date",
            "01/01/2099",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn update_fields_are_optional() {
        let cli = Cli::parse_from(["fleetbook", "taxi", "update", "3", "--seats", "6"]);
        match cli.command {
            Commands::Taxi(TaxiCommands::Update { id, seats, reg }) => {
                assert_eq!(id, TaxiId::new(3));
                assert_eq!(seats, Some(6));
                assert_eq!(reg, None);
            }
            other => panic!("expected taxi update, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "fleetbook",
            "customer",
            "list",
            "--data-dir",
            "/tmp/fleet",
            "--output-format",
            "json",
        ]);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
        assert_eq!(
            cli.global.data_dir.as_deref(),
            Some(std::path::Path::new("/tmp/fleet"))
        );
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["fleetbook", "--quiet", "--verbose", "taxi", "list"]);
        assert!(result.is_err());
    }
}
