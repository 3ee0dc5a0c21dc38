//! Command-line front end for the Lunchly core.
//!
//! # Responsibility
//! - Turn raw command-line text into typed calls on the core services.
//! - Print results as plain text; all business rules live in `lunchly_core`.
//!
//! # Usage
//!
//! ```bash
//! lunchly add-customer --first Jane --last Smith --phone 555-0100
//! lunchly reserve 1 --guests 4 --start-at 2024-06-01T19:30
//! lunchly search "Jane Smith"
//! lunchly best
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use lunchly_core::db::open_db;
use lunchly_core::{
    default_log_level, init_logging, parse_num_guests, parse_start_at, CustomerService,
    ReservationService, SqliteCustomerRepository, SqliteReservationRepository,
};
use std::path::PathBuf;

const DB_PATH_DEFAULT: &str = "lunchly.sqlite3";

#[derive(Parser, Debug)]
#[command(name = "lunchly")]
#[command(about = "Manage restaurant customers and reservations")]
#[command(version)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "LUNCHLY_DB", default_value = DB_PATH_DEFAULT)]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "LUNCHLY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "LUNCHLY_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check core linkage
    Ping,
    /// List all customers by last name
    Customers,
    /// Add a customer
    AddCustomer {
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Replace a customer's details
    EditCustomer {
        id: i64,
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show a customer and their reservations
    Show { id: i64 },
    /// Book a reservation for a customer
    Reserve {
        customer_id: i64,
        #[arg(long)]
        guests: String,
        /// Defaults to now when omitted
        #[arg(long)]
        start_at: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Change guest count, start time and notes of a reservation
    EditReservation {
        id: i64,
        #[arg(long)]
        guests: String,
        #[arg(long)]
        start_at: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a reservation
    DeleteReservation { id: i64 },
    /// Find a customer id by "First Last"
    Search { name: String },
    /// Top ten customers by reservation count
    Best,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    if let Commands::Ping = cli.command {
        println!("lunchly_core ping={}", lunchly_core::ping());
        println!("lunchly_core version={}", lunchly_core::core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let reservations = ReservationService::new(SqliteReservationRepository::try_new(&conn)?);
    let customers = CustomerService::new(SqliteCustomerRepository::try_new(&conn)?, reservations);

    match cli.command {
        // Answered above without touching the database.
        Commands::Ping => {}
        Commands::Customers => {
            for customer in customers.list_all()? {
                println!(
                    "{}\t{}",
                    customer.id().unwrap_or_default(),
                    customer.full_name()
                );
            }
        }
        Commands::AddCustomer {
            first,
            last,
            phone,
            notes,
        } => {
            let customer =
                customers.create_customer(&first, &last, phone.as_deref(), notes.as_deref())?;
            println!("added customer {}", customer.id().unwrap_or_default());
        }
        Commands::EditCustomer {
            id,
            first,
            last,
            phone,
            notes,
        } => {
            let customer =
                customers.update_details(id, &first, &last, phone.as_deref(), notes.as_deref())?;
            println!("updated customer {} ({})", id, customer.full_name());
        }
        Commands::Show { id } => {
            let customer = customers.get_by_id(id)?;
            println!("{}", customer.full_name());
            if let Some(phone) = customer.phone.as_deref() {
                println!("phone: {phone}");
            }
            if !customer.notes().is_empty() {
                println!("notes: {}", customer.notes());
            }
            for reservation in customers.get_reservations(&customer)? {
                println!(
                    "  #{} {} guests={} {}",
                    reservation.id().unwrap_or_default(),
                    reservation.formatted_start_at(),
                    reservation.num_guests(),
                    reservation.notes()
                );
            }
        }
        Commands::Reserve {
            customer_id,
            guests,
            start_at,
            notes,
        } => {
            let num_guests = parse_num_guests(&guests)?;
            let start_at = start_at.as_deref().map(parse_start_at).transpose()?;
            let reservation = customers.reservations().create_reservation(
                customer_id,
                num_guests,
                start_at,
                notes.as_deref(),
            )?;
            println!(
                "booked reservation {} for {}",
                reservation.id().unwrap_or_default(),
                reservation.formatted_start_at()
            );
        }
        Commands::EditReservation {
            id,
            guests,
            start_at,
            notes,
        } => {
            let num_guests = parse_num_guests(&guests)?;
            let start_at = parse_start_at(&start_at)?;
            let reservations = customers.reservations();
            let mut reservation = reservations.get_by_id(id)?;
            reservations.edit_reservation(&mut reservation, num_guests, start_at, notes.as_deref())?;
            println!("updated reservation {id}");
        }
        Commands::DeleteReservation { id } => {
            let reservations = customers.reservations();
            let reservation = reservations.get_by_id(id)?;
            reservations.delete(reservation)?;
            println!("deleted reservation {id}");
        }
        Commands::Search { name } => {
            println!("{}", customers.get_id_by_name(&name)?);
        }
        Commands::Best => {
            for row in customers.get_best_customers()? {
                println!(
                    "{}\t{} {}\t{}",
                    row.id, row.first_name, row.last_name, row.num_reservations
                );
            }
        }
    }

    Ok(())
}
