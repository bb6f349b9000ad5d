//! CRM maintenance jobs.
//!
//! Each subcommand is one stateless, run-to-completion job that talks to
//! the CRM GraphQL endpoint over HTTP and appends timestamped lines to its
//! log file. Scheduling is left to an external scheduler (cron, systemd
//! timers); intended cadences:
//!
//! ```text
//! */5 * * * *   crm-jobs heartbeat
//! 0 */12 * * *  crm-jobs low-stock
//! 0 6 * * 1     crm-jobs report
//! 30 8 * * *    crm-jobs order-reminders
//! ```
//!
//! Endpoint failures are never fatal: the job logs a failure line and exits
//! normally so the scheduler does not see spurious errors. Only an
//! unwritable log file exits non-zero.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod client;
mod heartbeat;
mod logfile;
mod low_stock;
mod reminders;
mod report;

use client::GraphqlClient;

#[derive(Parser)]
#[command(name = "crm-jobs")]
#[command(author, version, about = "Scheduled CRM maintenance jobs")]
struct Cli {
    /// GraphQL endpoint the jobs talk to
    #[arg(
        long,
        env = "GRAPHQL_URL",
        default_value = "http://localhost:8000/graphql",
        global = true
    )]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the endpoint's hello field and log a liveness line
    Heartbeat {
        /// Log file to append to
        #[arg(long, default_value = "/tmp/crm_heartbeat_log.txt")]
        log_file: PathBuf,
    },
    /// Invoke the low-stock restock mutation and log the updated products
    LowStock {
        /// Log file to append to
        #[arg(long, default_value = "/tmp/low_stock_updates_log.txt")]
        log_file: PathBuf,
    },
    /// Aggregate customer and order totals into a report line
    Report {
        /// Log file to append to
        #[arg(long, default_value = "/tmp/crm_report_log.txt")]
        log_file: PathBuf,
    },
    /// Log a reminder line for every order from the last 7 days
    OrderReminders {
        /// Log file to append to
        #[arg(long, default_value = "/tmp/order_reminders_log.txt")]
        log_file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "crm_jobs=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let client = GraphqlClient::new(cli.endpoint);

    let result = match cli.command {
        Commands::Heartbeat { log_file } => heartbeat::run(&client, &log_file).await,
        Commands::LowStock { log_file } => low_stock::run(&client, &log_file).await,
        Commands::Report { log_file } => report::run(&client, &log_file).await,
        Commands::OrderReminders { log_file } => reminders::run(&client, &log_file).await,
    };

    if let Err(err) = result {
        tracing::error!(%err, "could not write job log file");
        std::process::exit(1);
    }
}
